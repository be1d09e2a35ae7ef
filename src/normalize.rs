//!
//! src/normalize.rs
//!
//! Maps the decoded platform links onto the labeled provider list the
//! picker shows, closing it with the canonical song.link page
//!

use indexmap::IndexMap;

use crate::decode::DecodedResponse;
use crate::types::{Provider, ResolutionResult, CANONICAL_ID};

/// Labels that derivation would get wrong, consulted first
const CURATED_LABELS: [(&str, &str); 3] = [
    ("soundcloud", "SoundCloud"),
    ("yandex", "Yandex Music"),
    ("google", "Google Music"),
];

fn curated_label(key: &str) -> Option<&'static str> {
    CURATED_LABELS.iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
}

fn is_word_boundary(chars: &[char], i: usize) -> bool {
    let prev = chars[i - 1];
    let cur = chars[i];

    // "XMLHttp" splits before "Http"
    let acronym_end = prev.is_uppercase()
        && cur.is_uppercase()
        && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
    let case_rise = cur.is_uppercase() && !prev.is_uppercase();
    let class_change = prev.is_alphabetic() && !cur.is_alphabetic();

    acronym_end || case_rise || class_change
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new()
    }
}

/// Human label for a platform key with no curated entry,
/// e.g. `appleMusic` -> `Apple Music`, `SOUNDCLOUD` -> `Soundcloud`
pub fn derive_label(platform_key: &str) -> String {
    let chars: Vec<char> = platform_key.chars().collect();
    let mut spaced = String::with_capacity(platform_key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && is_word_boundary(&chars, i) {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    spaced.split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn provider_label(platform_key: &str) -> String {
    curated_label(platform_key)
        .map(str::to_string)
        .unwrap_or_else(|| derive_label(platform_key))
}

/// Never fails; an empty link set still yields the canonical page
pub fn normalize(decoded: DecodedResponse) -> ResolutionResult {
    let mut by_id: IndexMap<String, Provider> = IndexMap::new();

    for link in decoded.links {
        if link.platform_key == CANONICAL_ID {
            continue;
        }
        let provider = Provider {
            label: provider_label(&link.platform_key),
            id: link.platform_key.clone(),
            url: link.url,
            native_app_uri_mobile: link.native_app_uri_mobile,
            native_app_uri_desktop: link.native_app_uri_desktop,
        };
        by_id.insert(link.platform_key, provider);
    }

    let mut providers: Vec<Provider> = by_id.into_values().collect();
    providers.push(Provider::new(CANONICAL_ID, CANONICAL_ID, decoded.page_url));

    ResolutionResult { providers, track: decoded.track }
}
