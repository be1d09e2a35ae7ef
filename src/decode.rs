//!
//! src/decode.rs
//!
//! Turns a raw lookup body into a `DecodedResponse`. Only this module
//! knows the wire schema (v1-alpha.1, flat platform map); everything
//! downstream sees the decoded form.
//!

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::DecodeError;
use crate::types::TrackMetadata;

// Only pageUrl and linksByPlatform (and each link's url) are typed; the
// advisory fields stay raw Values so a wrong type reads as absent instead
// of failing the lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    page_url: String,
    links_by_platform: IndexMap<String, WireLink>,
    #[serde(default)]
    entity_unique_id: Option<Value>,
    #[serde(default)]
    entities_by_unique_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLink {
    url: String,
    #[serde(default)]
    native_app_uri_mobile: Option<Value>,
    #[serde(default)]
    native_app_uri_desktop: Option<Value>,
}

/// One provider link exactly as the lookup service reported it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLinkEntry {
    pub platform_key: String,
    pub url: String,
    pub native_app_uri_mobile: Option<String>,
    pub native_app_uri_desktop: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedResponse {
    pub page_url: String,
    /// Payload order, unfiltered, one entry per platform key
    pub links: Vec<RawLinkEntry>,
    pub track: Option<TrackMetadata>,
}

/// Non-empty string, anything else is treated as missing
fn as_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn track_metadata(
    entity_id: Option<&Value>,
    entities: Option<&Value>
) -> Option<TrackMetadata> {
    let entity_id = as_string(entity_id)?;
    // Value::get on a non-object is None
    let entity = entities?.get(entity_id.as_str())?;
    let meta = TrackMetadata {
        title: as_string(entity.get("title")),
        artist_name: as_string(entity.get("artistName")),
        thumbnail_url: as_string(entity.get("thumbnailUrl")),
    };

    if meta.title.is_none() && meta.artist_name.is_none() && meta.thumbnail_url.is_none() {
        None
    } else {
        Some(meta)
    }
}

pub fn decode(bytes: &[u8]) -> Result<DecodedResponse, DecodeError> {
    let wire: WireResponse = serde_json::from_slice(bytes)?;

    if wire.page_url.trim().is_empty() {
        return Err(DecodeError::SchemaMismatch("pageUrl is empty".to_string()));
    }

    let track = track_metadata(
        wire.entity_unique_id.as_ref(),
        wire.entities_by_unique_id.as_ref()
    );

    let links = wire.links_by_platform
        .into_iter()
        .map(|(platform_key, link)| RawLinkEntry {
            platform_key,
            url: link.url,
            native_app_uri_mobile: as_string(link.native_app_uri_mobile.as_ref()),
            native_app_uri_desktop: as_string(link.native_app_uri_desktop.as_ref()),
        })
        .collect();

    Ok( DecodedResponse { page_url: wire.page_url, links, track } )
}
