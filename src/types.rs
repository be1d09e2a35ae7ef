use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel id and label of the canonical song.link page
pub const CANONICAL_ID: &str = "song.link";

// Opaque identifier of a track on its source provider, usually a share url
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackReference(pub String);

impl TrackReference {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackReference {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub label: String,
    pub url: String,
    // deep links into the provider's own app, when the lookup knows them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_app_uri_mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_app_uri_desktop: Option<String>
}

impl Provider {
    /// Web link only, no app deep links
    pub fn new(id: impl Into<String>, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: url.into(),
            native_app_uri_mobile: None,
            native_app_uri_desktop: None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub thumbnail_url: Option<String>
}

/// Providers unique by id, canonical page last
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub providers: Vec<Provider>,
    pub track: Option<TrackMetadata>
}

impl ResolutionResult {
    pub fn find(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    /// Labels in picker order
    pub fn labels(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn canonical(&self) -> Option<&Provider> {
        self.providers.last().filter(|p| p.id == CANONICAL_ID)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
