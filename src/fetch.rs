//!
//! src/fetch.rs
//!
//! Defines the single lookup request against the song.link api and
//! returns the unparsed body, or the classified reason it failed.
//! No retries here; a failed lookup is reported once and left to the caller.
//!

use async_trait::async_trait;
use reqwest::{Client, header, redirect, RequestBuilder};
use tracing::{debug, warn};

use crate::config::{HttpConfig, LookupConfig};
use crate::errors::{FetchError, ResolveError};
use crate::types::TrackReference;

/// Source of raw lookup bodies. Sessions are generic over this so hosts
/// and tests can substitute their own transport.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Exactly one outbound call per invocation
    async fn fetch(&self, track: &TrackReference) -> Result<Vec<u8>, FetchError>;
}

/// Client building functionality
fn client_helper(http: &HttpConfig) -> reqwest::ClientBuilder {
    Client::builder()
        .timeout(http.timeout)
        .connect_timeout(http.connect_timeout)
        .pool_max_idle_per_host(http.pool_max_idle_per_host)
        .pool_idle_timeout(Some(http.pool_idle_timeout))
        .redirect(redirect::Policy::limited(http.max_redirects as usize))
}

fn client_with_headers_and_agent(
    http: &HttpConfig,
    headers: header::HeaderMap,
    user_agent: &str
) -> Result<Client, ResolveError> {
    client_helper(http)
        .default_headers(headers)
        .user_agent(user_agent)
        .build()
        .map_err(|e| ResolveError::Config(format!("build client: {e}")))
}

/// Cheap to clone; clones share one connection pool
#[derive(Clone, Debug)]
pub struct LookupClient {
    pub http: Client,
    pub cfg: LookupConfig
}

impl LookupClient {
    pub fn new(http_config: &HttpConfig, cfg: &LookupConfig) ->
        Result<Self, ResolveError> {

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json")
        );
        let http = client_with_headers_and_agent(http_config, headers, &cfg.user_agent)?;

        Ok( Self { http, cfg: cfg.clone() } )
    }

    /// GET {base}?key=...&url=...&userCountry=...
    pub fn lookup(&self, track: &TrackReference) -> RequestBuilder {
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(3);
        if !self.cfg.api_key.is_empty() {
            query.push(("key", self.cfg.api_key.as_str()));
        }
        query.push(("url", track.as_str()));
        if let Some(country) = self.cfg.user_country.as_deref() {
            query.push(("userCountry", country));
        }

        self.http.get(self.cfg.base_url.clone()).query(&query)
    }
}

#[async_trait]
impl Fetch for LookupClient {
    async fn fetch(&self, track: &TrackReference) -> Result<Vec<u8>, FetchError> {
        let response = self.lookup(track)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, timeout = e.is_timeout(), "fetch.transport");
                FetchError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "fetch.status");
            return Err(FetchError::Server { code: status.as_u16() });
        }

        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "fetch.ok");
        Ok(body.to_vec())
    }
}
