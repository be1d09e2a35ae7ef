//!
//! src/session.rs
//!
//! Defines the resolution session: the one entry point a host calls when
//! a track url is shared. Runs fetch -> decode -> normalize once and
//! serves the memoized result afterwards.
//!

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::cache::ResolutionCache;
use crate::config::AppConfig;
use crate::decode::decode;
use crate::errors::ResolveError;
use crate::fetch::{Fetch, LookupClient};
use crate::normalize::normalize;
use crate::types::{ResolutionResult, TrackReference};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Fetching,
    Decoding,
    Normalizing,
    Cached,
    Failed { reason: ResolveError }
}

pub struct Session<F: Fetch = LookupClient> {
    fetcher: F,
    cache: ResolutionCache,
    state: SessionState,

    // abandons an in-flight lookup when the host tears the session down
    shutdown: CancellationToken
}

impl Session<LookupClient> {
    pub fn from_config(cfg: &AppConfig) -> Result<Self, ResolveError> {
        let client = LookupClient::new(&cfg.http, &cfg.lookup)?;
        Ok( Self::new(client) )
    }
}

impl<F: Fetch> Session<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            cache: ResolutionCache::new(),
            state: SessionState::Idle,
            shutdown: CancellationToken::new()
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Cancelling the returned token makes an in-flight `resolve` return
    /// `ResolveError::Cancelled` and drops its connection.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Resolve `track_url` into the provider list. Served from the cache
    /// after the first success for the same url. Failures are never cached,
    /// so calling again after an error re-runs the lookup.
    #[instrument(skip_all, fields(track = %track_url))]
    pub async fn resolve(&mut self, track_url: &str) ->
        Result<ResolutionResult, ResolveError> {

        let track = TrackReference::new(track_url);
        if let Some(hit) = self.cache.get(&track) {
            debug!(providers = hit.len(), "resolve.cache_hit");
            self.state = SessionState::Cached;
            return Ok(hit.clone());
        }

        match self.run_pipeline(&track).await {
            Ok(result) => {
                info!(providers = result.len(), "resolve.done");
                self.cache.put(track, result.clone());
                self.state = SessionState::Cached;
                Ok(result)
            },
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), state = ?self.state, "resolve.failed");
                self.state = SessionState::Failed { reason: e.clone() };
                Err(e)
            }
        }
    }

    async fn run_pipeline(&mut self, track: &TrackReference) ->
        Result<ResolutionResult, ResolveError> {

        self.state = SessionState::Fetching;
        let body = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return Err(ResolveError::Cancelled),
            fetched = self.fetcher.fetch(track) => fetched?,
        };

        self.state = SessionState::Decoding;
        let decoded = decode(&body)?;

        self.state = SessionState::Normalizing;
        Ok(normalize(decoded))
    }
}
