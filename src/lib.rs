//!
//! src/lib.rs
//!
//! Resolves a track url from one streaming service into the equivalent
//! links on every other service song.link knows about. A host creates one
//! `Session` per share action and calls `resolve` on it:
//!
//! ```no_run
//! # async fn run() -> Result<(), songlink_resolver::ResolveError> {
//! let cfgs = songlink_resolver::config::load_config()?;
//! let _log = songlink_resolver::logging::init_logging(&cfgs.logging)?;
//!
//! let mut session = songlink_resolver::Session::from_config(&cfgs)?;
//! let result = session.resolve("https://open.spotify.com/track/abc").await?;
//! for provider in &result.providers {
//!     println!("{} -> {}", provider.label, provider.url);
//! }
//! # Ok(())
//! # }
//! ```
//!

pub mod config;
pub mod errors;
pub mod logging;

pub mod action;
pub mod cache;
pub mod decode;
pub mod fetch;
pub mod normalize;
pub mod session;
pub mod types;

#[cfg(test)]
mod test_server;

pub use crate::errors::{DecodeError, ErrorKind, FetchError, ResolveError};
pub use crate::fetch::{Fetch, LookupClient};
pub use crate::session::{Session, SessionState};
pub use crate::types::{Provider, ResolutionResult, TrackMetadata, TrackReference};
