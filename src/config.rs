use url::Url;
use std::time;
use crate::ResolveError;

/// Constants for HTTP Config
pub const HTTP_TIMEOUT: u64 = 8000;
pub const HTTP_CONNECT_TIMEOUT: u64 = 2000;
pub const HTTP_POOL_MAX_IDLE: usize = 4;
pub const HTTP_POOL_IDLE_TIMEOUT: u64 = 90000;
pub const HTTP_MAX_REDIRECTS: u8 = 4;

/// Constants for the lookup endpoint
pub const LOOKUP_BASE_URL: &str = "https://api.song.link/v1-alpha.1/links";
pub const LOOKUP_API_KEY: &str = "";

/// Wrapper over env::var that treats blank values as unset
fn env_opt(s: &str) -> Option<String> {
    match std::env::var(s) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Ensures that url is https
fn ensure_https(url: &Url) -> Result<(), String> {
    if url.scheme() == "https" {
        Ok(())
    } else {
        Err(format!("URL must be https: {url}"))
    }
}

/// Country codes are two ascii letters, stored upper case
fn parse_country(raw: &str) -> Result<String, String> {
    let code = raw.trim();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(format!("invalid country code: {raw}"))
    }
}

///
/// Configuration for the song.link lookup endpoint
///
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub base_url: Url,                // https://api.song.link/v1-alpha.1/links
    pub api_key: String,              // empty means unauthenticated
    pub user_country: Option<String>, // ISO 3166-1 alpha-2
    pub user_agent: String,
}

impl LookupConfig {
    /// Lookup config against an arbitrary base, no key and no country
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: LOOKUP_API_KEY.to_string(),
            user_country: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        // constant is a valid absolute url
        let base_url = Url::parse(LOOKUP_BASE_URL)
            .unwrap_or_else(|_| unreachable!("LOOKUP_BASE_URL is malformed"));
        Self::new(base_url)
    }
}

fn default_user_agent() -> String {
    format!("songlink-resolver/{}", env!("CARGO_PKG_VERSION"))
}

fn build_lookup() -> Result<LookupConfig, ResolveError> {
    let base_url = env_opt("SONGLINK_API_BASE")
        .unwrap_or_else(|| LOOKUP_BASE_URL.to_string());

    let base_url = Url::parse(&base_url)
        .map_err(|e| ResolveError::Config(
            format!("SONGLINK_API_BASE invalid {e}")
        ))?;

    ensure_https(&base_url)
        .map_err(ResolveError::Config)?;

    let api_key = env_opt("SONGLINK_API_KEY")
        .unwrap_or_else(|| LOOKUP_API_KEY.to_string());

    let user_country = env_opt("SONGLINK_USER_COUNTRY")
        .map(|c| parse_country(&c))
        .transpose()
        .map_err(ResolveError::Config)?;

    let user_agent = env_opt("SONGLINK_USER_AGENT")
        .unwrap_or_else(default_user_agent);

    Ok( LookupConfig { base_url, api_key, user_country, user_agent } )
}

///
/// Configuration for Http timeouts, pooling, etc.
///
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: time::Duration,
    pub connect_timeout: time::Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: time::Duration,
    pub max_redirects: u8,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: time::Duration::from_millis(HTTP_TIMEOUT),
            connect_timeout: time::Duration::from_millis(HTTP_CONNECT_TIMEOUT),
            pool_max_idle_per_host: HTTP_POOL_MAX_IDLE,
            pool_idle_timeout: time::Duration::from_millis(HTTP_POOL_IDLE_TIMEOUT),
            max_redirects: HTTP_MAX_REDIRECTS,
        }
    }
}

fn build_http() -> HttpConfig {
    let env_to_millis = |s: &str, default: time::Duration| -> time::Duration {
        match env_opt(s).map(|v| v.parse::<u64>()) {
            Some(Ok(ms)) => time::Duration::from_millis(ms),
            _ => default
        }
    };

    let defaults = HttpConfig::default();
    HttpConfig {
        timeout: env_to_millis("SONGLINK_HTTP_TIMEOUT_MS", defaults.timeout),
        connect_timeout: env_to_millis(
            "SONGLINK_HTTP_CONNECT_TIMEOUT_MS",
            defaults.connect_timeout
        ),
        ..defaults
    }
}

///
/// Configuration for Logger
///

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter_directives: String,
    pub format: LogFormat,
    pub with_ansi: bool,
    pub include_file_line: bool,
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter_directives: "info,songlink_resolver=debug,reqwest=warn".to_string(),
            format: LogFormat::Json,
            with_ansi: false,
            include_file_line: true,
            include_target: true,
        }
    }
}

fn build_logging() -> LoggingConfig {
    let mut logging = LoggingConfig::default();
    if let Some(format) = env_opt("SONGLINK_LOG_FORMAT") {
        if format.eq_ignore_ascii_case("pretty") {
            logging.format = LogFormat::Pretty;
            logging.with_ansi = true;
        }
    }
    logging
}

///
/// AppConfig which holds everything a session needs
///
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub lookup: LookupConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig
}

///
/// Read `.env` and the environment, falling back to defaults.
///
pub fn load_config() -> Result<AppConfig, ResolveError> {
    dotenvy::dotenv().ok();

    let lookup  = build_lookup()?;
    let http    = build_http();
    let logging = build_logging();

    Ok( AppConfig { lookup, http, logging } )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_is_required() {
        let plain = Url::parse("http://api.song.link/v1-alpha.1/links").unwrap();
        assert!(ensure_https(&plain).is_err());

        let secure = Url::parse(LOOKUP_BASE_URL).unwrap();
        assert!(ensure_https(&secure).is_ok());
    }

    #[test]
    fn country_codes_are_normalized() {
        assert_eq!(parse_country("us").unwrap(), "US");
        assert_eq!(parse_country(" gb ").unwrap(), "GB");
        assert!(parse_country("usa").is_err());
        assert!(parse_country("1a").is_err());
    }

    #[test]
    fn defaults_point_at_public_api() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.lookup.base_url.as_str(), LOOKUP_BASE_URL);
        assert!(cfg.lookup.api_key.is_empty());
        assert!(cfg.lookup.user_country.is_none());
        assert!(cfg.lookup.user_agent.starts_with("songlink-resolver/"));
        assert_eq!(cfg.http.timeout, time::Duration::from_millis(HTTP_TIMEOUT));
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }
}
