use log::{info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::storage::{API_URL_KEY, LocalStore};

pub const FALLBACK_API_URL: &str = "http://localhost:3000";

/// Base address baked in at build time, falling back to the local dev server.
pub fn default_api_url() -> &'static str {
    option_env!("APPLYTRACK_API_URL").unwrap_or(FALLBACK_API_URL)
}

/// Adds a scheme when missing and drops trailing slashes.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))
}

/// Where the effective API base address came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    CommandLine,
    Saved,
    Default,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub source: UrlSource,
}

impl ApiConfig {
    /// Precedence: one-shot command-line value, then the saved override, then the build default.
    /// An unparsable saved value is skipped so `settings reset` stays reachable.
    pub fn resolve(store: &LocalStore, cli_override: Option<&str>) -> Result<Self> {
        if let Some(raw) = cli_override.filter(|s| !s.trim().is_empty()) {
            return Ok(Self { base_url: parse_url(&normalize_url(raw))?, source: UrlSource::CommandLine });
        }
        if let Some(saved) = store.get(API_URL_KEY).filter(|s| !s.trim().is_empty()) {
            match parse_url(saved) {
                Ok(base_url) => return Ok(Self { base_url, source: UrlSource::Saved }),
                Err(e) => warn!("ignoring saved API URL: {e}"),
            }
        }
        let base_url = match parse_url(default_api_url()) {
            Ok(url) => url,
            Err(e) => {
                warn!("ignoring build-time API URL: {e}");
                parse_url(FALLBACK_API_URL)?
            }
        };
        Ok(Self { base_url, source: UrlSource::Default })
    }

    /// Persist a new override. Returns the normalized value that was stored.
    pub fn save_override(store: &mut LocalStore, raw: &str) -> Result<String> {
        if raw.trim().is_empty() {
            return Err(Error::validation("L'URL de l'API est requise."));
        }
        let normalized = normalize_url(raw);
        parse_url(&normalized)?;
        store.set(API_URL_KEY, normalized.clone())?;
        info!("API URL override set to {normalized}");
        Ok(normalized)
    }

    pub fn reset_override(store: &mut LocalStore) -> Result<()> {
        store.remove(API_URL_KEY)?;
        info!("API URL override cleared");
        Ok(())
    }
}
