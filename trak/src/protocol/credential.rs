/**
 * API key resolution and base URL handling.
 *
 * trak.io identifies a project by an opaque API key that travels inside the
 * JSON body of every request (`{"token": ..., "data": ...}`), not in a header.
 *
 * A key can come from three places, first match wins:
 * 1. `Options::api_key` passed to the constructor.
 * 2. The process-wide default set with `set_default_api_key`.
 * 3. The `TRAK_API_KEY` environment variable.
 *
 * Empty strings count as absent at every level.
 */
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::protocol::constants::API_KEY_ENV;

// ---------------------------------------------------------------------------
// Process-wide default key
// ---------------------------------------------------------------------------

static DEFAULT_API_KEY: RwLock<Option<String>> = RwLock::new(None);

/**
 * Sets the API key used by clients constructed without an explicit one.
 *
 * Affects only clients built after the call; existing clients keep the key
 * they were created with.
 */
pub fn set_default_api_key(api_key: impl Into<String>) {
    let api_key = api_key.into();
    match DEFAULT_API_KEY.write() {
        Ok(mut slot) => *slot = Some(api_key),
        Err(poisoned) => *poisoned.into_inner() = Some(api_key),
    }
}

fn default_api_key() -> Option<String> {
    match DEFAULT_API_KEY.read() {
        Ok(slot) => slot.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/**
 * Resolves the API key for a new client.
 *
 * # Returns
 * * `Ok(key)` from the first non-empty source.
 * * `Err(Error::Configuration)` if every source is empty.
 */
pub fn resolve_api_key(explicit: Option<&str>) -> Result<String> {
    let env = std::env::var(API_KEY_ENV).ok();
    pick_api_key(explicit, default_api_key().as_deref(), env.as_deref())
}

fn pick_api_key(
    explicit: Option<&str>,
    process_default: Option<&str>,
    env: Option<&str>,
) -> Result<String> {
    [explicit, process_default, env]
        .into_iter()
        .flatten()
        .find(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::Configuration(format!(
                "api_key required: pass one in Options, call set_default_api_key, or set {API_KEY_ENV}"
            ))
        })
}

/**
 * Turns the configured host into the base URL requests are sent to.
 *
 * A bare host such as `api.trak.io` becomes `https://api.trak.io`. Values
 * that already carry a scheme are kept as-is (minus a trailing slash), which
 * lets tests and proxies point the client at plain HTTP.
 */
pub fn base_url(api_host: &str) -> Result<String> {
    let host = api_host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(Error::Configuration("api_host cannot be empty".into()));
    }

    if host.starts_with("http://") || host.starts_with("https://") {
        Ok(host.to_string())
    } else {
        Ok(format!("https://{host}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_key_wins() {
        let key = pick_api_key(Some("explicit"), Some("default"), Some("env")).unwrap();
        assert_eq!(key, "explicit");
    }

    #[test]
    fn falls_back_through_default_then_env() {
        assert_eq!(pick_api_key(None, Some("default"), Some("env")).unwrap(), "default");
        assert_eq!(pick_api_key(None, None, Some("env")).unwrap(), "env");
    }

    #[test]
    fn empty_strings_are_treated_as_missing() {
        assert_eq!(pick_api_key(Some(""), None, Some("env")).unwrap(), "env");
    }

    #[test]
    fn missing_everywhere_is_a_configuration_error() {
        let err = pick_api_key(None, None, None).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn bare_host_gets_https() {
        assert_eq!(base_url("api.trak.io").unwrap(), "https://api.trak.io");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        assert_eq!(
            base_url("http://127.0.0.1:8080/").unwrap(),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn empty_host_is_rejected() {
        assert!(matches!(base_url("  "), Err(Error::Configuration(_))));
    }
}
