/**
 * SDK-wide constants.
 *
 * The endpoint paths are fixed by the trak.io v1 API. The host can be
 * overridden through `Options::api_host`.
 */

/// Host used when `Options::api_host` is left at its default.
pub const DEFAULT_API_HOST: &str = "api.trak.io";

/// Environment variable consulted when no API key was configured in code.
pub const API_KEY_ENV: &str = "TRAK_API_KEY";

pub const IDENTIFY_PATH: &str = "/v1/identify";
pub const ALIAS_PATH: &str = "/v1/alias";
pub const TRACK_PATH: &str = "/v1/track";
pub const ANNOTATE_PATH: &str = "/v1/annotate";

/// Event name used by `page_view` unless the caller overrides it.
pub const PAGE_VIEW_EVENT: &str = "Page view";

/// Sent as the `User-Agent` header on every request.
/// Derived at compile time from the `trak` package version in `Cargo.toml`.
pub const CLIENT_VERSION: &str = concat!("trak-rust/", env!("CARGO_PKG_VERSION"));
