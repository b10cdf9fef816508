/*!
 * trak — Rust client for the trak.io tracking API.
 *
 * Four operations, each one blocking HTTP POST:
 * - `identify` — attributes about a person
 * - `alias` — extra distinct ids for a person
 * - `track` / `page_view` — actions a person performed
 * - `annotate` — system-wide events not tied to a person
 *
 * # Quick start
 *
 * ```ignore
 * use trak::{Properties, TrackOptions, TrakClient};
 *
 * let mut client = TrakClient::new("YOUR_API_KEY")?;
 * client.identify("user_42", Properties::new())?;
 * client.track("Signed up", TrackOptions::new().property("plan", "pro"))?;
 * ```
 *
 * Or install a process-wide default and use the free functions:
 *
 * ```ignore
 * trak::init("YOUR_API_KEY")?;
 * trak::identify("user_42", trak::Properties::new())?;
 * trak::page_view("/pricing", "Pricing", Default::default())?;
 * ```
 *
 * # Module structure
 *
 * - `protocol/` — what we send: wire types, constants, API key resolution
 * - `transport/` — how we deliver: `Transport` trait, `ureq` implementation
 * - `client` — `TrakClient`, `Options`, the default client
 * - `session` — current distinct id and channel
 * - `options` — per-call options
 */

mod client;
mod error;
mod options;
mod protocol;
mod session;
mod transport;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use client::{init, Options, TrakClient};
pub use error::{Error, Result};
pub use options::{AnnotateOptions, PageViewOptions, TrackOptions};
pub use protocol::constants::{CLIENT_VERSION, DEFAULT_API_HOST};
pub use protocol::credential::set_default_api_key;
pub use protocol::types::{properties_from_value, Aliases, Properties};
pub use serde_json::Value;
pub use session::Session;
pub use transport::{HttpTransport, Transport};

// ---------------------------------------------------------------------------
// Default-client functions
// ---------------------------------------------------------------------------

/// `TrakClient::identify` on the default client.
pub fn identify(distinct_id: &str, properties: Properties) -> Result<Value> {
    client::with_global_client(|client| client.identify(distinct_id, properties))
}

/// `TrakClient::alias` on the default client.
pub fn alias(distinct_id: &str, aliases: impl Into<Aliases>) -> Result<Value> {
    client::with_global_client(|client| client.alias(distinct_id, aliases))
}

/// `TrakClient::track` on the default client.
pub fn track(event: &str, opts: TrackOptions) -> Result<Value> {
    client::with_global_client(|client| client.track(event, opts))
}

/// `TrakClient::page_view` on the default client.
pub fn page_view(url: &str, page_title: &str, opts: PageViewOptions) -> Result<Value> {
    client::with_global_client(|client| client.page_view(url, page_title, opts))
}

/// `TrakClient::annotate` on the default client.
pub fn annotate(event: &str, opts: AnnotateOptions) -> Result<Value> {
    client::with_global_client(|client| client.annotate(event, opts))
}

/// Sets the default client's session channel.
pub fn set_channel(channel: impl Into<String>) -> Result<()> {
    client::with_global_client(|client| {
        client.set_channel(channel);
        Ok(())
    })
}

/// The default client's current distinct id, if any.
pub fn distinct_id() -> Result<Option<String>> {
    client::with_global_client(|client| Ok(client.distinct_id().map(str::to_string)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // No unit test calls `init`, so the default client is never installed here.
    #[test]
    fn free_functions_require_init() {
        assert!(matches!(track("Signed up", TrackOptions::new()), Err(Error::NotInitialized)));
        assert!(matches!(annotate("Deploy", AnnotateOptions::new()), Err(Error::NotInitialized)));
        assert!(matches!(set_channel("web"), Err(Error::NotInitialized)));
        assert!(matches!(distinct_id(), Err(Error::NotInitialized)));
    }
}
