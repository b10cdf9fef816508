/**
 * Transport layer — how requests reach the trak.io API.
 *
 * `TrakClient` talks to the network only through the `Transport` trait, so
 * tests (and callers with their own HTTP stack) can swap the default
 * `ureq`-based `HttpTransport` for something else.
 */

pub mod http;

pub use http::HttpTransport;

use crate::error::Result;

/**
 * Delivers one JSON request body and hands back the raw response bytes.
 *
 * Implementations are bound to a host at construction and receive only the
 * path (e.g. `/v1/track`). They must not interpret the HTTP status: any
 * response that arrives is returned as-is, and only failures to get a
 * response at all become `Error::Transport`. The bytes are not checked for
 * UTF-8; decoding is left to the client.
 */
pub trait Transport {
    fn post(&self, path: &str, body: &str) -> Result<Vec<u8>>;
}
