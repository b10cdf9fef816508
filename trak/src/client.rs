/**
 * The trak.io client — owns the API key, the session state, and the
 * transport.
 *
 * Every operation follows the same steps:
 * 1. Validate arguments (no I/O happens if this fails).
 * 2. Resolve per-call options against the session defaults.
 * 3. Serialize the `{token, data}` envelope.
 * 4. Update the session's distinct id (identify/alias/track/page_view).
 * 5. POST the body and decode the JSON response.
 *
 * Besides instances created with `TrakClient::new`, there is one optional
 * process-wide default client installed by `trak::init()` and used by the
 * crate's free functions.
 *
 * # Concurrency
 *
 * Operations take `&mut self`, so one instance is used by one caller at a
 * time. The default client sits behind a `Mutex`, which serializes
 * individual calls but not sequences of calls: if two threads share it,
 * one thread's `identify` can change the distinct id another thread's next
 * `track` picks up. Pass `TrackOptions::distinct_id` explicitly when that
 * matters.
 */
use std::sync::{Mutex, OnceLock};

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::options::{AnnotateOptions, PageViewOptions, TrackOptions};
use crate::protocol::constants::{
    ALIAS_PATH, ANNOTATE_PATH, DEFAULT_API_HOST, IDENTIFY_PATH, PAGE_VIEW_EVENT, TRACK_PATH,
};
use crate::protocol::credential;
use crate::protocol::types::{
    AliasData, Aliases, AnnotateData, Envelope, IdentifyData, Properties, TrackData,
};
use crate::session::Session;
use crate::transport::{HttpTransport, Transport};

// ---------------------------------------------------------------------------
// Global default client
// ---------------------------------------------------------------------------

/**
 * Process-wide default client installed by `trak::init()`.
 *
 * `OnceLock` ensures `init()` can only succeed once. The `Mutex` gives the
 * free functions the `&mut` access operations need.
 */
static GLOBAL_CLIENT: OnceLock<Mutex<TrakClient>> = OnceLock::new();

/**
 * Builds a client from `options` and installs it as the default.
 *
 * Returns `Err(Error::Configuration)` if no API key is available or a
 * default client was already installed.
 */
pub fn init(options: impl Into<Options>) -> Result<()> {
    if GLOBAL_CLIENT.get().is_some() {
        return Err(Error::Configuration("trak is already initialized".into()));
    }

    let client = TrakClient::new(options)?;

    GLOBAL_CLIENT
        .set(Mutex::new(client))
        .map_err(|_| Error::Configuration("trak is already initialized".into()))
}

/**
 * Runs `f` against the default client.
 *
 * Returns `Err(Error::NotInitialized)` if `init()` has not been called.
 * A poisoned lock is recovered: the session state is two plain fields and
 * cannot be left half-written.
 */
pub(crate) fn with_global_client<R>(f: impl FnOnce(&mut TrakClient) -> Result<R>) -> Result<R> {
    let lock = GLOBAL_CLIENT.get().ok_or(Error::NotInitialized)?;
    let mut client = match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    f(&mut client)
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/**
 * Configuration for a `TrakClient`.
 *
 * # Example
 * ```ignore
 * let client = trak::TrakClient::new(trak::Options {
 *     api_key: Some("YOUR_API_KEY".into()),
 *     ..Default::default()
 * })?;
 * ```
 */
#[derive(Debug, Clone)]
pub struct Options {
    /// API key sent as `token` with every request. When `None`, the key set
    /// with `trak::set_default_api_key` is used, then `TRAK_API_KEY`.
    pub api_key: Option<String>,

    /// Host (or full base URL) of the API. Defaults to `api.trak.io` over HTTPS.
    pub api_host: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: DEFAULT_API_HOST.to_string(),
        }
    }
}

impl From<&str> for Options {
    fn from(api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// TrakClient
// ---------------------------------------------------------------------------

/**
 * Client for the trak.io API.
 *
 * Owns:
 * - The API key (sent as `token` in every envelope).
 * - The session state read and written by the operations.
 * - The transport; `HttpTransport` unless built with `with_transport`.
 *
 * Not `Clone`: two copies would drift apart in their session state.
 */
pub struct TrakClient<T = HttpTransport> {
    /// Raw API key, never logged.
    api_key: String,

    /// Current distinct id and channel.
    session: Session,

    /// Delivers request bodies; bound to one API host.
    transport: T,
}

impl TrakClient<HttpTransport> {
    /**
     * Creates a client that talks to `options.api_host` over HTTP.
     *
     * # Returns
     * `Err(Error::Configuration)` if no API key can be resolved or the host
     * is empty.
     */
    pub fn new(options: impl Into<Options>) -> Result<Self> {
        let options = options.into();
        let api_key = credential::resolve_api_key(options.api_key.as_deref())?;
        let base_url = credential::base_url(&options.api_host)?;

        Self::with_transport(api_key, HttpTransport::new(base_url))
    }
}

impl<T: Transport> TrakClient<T> {
    /// Creates a client on a custom transport. The key must be non-empty.
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::Configuration("api_key required".into()));
        }

        Ok(Self {
            api_key,
            session: Session::new(),
            transport,
        })
    }

    /**
     * The transport requests go through.
     */
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /**
     * Read-only view of the session state.
     */
    pub fn session(&self) -> &Session {
        &self.session
    }

    /**
     * The current distinct id, set by the last identify / alias / track /
     * page_view call (or `set_distinct_id`). `None` on a fresh client.
     */
    pub fn distinct_id(&self) -> Option<&str> {
        self.session.distinct_id()
    }

    /// Replaces the current distinct id without sending anything. An empty id counts as unset.
    pub fn set_distinct_id(&mut self, distinct_id: impl Into<String>) {
        self.session.set_distinct_id(Some(distinct_id.into()));
    }

    /**
     * The channel `track`, `page_view`, and `annotate` fall back to.
     * Only changed by `set_channel` / `clear_channel`.
     */
    pub fn channel(&self) -> Option<&str> {
        self.session.channel()
    }

    /// Sets the channel used by `track`, `page_view`, and `annotate` by default.
    pub fn set_channel(&mut self, channel: impl Into<String>) {
        self.session.set_channel(Some(channel.into()));
    }

    /**
     * Removes the default channel; later calls send `"channel": null`
     * unless they pass one.
     */
    pub fn clear_channel(&mut self) {
        self.session.set_channel(None);
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /**
     * Sends attributes about a person (email, name, plan, ...).
     *
     * Makes `distinct_id` the session's current distinct id.
     */
    pub fn identify(&mut self, distinct_id: &str, properties: Properties) -> Result<Value> {
        if distinct_id.is_empty() {
            return Err(Error::Validation("distinct_id required"));
        }

        let body = self.encode(IdentifyData {
            distinct_id,
            properties: &properties,
        })?;

        self.session.set_distinct_id(Some(distinct_id.to_string()));

        self.execute_request(IDENTIFY_PATH, &body)
    }

    /**
     * Links additional distinct ids to a person, e.g. an email address to
     * the anonymous id used before they signed up.
     *
     * Makes `distinct_id` the session's current distinct id.
     */
    pub fn alias(&mut self, distinct_id: &str, aliases: impl Into<Aliases>) -> Result<Value> {
        let aliases = aliases.into();
        if distinct_id.is_empty() {
            return Err(Error::Validation("distinct_id required"));
        }
        if aliases.is_empty() {
            return Err(Error::Validation("aliases cannot be empty"));
        }

        let body = self.encode(AliasData {
            distinct_id,
            alias: &aliases,
        })?;

        self.session.set_distinct_id(Some(distinct_id.to_string()));

        self.execute_request(ALIAS_PATH, &body)
    }

    /**
     * Records an action a person performed.
     *
     * Fails with `Error::NoDistinctId` when neither `opts` nor the session
     * provide a distinct id.
     */
    pub fn track(&mut self, event: &str, opts: TrackOptions) -> Result<Value> {
        let distinct_id = self.session.resolve_distinct_id(opts.distinct_id);
        let channel = self.session.resolve_channel(opts.channel);
        let properties = opts.properties.unwrap_or_default();

        if event.is_empty() {
            return Err(Error::Validation("event is required"));
        }

        self.send_track(event, distinct_id, channel, properties)
    }

    /**
     * Shorthand for tracking a `"Page view"` event.
     *
     * Sends `{"url": url, "page_title": page_title}` as properties unless
     * `opts.properties` is set, in which case that bag is sent instead.
     */
    pub fn page_view(&mut self, url: &str, page_title: &str, opts: PageViewOptions) -> Result<Value> {
        if url.is_empty() {
            return Err(Error::Validation("url required"));
        }
        if page_title.is_empty() {
            return Err(Error::Validation("page_title required"));
        }

        let event = opts.event.unwrap_or_else(|| PAGE_VIEW_EVENT.to_string());
        let distinct_id = self.session.resolve_distinct_id(opts.distinct_id);
        let channel = self.session.resolve_channel(opts.channel);
        let properties = opts.properties.unwrap_or_else(|| {
            let mut defaults = Properties::new();
            defaults.insert("url".into(), url.into());
            defaults.insert("page_title".into(), page_title.into());
            defaults
        });

        if event.is_empty() {
            return Err(Error::Validation("event is required"));
        }

        self.send_track(&event, distinct_id, channel, properties)
    }

    /**
     * Records a system-wide event (deploy, outage, price change) that is not
     * tied to any person. Leaves the session untouched.
     */
    pub fn annotate(&self, event: &str, opts: AnnotateOptions) -> Result<Value> {
        let channel = self.session.resolve_channel(opts.channel);
        let properties = opts.properties.unwrap_or_default();

        if event.is_empty() {
            return Err(Error::Validation("event is required"));
        }

        let body = self.encode(AnnotateData {
            event,
            channel: channel.as_deref(),
            properties: &properties,
        })?;

        self.execute_request(ANNOTATE_PATH, &body)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn send_track(
        &mut self,
        event: &str,
        distinct_id: Option<String>,
        channel: Option<String>,
        properties: Properties,
    ) -> Result<Value> {
        let distinct_id = distinct_id
            .filter(|id| !id.is_empty())
            .ok_or(Error::NoDistinctId)?;

        let body = self.encode(TrackData {
            distinct_id: &distinct_id,
            event,
            channel: channel.as_deref(),
            properties: &properties,
        })?;

        self.session.set_distinct_id(Some(distinct_id));

        self.execute_request(TRACK_PATH, &body)
    }

    fn encode<D: Serialize>(&self, data: D) -> Result<String> {
        serde_json::to_string(&Envelope {
            token: &self.api_key,
            data,
        })
        .map_err(Error::Encode)
    }

    /// POSTs `body` to `path` and decodes the response as JSON.
    fn execute_request(&self, path: &str, body: &str) -> Result<Value> {
        let response = self.transport.post(path, body)?;
        serde_json::from_slice(&response).map_err(Error::Decode)
    }
}
