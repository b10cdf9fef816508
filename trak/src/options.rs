/**
 * Per-call options for `track`, `page_view`, and `annotate`.
 *
 * Every field is optional. A field left as `None` is filled from the
 * client's session (distinct id, channel) or from the operation's default
 * (properties) when the call is made.
 *
 * # Example
 * ```ignore
 * client.track(
 *     "Purchased shirt",
 *     TrackOptions::new()
 *         .channel("web_store")
 *         .property("revenue", 19.99),
 * )?;
 * ```
 */
use serde_json::Value;

use crate::protocol::types::Properties;

// ---------------------------------------------------------------------------
// TrackOptions
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct TrackOptions {
    /// Person the event is recorded against. Defaults to the session's.
    pub distinct_id: Option<String>,

    /// Defaults to the session's channel.
    pub channel: Option<String>,

    /// Defaults to an empty object.
    pub properties: Option<Properties>,
}

impl TrackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distinct_id(mut self, distinct_id: impl Into<String>) -> Self {
        self.distinct_id = Some(distinct_id.into());
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Adds one property, starting from an empty bag if none was set.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key.into(), value.into());
        self
    }
}

// ---------------------------------------------------------------------------
// PageViewOptions
// ---------------------------------------------------------------------------

/**
 * Options for `page_view`.
 *
 * These are laid over the page-view defaults field by field. Setting
 * `properties` replaces the default `{url, page_title}` bag outright; the two
 * are not merged.
 */
#[derive(Debug, Default, Clone)]
pub struct PageViewOptions {
    /// Defaults to `"Page view"`.
    pub event: Option<String>,
    pub distinct_id: Option<String>,
    pub channel: Option<String>,

    /// Defaults to `{"url": <url>, "page_title": <page_title>}`.
    pub properties: Option<Properties>,
}

impl PageViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn distinct_id(mut self, distinct_id: impl Into<String>) -> Self {
        self.distinct_id = Some(distinct_id.into());
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }
}

// ---------------------------------------------------------------------------
// AnnotateOptions
// ---------------------------------------------------------------------------

/// Options for `annotate`. There is no distinct id: annotations apply to everyone.
#[derive(Debug, Default, Clone)]
pub struct AnnotateOptions {
    pub channel: Option<String>,
    pub properties: Option<Properties>,
}

impl AnnotateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn property_builds_up_a_bag() {
        let opts = TrackOptions::new().property("size", "L").property("revenue", 19.99);
        let props = opts.properties.unwrap();
        assert_eq!(Value::Object(props), json!({"size": "L", "revenue": 19.99}));
    }

    #[test]
    fn defaults_are_all_none() {
        let opts = PageViewOptions::default();
        assert!(opts.event.is_none());
        assert!(opts.distinct_id.is_none());
        assert!(opts.channel.is_none());
        assert!(opts.properties.is_none());
    }
}
