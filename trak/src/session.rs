/**
 * Per-client session state.
 *
 * Holds the "current" distinct id and channel that `track`, `page_view`, and
 * `annotate` fall back to when the caller does not pass one. The state lives
 * only as long as the client and is never persisted.
 *
 * `identify`, `alias`, `track`, and `page_view` overwrite `distinct_id` as
 * soon as their payload is built, before the request goes out. A failed
 * request therefore still leaves the new id in place.
 */

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    distinct_id: Option<String>,
    channel: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distinct_id(&self) -> Option<&str> {
        self.distinct_id.as_deref()
    }

    pub fn set_distinct_id(&mut self, distinct_id: Option<String>) {
        self.distinct_id = distinct_id;
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    pub fn set_channel(&mut self, channel: Option<String>) {
        self.channel = channel;
    }

    /// Caller value first, then the session's current distinct id. Empty ids count as absent.
    pub(crate) fn resolve_distinct_id(&self, explicit: Option<String>) -> Option<String> {
        explicit
            .filter(|id| !id.is_empty())
            .or_else(|| self.distinct_id.clone())
            .filter(|id| !id.is_empty())
    }

    pub(crate) fn resolve_channel(&self, explicit: Option<String>) -> Option<String> {
        explicit.or_else(|| self.channel.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let session = Session::new();
        assert_eq!(session.distinct_id(), None);
        assert_eq!(session.channel(), None);
    }

    #[test]
    fn empty_distinct_ids_are_skipped() {
        let mut session = Session::new();
        assert_eq!(session.resolve_distinct_id(Some(String::new())), None);

        session.set_distinct_id(Some(String::new()));
        assert_eq!(session.resolve_distinct_id(None), None);

        session.set_distinct_id(Some("u1".into()));
        assert_eq!(session.resolve_distinct_id(Some(String::new())).as_deref(), Some("u1"));
    }

    #[test]
    fn explicit_values_override_session() {
        let mut session = Session::new();
        session.set_distinct_id(Some("u1".into()));
        session.set_channel(Some("web".into()));

        assert_eq!(session.resolve_distinct_id(None).as_deref(), Some("u1"));
        assert_eq!(session.resolve_distinct_id(Some("u2".into())).as_deref(), Some("u2"));
        assert_eq!(session.resolve_channel(None).as_deref(), Some("web"));
        assert_eq!(session.resolve_channel(Some("ios".into())).as_deref(), Some("ios"));
    }
}
