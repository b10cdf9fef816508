/**
 * Wire types for the trak.io v1 API.
 *
 * Every request body is an `Envelope`:
 * ```json
 * {
 *   "token": "<api key>",
 *   "data": { ...operation payload... }
 * }
 * ```
 *
 * The payload structs borrow from the caller so a request can be built
 * without cloning the properties bag.
 */
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Free-form key/value attributes attached to a person, event, or annotation.
pub type Properties = Map<String, Value>;

/**
 * Converts loosely typed JSON into a `Properties` bag.
 *
 * Only JSON objects are accepted; anything else is a validation error.
 */
pub fn properties_from_value(value: Value) -> Result<Properties> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::Validation("properties must be a JSON object")),
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct Envelope<'a, D> {
    pub token: &'a str,
    pub data: D,
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct IdentifyData<'a> {
    pub distinct_id: &'a str,
    pub properties: &'a Properties,
}

#[derive(Serialize)]
pub struct AliasData<'a> {
    pub distinct_id: &'a str,
    pub alias: &'a Aliases,
}

/// Shared by `track` and `page_view`. A missing channel is sent as `null`.
#[derive(Serialize)]
pub struct TrackData<'a> {
    pub distinct_id: &'a str,
    pub event: &'a str,
    pub channel: Option<&'a str>,
    pub properties: &'a Properties,
}

/// Annotations are not tied to a person, so there is no `distinct_id`.
#[derive(Serialize)]
pub struct AnnotateData<'a> {
    pub event: &'a str,
    pub channel: Option<&'a str>,
    pub properties: &'a Properties,
}

// ---------------------------------------------------------------------------
// Aliases
// ---------------------------------------------------------------------------

/**
 * One or more additional distinct ids to link to a person.
 *
 * Serialized untagged, so `One("a")` goes out as `"a"` and
 * `Many(vec!["a", "b"])` as `["a", "b"]`.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Aliases {
    One(String),
    Many(Vec<String>),
}

impl Aliases {
    pub fn is_empty(&self) -> bool {
        match self {
            Aliases::One(alias) => alias.is_empty(),
            Aliases::Many(aliases) => aliases.is_empty(),
        }
    }
}

impl From<&str> for Aliases {
    fn from(alias: &str) -> Self {
        Aliases::One(alias.to_string())
    }
}

impl From<String> for Aliases {
    fn from(alias: String) -> Self {
        Aliases::One(alias)
    }
}

impl From<Vec<String>> for Aliases {
    fn from(aliases: Vec<String>) -> Self {
        Aliases::Many(aliases)
    }
}

impl From<Vec<&str>> for Aliases {
    fn from(aliases: Vec<&str>) -> Self {
        Aliases::Many(aliases.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Aliases {
    fn from(aliases: [&str; N]) -> Self {
        Aliases::Many(aliases.iter().map(|alias| alias.to_string()).collect())
    }
}

impl TryFrom<Value> for Aliases {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(Error::Validation("aliases cannot be empty")),
            Value::String(alias) => Ok(Aliases::One(alias)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(alias) => Ok(alias),
                    _ => Err(Error::Validation(
                        "aliases must be a string or an array of strings",
                    )),
                })
                .collect::<Result<Vec<_>>>()
                .map(Aliases::Many),
            _ => Err(Error::Validation(
                "aliases must be a string or an array of strings",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn properties_accept_objects_only() {
        let props = properties_from_value(json!({"plan": "pro"})).unwrap();
        assert_eq!(props["plan"], "pro");

        let err = properties_from_value(json!("not-a-map")).unwrap_err();
        assert!(err.is_validation());
        assert!(properties_from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn aliases_serialize_untagged() {
        assert_eq!(serde_json::to_value(Aliases::from("y")).unwrap(), json!("y"));
        assert_eq!(
            serde_json::to_value(Aliases::from(["y", "z"])).unwrap(),
            json!(["y", "z"])
        );
    }

    #[test]
    fn aliases_from_json_checks_shape() {
        assert_eq!(Aliases::try_from(json!("y")).unwrap(), Aliases::One("y".into()));
        assert_eq!(
            Aliases::try_from(json!(["y", "z"])).unwrap(),
            Aliases::Many(vec!["y".into(), "z".into()])
        );

        assert!(Aliases::try_from(json!(42)).unwrap_err().is_validation());
        assert!(Aliases::try_from(json!(["y", 1])).unwrap_err().is_validation());
        assert!(Aliases::try_from(Value::Null).unwrap_err().is_validation());
    }

    #[test]
    fn emptiness() {
        assert!(Aliases::from("").is_empty());
        assert!(Aliases::Many(Vec::new()).is_empty());
        assert!(!Aliases::from(vec!["a"]).is_empty());
    }

    #[test]
    fn annotate_payload_has_no_distinct_id() {
        let props = Properties::new();
        let body = serde_json::to_value(Envelope {
            token: "key",
            data: AnnotateData {
                event: "Deploy",
                channel: None,
                properties: &props,
            },
        })
        .unwrap();

        assert_eq!(
            body,
            json!({"token": "key", "data": {"event": "Deploy", "channel": null, "properties": {}}})
        );
    }
}
