//! # Raw Actions
//!
//! Actions that arrive as data (JSON from a script, another process, a
//! replay log) rather than from the typed builders. This is the only place
//! payload presence is checked at runtime; once a value is an `Action`, its
//! shape is guaranteed.
//!
//! ```json
//! { "type": "INCREMENT_LIKE", "payload": { "id": "abc" } }
//! ```

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::action::{self, Action};
use crate::core::state::ResultItem;

/// An untyped action as it appears on the wire.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Option<Value>,
}

impl RawAction {
    pub fn new(kind: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    /// The kind needs a payload and none (or `null`) was supplied.
    MissingPayload { kind: &'static str },
    /// The payload is there but lacks a required field.
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
    /// A field is present with the wrong shape, or the payload is not an object.
    InvalidPayload { kind: &'static str, message: String },
    UnknownKind(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::MissingPayload { kind } => write!(f, "{kind}: payload not provided"),
            ActionError::MissingField { kind, field } => {
                write!(f, "{kind}: payload field `{field}` not provided")
            }
            ActionError::InvalidPayload { kind, message } => {
                write!(f, "{kind}: invalid payload: {message}")
            }
            ActionError::UnknownKind(kind) => write!(f, "unknown action type {kind:?}"),
        }
    }
}

impl std::error::Error for ActionError {}

/// Borrowed view over a payload object that turns absent fields into
/// `MissingField` and ill-typed ones into `InvalidPayload`.
struct Payload<'a> {
    kind: &'static str,
    fields: &'a Map<String, Value>,
}

impl<'a> Payload<'a> {
    fn of(kind: &'static str, payload: Option<&'a Value>) -> Result<Self, ActionError> {
        match payload {
            None | Some(Value::Null) => Err(ActionError::MissingPayload { kind }),
            Some(Value::Object(fields)) => Ok(Self { kind, fields }),
            Some(other) => Err(ActionError::InvalidPayload {
                kind,
                message: format!("expected an object, got {other}"),
            }),
        }
    }

    fn field<T: DeserializeOwned>(&self, field: &'static str) -> Result<T, ActionError> {
        let value = match self.fields.get(field) {
            None | Some(Value::Null) => {
                return Err(ActionError::MissingField {
                    kind: self.kind,
                    field,
                });
            }
            Some(value) => value,
        };
        T::deserialize(value).map_err(|e| ActionError::InvalidPayload {
            kind: self.kind,
            message: format!("`{field}`: {e}"),
        })
    }
}

impl TryFrom<RawAction> for Action {
    type Error = ActionError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let payload = raw.payload.as_ref();
        match raw.kind.as_str() {
            "SET_QUERY" => {
                let p = Payload::of("SET_QUERY", payload)?;
                Ok(action::set_query(p.field::<String>("query")?))
            }
            "APPLY_RESULTS" => {
                let p = Payload::of("APPLY_RESULTS", payload)?;
                let results: Vec<ResultItem> = p.field("results")?;
                Ok(action::apply_results(results, p.field("count")?))
            }
            "ADD_TO_RESULTS" => {
                let p = Payload::of("ADD_TO_RESULTS", payload)?;
                let results: Vec<ResultItem> = p.field("results")?;
                Ok(action::add_to_results(results, p.field("count")?))
            }
            "TOGGLE_ON_INIT" => Ok(action::toggle_on_init()),
            "SET_SEARCHING_STATUS" => {
                let p = Payload::of("SET_SEARCHING_STATUS", payload)?;
                Ok(action::set_searching_status(p.field("status")?))
            }
            "SET_NEXT_PAGE_SEARCH_STATUS" => {
                let p = Payload::of("SET_NEXT_PAGE_SEARCH_STATUS", payload)?;
                Ok(action::set_next_page_search_status(p.field("status")?))
            }
            "INCREMENT_LIKE" => {
                let p = Payload::of("INCREMENT_LIKE", payload)?;
                Ok(action::increment_like(p.field::<String>("id")?))
            }
            "INCREMENT_PAGE" => Ok(action::increment_page()),
            _ => Err(ActionError::UnknownKind(raw.kind)),
        }
    }
}
