use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

use crate::database::models::parse_timestamp;
use crate::error::ApiError;

pub const LAST_SYNC_AT: &str = "last_sync_at";

/// PATCH body. `last_sync_at` stays untyped until `validate` so missing and
/// mistyped values both surface as field errors.
#[derive(Debug)]
pub struct PatchConnectionRequest {
    pub last_sync_at: Option<Value>,
}

impl PatchConnectionRequest {
    /// Only a JSON object is a valid body; arrays and scalars are INVALID_JSON.
    pub fn from_body(body: Value) -> Result<Self, ApiError> {
        match body {
            Value::Object(mut fields) => Ok(Self::from_fields(&mut fields)),
            other => Err(ApiError::invalid_json(format!(
                "Request body must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn from_fields(fields: &mut Map<String, Value>) -> Self {
        Self {
            last_sync_at: fields.remove(LAST_SYNC_AT),
        }
    }

    pub fn validate(&self) -> Result<DateTime<FixedOffset>, ApiError> {
        match &self.last_sync_at {
            None | Some(Value::Null) => {
                Err(ApiError::field_error(LAST_SYNC_AT, "This field is required"))
            }
            Some(Value::String(raw)) => parse_timestamp(raw).ok_or_else(|| {
                ApiError::field_error(LAST_SYNC_AT, format!("Invalid timestamp format: {}", raw))
            }),
            Some(other) => Err(ApiError::field_error(
                LAST_SYNC_AT,
                format!("Expected an ISO-8601 string, got {}", other),
            )),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
