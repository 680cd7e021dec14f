//! # Record Normalization
//!
//! Endpoints are expected to return a JSON array of records, but some
//! return a single object. Both shapes are accepted here:
//!
//! ```text
//! [ {..}, {..} ]   ──►  vec![a, b]
//! {..}             ──►  vec![a]
//! anything else    ──►  CoreError::InvalidRecords
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::types::Resource;

/// Converts an endpoint payload into a list of typed records.
pub fn normalize_records<T: DeserializeOwned>(resource: Resource, payload: Value) -> CoreResult<Vec<T>> {
    let items = match payload {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(CoreError::InvalidRecords {
                resource,
                reason: format!("expected an array or object, got {}", kind_of(&other)),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| CoreError::InvalidRecords {
                resource,
                reason: format!("record {}: {}", index, e),
            })
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Author;
    use serde_json::json;

    #[test]
    fn test_array_payload() {
        let authors: Vec<Author> = normalize_records(
            Resource::Authors,
            json!([
                { "id": 1, "first_name": "Ursula", "last_name": "Le Guin" },
                { "id": 2, "first_name": "Terry", "last_name": "Pratchett" }
            ]),
        )
        .unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[1].last_name, "Pratchett");
    }

    #[test]
    fn test_single_object_is_wrapped() {
        let authors: Vec<Author> = normalize_records(
            Resource::Authors,
            json!({ "id": 7, "first_name": "Italo", "last_name": "Calvino" }),
        )
        .unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].id, 7);
    }

    #[test]
    fn test_scalar_payload_is_rejected() {
        let err = normalize_records::<Author>(Resource::Authors, json!("nope")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected authors payload: expected an array or object, got a string"
        );
    }

    #[test]
    fn test_malformed_record_is_rejected() {
        let result = normalize_records::<Author>(Resource::Authors, json!([{ "id": "one" }]));
        assert!(matches!(result, Err(CoreError::InvalidRecords { .. })));
    }
}
