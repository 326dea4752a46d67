//! Normalization of raw API payloads into record collections.
//!
//! The API answers either with a bare JSON value or with an envelope of
//! the form `{"success": .., "message": .., "data": ..}`. This module is
//! the only place that knows about both shapes.
//!
//! Lists are unwrapped leniently: anything that is not an array, and not
//! an envelope around an array, yields an empty collection rather than an
//! error.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// The array inside a list payload, if there is one.
///
/// An envelope's `data` array takes precedence over the payload itself.
pub fn list_items(payload: &Value) -> Option<&Vec<Value>> {
    match payload {
        Value::Object(map) => map.get("data").and_then(Value::as_array),
        Value::Array(items) => Some(items),
        _ => None,
    }
}

/// The record inside a single-record payload.
///
/// Uses the envelope's `data` when it is present and not `null`, and the
/// payload itself otherwise.
pub fn record_value(payload: &Value) -> &Value {
    match payload.get("data") {
        Some(data) if !data.is_null() => data,
        _ => payload,
    }
}

/// The envelope's `message`, if the payload carries one.
pub fn envelope_message(payload: &Value) -> Option<&str> {
    payload.get("message").and_then(Value::as_str)
}

/// Decode a list payload, defaulting to an empty collection.
///
/// Elements that do not decode as `T` are skipped.
pub fn records_or_empty<T: DeserializeOwned>(payload: &Value) -> Vec<T> {
    let Some(items) = list_items(payload) else {
        debug!("payload is not a list; using an empty collection");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "skipping undecodable list element");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rosterdash_types::Player;
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_arrays_and_envelopes_both_unwrap() {
        let bare = json!([{"id": 1}, {"id": 2}]);
        let wrapped = json!({"success": true, "message": "Success", "data": [{"id": 1}]});
        assert_eq!(list_items(&bare).map(Vec::len), Some(2));
        assert_eq!(list_items(&wrapped).map(Vec::len), Some(1));
    }

    #[test]
    fn error_shaped_payload_becomes_empty() {
        let players: Vec<Player> = records_or_empty(&json!({"error": "boom"}));
        assert!(players.is_empty());

        let players: Vec<Player> = records_or_empty(&json!({"data": {"id": 1}}));
        assert!(players.is_empty());

        let players: Vec<Player> = records_or_empty(&json!("nope"));
        assert!(players.is_empty());
    }

    #[test]
    fn undecodable_elements_are_skipped() {
        let players: Vec<Player> =
            records_or_empty(&json!([{"id": 1, "firstName": "A"}, {"firstName": "no id"}, 7]));
        assert_eq!(players.len(), 1);
    }

    #[test]
    fn single_record_prefers_envelope_data() {
        let wrapped = json!({"success": true, "data": {"id": 5}});
        assert_eq!(record_value(&wrapped), &json!({"id": 5}));

        let bare = json!({"id": 6});
        assert_eq!(record_value(&bare), &bare);

        let null_data = json!({"success": false, "message": "Not found", "data": null});
        assert_eq!(record_value(&null_data), &null_data);
        assert_eq!(envelope_message(&null_data), Some("Not found"));
    }
}
