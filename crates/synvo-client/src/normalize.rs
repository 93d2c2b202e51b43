//! Normalization of the API's loosely shaped list responses.
//!
//! List endpoints answer with either a bare JSON array or an object wrapping
//! the array under a collection key (`services`, `bookings`, `users`,
//! `reviews`, or the generic `data`). Anything else reads as empty.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Collection keys tried, in order, for the `products` list endpoints.
pub const SERVICE_KEYS: &[&str] = &["services", "data"];
/// Collection keys tried for the `bookings` list endpoints.
pub const BOOKING_KEYS: &[&str] = &["bookings", "data"];
/// Collection keys tried for the `users` list endpoint.
pub const USER_KEYS: &[&str] = &["users", "data"];
/// The reviews endpoint wraps under `reviews` only, with no `data` fallback.
pub const REVIEW_KEYS: &[&str] = &["reviews"];

/// Extracts the list from `body`: the body itself when it is an array,
/// otherwise the first of `keys` that holds an array. Any other shape
/// yields the empty list.
#[must_use]
pub fn unwrap_list(body: Value, keys: &[&str]) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in keys {
                if let Some(Value::Array(items)) = map.remove(*key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Deserializes each element of the extracted list, skipping elements that
/// do not minimally decode.
#[must_use]
pub fn records_from<T: DeserializeOwned>(body: Value, keys: &[&str]) -> Vec<T> {
    unwrap_list(body, keys)
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use synvo_core::service::ServiceRecord;

    #[test]
    fn bare_array_passes_through() {
        let items = unwrap_list(json!([{"name": "a"}, {"name": "b"}]), SERVICE_KEYS);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn keyed_object_forms_unwrap_in_order() {
        let items = unwrap_list(json!({"services": [{"name": "a"}]}), SERVICE_KEYS);
        assert_eq!(items.len(), 1);
        let items = unwrap_list(json!({"data": [{"name": "a"}, {"name": "b"}]}), SERVICE_KEYS);
        assert_eq!(items.len(), 2);
        // The collection key wins over the generic one.
        let items = unwrap_list(
            json!({"services": [{"name": "a"}], "data": [{}, {}, {}]}),
            SERVICE_KEYS,
        );
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn reviews_have_no_data_fallback() {
        let items = unwrap_list(json!({"data": [{"rating": 5}]}), REVIEW_KEYS);
        assert!(items.is_empty());
        let items = unwrap_list(json!({"reviews": [{"rating": 5}]}), REVIEW_KEYS);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn malformed_shapes_read_as_empty() {
        assert!(unwrap_list(json!("oops"), SERVICE_KEYS).is_empty());
        assert!(unwrap_list(json!(42), SERVICE_KEYS).is_empty());
        assert!(unwrap_list(json!(null), SERVICE_KEYS).is_empty());
        assert!(unwrap_list(json!({"unrelated": true}), SERVICE_KEYS).is_empty());
        assert!(unwrap_list(json!({"services": "not a list"}), SERVICE_KEYS).is_empty());
    }

    #[test]
    fn undecodable_elements_are_skipped() {
        let records: Vec<ServiceRecord> = records_from(
            json!([
                {"name": "good", "price": "50"},
                "not an object",
                {"name": "also good"}
            ]),
            SERVICE_KEYS,
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].effective_name(), "good");
        assert_eq!(records[1].effective_name(), "also good");
    }
}
