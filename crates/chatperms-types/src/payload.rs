//! Normalized hook payloads.

use serde_json::{Map, Value};

/// A hook payload after normalization: always a JSON object, whatever the
/// host actually sent.
///
/// Hosts have shipped several shapes for the same hook across versions
/// (bare uids, arrays, the current object form). `normalize` folds every
/// shape into one mapping so hook bodies only ever see an object. Fields
/// the pipeline does not know about pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HookPayload {
    fields: Map<String, Value>,
}

impl HookPayload {
    /// Normalize an arbitrary hook value, merging in caller defaults.
    ///
    /// - `null` → a copy of `defaults`
    /// - scalar → defaults plus the scalar under `value`
    /// - array → defaults plus the array under `items`
    /// - object → defaults with the object's keys winning
    ///
    /// Total over every JSON shape; never fails.
    pub fn normalize(raw: Value, defaults: &Map<String, Value>) -> Self {
        let mut fields = defaults.clone();
        match raw {
            Value::Null => {}
            Value::Object(raw) => {
                for (key, value) in raw {
                    fields.insert(key, value);
                }
            }
            Value::Array(items) => {
                fields.insert("items".to_string(), Value::Array(items));
            }
            scalar => {
                fields.insert("value".to_string(), scalar);
            }
        }
        Self { fields }
    }

    /// Uid of the user performing the action, when the host sent one.
    pub fn caller_uid(&self) -> Option<i64> {
        self.fields.get("callerUid").and_then(Value::as_i64)
    }

    /// Uid the action targets (message sender, inbox owner, room member).
    pub fn uid(&self) -> Option<i64> {
        self.fields.get("uid").and_then(Value::as_i64)
    }

    pub fn room_id(&self) -> Option<i64> {
        self.fields.get("roomId").and_then(Value::as_i64)
    }

    /// Message text, when present and a string.
    pub fn content(&self) -> Option<&str> {
        self.fields.get("content").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume into the JSON object handed back to the host.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<HookPayload> for Value {
    fn from(payload: HookPayload) -> Self {
        payload.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("canGet".to_string(), Value::Bool(true));
        map
    }

    #[test]
    fn null_returns_defaults_copy() {
        let payload = HookPayload::normalize(Value::Null, &defaults());
        assert_eq!(payload.get("canGet"), Some(&Value::Bool(true)));
        assert_eq!(payload.as_map().len(), 1);
    }

    #[test]
    fn null_with_empty_defaults_is_empty_object() {
        let payload = HookPayload::normalize(Value::Null, &Map::new());
        assert_eq!(payload.into_value(), json!({}));
    }

    #[test]
    fn scalar_lands_under_value() {
        let payload = HookPayload::normalize(json!(42), &defaults());
        assert_eq!(payload.get("value"), Some(&json!(42)));
        assert_eq!(payload.get("canGet"), Some(&Value::Bool(true)));
    }

    #[test]
    fn string_scalar_lands_under_value() {
        let payload = HookPayload::normalize(json!("hello"), &Map::new());
        assert_eq!(payload.into_value(), json!({"value": "hello"}));
    }

    #[test]
    fn bool_scalar_lands_under_value() {
        let payload = HookPayload::normalize(json!(false), &Map::new());
        assert_eq!(payload.into_value(), json!({"value": false}));
    }

    #[test]
    fn array_lands_under_items() {
        let payload = HookPayload::normalize(json!([1, 2, 3]), &defaults());
        assert_eq!(payload.get("items"), Some(&json!([1, 2, 3])));
        assert_eq!(payload.get("canGet"), Some(&Value::Bool(true)));
    }

    #[test]
    fn object_keys_win_over_defaults() {
        let payload = HookPayload::normalize(json!({"canGet": false, "uid": 7}), &defaults());
        assert_eq!(payload.get("canGet"), Some(&Value::Bool(false)));
        assert_eq!(payload.uid(), Some(7));
    }

    #[test]
    fn unknown_fields_pass_through() {
        let payload = HookPayload::normalize(json!({"somethingNew": {"nested": true}}), &Map::new());
        assert_eq!(payload.get("somethingNew"), Some(&json!({"nested": true})));
    }

    #[test]
    fn accessors_read_well_known_fields() {
        let payload = HookPayload::normalize(
            json!({"callerUid": 3, "uid": 4, "roomId": 9, "content": "hi"}),
            &Map::new(),
        );
        assert_eq!(payload.caller_uid(), Some(3));
        assert_eq!(payload.uid(), Some(4));
        assert_eq!(payload.room_id(), Some(9));
        assert_eq!(payload.content(), Some("hi"));
    }

    #[test]
    fn accessors_reject_wrong_types() {
        let payload = HookPayload::normalize(json!({"uid": "4", "content": 12}), &Map::new());
        assert_eq!(payload.uid(), None);
        assert_eq!(payload.content(), None);
    }

    #[test]
    fn insert_overwrites() {
        let mut payload = HookPayload::normalize(json!({"inRoom": false}), &Map::new());
        payload.insert("inRoom", Value::Bool(true));
        assert_eq!(payload.get("inRoom"), Some(&Value::Bool(true)));
    }
}
