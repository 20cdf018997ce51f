//! Privacy-warning injection into outbound data.

use chatperms_config::{DEFAULT_WARNING_MESSAGE, EffectiveSettings};
use chatperms_types::WarningAnnotation;
use serde_json::{Map, Value};

/// Key added to outbound data when warnings are enabled. Its presence is
/// the enabled signal; no key means warnings were off.
pub const WARNING_KEY: &str = "chatPermsWarning";

/// Annotate outbound data with the configured privacy warning.
///
/// Null becomes an empty mapping and non-mapping data is wrapped under
/// `originalData` before the decision. Disabled warnings return the data
/// without the `chatPermsWarning` key. Enabled warnings add a shallow
/// `{message, displayType}` annotation, the message falling back to the
/// built-in default when the configured one is blank.
pub fn inject_warning(data: Value, settings: &EffectiveSettings) -> Value {
    let mut fields = match data {
        Value::Null => Map::new(),
        Value::Object(fields) => fields,
        other => {
            let mut wrapped = Map::new();
            wrapped.insert("originalData".to_string(), other);
            wrapped
        }
    };

    if !settings.warning_enabled {
        return Value::Object(fields);
    }

    let message = if settings.warning_message.trim().is_empty() {
        DEFAULT_WARNING_MESSAGE.to_string()
    } else {
        settings.warning_message.clone()
    };
    let annotation = WarningAnnotation {
        message,
        display_type: settings.warning_display_type,
    };
    fields.insert(
        WARNING_KEY.to_string(),
        serde_json::to_value(&annotation).unwrap_or(Value::Null),
    );
    Value::Object(fields)
}
