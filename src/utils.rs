use serde_json::Value;
use std::time::Duration;

/// Render a scalar bucket key the way Elasticsearch prints it.  Arrays and
/// objects have no sensible key form and come back as `None`.
pub fn json_to_string(key: Value) -> Option<String> {
    match key {
        Value::Null => None,
        Value::Bool(b) => Some(if b {
            "true".to_string()
        } else {
            "false".to_string()
        }),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Format a keep-alive as an Elasticsearch time value, using the largest
/// unit that divides it evenly
pub fn time_value(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis == 0 {
        return "0s".to_string();
    }

    for (unit, size) in [("d", 86_400_000), ("h", 3_600_000), ("m", 60_000), ("s", 1_000)] {
        if millis % size == 0 {
            return format!("{}{}", millis / size, unit);
        }
    }

    format!("{}ms", millis)
}
