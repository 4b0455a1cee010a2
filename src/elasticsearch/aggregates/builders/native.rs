//! Engine-native aggregation bodies, passed through untouched

use crate::error::{Error, Result};
use crate::model::NativeAggregation;
use serde_json::{Map, Value};

/// Normalize a native body into a JSON object.  Nothing inside it is
/// interpreted.
pub fn native_agg(key: &str, native: &NativeAggregation) -> Result<Map<String, Value>> {
    let value = match native {
        NativeAggregation::Body(body) => return Ok(body.clone()),
        NativeAggregation::Text(text) => {
            serde_json::from_str::<Value>(text).map_err(|e| Error::MalformedNativeAggregation {
                key: key.to_string(),
                reason: e.to_string(),
            })?
        }
        NativeAggregation::Value(value) => value.clone(),
    };

    match value {
        Value::Object(body) => Ok(body),
        other => Err(Error::MalformedNativeAggregation {
            key: key.to_string(),
            reason: format!("expected a JSON object, found `{}`", other),
        }),
    }
}
