use crate::model::Range;
use serde_json::*;

// ranges go out exactly as supplied, in the order supplied
pub fn range_agg(field: &str, ranges: &[Range]) -> Value {
    json! {
        {
            "range": {
                "field": field,
                "ranges": ranges
            }
        }
    }
}
