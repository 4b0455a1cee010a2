//! This Module is to build...
//! https://www.elastic.co/guide/en/elasticsearch/reference/7.9/search-aggregations-bucket-missing-aggregation.html
//!
//! Returns a Missing ES Aggregation

use serde_json::*;

pub fn missing_agg(field: &str) -> Value {
    json! {
        {
            "missing": {
                "field": field
            }
        }
    }
}
