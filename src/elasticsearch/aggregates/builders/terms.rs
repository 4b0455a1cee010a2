//! This Module is to build...
//! https://www.elastic.co/guide/en/elasticsearch/reference/7.9/search-aggregations-bucket-terms-aggregation.html
//!
//! Returns a Terms ES Aggregation

use crate::model::{AggSort, AggSortType};
use serde::*;
use serde_json::*;

#[derive(Serialize)]
struct Terms<'a> {
    field: &'a str,
    size: u32,
    order: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<&'a Value>,
}

pub fn terms_agg(field: &str, size: u32, sort: Option<AggSort>, missing: Option<&Value>) -> Value {
    let sort = sort.unwrap_or_default();
    let order_key = match sort.sort_type {
        AggSortType::Lexical => "_key",
        AggSortType::Count => "_count",
    };

    let terms = Terms {
        field,
        size,
        order: json! {{ order_key: sort.direction }},
        missing,
    };

    json! {
        {
            "terms": terms
        }
    }
}
