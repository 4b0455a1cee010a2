//! This Module is to build...
//! https://www.elastic.co/guide/en/elasticsearch/reference/7.9/search-aggregations-bucket-filters-aggregation.html
//!
//! Returns a Filters ES Aggregation

use crate::error::Result;
use crate::model::{Query, SearchParams};
use crate::query_dsl::{compile, QueryDsl};
use indexmap::IndexMap;
use serde_json::*;

pub fn filters_agg(filters: &IndexMap<String, Query>, params: &SearchParams) -> Result<Value> {
    let mut filters_map = IndexMap::<&str, QueryDsl>::with_capacity(filters.len());
    for (label, filter) in filters {
        filters_map.insert(label, compile(filter, params)?);
    }

    Ok(json! {
        {
            "filters": {
                "filters": filters_map
            }
        }
    })
}
