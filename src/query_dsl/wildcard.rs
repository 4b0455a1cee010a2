//! This mod is to...
//! https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-wildcard-query.html
//!
//! Returns documents that contain terms matching a wildcard pattern.

use crate::query_dsl::{FieldQuery, QueryDsl, ValueQuery};

pub fn wildcard(field: &str, value: &str) -> QueryDsl {
    QueryDsl::Wildcard(FieldQuery::new(field, ValueQuery::new(value)))
}
