//! This Module is to
//! https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-exists-query.html
//!
//! Returns documents that contain an indexed value for a field.

use crate::query_dsl::{BoolQuery, QueryDsl};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExistsQuery {
    pub field: String,
}

pub fn field_exists(field: &str) -> QueryDsl {
    QueryDsl::Exists(ExistsQuery {
        field: field.to_string(),
    })
}

/// There's no negative `exists` in the DSL, so a missing field is an
/// `exists` wrapped in `must_not`
pub fn field_missing(field: &str) -> QueryDsl {
    BoolQuery::must_not(vec![field_exists(field)])
}
