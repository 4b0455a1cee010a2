//! https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-regexp-query.html
//!
//! Returns documents that contain terms matching a regular expression.

use crate::query_dsl::{FieldQuery, QueryDsl, ValueQuery};

pub fn regexp(field: &str, value: &str) -> QueryDsl {
    QueryDsl::Regexp(FieldQuery::new(field, ValueQuery::new(value)))
}
