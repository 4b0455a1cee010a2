//! https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-query-string-query.html
//!
//! Returns documents based on a provided query string, using a parser with a strict syntax.

use crate::model::Operator;
use crate::query_dsl::QueryDsl;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryStringQuery {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_operator: Option<Operator>,
}

/// Terms are AND'd together unless the caller picks another operator
pub fn query_string(query: &str, default_field: Option<&str>, default_operator: Option<Operator>) -> QueryDsl {
    QueryDsl::QueryString(QueryStringQuery {
        query: query.to_string(),
        default_field: default_field.map(str::to_string),
        default_operator: Some(default_operator.unwrap_or(Operator::And)),
    })
}
