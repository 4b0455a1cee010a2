//! This Module is to build...
//! https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-bool-query.html
//!
//! A query that matches documents matching boolean combinations of other queries

use crate::query_dsl::QueryDsl;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub must: Option<Vec<QueryDsl>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<QueryDsl>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should: Option<Vec<QueryDsl>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub must_not: Option<Vec<QueryDsl>>,
}

impl BoolQuery {
    pub fn new(
        must: Vec<QueryDsl>,
        filter: Vec<QueryDsl>,
        should: Vec<QueryDsl>,
        must_not: Vec<QueryDsl>,
    ) -> QueryDsl {
        QueryDsl::Bool(BoolQuery {
            must: non_empty(must),
            filter: non_empty(filter),
            should: non_empty(should),
            must_not: non_empty(must_not),
        })
    }

    pub fn must(queries: Vec<QueryDsl>) -> QueryDsl {
        BoolQuery::new(queries, vec![], vec![], vec![])
    }

    pub fn filter(queries: Vec<QueryDsl>) -> QueryDsl {
        BoolQuery::new(vec![], queries, vec![], vec![])
    }

    pub fn should(queries: Vec<QueryDsl>) -> QueryDsl {
        BoolQuery::new(vec![], vec![], queries, vec![])
    }

    pub fn must_not(queries: Vec<QueryDsl>) -> QueryDsl {
        BoolQuery::new(vec![], vec![], vec![], queries)
    }
}

#[inline]
fn non_empty(queries: Vec<QueryDsl>) -> Option<Vec<QueryDsl>> {
    if queries.is_empty() {
        None
    } else {
        Some(queries)
    }
}
