//! https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-match-all-query.html
//!
//! Matches all documents, giving them all a _score of 1.0.

use crate::query_dsl::QueryDsl;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchAllQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
}

pub fn match_all() -> QueryDsl {
    QueryDsl::MatchAll(MatchAllQuery::default())
}

#[cfg(test)]
mod tests {
    use crate::query_dsl::match_all::*;
    use serde_json::json;

    #[test]
    fn test_match_all() {
        assert_eq!(match_all().into_value(), json!({"match_all": {}}));
    }

    #[test]
    fn test_match_all_with_boost() {
        let dsl = QueryDsl::MatchAll(MatchAllQuery { boost: Some(3.0) });
        assert_eq!(dsl.into_value(), json!({"match_all": {"boost": 3.0}}));
    }
}
