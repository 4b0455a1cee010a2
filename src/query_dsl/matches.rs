//! https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-match-query.html
//!
//! Returns documents that match a provided text, number, date or boolean value.
//! The provided text is analyzed before matching.

use crate::model::Operator;
use crate::query_dsl::{FieldQuery, QueryDsl};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchQuery {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

pub fn match_query(field: &str, query: &str, operator: Option<Operator>) -> QueryDsl {
    QueryDsl::Match(FieldQuery::new(
        field,
        MatchQuery {
            query: query.to_string(),
            boost: None,
            operator,
        },
    ))
}

#[cfg(test)]
mod tests {
    use crate::model::Operator;
    use crate::query_dsl::matches::match_query;
    use serde_json::json;

    #[test]
    fn test_match_with_defaults() {
        assert_eq!(
            match_query("properties.place", "virginia", None).into_value(),
            json!({"match": {"properties.place": {"query": "virginia"}}})
        );
    }

    #[test]
    fn test_match_with_operator() {
        assert_eq!(
            match_query("properties.place", "west virginia", Some(Operator::And)).into_value(),
            json!({"match": {"properties.place": {"query": "west virginia", "operator": "and"}}})
        );
    }
}
