//! https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-prefix-query.html
//!
//! Returns documents that contain a specific prefix in a provided field.

use crate::query_dsl::{FieldQuery, QueryDsl, ValueQuery};

pub fn prefix(field: &str, value: &str) -> QueryDsl {
    QueryDsl::Prefix(FieldQuery::new(field, ValueQuery::new(value)))
}

#[cfg(test)]
mod tests {
    use crate::query_dsl::prefix::prefix;
    use serde_json::json;

    #[test]
    fn test_prefix() {
        assert_eq!(
            prefix("properties.place", "Virg").into_value(),
            json!({"prefix": {"properties.place": {"value": "Virg"}}})
        );
    }
}
