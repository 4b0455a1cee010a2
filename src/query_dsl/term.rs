//! This Module is to
//! https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-term-query.html
//!
//! Returns documents that contain an exact term in a provided field

use crate::query_dsl::{FieldQuery, QueryDsl};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermQuery {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
}

/// `terms` puts the value list directly under the field name, with `boost`
/// as a sibling of the field rather than nested inside it
#[derive(Debug, Clone, PartialEq)]
pub struct TermsQuery {
    pub field: String,
    pub values: Vec<String>,
    pub boost: Option<f32>,
}

impl Serialize for TermsQuery {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(&self.field, &self.values)?;
        if let Some(boost) = &self.boost {
            map.serialize_entry("boost", boost)?;
        }
        map.end()
    }
}

pub fn term(field: &str, value: &str) -> QueryDsl {
    QueryDsl::Term(FieldQuery::new(
        field,
        TermQuery {
            value: value.to_string(),
            boost: None,
        },
    ))
}

pub fn terms(field: &str, values: Vec<String>) -> QueryDsl {
    QueryDsl::Terms(TermsQuery {
        field: field.to_string(),
        values,
        boost: None,
    })
}
