//! https://www.elastic.co/guide/en/elasticsearch/reference/current/search-template.html
//!
//! A query rendered by Elasticsearch from a mustache template and its parameters.

use crate::query_dsl::QueryDsl;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TemplateQuery {
    Inline {
        inline: String,
        params: Map<String, Value>,
    },
    Stored {
        id: String,
        params: Map<String, Value>,
    },
}

pub fn inline_template(template: &str, params: Map<String, Value>) -> QueryDsl {
    QueryDsl::Template(TemplateQuery::Inline {
        inline: template.to_string(),
        params,
    })
}

pub fn stored_template(id: &str, params: Map<String, Value>) -> QueryDsl {
    QueryDsl::Template(TemplateQuery::Stored {
        id: id.to_string(),
        params,
    })
}
