//! The `_search` request body and the reply it produces

use crate::elasticsearch::aggregates::results::AggregationResult;
use crate::elasticsearch::aggregates::{compile_aggs, AggregationMap};
use crate::error::Result;
use crate::model::{Direction, SearchRequest};
use crate::query_dsl::{compile, match_all::match_all, FieldQuery, QueryDsl};
use indexmap::IndexMap;
use serde::*;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequestDsl {
    pub from: u64,
    pub size: u64,
    pub query: QueryDsl,
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<String>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub aggs: AggregationMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<FieldQuery<Direction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_fields: Option<Vec<String>>,
}

impl SearchRequestDsl {
    pub fn compile(request: &SearchRequest) -> Result<Self> {
        let query = match &request.query {
            Some(query) => compile(query, &request.params)?,
            None => match_all(),
        };

        let mut fields = request.fields.clone();
        fields.sort();
        fields.dedup();

        Ok(SearchRequestDsl {
            from: request.offset,
            size: request.limit,
            query,
            source: if fields.is_empty() { None } else { Some(fields) },
            aggs: compile_aggs(&request.aggs, &request.params)?,
            sort: request
                .sorts
                .iter()
                .map(|sort| FieldQuery::new(&sort.field, sort.direction))
                .collect(),
            stored_fields: request.stored_fields.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Shards {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub successful: u64,
    pub skipped: Option<u64>,
    #[serde(default)]
    pub failed: u64,
}

/// `hits.total` is a bare number before Elasticsearch 7 and an object after
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Tracked { value: u64, relation: String },
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(value) => *value,
            TotalHits::Tracked { value, .. } => *value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hit {
    #[serde(rename = "_index", default)]
    pub index: String,

    #[serde(rename = "_type")]
    pub type_: Option<String>,

    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(rename = "_score")]
    pub score: Option<f64>,

    #[serde(rename = "_source")]
    pub source: Option<Value>,

    pub fields: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Hits {
    pub total: Option<TotalHits>,
    pub max_score: Option<f64>,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: u64,

    #[serde(default)]
    pub timed_out: bool,

    #[serde(rename = "_shards", default)]
    pub shards: Shards,

    #[serde(rename = "_scroll_id")]
    pub scroll_id: Option<String>,

    #[serde(default)]
    pub hits: Hits,

    #[serde(default)]
    pub aggregations: IndexMap<String, AggregationResult>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl SearchResponse {
    pub fn total_hits(&self) -> u64 {
        self.hits.total.as_ref().map(TotalHits::value).unwrap_or(0)
    }

    pub fn aggregation(&self, name: &str) -> Option<&AggregationResult> {
        self.aggregations.get(name)
    }
}

/// Parse a raw `_search` (or `_search/scroll`) reply
pub fn decode(reply: &[u8]) -> Result<SearchResponse> {
    Ok(serde_json::from_slice(reply)?)
}
