//! Compiles a portable search and aggregation algebra into Elasticsearch
//! request bodies, runs them, and decodes the replies.

pub mod elasticsearch;
pub mod error;
pub mod misc;
pub mod model;
pub mod options;
pub mod query_dsl;
pub mod utils;

#[cfg(test)]
mod testing;

pub use crate::elasticsearch::aggregates::results::{AggregationResult, Bucket};
pub use crate::elasticsearch::aggregates::{compile_aggs, AggregationBody, AggregationMap};
pub use crate::elasticsearch::scroll::ScrollIterator;
pub use crate::elasticsearch::search::{
    decode, Hit, Hits, SearchRequestDsl, SearchResponse, Shards, TotalHits,
};
pub use crate::elasticsearch::{Elasticsearch, HttpTransport, Transport};
pub use crate::error::{Error, Result};
pub use crate::options::ElasticsearchOptions;
pub use crate::query_dsl::QueryDsl;
