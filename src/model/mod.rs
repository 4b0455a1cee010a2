//! The portable search algebra: queries, aggregations and the request that
//! bundles them.  Nothing in here knows about Elasticsearch.

mod aggregation;
mod query;
mod request;

pub use aggregation::*;
pub use query::*;
pub use request::*;
