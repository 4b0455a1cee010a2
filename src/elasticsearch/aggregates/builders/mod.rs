//! One builder per aggregation type.  Each returns the `{ "<type>": {...} }`
//! node for a single aggregation, without its name or sub-aggregations.

pub mod date_histogram;
pub mod date_range;
pub mod filters;
pub mod geo_distance;
pub mod geohash_grid;
pub mod histogram;
pub mod metrics;
pub mod missing;
pub mod native;
pub mod range;
pub mod terms;
