//! This Module is to build...
//! https://www.elastic.co/guide/en/elasticsearch/reference/7.9/search-aggregations-bucket-geohashgrid-aggregation.html
//!
//! Returns a Geohash Grid ES Aggregation

use serde::*;
use serde_json::*;

#[derive(Serialize)]
struct GeohashGrid<'a> {
    field: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    precision: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u32>,
}

pub fn geohash_grid_agg(field: &str, precision: Option<u8>, size: Option<u32>) -> Value {
    let geohash_grid = GeohashGrid {
        field,
        precision,
        size,
    };
    json! {
        {
            "geohash_grid": geohash_grid
        }
    }
}
