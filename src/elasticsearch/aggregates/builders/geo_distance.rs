//! This Module is to build...
//! https://www.elastic.co/guide/en/elasticsearch/reference/7.9/search-aggregations-bucket-geodistance-aggregation.html
//!
//! Returns a Geo Distance ES Aggregation

use crate::model::{Coordinate, Range};
use serde::*;
use serde_json::*;

#[derive(Serialize)]
struct Origin {
    lat: f64,
    lon: f64,
}

#[derive(Serialize)]
struct GeoDistance<'a> {
    field: &'a str,
    origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'a str>,
    ranges: &'a [Range],
}

pub fn geo_distance_agg(
    field: &str,
    origin: &Coordinate,
    unit: Option<&str>,
    ranges: &[Range],
) -> Value {
    let geo_distance = GeoDistance {
        field,
        origin: Origin {
            lat: origin.lat,
            lon: origin.lon,
        },
        unit,
        ranges,
    };
    json! {
        {
            "geo_distance": geo_distance
        }
    }
}
