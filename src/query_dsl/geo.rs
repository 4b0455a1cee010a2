//! https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-geo-bounding-box-query.html
//!
//! Matches geo_point and geo_shape values that intersect a bounding box.

use crate::model::{Coordinate, Envelope};
use crate::query_dsl::{FieldQuery, QueryDsl};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl From<Coordinate> for GeoPoint {
    fn from(coordinate: Coordinate) -> Self {
        GeoPoint {
            lon: coordinate.lon,
            lat: coordinate.lat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoBoundingBox {
    pub top_left: GeoPoint,
    pub bottom_right: GeoPoint,
}

impl From<&Envelope> for GeoBoundingBox {
    fn from(envelope: &Envelope) -> Self {
        GeoBoundingBox {
            top_left: GeoPoint {
                lon: envelope.min_x,
                lat: envelope.max_y,
            },
            bottom_right: GeoPoint {
                lon: envelope.max_x,
                lat: envelope.min_y,
            },
        }
    }
}

pub fn geo_bounding_box(field: &str, envelope: &Envelope) -> QueryDsl {
    QueryDsl::GeoBoundingBox(FieldQuery::new(field, envelope.into()))
}
