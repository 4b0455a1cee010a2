//! https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-range-query.html
//!
//! Returns documents that contain terms within a provided range.

use crate::model::{Bound, RangeBounds};
use crate::query_dsl::{FieldQuery, QueryDsl};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<Bound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<Bound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<Bound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<Bound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl From<&RangeBounds> for RangeQuery {
    fn from(bounds: &RangeBounds) -> Self {
        RangeQuery {
            gte: bounds.gte.clone(),
            gt: bounds.gt.clone(),
            lte: bounds.lte.clone(),
            lt: bounds.lt.clone(),
            ..Default::default()
        }
    }
}

pub fn range(field: &str, bounds: &RangeBounds) -> QueryDsl {
    QueryDsl::Range(FieldQuery::new(field, bounds.into()))
}

pub fn date_range(
    field: &str,
    bounds: &RangeBounds,
    format: Option<&str>,
    time_zone: Option<&str>,
) -> QueryDsl {
    let mut range = RangeQuery::from(bounds);
    range.format = format.map(str::to_string);
    range.time_zone = time_zone.map(str::to_string);
    QueryDsl::Range(FieldQuery::new(field, range))
}
