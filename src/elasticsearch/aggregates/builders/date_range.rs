//! This Module is to build...
//! https://www.elastic.co/guide/en/elasticsearch/reference/7.9/search-aggregations-bucket-daterange-aggregation.html
//!
//! Returns a Date Range ES Aggregation.  Date math bounds are resolved to
//! epoch millis here rather than left to the engine.

use crate::error::Result;
use crate::misc::date_math::{parse_time_zone, resolve_millis, DateZone};
use crate::model::{Bound, Range};
use chrono::{DateTime, Utc};
use serde::*;
use serde_json::*;

#[derive(Serialize)]
struct DateRange<'a> {
    field: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    ranges: Vec<Range>,
}

pub fn date_range_agg(
    field: &str,
    ranges: &[Range],
    format: Option<&str>,
    now: DateTime<Utc>,
    time_zone: Option<&str>,
) -> Result<Value> {
    let needs_resolving = ranges
        .iter()
        .any(|r| r.bounds().any(Bound::is_text));

    let ranges = if needs_resolving {
        let zone = match time_zone {
            Some(time_zone) => parse_time_zone(time_zone)?,
            None => DateZone::utc(),
        };

        ranges
            .iter()
            .map(|range| {
                Ok(Range {
                    key: range.key.clone(),
                    from: resolve_bound(range.from.as_ref(), now, &zone)?,
                    to: resolve_bound(range.to.as_ref(), now, &zone)?,
                })
            })
            .collect::<Result<Vec<_>>>()?
    } else {
        ranges.to_vec()
    };

    let date_range = DateRange {
        field,
        format,
        ranges,
    };

    Ok(json! {
        {
            "date_range": date_range
        }
    })
}

fn resolve_bound(
    bound: Option<&Bound>,
    now: DateTime<Utc>,
    zone: &DateZone,
) -> Result<Option<Bound>> {
    Ok(match bound {
        Some(Bound::Text(expression)) => Some(Bound::Integer(resolve_millis(expression, now, zone)?)),
        other => other.cloned(),
    })
}
