//! This Module is to build...
//! https://www.elastic.co/guide/en/elasticsearch/reference/7.9/search-aggregations-bucket-datehistogram-aggregation.html
//!
//! Returns a Date Histogram ES Aggregation

use serde::*;
use serde_json::*;

/// Intervals Elasticsearch only accepts as `calendar_interval`.  Everything
/// else is sent as a `fixed_interval`.
const CALENDAR_INTERVALS: &[&str] = &[
    "minute", "1m", "hour", "1h", "day", "1d", "week", "1w", "month", "1M", "quarter", "1q",
    "year", "1y",
];

pub fn is_calendar_interval(interval: &str) -> bool {
    CALENDAR_INTERVALS.contains(&interval)
}

pub fn date_histogram_agg(
    field: &str,
    interval: &str,
    offset: Option<&str>,
    format: Option<&str>,
    time_zone: Option<&str>,
) -> Value {
    #[derive(Serialize)]
    struct DateHistogram<'a> {
        field: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        calendar_interval: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fixed_interval: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        offset: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        format: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        time_zone: Option<&'a str>,
    }

    let (calendar_interval, fixed_interval) = if is_calendar_interval(interval) {
        (Some(interval), None)
    } else {
        (None, Some(interval))
    };

    let date_histogram = DateHistogram {
        field,
        calendar_interval,
        fixed_interval,
        offset,
        format,
        time_zone,
    };

    json! {
        {
            "date_histogram": date_histogram
        }
    }
}
