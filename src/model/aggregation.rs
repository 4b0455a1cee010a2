use crate::model::query::{Bound, Coordinate, Query};
use crate::model::request::Direction;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// One named aggregation in a search request.  `key` names the result in
/// the reply and must be unique among its siblings; nothing deduplicates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub key: String,
    pub kind: AggregationKind,
    pub aggs: Vec<Aggregation>,
    pub min_doc_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AggregationKind {
    Terms {
        field: String,
        size: u32,
        sort: Option<AggSort>,
        missing: Option<Value>,
    },
    Missing {
        field: String,
    },
    Cardinality {
        field: String,
    },
    Histogram {
        field: String,
        interval: f64,
        offset: Option<f64>,
    },
    DateHistogram {
        field: String,
        interval: String,
        offset: Option<String>,
        format: Option<String>,
        time_zone: Option<String>,
    },
    Stats {
        field: String,
    },
    Range {
        field: String,
        ranges: Vec<Range>,
    },
    DateRange {
        field: String,
        ranges: Vec<Range>,
        format: Option<String>,
        time_zone: Option<String>,
    },
    GeoHash {
        field: String,
        precision: Option<u8>,
        size: Option<u32>,
    },
    GeoCentroid {
        field: String,
    },
    GeoBounds {
        field: String,
    },
    GeoDistance {
        field: String,
        origin: Coordinate,
        unit: Option<String>,
        ranges: Vec<Range>,
    },
    Filters {
        filters: IndexMap<String, Query>,
    },
    Native(NativeAggregation),
    /// A saved aggregation referenced by name, resolved by the caller
    Named(String),
}

impl AggregationKind {
    pub fn op(&self) -> &'static str {
        match self {
            AggregationKind::Terms { .. } => "terms",
            AggregationKind::Missing { .. } => "missing",
            AggregationKind::Cardinality { .. } => "cardinality",
            AggregationKind::Histogram { .. } => "histogram",
            AggregationKind::DateHistogram { .. } => "date_histogram",
            AggregationKind::Stats { .. } => "stats",
            AggregationKind::Range { .. } => "range",
            AggregationKind::DateRange { .. } => "date_range",
            AggregationKind::GeoHash { .. } => "geohash",
            AggregationKind::GeoCentroid { .. } => "geo_centroid",
            AggregationKind::GeoBounds { .. } => "geo_bounds",
            AggregationKind::GeoDistance { .. } => "geo_distance",
            AggregationKind::Filters { .. } => "filters",
            AggregationKind::Native(_) => "native",
            AggregationKind::Named(_) => "named",
        }
    }
}

/// Body of an engine-native aggregation, passed through without
/// interpretation
#[derive(Debug, Clone, PartialEq)]
pub enum NativeAggregation {
    Body(Map<String, Value>),
    Text(String),
    Value(Value),
}

impl From<Map<String, Value>> for NativeAggregation {
    fn from(body: Map<String, Value>) -> Self {
        NativeAggregation::Body(body)
    }
}

impl From<&str> for NativeAggregation {
    fn from(text: &str) -> Self {
        NativeAggregation::Text(text.to_string())
    }
}

impl From<String> for NativeAggregation {
    fn from(text: String) -> Self {
        NativeAggregation::Text(text)
    }
}

impl From<Value> for NativeAggregation {
    fn from(value: Value) -> Self {
        NativeAggregation::Value(value)
    }
}

/// Half-open interval `[from, to)` with an optional caller-chosen key
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Range {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Bound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Bound>,
}

impl Range {
    pub fn new() -> Self {
        Range::default()
    }

    pub fn key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn from(mut self, bound: impl Into<Bound>) -> Self {
        self.from = Some(bound.into());
        self
    }

    pub fn to(mut self, bound: impl Into<Bound>) -> Self {
        self.to = Some(bound.into());
        self
    }

    pub fn bounds(&self) -> impl Iterator<Item = &Bound> {
        self.from.iter().chain(self.to.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggSortType {
    Lexical,
    #[default]
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggSort {
    pub sort_type: AggSortType,
    pub direction: Direction,
}

impl Default for AggSort {
    fn default() -> Self {
        AggSort {
            sort_type: AggSortType::Count,
            direction: Direction::Descending,
        }
    }
}

impl Aggregation {
    pub fn new(key: &str, kind: AggregationKind) -> Self {
        Aggregation {
            key: key.to_string(),
            kind,
            aggs: Vec::new(),
            min_doc_count: None,
        }
    }

    pub fn with_aggs<I: IntoIterator<Item = Aggregation>>(mut self, aggs: I) -> Self {
        self.aggs.extend(aggs);
        self
    }

    pub fn with_min_doc_count(mut self, min_doc_count: u64) -> Self {
        self.min_doc_count = Some(min_doc_count);
        self
    }

    pub fn terms(key: &str, field: &str, size: u32) -> Self {
        Aggregation::new(
            key,
            AggregationKind::Terms {
                field: field.to_string(),
                size,
                sort: None,
                missing: None,
            },
        )
    }

    pub fn missing(key: &str, field: &str) -> Self {
        Aggregation::new(
            key,
            AggregationKind::Missing {
                field: field.to_string(),
            },
        )
    }

    pub fn cardinality(key: &str, field: &str) -> Self {
        Aggregation::new(
            key,
            AggregationKind::Cardinality {
                field: field.to_string(),
            },
        )
    }

    pub fn stats(key: &str, field: &str) -> Self {
        Aggregation::new(
            key,
            AggregationKind::Stats {
                field: field.to_string(),
            },
        )
    }

    pub fn histogram(key: &str, field: &str, interval: f64) -> Self {
        Aggregation::new(
            key,
            AggregationKind::Histogram {
                field: field.to_string(),
                interval,
                offset: None,
            },
        )
    }

    pub fn date_histogram(key: &str, field: &str, interval: &str) -> Self {
        Aggregation::new(
            key,
            AggregationKind::DateHistogram {
                field: field.to_string(),
                interval: interval.to_string(),
                offset: None,
                format: None,
                time_zone: None,
            },
        )
    }

    pub fn range(key: &str, field: &str, ranges: Vec<Range>) -> Self {
        Aggregation::new(
            key,
            AggregationKind::Range {
                field: field.to_string(),
                ranges,
            },
        )
    }

    pub fn date_range(key: &str, field: &str, ranges: Vec<Range>) -> Self {
        Aggregation::new(
            key,
            AggregationKind::DateRange {
                field: field.to_string(),
                ranges,
                format: None,
                time_zone: None,
            },
        )
    }

    pub fn geohash(key: &str, field: &str, precision: Option<u8>) -> Self {
        Aggregation::new(
            key,
            AggregationKind::GeoHash {
                field: field.to_string(),
                precision,
                size: None,
            },
        )
    }

    pub fn geo_centroid(key: &str, field: &str) -> Self {
        Aggregation::new(
            key,
            AggregationKind::GeoCentroid {
                field: field.to_string(),
            },
        )
    }

    pub fn geo_bounds(key: &str, field: &str) -> Self {
        Aggregation::new(
            key,
            AggregationKind::GeoBounds {
                field: field.to_string(),
            },
        )
    }

    pub fn geo_distance(key: &str, field: &str, origin: Coordinate, ranges: Vec<Range>) -> Self {
        Aggregation::new(
            key,
            AggregationKind::GeoDistance {
                field: field.to_string(),
                origin,
                unit: None,
                ranges,
            },
        )
    }

    pub fn filters<I: IntoIterator<Item = (String, Query)>>(key: &str, filters: I) -> Self {
        Aggregation::new(
            key,
            AggregationKind::Filters {
                filters: filters.into_iter().collect(),
            },
        )
    }

    pub fn native(key: &str, body: impl Into<NativeAggregation>) -> Self {
        Aggregation::new(key, AggregationKind::Native(body.into()))
    }
}
