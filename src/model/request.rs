use crate::model::aggregation::Aggregation;
use crate::model::query::Query;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_LIMIT: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSort {
    pub field: String,
    pub direction: Direction,
}

impl DocSort {
    pub fn asc(field: &str) -> Self {
        DocSort {
            field: field.to_string(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: &str) -> Self {
        DocSort {
            field: field.to_string(),
            direction: Direction::Descending,
        }
    }
}

/// Per-request context shared by the query and aggregation compilers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    /// Time zone for date math when a predicate doesn't carry its own
    pub time_zone: Option<String>,

    /// Anchor for `now` in client-side date math.  The wall clock is read
    /// once per compilation when unset.
    pub now: Option<DateTime<Utc>>,
}

impl SearchParams {
    pub fn with_time_zone(mut self, time_zone: &str) -> Self {
        self.time_zone = Some(time_zone.to_string());
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub offset: u64,
    pub limit: u64,
    pub query: Option<Query>,
    pub fields: Vec<String>,
    pub sorts: Vec<DocSort>,
    pub aggs: Vec<Aggregation>,
    pub stored_fields: Option<Vec<String>>,
    pub params: SearchParams,
}

impl Default for SearchRequest {
    fn default() -> Self {
        SearchRequest {
            offset: 0,
            limit: DEFAULT_LIMIT,
            query: None,
            fields: Vec::new(),
            sorts: Vec::new(),
            aggs: Vec::new(),
            stored_fields: None,
            params: SearchParams::default(),
        }
    }
}

impl SearchRequest {
    pub fn new(offset: u64, limit: u64, query: Query) -> Self {
        SearchRequest {
            offset,
            limit,
            query: Some(query),
            ..Default::default()
        }
    }

    pub fn with_aggs<I: IntoIterator<Item = Aggregation>>(mut self, aggs: I) -> Self {
        self.aggs.extend(aggs);
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.fields.extend(fields.into_iter().map(|f| f.to_string()));
        self
    }

    pub fn with_sorts<I: IntoIterator<Item = DocSort>>(mut self, sorts: I) -> Self {
        self.sorts.extend(sorts);
        self
    }

    pub fn with_stored_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.stored_fields = Some(fields.into_iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }
}
