use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Engine-agnostic search predicate.
///
/// Composite variants (`And`, `Or`, `Not`) carry one or more children; every
/// leaf binds exactly one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    And(Vec<Query>),
    Or(Vec<Query>),
    Not(Vec<Query>),
    MatchAll,
    Term {
        field: String,
        value: String,
    },
    Terms {
        field: String,
        values: Vec<String>,
    },
    Match {
        field: String,
        value: String,
        operator: Option<Operator>,
    },
    Range {
        field: String,
        bounds: RangeBounds,
    },
    DateRange {
        field: String,
        bounds: RangeBounds,
        format: Option<String>,
        time_zone: Option<String>,
    },
    Regex {
        field: String,
        value: String,
    },
    Prefix {
        field: String,
        value: String,
    },
    Wildcard {
        field: String,
        value: String,
    },
    Exists {
        field: String,
        exists: bool,
    },
    BoundingBox {
        field: String,
        envelope: Envelope,
    },
    /// Free text in the engine's native query-string syntax
    QueryString {
        query: String,
        default_field: Option<String>,
        default_operator: Option<Operator>,
    },
    /// A saved query referenced by name.  Callers resolve these before
    /// handing the tree to a compiler.
    Named(String),
}

impl Query {
    pub fn and<I: IntoIterator<Item = Query>>(queries: I) -> Self {
        Query::And(queries.into_iter().collect())
    }

    pub fn or<I: IntoIterator<Item = Query>>(queries: I) -> Self {
        Query::Or(queries.into_iter().collect())
    }

    pub fn not<I: IntoIterator<Item = Query>>(queries: I) -> Self {
        Query::Not(queries.into_iter().collect())
    }

    pub fn term(field: &str, value: impl ToString) -> Self {
        Query::Term {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn terms<I, V>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        Query::Terms {
            field: field.to_string(),
            values: values.into_iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn exists(field: &str) -> Self {
        Query::Exists {
            field: field.to_string(),
            exists: true,
        }
    }

    pub fn missing(field: &str) -> Self {
        Query::Exists {
            field: field.to_string(),
            exists: false,
        }
    }

    pub fn query_string(query: &str) -> Self {
        Query::QueryString {
            query: query.to_string(),
            default_field: None,
            default_operator: None,
        }
    }

    /// Name of this variant, as used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Query::And(_) => "and",
            Query::Or(_) => "or",
            Query::Not(_) => "not",
            Query::MatchAll => "match_all",
            Query::Term { .. } => "term",
            Query::Terms { .. } => "terms",
            Query::Match { .. } => "match",
            Query::Range { .. } => "range",
            Query::DateRange { .. } => "date_range",
            Query::Regex { .. } => "regex",
            Query::Prefix { .. } => "prefix",
            Query::Wildcard { .. } => "wildcard",
            Query::Exists { .. } => "exists",
            Query::BoundingBox { .. } => "bbox",
            Query::QueryString { .. } => "query_string",
            Query::Named(_) => "named",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    And,
    Or,
}

/// A range endpoint.
///
/// `Text` values are handed to the engine (or the date math resolver) as
/// written; instants go over the wire as epoch milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    Integer(i64),
    Float(f64),
    Instant(DateTime<Utc>),
    Text(String),
}

impl Bound {
    pub fn is_text(&self) -> bool {
        matches!(self, Bound::Text(_))
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Bound::Float(f) => f.is_finite(),
            _ => true,
        }
    }
}

/// JSON has no NaN or infinity, so such a bound can't go on the wire
pub(crate) fn ensure_finite<'a>(
    field: &str,
    mut bounds: impl Iterator<Item = &'a Bound>,
) -> crate::error::Result<()> {
    if bounds.all(Bound::is_finite) {
        Ok(())
    } else {
        Err(crate::error::Error::NonFiniteNumber {
            field: field.to_string(),
        })
    }
}

impl Serialize for Bound {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Bound::Integer(i) => serializer.serialize_i64(*i),
            Bound::Float(f) => serializer.serialize_f64(*f),
            Bound::Instant(instant) => serializer.serialize_i64(instant.timestamp_millis()),
            Bound::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<i64> for Bound {
    fn from(value: i64) -> Self {
        Bound::Integer(value)
    }
}

impl From<i32> for Bound {
    fn from(value: i32) -> Self {
        Bound::Integer(value.into())
    }
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        Bound::Float(value)
    }
}

impl From<DateTime<Utc>> for Bound {
    fn from(value: DateTime<Utc>) -> Self {
        Bound::Instant(value)
    }
}

impl From<&str> for Bound {
    fn from(value: &str) -> Self {
        Bound::Text(value.to_string())
    }
}

impl From<String> for Bound {
    fn from(value: String) -> Self {
        Bound::Text(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeBounds {
    pub gte: Option<Bound>,
    pub gt: Option<Bound>,
    pub lte: Option<Bound>,
    pub lt: Option<Bound>,
}

impl RangeBounds {
    pub fn gte(mut self, bound: impl Into<Bound>) -> Self {
        self.gte = Some(bound.into());
        self
    }

    pub fn gt(mut self, bound: impl Into<Bound>) -> Self {
        self.gt = Some(bound.into());
        self
    }

    pub fn lte(mut self, bound: impl Into<Bound>) -> Self {
        self.lte = Some(bound.into());
        self
    }

    pub fn lt(mut self, bound: impl Into<Bound>) -> Self {
        self.lt = Some(bound.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bound> {
        [&self.gte, &self.gt, &self.lte, &self.lt]
            .into_iter()
            .flatten()
    }

    pub fn has_text(&self) -> bool {
        self.iter().any(Bound::is_text)
    }
}

/// A longitude/latitude pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Coordinate { lon, lat }
    }
}

/// An axis-aligned box in longitude (x) and latitude (y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Envelope {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Envelope {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}
