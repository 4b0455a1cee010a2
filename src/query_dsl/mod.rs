//! Elasticsearch query DSL, one module per query type, plus the compiler
//! that lowers a portable [`Query`] into it.

use crate::error::{Error, Result};
use crate::model::{ensure_finite, Query, SearchParams};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub mod boolean;
pub mod field_exists;
pub mod geo;
pub mod match_all;
pub mod matches;
pub mod prefix;
pub mod query_string;
pub mod range;
pub mod regexp;
pub mod template;
pub mod term;
pub mod wildcard;

pub use self::boolean::BoolQuery;
pub use self::field_exists::ExistsQuery;
pub use self::geo::GeoBoundingBox;
pub use self::match_all::MatchAllQuery;
pub use self::matches::MatchQuery;
pub use self::query_string::QueryStringQuery;
pub use self::range::RangeQuery;
pub use self::template::TemplateQuery;
pub use self::term::{TermQuery, TermsQuery};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryDsl {
    Bool(BoolQuery),
    MatchAll(MatchAllQuery),
    Term(FieldQuery<TermQuery>),
    Terms(TermsQuery),
    Match(FieldQuery<MatchQuery>),
    Range(FieldQuery<RangeQuery>),
    Regexp(FieldQuery<ValueQuery>),
    Prefix(FieldQuery<ValueQuery>),
    Wildcard(FieldQuery<ValueQuery>),
    QueryString(QueryStringQuery),
    GeoBoundingBox(FieldQuery<GeoBoundingBox>),
    Exists(ExistsQuery),
    Template(TemplateQuery),
}

/// The `{ "<field>": { ... } }` wrapper most leaf queries put around their
/// parameters
#[derive(Debug, Clone, PartialEq)]
pub struct FieldQuery<T> {
    pub field: String,
    pub query: T,
}

impl<T> FieldQuery<T> {
    pub fn new(field: &str, query: T) -> Self {
        FieldQuery {
            field: field.to_string(),
            query,
        }
    }
}

impl<T: Serialize> Serialize for FieldQuery<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.query)?;
        map.end()
    }
}

/// Parameters shared by `regexp`, `prefix` and `wildcard`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueQuery {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
}

impl ValueQuery {
    pub fn new(value: &str) -> Self {
        ValueQuery {
            value: value.to_string(),
            boost: None,
        }
    }
}

#[cfg(test)]
impl QueryDsl {
    pub(crate) fn into_value(self) -> serde_json::Value {
        serde_json::to_value(self).expect("query dsl must serialize")
    }
}

/// Lower a portable query into Elasticsearch query DSL.
///
/// Composite queries are compiled depth-first and keep their children in
/// the order given, since clause order feeds into scoring.
pub fn compile(query: &Query, params: &SearchParams) -> Result<QueryDsl> {
    Ok(match query {
        Query::And(of) => BoolQuery::must(compile_all("and", of, params)?),
        Query::Or(of) => BoolQuery::should(compile_all("or", of, params)?),
        Query::Not(of) => BoolQuery::must_not(compile_all("not", of, params)?),
        Query::MatchAll => match_all::match_all(),
        Query::Term { field, value } => term::term(field, value),
        Query::Terms { field, values } => term::terms(field, values.clone()),
        Query::Match {
            field,
            value,
            operator,
        } => matches::match_query(field, value, *operator),
        Query::Range { field, bounds } => {
            ensure_finite(field, bounds.iter())?;
            range::range(field, bounds)
        }
        Query::DateRange {
            field,
            bounds,
            format,
            time_zone,
        } => {
            ensure_finite(field, bounds.iter())?;
            // only relative (string) bounds need the engine to localize
            // anything; concrete instants are already absolute
            let time_zone = if bounds.has_text() {
                time_zone.as_deref().or(params.time_zone.as_deref())
            } else {
                None
            };
            range::date_range(field, bounds, format.as_deref(), time_zone)
        }
        Query::Regex { field, value } => regexp::regexp(field, value),
        Query::Prefix { field, value } => prefix::prefix(field, value),
        Query::Wildcard { field, value } => wildcard::wildcard(field, value),
        Query::Exists { field, exists } => {
            if *exists {
                field_exists::field_exists(field)
            } else {
                field_exists::field_missing(field)
            }
        }
        Query::BoundingBox { field, envelope } => geo::geo_bounding_box(field, envelope),
        Query::QueryString {
            query,
            default_field,
            default_operator,
        } => query_string::query_string(query, default_field.as_deref(), *default_operator),
        Query::Named(_) => return Err(Error::UnsupportedQueryKind(query.kind().to_string())),
    })
}

fn compile_all(kind: &'static str, queries: &[Query], params: &SearchParams) -> Result<Vec<QueryDsl>> {
    if queries.is_empty() {
        return Err(Error::EmptyCompositeQuery(kind));
    }

    queries.iter().map(|query| compile(query, params)).collect()
}
