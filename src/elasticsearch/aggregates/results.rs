//! Aggregation results as they come back in a search reply.
//!
//! Bucketing aggregations return their buckets either as an array or, when
//! keyed (`filters`, `keyed: true` ranges), as an object whose member names
//! are the bucket keys.  Both decode into the same ordered `Vec<Bucket>`.

use crate::error::Result;
use crate::model::{Coordinate, Envelope};
use crate::utils::json_to_string;
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AggregationResult {
    #[serde(default, deserialize_with = "deserialize_buckets")]
    pub buckets: Option<Vec<Bucket>>,
    pub doc_count: Option<u64>,
    pub count: Option<u64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    pub sum: Option<f64>,
    pub doc_count_error_upper_bound: Option<i64>,
    pub sum_other_doc_count: Option<u64>,

    /// Everything not modeled above, e.g. `value` for cardinality or
    /// `location` for geo_centroid
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawBucket")]
pub struct Bucket {
    pub key: String,
    pub key_as_string: Option<String>,
    pub doc_count: u64,
    pub from: Option<f64>,
    pub to: Option<f64>,

    /// Sub-aggregation results by name, plus anything else the engine
    /// put in the bucket
    pub other: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawBucket {
    key: Option<Value>,
    key_as_string: Option<String>,
    #[serde(default)]
    doc_count: u64,
    from: Option<f64>,
    to: Option<f64>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

impl From<RawBucket> for Bucket {
    fn from(raw: RawBucket) -> Self {
        Bucket {
            key: raw.key.and_then(json_to_string).unwrap_or_default(),
            key_as_string: raw.key_as_string,
            doc_count: raw.doc_count,
            from: raw.from,
            to: raw.to,
            other: raw.other,
        }
    }
}

impl Bucket {
    /// Decode the sub-aggregation `name`, if the bucket has one
    pub fn aggregation(&self, name: &str) -> Result<Option<AggregationResult>> {
        match self.other.get(name) {
            Some(value) => Ok(Some(AggregationResult::deserialize(value)?)),
            None => Ok(None),
        }
    }
}

impl AggregationResult {
    /// Single-value metrics (`cardinality`, `avg`, ...) report here
    pub fn value(&self) -> Option<&Value> {
        self.other.get("value")
    }

    /// `geo_centroid`
    pub fn centroid(&self) -> Option<Coordinate> {
        self.other.get("location").and_then(point)
    }

    /// `geo_bounds`
    pub fn bounds(&self) -> Option<Envelope> {
        let bounds = self.other.get("bounds")?;
        let top_left = point(bounds.get("top_left")?)?;
        let bottom_right = point(bounds.get("bottom_right")?)?;
        Some(Envelope::new(
            top_left.lon,
            bottom_right.lat,
            bottom_right.lon,
            top_left.lat,
        ))
    }

    /// `percentiles` and friends
    pub fn values(&self) -> Option<&Map<String, Value>> {
        self.other.get("values").and_then(Value::as_object)
    }
}

fn point(value: &Value) -> Option<Coordinate> {
    Some(Coordinate::new(
        value.get("lon")?.as_f64()?,
        value.get("lat")?.as_f64()?,
    ))
}

fn deserialize_buckets<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<Bucket>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct BucketsVisitor;

    impl<'de> Visitor<'de> for BucketsVisitor {
        type Value = Option<Vec<Bucket>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an array of buckets or an object of keyed buckets")
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut buckets = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(bucket) = seq.next_element::<Bucket>()? {
                buckets.push(bucket);
            }
            Ok(Some(buckets))
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut buckets = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, mut bucket)) = map.next_entry::<String, Bucket>()? {
                // the member name is the key in this form
                bucket.key = key;
                buckets.push(bucket);
            }
            Ok(Some(buckets))
        }
    }

    deserializer.deserialize_any(BucketsVisitor)
}
