//! Lowers portable [`Aggregation`]s into the Elasticsearch `aggs` tree

use crate::error::{Error, Result};
use crate::model::{ensure_finite, Aggregation, AggregationKind, Range, SearchParams};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

pub mod builders;
pub mod results;

use builders::*;

/// Aggregation name to body, in the order the caller supplied them
pub type AggregationMap = IndexMap<String, AggregationBody>;

/// A single aggregation: its typed node (`{"terms": {...}}`) plus any
/// sub-aggregations under `aggs`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationBody {
    #[serde(flatten)]
    pub body: Map<String, Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub aggs: AggregationMap,
}

pub fn compile_aggs(aggs: &[Aggregation], params: &SearchParams) -> Result<AggregationMap> {
    // every relative date in one request resolves against the same instant
    let now = params.now.unwrap_or_else(Utc::now);
    AggCompiler { params, now }.compile_all(aggs)
}

struct AggCompiler<'a> {
    params: &'a SearchParams,
    now: DateTime<Utc>,
}

impl AggCompiler<'_> {
    fn compile_all(&self, aggs: &[Aggregation]) -> Result<AggregationMap> {
        let mut map = AggregationMap::with_capacity(aggs.len());
        for agg in aggs {
            map.insert(agg.key.clone(), self.compile(agg)?);
        }
        Ok(map)
    }

    fn compile(&self, agg: &Aggregation) -> Result<AggregationBody> {
        let children = self.compile_all(&agg.aggs)?;
        ensure_finite_params(&agg.kind)?;

        let node = match &agg.kind {
            AggregationKind::Terms {
                field,
                size,
                sort,
                missing,
            } => terms::terms_agg(field, *size, *sort, missing.as_ref()),
            AggregationKind::Missing { field } => missing::missing_agg(field),
            AggregationKind::Cardinality { field } => metrics::cardinality_agg(field),
            AggregationKind::Stats { field } => metrics::stats_agg(field),
            AggregationKind::GeoCentroid { field } => metrics::geo_centroid_agg(field),
            AggregationKind::GeoBounds { field } => metrics::geo_bounds_agg(field),
            AggregationKind::Histogram {
                field,
                interval,
                offset,
            } => histogram::histogram_agg(field, *interval, *offset),
            AggregationKind::DateHistogram {
                field,
                interval,
                offset,
                format,
                time_zone,
            } => date_histogram::date_histogram_agg(
                field,
                interval,
                offset.as_deref(),
                format.as_deref(),
                time_zone.as_deref().or(self.params.time_zone.as_deref()),
            ),
            AggregationKind::Range { field, ranges } => range::range_agg(field, ranges),
            AggregationKind::DateRange {
                field,
                ranges,
                format,
                time_zone,
            } => date_range::date_range_agg(
                field,
                ranges,
                format.as_deref(),
                self.now,
                time_zone.as_deref().or(self.params.time_zone.as_deref()),
            )?,
            AggregationKind::GeoHash {
                field,
                precision,
                size,
            } => geohash_grid::geohash_grid_agg(field, *precision, *size),
            AggregationKind::GeoDistance {
                field,
                origin,
                unit,
                ranges,
            } => geo_distance::geo_distance_agg(field, origin, unit.as_deref(), ranges),
            AggregationKind::Filters { filters } => filters::filters_agg(filters, self.params)?,
            AggregationKind::Native(payload) => {
                return native_body(agg, native::native_agg(&agg.key, payload)?, children);
            }
            AggregationKind::Named(_) => {
                return Err(Error::UnsupportedAggregationKind {
                    key: agg.key.clone(),
                    kind: agg.kind.op().to_string(),
                })
            }
        };

        let mut body = match node {
            Value::Object(body) => body,
            _ => Map::new(),
        };

        if let Some(min_doc_count) = agg.min_doc_count {
            // goes inside the typed part, after that type's own parameters
            for params in body.values_mut() {
                if let Value::Object(params) = params {
                    params.insert("min_doc_count".into(), min_doc_count.into());
                }
            }
        }

        Ok(AggregationBody {
            body,
            aggs: children,
        })
    }
}

fn ensure_finite_params(kind: &AggregationKind) -> Result<()> {
    match kind {
        AggregationKind::Range { field, ranges }
        | AggregationKind::DateRange { field, ranges, .. }
        | AggregationKind::GeoDistance { field, ranges, .. } => {
            ensure_finite(field, ranges.iter().flat_map(Range::bounds))
        }
        AggregationKind::Histogram {
            field,
            interval,
            offset,
        } => {
            if interval.is_finite() && offset.map_or(true, f64::is_finite) {
                Ok(())
            } else {
                Err(Error::NonFiniteNumber {
                    field: field.clone(),
                })
            }
        }
        _ => Ok(()),
    }
}

/// A native body may already carry its own `aggs`.  Those come first,
/// followed by the compiled children.
fn native_body(
    agg: &Aggregation,
    mut body: Map<String, Value>,
    children: AggregationMap,
) -> Result<AggregationBody> {
    let mut aggs = AggregationMap::new();
    if let Some(existing) = body.remove("aggs") {
        match existing {
            Value::Object(existing) => {
                for (name, sub) in existing {
                    match sub {
                        Value::Object(sub) => {
                            aggs.insert(
                                name,
                                AggregationBody {
                                    body: sub,
                                    aggs: AggregationMap::new(),
                                },
                            );
                        }
                        _ => {
                            return Err(Error::MalformedNativeAggregation {
                                key: agg.key.clone(),
                                reason: format!("sub-aggregation `{}` is not an object", name),
                            })
                        }
                    }
                }
            }
            _ => {
                return Err(Error::MalformedNativeAggregation {
                    key: agg.key.clone(),
                    reason: "`aggs` is not an object".into(),
                })
            }
        }
    }
    aggs.extend(children);

    if let Some(min_doc_count) = agg.min_doc_count {
        body.insert("min_doc_count".into(), min_doc_count.into());
    }

    Ok(AggregationBody { body, aggs })
}

#[cfg(test)]
mod tests {
    use crate::elasticsearch::aggregates::compile_aggs;
    use crate::error::Error;
    use crate::model::{
        Aggregation, AggregationKind, Coordinate, Query, Range, SearchParams,
    };
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    fn compile(aggs: &[Aggregation]) -> Value {
        serde_json::to_value(compile_aggs(aggs, &SearchParams::default()).unwrap()).unwrap()
    }

    #[test]
    fn test_terms_with_children_and_min_doc_count() {
        let agg = Aggregation::terms("statuses", "properties.status", 10)
            .with_min_doc_count(4)
            .with_aggs(vec![Aggregation::stats("mag", "properties.mag")]);

        assert_eq!(
            compile(&[agg]),
            json! {
                {
                    "statuses": {
                        "terms": {
                            "field": "properties.status",
                            "size": 10,
                            "order": { "_count": "desc" },
                            "min_doc_count": 4
                        },
                        "aggs": {
                            "mag": { "stats": { "field": "properties.mag" } }
                        }
                    }
                }
            }
        );
    }

    #[test]
    fn test_terms_missing_substitute() {
        let mut agg = Aggregation::terms("alerts", "properties.alert", 10);
        if let AggregationKind::Terms { missing, .. } = &mut agg.kind {
            *missing = Some(json!("Missing-value"));
        }

        assert_eq!(
            compile(&[agg])["alerts"]["terms"]["missing"],
            json!("Missing-value")
        );
    }

    #[test]
    fn test_min_doc_count_follows_typed_fields() {
        let agg = Aggregation::histogram("mags", "properties.mag", 1.0).with_min_doc_count(1);
        let compiled = compile(&[agg]);
        let keys = compiled["mags"]["histogram"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["field", "interval", "min_doc_count"]);
    }

    #[test]
    fn test_sibling_order_is_preserved() {
        let aggs = vec![
            Aggregation::cardinality("z", "f"),
            Aggregation::missing("a", "f"),
            Aggregation::geo_centroid("m", "geometry"),
        ];
        let compiled = compile(&aggs);
        let names = compiled.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_nested_three_deep() {
        let agg = Aggregation::terms("a", "fa", 5).with_aggs(vec![Aggregation::date_histogram(
            "b", "time", "1d",
        )
        .with_aggs(vec![Aggregation::geo_bounds("c", "geometry")])]);

        assert_eq!(
            compile(&[agg]),
            json! {
                {
                    "a": {
                        "terms": { "field": "fa", "size": 5, "order": { "_count": "desc" } },
                        "aggs": {
                            "b": {
                                "date_histogram": { "field": "time", "calendar_interval": "1d" },
                                "aggs": {
                                    "c": { "geo_bounds": { "field": "geometry" } }
                                }
                            }
                        }
                    }
                }
            }
        );
    }

    #[test]
    fn test_date_histogram_falls_back_to_params_time_zone() {
        let params = SearchParams::default().with_time_zone("-07:00");
        let aggs = vec![Aggregation::date_histogram("days", "time", "day")];
        let compiled = serde_json::to_value(compile_aggs(&aggs, &params).unwrap()).unwrap();
        assert_eq!(compiled["days"]["date_histogram"]["time_zone"], json!("-07:00"));
    }

    #[test]
    fn test_date_range_uses_params_anchor() {
        let now = Utc.with_ymd_and_hms(2024, 3, 13, 15, 42, 7).unwrap();
        let params = SearchParams::default().with_now(now).with_time_zone("UTC");
        let aggs = vec![Aggregation::date_range(
            "recent",
            "time",
            vec![Range::new().key("last day").from("now-1d").to("now")],
        )];

        let compiled = serde_json::to_value(compile_aggs(&aggs, &params).unwrap()).unwrap();
        assert_eq!(
            compiled["recent"]["date_range"]["ranges"],
            json!([{
                "key": "last day",
                "from": now.timestamp_millis() - 86_400_000,
                "to": now.timestamp_millis()
            }])
        );
    }

    #[test]
    fn test_date_range_in_named_zone_across_daylight_saving() {
        // New York springs forward on 2024-03-10, so both local midnights
        // are EST even though `now` is EDT
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let params = SearchParams::default()
            .with_now(now)
            .with_time_zone("America/New_York");
        let aggs = vec![Aggregation::date_range(
            "yesterday",
            "time",
            vec![Range::new().from("now-1d/d").to("now/d")],
        )];

        let compiled = serde_json::to_value(compile_aggs(&aggs, &params).unwrap()).unwrap();
        assert_eq!(
            compiled["yesterday"]["date_range"]["ranges"],
            json!([{
                "from": Utc.with_ymd_and_hms(2024, 3, 9, 5, 0, 0).unwrap().timestamp_millis(),
                "to": Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap().timestamp_millis()
            }])
        );
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        let aggs = vec![
            Aggregation::range("r", "properties.mag", vec![Range::new().from(f64::INFINITY)]),
            Aggregation::date_range("dr", "time", vec![Range::new().to(f64::NAN)]),
            Aggregation::geo_distance(
                "rings",
                "geometry",
                Coordinate::new(10.0, 20.0),
                vec![Range::new().to(f64::NEG_INFINITY)],
            ),
            Aggregation::histogram("h", "properties.mag", f64::NAN),
        ];

        for agg in aggs {
            // nested, so a bad child fails the whole tree
            let outer = Aggregation::terms("outer", "f", 1).with_aggs(vec![agg.clone()]);
            match compile_aggs(&[outer], &SearchParams::default()) {
                Err(Error::NonFiniteNumber { field }) => assert!(
                    field == "properties.mag" || field == "time" || field == "geometry",
                    "{}",
                    field
                ),
                other => panic!("{:?} compiled to {:?}", agg, other),
            }
        }
    }

    #[test]
    fn test_geo_distance_and_geohash() {
        let aggs = vec![
            Aggregation::geo_distance(
                "rings",
                "geometry",
                Coordinate::new(10.0, 20.0),
                vec![Range::new().to(50)],
            ),
            Aggregation::geohash("cells", "geometry", Some(4)),
        ];
        assert_eq!(
            compile(&aggs),
            json! {
                {
                    "rings": {
                        "geo_distance": {
                            "field": "geometry",
                            "origin": { "lat": 20.0, "lon": 10.0 },
                            "ranges": [ { "to": 50 } ]
                        }
                    },
                    "cells": { "geohash_grid": { "field": "geometry", "precision": 4 } }
                }
            }
        );
    }

    #[test]
    fn test_filters_min_doc_count() {
        let agg = Aggregation::filters(
            "alerts",
            vec![("red".to_string(), Query::term("properties.alert", "red"))],
        )
        .with_min_doc_count(2);

        assert_eq!(
            compile(&[agg]),
            json! {
                {
                    "alerts": {
                        "filters": {
                            "filters": {
                                "red": { "term": { "properties.alert": { "value": "red" } } }
                            },
                            "min_doc_count": 2
                        }
                    }
                }
            }
        );
    }

    #[test]
    fn test_native_passthrough_with_children() {
        let agg = Aggregation::native(
            "pct",
            json!({
                "percentiles": { "field": "properties.mag" },
                "aggs": { "inner": { "max": { "field": "properties.mag" } } }
            }),
        )
        .with_min_doc_count(3)
        .with_aggs(vec![Aggregation::cardinality("places", "properties.place")]);

        assert_eq!(
            compile(&[agg]),
            json! {
                {
                    "pct": {
                        "percentiles": { "field": "properties.mag" },
                        "min_doc_count": 3,
                        "aggs": {
                            "inner": { "max": { "field": "properties.mag" } },
                            "places": { "cardinality": { "field": "properties.place" } }
                        }
                    }
                }
            }
        );
    }

    #[test]
    fn test_native_with_bad_aggs_member() {
        let agg = Aggregation::native("pct", json!({"percentiles": {}, "aggs": [1]}));
        assert!(matches!(
            compile_aggs(&[agg], &SearchParams::default()),
            Err(Error::MalformedNativeAggregation { .. })
        ));
    }

    #[test]
    fn test_named_is_unsupported() {
        let aggs = vec![Aggregation::terms("outer", "f", 1).with_aggs(vec![Aggregation::new(
            "saved",
            AggregationKind::Named("top-places".into()),
        )])];

        match compile_aggs(&aggs, &SearchParams::default()) {
            Err(Error::UnsupportedAggregationKind { key, kind }) => {
                assert_eq!(key, "saved");
                assert_eq!(kind, "named");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_no_nulls_on_the_wire() {
        let aggs = vec![
            Aggregation::terms("t", "f", 1),
            Aggregation::histogram("h", "f", 2.0),
            Aggregation::date_histogram("dh", "f", "3h"),
            Aggregation::date_range("dr", "f", vec![Range::new().to(1)]),
            Aggregation::geohash("g", "f", None),
            Aggregation::range("r", "f", vec![Range::new()]),
        ];
        let wire = serde_json::to_string(&compile_aggs(&aggs, &SearchParams::default()).unwrap())
            .unwrap();
        assert!(!wire.contains("null"), "{}", wire);
    }
}
