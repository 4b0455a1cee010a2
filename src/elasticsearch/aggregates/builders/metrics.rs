//! Single-field metric aggregations

use serde_json::*;

fn field_metric(op: &str, field: &str) -> Value {
    json! {
       {
          op: {
             "field": field
          }
       }
    }
}

pub fn cardinality_agg(field: &str) -> Value {
    field_metric("cardinality", field)
}

pub fn stats_agg(field: &str) -> Value {
    field_metric("stats", field)
}

pub fn geo_centroid_agg(field: &str) -> Value {
    field_metric("geo_centroid", field)
}

pub fn geo_bounds_agg(field: &str) -> Value {
    field_metric("geo_bounds", field)
}

#[cfg(test)]
mod tests {
    use crate::elasticsearch::aggregates::builders::metrics::*;
    use serde_json::json;

    #[test]
    fn test_metrics() {
        assert_eq!(
            cardinality_agg("properties.place"),
            json!({"cardinality": {"field": "properties.place"}})
        );
        assert_eq!(
            stats_agg("properties.mag"),
            json!({"stats": {"field": "properties.mag"}})
        );
        assert_eq!(
            geo_centroid_agg("geometry"),
            json!({"geo_centroid": {"field": "geometry"}})
        );
        assert_eq!(
            geo_bounds_agg("geometry"),
            json!({"geo_bounds": {"field": "geometry"}})
        );
    }
}
