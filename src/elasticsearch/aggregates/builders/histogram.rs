use serde::*;
use serde_json::*;

#[derive(Serialize)]
struct Histogram<'a> {
    field: &'a str,
    interval: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<f64>,
}

pub fn histogram_agg(field: &str, interval: f64, offset: Option<f64>) -> Value {
    let histogram = Histogram {
        field,
        interval,
        offset,
    };

    json! {
        {
            "histogram": histogram
        }
    }
}
