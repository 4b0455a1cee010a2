use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported query type: {0}")]
    UnsupportedQueryKind(String),

    #[error("Unsupported aggregation type: key = {key}, op = {kind}")]
    UnsupportedAggregationKind { key: String, kind: String },

    #[error("`{0}` query requires at least one clause")]
    EmptyCompositeQuery(&'static str),

    #[error("Malformed native aggregation `{key}`: {reason}")]
    MalformedNativeAggregation { key: String, reason: String },

    #[error("Invalid date math expression `{expression}`: {reason}")]
    InvalidDateMath { expression: String, reason: String },

    #[error("Non-finite number for `{field}`")]
    NonFiniteNumber { field: String },

    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),

    #[error("Malformed Elasticsearch reply: {0}")]
    MalformedReply(#[from] serde_json::Error),

    #[error("Scroll is exhausted")]
    ScrollExhausted,

    #[error("Elasticsearch error (status={status:?}): {body}")]
    Elasticsearch { status: Option<u16>, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Elasticsearch { status, .. } => *status,
            _ => None,
        }
    }

    pub(crate) fn date_math(expression: &str, reason: impl Into<String>) -> Self {
        Error::InvalidDateMath {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
