use crate::elasticsearch::search::SearchRequestDsl;
use crate::elasticsearch::Transport;
use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::ops::Range;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Search {
        index: String,
        doc_type: Option<String>,
        request: Value,
        keep_alive: Option<Duration>,
    },
    Scroll {
        keep_alive: Duration,
        scroll_id: String,
    },
}

/// Hands out canned replies in order and records every call made against it
pub(crate) struct MockTransport {
    replies: Mutex<VecDeque<Result<Vec<u8>>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub(crate) fn new(replies: Vec<Result<Vec<u8>>>) -> Self {
        MockTransport {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    fn respond(&self, call: Call) -> Result<Vec<u8>> {
        self.calls.lock().expect("calls lock poisoned").push(call);
        self.replies
            .lock()
            .expect("replies lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("no canned reply left".into())))
    }
}

impl Transport for MockTransport {
    fn execute_search(
        &self,
        index: &str,
        doc_type: Option<&str>,
        request: &SearchRequestDsl,
        keep_alive: Option<Duration>,
    ) -> Result<Vec<u8>> {
        self.respond(Call::Search {
            index: index.to_string(),
            doc_type: doc_type.map(str::to_string),
            request: serde_json::to_value(request).expect("request must serialize"),
            keep_alive,
        })
    }

    fn continue_scroll(&self, keep_alive: Duration, scroll_id: &str) -> Result<Vec<u8>> {
        self.respond(Call::Scroll {
            keep_alive,
            scroll_id: scroll_id.to_string(),
        })
    }
}

pub(crate) fn reply(value: Value) -> Result<Vec<u8>> {
    Ok(value.to_string().into_bytes())
}

/// A search reply whose hits have ids `ids.start..ids.end`
pub(crate) fn hits_reply(scroll_id: Option<&str>, ids: Range<usize>) -> Result<Vec<u8>> {
    let hits = ids
        .map(|id| {
            json! {
                {
                    "_index": "earthquakes",
                    "_id": id.to_string(),
                    "_score": 1.0,
                    "_source": { "seq": id }
                }
            }
        })
        .collect::<Vec<_>>();

    let mut body = json! {
        {
            "took": 1,
            "timed_out": false,
            "_shards": { "total": 1, "successful": 1, "skipped": 0, "failed": 0 },
            "hits": {
                "total": { "value": hits.len(), "relation": "eq" },
                "max_score": 1.0,
                "hits": hits
            }
        }
    };
    if let Some(scroll_id) = scroll_id {
        body["_scroll_id"] = json!(scroll_id);
    }
    reply(body)
}
