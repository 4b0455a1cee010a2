use crate::elasticsearch::scroll::ScrollIterator;
use crate::elasticsearch::search::{decode, SearchRequestDsl, SearchResponse};
use crate::error::{Error, Result};
use crate::model::SearchRequest;
use crate::options::ElasticsearchOptions;
use crate::utils::time_value;
use serde_json::json;
use std::borrow::Cow;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, trace};

pub mod aggregates;
pub mod scroll;
pub mod search;

/// The two calls a search needs from the cluster.  Implementations return
/// the raw reply body; decoding is done by the caller.
pub trait Transport {
    fn execute_search(
        &self,
        index: &str,
        doc_type: Option<&str>,
        request: &SearchRequestDsl,
        keep_alive: Option<Duration>,
    ) -> Result<Vec<u8>>;

    fn continue_scroll(&self, keep_alive: Duration, scroll_id: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP transport over `ureq`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    url: url::Url,
}

impl HttpTransport {
    pub fn new(options: &ElasticsearchOptions) -> Result<Self> {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        #[cfg(feature = "native_tls")]
        {
            let connector = native_tls::TlsConnector::new()
                .map_err(|e| Error::Transport(format!("failed to create TLS connector: {}", e)))?;
            builder = builder.tls_connector(std::sync::Arc::new(connector));
        }

        Ok(HttpTransport {
            agent: builder.build(),
            url: options.url.clone(),
        })
    }

    fn search_url(
        &self,
        index: &str,
        doc_type: Option<&str>,
        keep_alive: Option<Duration>,
    ) -> Result<url::Url> {
        let mut url = self.url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::Transport(format!("cannot be a base url: {}", self.url)))?;
            segments.pop_if_empty().push(index);
            if let Some(doc_type) = doc_type {
                segments.push(doc_type);
            }
            segments.push("_search");
        }
        if let Some(keep_alive) = keep_alive {
            url.query_pairs_mut()
                .append_pair("scroll", &time_value(keep_alive));
        }
        Ok(url)
    }

    fn scroll_url(&self) -> Result<url::Url> {
        self.url
            .join("_search/scroll")
            .map_err(|e| Error::Transport(e.to_string()))
    }

    fn post(&self, url: &url::Url, body: String) -> Result<Vec<u8>> {
        debug!(url = %url, "POST");
        trace!(body = %body, "request body");

        match self
            .agent
            .post(url.as_str())
            .set("content-type", "application/json")
            .send_string(&body)
        {
            Ok(response) => {
                let mut bytes = Vec::new();
                response
                    .into_reader()
                    .read_to_end(&mut bytes)
                    .map_err(|e| Error::Transport(e.to_string()))?;
                trace!(bytes = bytes.len(), "reply received");
                Ok(bytes)
            }
            Err(ureq::Error::Status(code, response)) => Err(Error::Elasticsearch {
                status: Some(code),
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(e)) => Err(Error::Transport(e.to_string())),
        }
    }
}

impl Transport for HttpTransport {
    fn execute_search(
        &self,
        index: &str,
        doc_type: Option<&str>,
        request: &SearchRequestDsl,
        keep_alive: Option<Duration>,
    ) -> Result<Vec<u8>> {
        let url = self.search_url(index, doc_type, keep_alive)?;
        let body = serde_json::to_string(request).map_err(|e| Error::Transport(e.to_string()))?;
        self.post(&url, body)
    }

    fn continue_scroll(&self, keep_alive: Duration, scroll_id: &str) -> Result<Vec<u8>> {
        let url = self.scroll_url()?;
        let body = json! {
            {
                "scroll": time_value(keep_alive),
                "scroll_id": scroll_id
            }
        };
        self.post(&url, body.to_string())
    }
}

/// A search client bound to one index
#[derive(Debug, Clone)]
pub struct Elasticsearch<T: Transport = HttpTransport> {
    transport: T,
    options: ElasticsearchOptions,
    index: String,
    doc_type: Option<String>,
}

impl Elasticsearch<HttpTransport> {
    pub fn new(options: ElasticsearchOptions, index: &str) -> Result<Self> {
        let transport = HttpTransport::new(&options)?;
        Ok(Elasticsearch::with_transport(transport, options, index))
    }
}

impl<T: Transport> Elasticsearch<T> {
    pub fn with_transport(transport: T, options: ElasticsearchOptions, index: &str) -> Self {
        Elasticsearch {
            transport,
            options,
            index: index.to_string(),
            doc_type: None,
        }
    }

    /// For clusters that still address documents by mapping type
    pub fn doc_type(mut self, doc_type: &str) -> Self {
        self.doc_type = Some(doc_type.to_string());
        self
    }

    pub fn index_name(&self) -> &str {
        &self.index
    }

    pub fn options(&self) -> &ElasticsearchOptions {
        &self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let dsl = self.prepare(request)?;
        let reply =
            self.transport
                .execute_search(&self.index, self.doc_type.as_deref(), &dsl, None)?;
        decode(&reply)
    }

    /// Run `request` as the first page of a scroll and hand back an
    /// iterator over every hit, first page included
    pub fn scroll(
        &self,
        request: &SearchRequest,
        keep_alive: Option<Duration>,
    ) -> Result<ScrollIterator<'_, T>> {
        let keep_alive = keep_alive.unwrap_or(self.options.default_keep_alive);
        let dsl = self.prepare(request)?;
        let reply = self.transport.execute_search(
            &self.index,
            self.doc_type.as_deref(),
            &dsl,
            Some(keep_alive),
        )?;
        let response = decode(&reply)?;
        Ok(ScrollIterator::new(&self.transport, response, keep_alive))
    }

    fn prepare(&self, request: &SearchRequest) -> Result<SearchRequestDsl> {
        let request = match (&request.params.time_zone, &self.options.default_time_zone) {
            (None, Some(time_zone)) => {
                let mut request = request.clone();
                request.params.time_zone = Some(time_zone.clone());
                Cow::Owned(request)
            }
            _ => Cow::Borrowed(request),
        };

        let dsl = SearchRequestDsl::compile(&request)?;
        debug!(
            index = %self.index,
            from = dsl.from,
            size = dsl.size,
            aggs = dsl.aggs.len(),
            "compiled search request"
        );
        Ok(dsl)
    }
}

#[cfg(test)]
mod tests {
    use crate::elasticsearch::{Elasticsearch, HttpTransport};
    use crate::model::{Aggregation, Query, SearchRequest};
    use crate::options::ElasticsearchOptions;
    use crate::testing::{hits_reply, reply, Call, MockTransport};
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_search_urls() {
        let options = ElasticsearchOptions::new("http://localhost:9200/es").unwrap();
        let transport = HttpTransport::new(&options).unwrap();

        assert_eq!(
            transport.search_url("earthquakes", None, None).unwrap().as_str(),
            "http://localhost:9200/es/earthquakes/_search"
        );
        assert_eq!(
            transport
                .search_url("earthquakes", Some("doc"), Some(Duration::from_secs(90)))
                .unwrap()
                .as_str(),
            "http://localhost:9200/es/earthquakes/doc/_search?scroll=90s"
        );
        assert_eq!(
            transport.scroll_url().unwrap().as_str(),
            "http://localhost:9200/es/_search/scroll"
        );
    }

    #[test]
    fn test_search_flow() {
        let mock = MockTransport::new(vec![reply(json! {
            {
                "took": 1,
                "timed_out": false,
                "_shards": { "total": 1, "successful": 1, "failed": 0 },
                "hits": { "total": 46, "max_score": null, "hits": [] },
                "aggregations": {
                    "statuses": { "buckets": [ { "key": "reviewed", "doc_count": 45 } ] }
                }
            }
        })]);

        let es = Elasticsearch::with_transport(mock, ElasticsearchOptions::default(), "earthquakes")
            .doc_type("doc");
        let request = SearchRequest::new(0, 0, Query::MatchAll)
            .with_aggs(vec![Aggregation::terms("statuses", "properties.status", 10)]);

        let response = es.search(&request).unwrap();
        assert_eq!(response.total_hits(), 46);
        assert_eq!(
            response.aggregation("statuses").unwrap().buckets.as_ref().unwrap()[0].doc_count,
            45
        );

        let calls = es.transport().calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            Call::Search {
                index,
                doc_type,
                request,
                keep_alive,
            } => {
                assert_eq!(index, "earthquakes");
                assert_eq!(doc_type.as_deref(), Some("doc"));
                assert_eq!(*keep_alive, None);
                assert_eq!(request["size"], json!(0));
                assert_eq!(request["aggs"]["statuses"]["terms"]["field"], json!("properties.status"));
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[test]
    fn test_default_time_zone_applies() {
        let mock = MockTransport::new(vec![reply(json!({"hits": {"hits": []}}))]);
        let options = ElasticsearchOptions::default().with_time_zone("+03:00");
        let es = Elasticsearch::with_transport(mock, options, "idx");

        let request = SearchRequest::default()
            .with_aggs(vec![Aggregation::date_histogram("days", "time", "1d")]);
        es.search(&request).unwrap();

        match &es.transport().calls()[0] {
            Call::Search { request, .. } => assert_eq!(
                request["aggs"]["days"]["date_histogram"]["time_zone"],
                json!("+03:00")
            ),
            other => panic!("unexpected call: {:?}", other),
        }
    }

    fn scrolled_ids(
        es: &Elasticsearch<MockTransport>,
        keep_alive: Option<Duration>,
    ) -> Vec<String> {
        let request = SearchRequest::new(0, 2, Query::term("properties.status", "reviewed"));
        es.scroll(&request, keep_alive)
            .unwrap()
            .map(|hit| hit.unwrap().id)
            .collect()
    }

    fn scroll_transport() -> MockTransport {
        MockTransport::new(vec![
            hits_reply(Some("s1"), 0..2),
            hits_reply(Some("s2"), 2..3),
            hits_reply(Some("s3"), 3..3),
        ])
    }

    #[test]
    fn test_scroll_uses_default_keep_alive() {
        let options = ElasticsearchOptions::default();
        let es = Elasticsearch::with_transport(scroll_transport(), options, "earthquakes");

        assert_eq!(scrolled_ids(&es, None), vec!["0", "1", "2"]);

        let calls = es.transport().calls();
        assert_eq!(calls.len(), 3);
        match &calls[0] {
            Call::Search {
                index,
                request,
                keep_alive,
                ..
            } => {
                assert_eq!(index, "earthquakes");
                assert_eq!(*keep_alive, Some(Duration::from_secs(60)));
                assert_eq!(request["size"], json!(2));
                assert_eq!(
                    request["query"],
                    json!({"term": {"properties.status": {"value": "reviewed"}}})
                );
            }
            other => panic!("unexpected call: {:?}", other),
        }
        assert_eq!(
            calls[1..],
            [
                Call::Scroll {
                    keep_alive: Duration::from_secs(60),
                    scroll_id: "s1".into()
                },
                Call::Scroll {
                    keep_alive: Duration::from_secs(60),
                    scroll_id: "s2".into()
                },
            ]
        );
    }

    #[test]
    fn test_scroll_keep_alive_carries_to_every_page() {
        let options = ElasticsearchOptions::default().with_keep_alive(Duration::from_secs(600));
        let es = Elasticsearch::with_transport(scroll_transport(), options, "earthquakes");

        let keep_alive = Duration::from_secs(90);
        assert_eq!(scrolled_ids(&es, Some(keep_alive)), vec!["0", "1", "2"]);

        let calls = es.transport().calls();
        assert!(matches!(
            calls[0],
            Call::Search {
                keep_alive: Some(k),
                ..
            } if k == keep_alive
        ));
        assert_eq!(
            calls[1..],
            [
                Call::Scroll {
                    keep_alive,
                    scroll_id: "s1".into()
                },
                Call::Scroll {
                    keep_alive,
                    scroll_id: "s2".into()
                },
            ]
        );
    }

    #[test]
    fn test_search_error_propagates() {
        let mock = MockTransport::new(vec![Err(crate::error::Error::Elasticsearch {
            status: Some(404),
            body: "no such index".into(),
        })]);
        let es = Elasticsearch::with_transport(mock, ElasticsearchOptions::default(), "missing");
        let error = es.search(&SearchRequest::default()).unwrap_err();
        assert_eq!(error.status(), Some(404));
    }
}
