use crate::error::{Error, Result};
use crate::misc::date_math::parse_time_zone;
use std::time::Duration;

pub const ENV_URL: &str = "SEARCH_WIRE_URL";
pub const ENV_SCROLL_KEEP_ALIVE: &str = "SEARCH_WIRE_SCROLL_KEEP_ALIVE";
pub const ENV_TIME_ZONE: &str = "SEARCH_WIRE_TIME_ZONE";
pub const ENV_TIMEOUT: &str = "SEARCH_WIRE_TIMEOUT";

const DEFAULT_URL: &str = "http://localhost:9200/";
const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(60);

/// Connection and request defaults shared by every search issued through
/// an [`crate::Elasticsearch`] client.
#[derive(Debug, Clone, PartialEq)]
pub struct ElasticsearchOptions {
    /// Base url of the cluster.  Always ends with a forward slash.
    pub url: url::Url,

    /// How long Elasticsearch keeps a scroll context alive between pages
    pub default_keep_alive: Duration,

    /// Time zone applied to date math when neither the request nor the
    /// individual predicate names one
    pub default_time_zone: Option<String>,

    pub timeout: Option<Duration>,
}

impl Default for ElasticsearchOptions {
    fn default() -> Self {
        ElasticsearchOptions {
            url: url::Url::parse(DEFAULT_URL).expect("default url is valid"),
            default_keep_alive: DEFAULT_KEEP_ALIVE,
            default_time_zone: None,
            timeout: None,
        }
    }
}

impl ElasticsearchOptions {
    pub fn new(url: &str) -> Result<Self> {
        Ok(ElasticsearchOptions {
            url: parse_url(url)?,
            ..Default::default()
        })
    }

    /// Build options from `SEARCH_WIRE_*` environment variables, falling
    /// back to defaults for anything unset
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = ElasticsearchOptions::default();

        if let Some(url) = lookup(ENV_URL) {
            options.url = parse_url(&url)?;
        }
        if let Some(keep_alive) = lookup(ENV_SCROLL_KEEP_ALIVE) {
            options.default_keep_alive = parse_duration(ENV_SCROLL_KEEP_ALIVE, &keep_alive)?;
        }
        if let Some(time_zone) = lookup(ENV_TIME_ZONE) {
            let time_zone = time_zone.trim();
            if !time_zone.is_empty() {
                parse_time_zone(time_zone).map_err(|e| {
                    Error::Config(format!("{} is not usable: {}", ENV_TIME_ZONE, e))
                })?;
                options.default_time_zone = Some(time_zone.to_string());
            }
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            options.timeout = Some(parse_duration(ENV_TIMEOUT, &timeout)?);
        }

        Ok(options)
    }

    pub fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.default_keep_alive = keep_alive;
        self
    }

    pub fn with_time_zone(mut self, time_zone: &str) -> Self {
        self.default_time_zone = Some(time_zone.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn parse_url(url: &str) -> Result<url::Url> {
    // a base url without the trailing slash would have its last path
    // segment replaced when joined with "_search"
    let url = if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    };

    url::Url::parse(&url).map_err(|e| Error::Config(format!("malformed url `{}`: {}", url, e)))
}

fn parse_duration(name: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value.trim())
        .map_err(|e| Error::Config(format!("{} has an invalid duration `{}`: {}", name, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let options = ElasticsearchOptions::from_lookup(lookup(&[])).unwrap();
        assert_eq!(options.url.as_str(), "http://localhost:9200/");
        assert_eq!(options.default_keep_alive, Duration::from_secs(60));
        assert_eq!(options.default_time_zone, None);
        assert_eq!(options.timeout, None);
    }

    #[test]
    fn test_from_env_vars() {
        let options = ElasticsearchOptions::from_lookup(lookup(&[
            (ENV_URL, "http://es.internal:19200"),
            (ENV_SCROLL_KEEP_ALIVE, "10m"),
            (ENV_TIME_ZONE, "-05:00"),
            (ENV_TIMEOUT, "30s"),
        ]))
        .unwrap();

        assert_eq!(options.url.as_str(), "http://es.internal:19200/");
        assert_eq!(options.default_keep_alive, Duration::from_secs(600));
        assert_eq!(options.default_time_zone.as_deref(), Some("-05:00"));
        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_bad_duration() {
        let result =
            ElasticsearchOptions::from_lookup(lookup(&[(ENV_SCROLL_KEEP_ALIVE, "forever")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_time_zone_is_checked() {
        let options =
            ElasticsearchOptions::from_lookup(lookup(&[(ENV_TIME_ZONE, " America/New_York ")]))
                .unwrap();
        assert_eq!(options.default_time_zone.as_deref(), Some("America/New_York"));

        let result = ElasticsearchOptions::from_lookup(lookup(&[(ENV_TIME_ZONE, "Eastern-ish")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_bad_url() {
        assert!(matches!(
            ElasticsearchOptions::new("not a url"),
            Err(Error::Config(_))
        ));
    }
}
