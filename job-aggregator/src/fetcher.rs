use crate::types::{AggregatorError, FetchConfig, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// One HTTP client per run, shared by every source.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let accept = HeaderValue::from_str(&config.accept).map_err(|source| AggregatorError::Header {
            value: config.accept.clone(),
            source,
        })?;
        headers.insert(ACCEPT, accept);
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    /// Single GET. There is no retry: a failure is final for this run.
    pub async fn fetch_document(&self, url: &str) -> Result<String> {
        let start_time = Instant::now();
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AggregatorError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await?;
        info!(
            "Fetched {} ({} bytes in {}ms)",
            url,
            body.len(),
            start_time.elapsed().as_millis()
        );
        Ok(body)
    }
}
