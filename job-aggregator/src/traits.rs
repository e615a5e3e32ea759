use crate::fetcher::Fetcher;
use crate::types::{JobRecord, Result};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

/// One job board with hand-tuned extraction rules.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Name recorded in `JobRecord::source`
    fn source_name(&self) -> &str;

    /// Document fetched on every run
    fn url(&self) -> String;

    /// Turn a fetched document into at most `max_records` records.
    /// Postings missing a required field are skipped, not reported as errors.
    fn parse(&self, body: &str, max_records: usize, scraped_date: NaiveDate) -> Result<Vec<JobRecord>>;

    /// Fetch and parse. Never fails: a dead source simply contributes nothing.
    async fn extract(&self, fetcher: &Fetcher, max_records: usize) -> Vec<JobRecord> {
        let url = self.url();
        info!("Scraping {} ({})", self.source_name(), url);

        let body = match fetcher.fetch_document(&url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Error scraping {}: {}", self.source_name(), e);
                return Vec::new();
            }
        };

        let scraped_date = Local::now().date_naive();
        match self.parse(&body, max_records, scraped_date) {
            Ok(records) => {
                info!("Parsed {} jobs from {}", records.len(), self.source_name());
                records
            }
            Err(e) => {
                warn!("Error parsing {}: {}", self.source_name(), e);
                Vec::new()
            }
        }
    }
}
