use crate::fallback::sample_dataset;
use crate::fetcher::Fetcher;
use crate::sources::default_sources;
use crate::traits::JobSource;
use crate::types::{JobRecord, Result, SourceLimits};
use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

const DEFAULT_PACING: Duration = Duration::from_secs(2);

/// Runs every source once, in order, and merges what they found.
pub struct JobAggregator {
    fetcher: Fetcher,
    sources: Vec<Box<dyn JobSource>>,
    pacing: Duration,
}

impl JobAggregator {
    pub fn new<S: AsRef<str>>(fetcher: Fetcher, relevance_keywords: &[S]) -> Result<Self> {
        Ok(Self {
            fetcher,
            sources: default_sources(relevance_keywords)?,
            pacing: DEFAULT_PACING,
        })
    }

    pub fn with_sources(fetcher: Fetcher, sources: Vec<Box<dyn JobSource>>) -> Self {
        Self {
            fetcher,
            sources,
            pacing: DEFAULT_PACING,
        }
    }

    /// Delay between two consecutive sources.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.source_name()).collect()
    }

    pub async fn aggregate(&self, limits: &SourceLimits) -> Vec<JobRecord> {
        info!("Starting multi-source job scrape: {}", self.source_names().join(", "));

        let mut batches = Vec::with_capacity(self.sources.len());
        for (index, source) in self.sources.iter().enumerate() {
            if index > 0 && !self.pacing.is_zero() {
                debug!("Pausing {:?} before {}", self.pacing, source.source_name());
                tokio::time::sleep(self.pacing).await;
            }

            let records = source
                .extract(&self.fetcher, limits.for_source(source.source_name()))
                .await;
            if records.is_empty() {
                info!("Source {}: no jobs found", source.source_name());
            } else {
                info!("Source {}: added {} jobs", source.source_name(), records.len());
            }
            batches.push(records);
        }

        combine(batches, Local::now().date_naive())
    }
}

/// Concatenates per-source batches in order, substitutes the sample dataset
/// when nothing was found, then drops duplicates.
pub fn combine(batches: Vec<Vec<JobRecord>>, fallback_date: NaiveDate) -> Vec<JobRecord> {
    let mut all_jobs: Vec<JobRecord> = batches.into_iter().flatten().collect();

    if all_jobs.is_empty() {
        warn!("No jobs scraped from any source, using sample data");
        all_jobs = sample_dataset(fallback_date);
    }

    deduplicate(all_jobs)
}

/// Keeps the first record for every (title, company) pair.
pub fn deduplicate(records: Vec<JobRecord>) -> Vec<JobRecord> {
    let total = records.len();
    let first_seen: Vec<bool> = {
        let mut seen = HashSet::new();
        records.iter().map(|record| seen.insert(record.dedup_key())).collect()
    };

    let unique: Vec<JobRecord> = records
        .into_iter()
        .zip(first_seen)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect();

    let removed = total - unique.len();
    if removed > 0 {
        info!("Removed {} duplicate jobs", removed);
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, company: &str, source: &str) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            link: format!("https://{}.example/{}", source.to_lowercase(), title.len()),
            scraped_date: NaiveDate::from_ymd_opt(2025, 5, 5).unwrap(),
            source: source.to_string(),
        }
    }

    #[test]
    fn first_occurrence_wins_across_sources() {
        let batches = vec![
            vec![record("ML Engineer", "Acme", "RemoteOK")],
            vec![
                record("ML Engineer", "Acme", "Himalayas"),
                record("ML Engineer", "acme", "Himalayas"),
            ],
        ];
        let jobs = combine(batches, NaiveDate::from_ymd_opt(2025, 5, 5).unwrap());

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].source, "RemoteOK");
        // Case-sensitive key: a differently cased company is a different posting.
        assert_eq!(jobs[1].company, "acme");
    }

    #[test]
    fn empty_batches_fall_back_to_sample_data() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        let jobs = combine(vec![Vec::new(), Vec::new()], date);
        assert_eq!(jobs, sample_dataset(date));
    }

    #[test]
    fn batches_keep_source_order() {
        let batches = vec![
            vec![record("A role one", "X", "First"), record("A role two", "X", "First")],
            Vec::new(),
            vec![record("B role one", "Y", "Third")],
        ];
        let jobs = combine(batches, NaiveDate::from_ymd_opt(2025, 5, 5).unwrap());
        let titles: Vec<&str> = jobs.iter().map(|job| job.title.as_str()).collect();
        assert_eq!(titles, vec!["A role one", "A role two", "B role one"]);
    }
}
