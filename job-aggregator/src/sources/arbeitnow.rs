use crate::filter::KeywordMatcher;
use crate::sources::RawPosting;
use crate::traits::JobSource;
use crate::types::{JobRecord, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

/// Terms that mark an Arbeitnow posting as AI/ML work.
pub const DEFAULT_RELEVANCE_KEYWORDS: &[&str] = &[
    "ai",
    "artificial intelligence",
    "machine learning",
    "ml engineer",
    "data scientist",
    "deep learning",
    "nlp",
    "computer vision",
    "neural network",
    "pytorch",
    "tensorflow",
    "llm",
    "generative ai",
];

#[derive(Debug, Deserialize)]
struct BoardResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BoardJob {
    title: Option<String>,
    description: Option<String>,
    tags: Option<Vec<String>>,
    location: Option<String>,
    company_name: Option<String>,
    url: Option<String>,
}

impl BoardJob {
    fn is_relevant(&self, matcher: &KeywordMatcher) -> bool {
        let tags = self.tags.as_deref().unwrap_or_default().join(" ");
        matcher.matches_any(&[
            self.title.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
            tags.as_str(),
        ])
    }
}

/// Arbeitnow's public job board API. The board is not topic-filtered, so
/// entries are classified locally before they become records.
pub struct ArbeitnowSource {
    base_url: String,
    relevance: KeywordMatcher,
}

impl ArbeitnowSource {
    pub const NAME: &'static str = "Arbeitnow";
    pub const BASE_URL: &'static str = "https://www.arbeitnow.com";
    const PATH: &'static str = "/api/job-board-api";

    pub fn new() -> Self {
        Self::with_base_url(Self::BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            relevance: KeywordMatcher::new(DEFAULT_RELEVANCE_KEYWORDS),
        }
    }

    pub fn with_keywords<S: AsRef<str>>(mut self, keywords: &[S]) -> Self {
        self.relevance = KeywordMatcher::new(keywords);
        self
    }
}

impl Default for ArbeitnowSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobSource for ArbeitnowSource {
    fn source_name(&self) -> &str {
        Self::NAME
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, Self::PATH)
    }

    fn parse(&self, body: &str, max_records: usize, scraped_date: NaiveDate) -> Result<Vec<JobRecord>> {
        let response: BoardResponse = serde_json::from_str(body)?;
        debug!("Found {} job listings on {}", response.data.len(), Self::NAME);

        let mut records = Vec::new();
        for entry in response.data {
            if records.len() >= max_records {
                break;
            }
            let job: BoardJob = match serde_json::from_value(entry) {
                Ok(job) => job,
                Err(e) => {
                    debug!("{}: malformed entry skipped: {}", Self::NAME, e);
                    continue;
                }
            };
            if !job.is_relevant(&self.relevance) {
                continue;
            }
            let posting = RawPosting {
                title: job.title,
                company: job.company_name,
                location: job.location,
                link: job.url,
            };
            if let Some(record) = posting.into_record(Self::NAME, &self.base_url, scraped_date) {
                records.push(record);
            }
        }
        Ok(records)
    }
}
