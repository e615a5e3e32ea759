use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Company placeholder used when a listing does not name its employer.
pub const UNKNOWN_COMPANY: &str = "N/A";

/// Location used when a listing does not state one.
pub const DEFAULT_LOCATION: &str = "Remote";

/// Source tag of the built-in fallback dataset.
pub const SAMPLE_SOURCE: &str = "Sample";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
    pub scraped_date: NaiveDate,
    pub source: String,
}

impl JobRecord {
    /// Identity of a posting across sources.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.title, &self.company)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBodies {
    pub html: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ReportEnvelope {
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
}

#[derive(Debug, Clone, Default)]
pub struct DispatchOutcome {
    pub delivered: Vec<String>,
    /// (recipient, reason)
    pub failed: Vec<(String, String)>,
}

impl DispatchOutcome {
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }

    pub fn succeeded(&self) -> bool {
        !self.delivered.is_empty()
    }
}

// Object style note:
// Renderers are plain functions over the records of one run, so they are
// declared as empty types, e.g. `struct PlainRenderer;`. Dispatchers hold a
// transport and are used through `&self`.

pub trait ReportRenderer {
    fn render(all_jobs: &[JobRecord], top_jobs: &[JobRecord]) -> ReportBodies;
}

pub trait Dispatcher {
    /// Sends the report to every recipient of the envelope. A failure for one
    /// recipient never prevents the others from being attempted.
    fn dispatch(&self, envelope: &ReportEnvelope, bodies: &ReportBodies) -> DispatchOutcome;
}
