use std::collections::HashMap;

pub use interfaces::defs::{JobRecord, ReportBodies, ReportEnvelope, ReportRenderer, Dispatcher, DispatchOutcome};
pub use interfaces::defs::{DEFAULT_LOCATION, SAMPLE_SOURCE, UNKNOWN_COMPANY};

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub accept: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
            timeout_seconds: 15,
        }
    }
}

/// Per-source record caps, looked up by source name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLimits {
    pub default_limit: usize,
    pub per_source: HashMap<String, usize>,
}

impl SourceLimits {
    pub fn uniform(limit: usize) -> Self {
        Self {
            default_limit: limit,
            per_source: HashMap::new(),
        }
    }

    pub fn with_limit(mut self, source: &str, limit: usize) -> Self {
        self.per_source.insert(source.to_string(), limit);
        self
    }

    pub fn for_source(&self, source: &str) -> usize {
        self.per_source.get(source).copied().unwrap_or(self.default_limit)
    }
}

impl Default for SourceLimits {
    fn default() -> Self {
        Self::uniform(20)
            .with_limit("RemoteOK", 25)
            .with_limit("WeWorkRemotely", 20)
            .with_limit("Arbeitnow", 20)
            .with_limit("Himalayas", 25)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: reqwest::StatusCode },

    #[error("Invalid header value {value:?}: {source}")]
    Header {
        value: String,
        source: reqwest::header::InvalidHeaderValue,
    },

    #[error("Invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
