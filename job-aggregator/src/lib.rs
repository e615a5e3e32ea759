pub mod types;
pub mod extract;
pub mod utils;
pub mod fetcher;
pub mod traits;
pub mod sources;
pub mod fallback;
pub mod aggregator;
pub mod filter;
pub mod report;
pub mod export;
pub mod schedule;
pub mod config;
pub mod pipeline;
pub mod inspect;

pub use types::*;
pub use fetcher::Fetcher;
pub use traits::JobSource;
pub use aggregator::JobAggregator;
pub use filter::{filter_top, KeywordMatcher};
pub use report::JobReportRenderer;
pub use schedule::WeeklySchedule;
pub use config::{ConfigError, Settings};
pub use pipeline::{PipelineError, ReportPipeline, RunOutcome};
