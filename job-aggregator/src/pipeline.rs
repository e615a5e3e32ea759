use crate::aggregator::JobAggregator;
use crate::config::{ConfigError, Settings};
use crate::export::{dated_filename, write_csv};
use crate::filter::filter_top;
use crate::report::JobReportRenderer;
use crate::types::{
    Dispatcher, DispatchOutcome, JobRecord, ReportBodies, ReportEnvelope, ReportRenderer, SAMPLE_SOURCE,
};
use chrono::{Local, NaiveDate};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{error, info, warn};

const TEST_SUBJECT_PREFIX: &str = "TEST: ";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report could not be delivered to any of {attempted} recipients: {reason}")]
    Dispatch { attempted: usize, reason: String },

    #[error("Dispatch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl PipelineError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Aggregation produced no records; nothing was sent.
    NothingToReport,
    Delivered {
        sent: usize,
        attempted: usize,
        total_jobs: usize,
        top_jobs: usize,
    },
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        0
    }
}

/// Aggregated listings and the top selection taken from them.
#[derive(Debug, Clone)]
pub struct Collected {
    pub all_jobs: Vec<JobRecord>,
    pub top_jobs: Vec<JobRecord>,
}

/// Aggregates and filters. Needs no credentials.
pub async fn collect(aggregator: &JobAggregator, settings: &Settings) -> Collected {
    let all_jobs = aggregator.aggregate(&settings.source_limits).await;
    let top_jobs = filter_top(&all_jobs, &settings.search_keywords, settings.top_n);
    Collected { all_jobs, top_jobs }
}

/// One complete scrape-to-inbox run.
pub struct ReportPipeline<D, R = JobReportRenderer> {
    settings: Settings,
    aggregator: JobAggregator,
    dispatcher: Arc<D>,
    _renderer: PhantomData<R>,
}

impl<D> ReportPipeline<D>
where
    D: Dispatcher + Send + Sync + 'static,
{
    pub fn new(settings: Settings, aggregator: JobAggregator, dispatcher: D) -> Self {
        Self::with_renderer(settings, aggregator, dispatcher)
    }
}

impl<D, R> ReportPipeline<D, R>
where
    D: Dispatcher + Send + Sync + 'static,
    R: ReportRenderer,
{
    pub fn with_renderer(settings: Settings, aggregator: JobAggregator, dispatcher: D) -> Self {
        Self {
            settings,
            aggregator,
            dispatcher: Arc::new(dispatcher),
            _renderer: PhantomData,
        }
    }

    pub async fn run(&self) -> Result<RunOutcome, PipelineError> {
        let credentials = self.settings.credentials()?;
        info!("Starting weekly AI jobs report");

        info!("Step 1: scraping job listings");
        let Collected { all_jobs, top_jobs } = collect(&self.aggregator, &self.settings).await;
        if all_jobs.is_empty() {
            warn!("No jobs found, nothing to report");
            return Ok(RunOutcome::NothingToReport);
        }
        info!("Scraped {} jobs, selected {} top jobs", all_jobs.len(), top_jobs.len());

        if self.settings.save_csv {
            info!("Step 2: saving data to CSV");
            self.export(&all_jobs, Local::now().date_naive());
        }

        info!("Step 3: rendering report");
        let bodies = R::render(&all_jobs, &top_jobs);

        info!("Step 4: sending report");
        let envelope = ReportEnvelope {
            sender: credentials.sender,
            recipients: credentials.recipients,
            subject: self.settings.email_subject.clone(),
        };
        let outcome = self.deliver(envelope, bodies).await?;

        info!(
            "Report summary: {} jobs scraped, {} top jobs, {}/{} emails sent",
            all_jobs.len(),
            top_jobs.len(),
            outcome.delivered.len(),
            outcome.attempted()
        );
        Ok(RunOutcome::Delivered {
            sent: outcome.delivered.len(),
            attempted: outcome.attempted(),
            total_jobs: all_jobs.len(),
            top_jobs: top_jobs.len(),
        })
    }

    /// Sends a fixed three-job report to check mail delivery.
    pub async fn send_test(&self) -> Result<RunOutcome, PipelineError> {
        let credentials = self.settings.credentials()?;
        info!("Sending test email with sample data");

        let jobs = test_jobs(Local::now().date_naive());
        let bodies = R::render(&jobs, &jobs);
        let envelope = ReportEnvelope {
            sender: credentials.sender,
            recipients: credentials.recipients,
            subject: format!("{}{}", TEST_SUBJECT_PREFIX, self.settings.email_subject),
        };
        let outcome = self.deliver(envelope, bodies).await?;

        Ok(RunOutcome::Delivered {
            sent: outcome.delivered.len(),
            attempted: outcome.attempted(),
            total_jobs: jobs.len(),
            top_jobs: jobs.len(),
        })
    }

    fn export(&self, jobs: &[JobRecord], date: NaiveDate) {
        let path = dated_filename(&self.settings.csv_filename, date);
        if let Err(e) = write_csv(&path, jobs) {
            error!("Failed to save {}: {}", path, e);
        }
    }

    async fn deliver(&self, envelope: ReportEnvelope, bodies: ReportBodies) -> Result<DispatchOutcome, PipelineError> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let outcome = tokio::task::spawn_blocking(move || dispatcher.dispatch(&envelope, &bodies)).await?;

        for (recipient, reason) in &outcome.failed {
            error!("Failed to send report to {}: {}", recipient, reason);
        }
        if !outcome.succeeded() {
            let reason = outcome
                .failed
                .first()
                .map(|(_, reason)| reason.clone())
                .unwrap_or_else(|| "no recipients".to_string());
            return Err(PipelineError::Dispatch {
                attempted: outcome.attempted(),
                reason,
            });
        }
        info!("Successfully sent {}/{} emails", outcome.delivered.len(), outcome.attempted());
        Ok(outcome)
    }
}

fn test_jobs(date: NaiveDate) -> Vec<JobRecord> {
    [
        ("AI Engineer", "Tech Corp", "Remote", "https://example.com/job1"),
        ("ML Engineer", "AI Startup", "San Francisco", "https://example.com/job2"),
        ("Data Scientist", "Big Data Inc", "New York", "https://example.com/job3"),
    ]
    .into_iter()
    .map(|(title, company, location, link)| JobRecord {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        link: link.to_string(),
        scraped_date: date,
        source: SAMPLE_SOURCE.to_string(),
    })
    .collect()
}
