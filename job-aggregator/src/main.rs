use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use job_aggregator::inspect::inspect;
use job_aggregator::pipeline::{collect, Collected};
use job_aggregator::schedule::run_weekly;
use job_aggregator::{FetchConfig, Fetcher, JobAggregator, ReportPipeline, Settings, WeeklySchedule};
use report_mailer::{SmtpConfig, SmtpDispatcher};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "job-report", about = "Scrapes remote AI job boards and emails a weekly report")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape, filter and email the report once (default)
    Run,
    /// Email a report built from three sample jobs
    TestEmail,
    /// Run the report every week at SEND_DAY / SEND_TIME
    Schedule,
    /// Scrape and print the listings without sending anything
    Scrape,
    /// Print the structure of a page to help write extraction rules
    Inspect {
        url: String,
        /// Save the fetched HTML to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match execute(cli.command.unwrap_or(Command::Run)).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Command) -> Result<i32> {
    match command {
        Command::Run => {
            let settings = Settings::from_env()?;
            let Some(pipeline) = build_pipeline(settings)? else {
                return Ok(1);
            };
            Ok(match pipeline.run().await {
                Ok(outcome) => outcome.exit_code(),
                Err(e) => {
                    error!("{}", e);
                    e.exit_code()
                }
            })
        }
        Command::TestEmail => {
            let settings = Settings::from_env()?;
            let Some(pipeline) = build_pipeline(settings)? else {
                return Ok(1);
            };
            Ok(match pipeline.send_test().await {
                Ok(outcome) => {
                    info!("Test email sent");
                    outcome.exit_code()
                }
                Err(e) => {
                    error!("{}", e);
                    e.exit_code()
                }
            })
        }
        Command::Schedule => {
            let settings = Settings::from_env()?;
            let schedule = WeeklySchedule::parse(&settings.send_day, &settings.send_time)?;
            let Some(pipeline) = build_pipeline(settings)? else {
                return Ok(1);
            };
            let pipeline = Arc::new(pipeline);
            run_weekly(schedule, move || {
                let pipeline = Arc::clone(&pipeline);
                async move { pipeline.run().await }
            })
            .await
            .context("Weekly scheduler stopped")?;
            Ok(0)
        }
        Command::Scrape => {
            let settings = Settings::from_env()?;
            let aggregator = build_aggregator(&settings)?;
            let Collected { all_jobs, top_jobs } = collect(&aggregator, &settings).await;

            println!("{} jobs collected", all_jobs.len());
            for (index, job) in all_jobs.iter().enumerate() {
                println!("{:>3}. [{}] {} | {} | {} | {}", index + 1, job.source, job.title, job.company, job.location, job.link);
            }
            println!("\nTop {} jobs", top_jobs.len());
            for (index, job) in top_jobs.iter().enumerate() {
                println!("{:>3}. {} ({})", index + 1, job.title, job.company);
            }
            Ok(0)
        }
        Command::Inspect { url, save } => {
            let fetcher = Fetcher::new(FetchConfig::default())?;
            let structure = inspect(&fetcher, &url, save.as_deref())
                .await
                .with_context(|| format!("Failed to inspect {}", url))?;
            println!("{}", structure);
            Ok(0)
        }
    }
}

fn build_aggregator(settings: &Settings) -> Result<JobAggregator> {
    let fetcher = Fetcher::new(settings.fetch.clone()).context("Failed to build HTTP client")?;
    Ok(JobAggregator::new(fetcher, &settings.relevance_keywords)?.with_pacing(settings.pacing))
}

/// `None` when the mail credentials are missing; the reason is logged.
fn build_pipeline(settings: Settings) -> Result<Option<ReportPipeline<SmtpDispatcher>>> {
    let credentials = match settings.credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            error!("To set up a Gmail App Password: Google Account > Security > 2-Step Verification > App passwords,");
            error!("then put the generated password in SENDER_PASSWORD (e.g. in a .env file)");
            return Ok(None);
        }
    };

    let dispatcher = SmtpDispatcher::smtp(&SmtpConfig {
        host: settings.smtp_host.clone(),
        port: settings.smtp_port,
        username: credentials.sender,
        password: credentials.password,
    })
    .context("Failed to set up SMTP transport")?;

    let aggregator = build_aggregator(&settings)?;
    Ok(Some(ReportPipeline::new(settings, aggregator, dispatcher)))
}
