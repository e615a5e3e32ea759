use crate::config::ConfigError;
use chrono::{DateTime, Local, NaiveTime, Timelike, Weekday};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Scheduler error: {0:?}")]
    Scheduler(JobSchedulerError),

    #[error("Failed to wait for shutdown signal: {0}")]
    Signal(#[from] std::io::Error),
}

impl From<JobSchedulerError> for ScheduleError {
    fn from(e: JobSchedulerError) -> Self {
        Self::Scheduler(e)
    }
}

/// One fixed slot per week, in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklySchedule {
    pub day: Weekday,
    pub time: NaiveTime,
}

impl WeeklySchedule {
    pub fn parse(day: &str, time: &str) -> Result<Self, ConfigError> {
        let day = match day.trim().parse::<Weekday>() {
            Ok(day) => day,
            Err(_) => {
                warn!("Unknown send day {:?}, defaulting to monday", day);
                Weekday::Mon
            }
        };
        let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|e| ConfigError::Invalid {
            key: "SEND_TIME",
            value: time.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { day, time })
    }

    /// Six-field cron expression (sec min hour dom month dow).
    pub fn cron_expression(&self) -> String {
        format!(
            "0 {} {} * * {}",
            self.time.minute(),
            self.time.hour(),
            self.day.to_string().to_uppercase()
        )
    }
}

/// A started scheduler holding the weekly job.
pub struct WeeklyRunner {
    scheduler: JobScheduler,
    job_id: Uuid,
}

impl WeeklyRunner {
    /// Registers `job` at the weekly slot and starts the scheduler. A failed
    /// run is logged and the next slot is awaited as usual.
    pub async fn start<F, Fut, T, E>(schedule: WeeklySchedule, job: F) -> Result<Self, ScheduleError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Display + Send + 'static,
    {
        let scheduler = JobScheduler::new().await?;

        let job = Arc::new(job);
        let weekly_job = Job::new_async_tz(schedule.cron_expression().as_str(), Local, move |uuid, mut lock| {
            let job = Arc::clone(&job);
            Box::pin(async move {
                match job().await {
                    Ok(_) => info!("Scheduled run finished"),
                    Err(e) => error!("Scheduled run failed: {}", e),
                }
                if let Ok(Some(next)) = lock.next_tick_for_job(uuid).await {
                    info!("Next report scheduled for {}", next.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
                }
            })
        })?;

        let job_id = scheduler.add(weekly_job).await?;
        scheduler.start().await?;

        info!(
            "Scheduler started: every {:?} at {} ({})",
            schedule.day,
            schedule.time.format("%H:%M"),
            schedule.cron_expression()
        );
        Ok(Self { scheduler, job_id })
    }

    pub async fn next_run(&mut self) -> Result<Option<DateTime<Local>>, ScheduleError> {
        let next = self.scheduler.next_tick_for_job(self.job_id).await?;
        Ok(next.map(|tick| tick.with_timezone(&Local)))
    }

    pub async fn shutdown(mut self) -> Result<(), ScheduleError> {
        self.scheduler.shutdown().await?;
        Ok(())
    }
}

/// Runs `job` at every slot until Ctrl-C.
pub async fn run_weekly<F, Fut, T, E>(schedule: WeeklySchedule, job: F) -> Result<(), ScheduleError>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
{
    let mut runner = WeeklyRunner::start(schedule, job).await?;
    if let Some(next) = runner.next_run().await? {
        info!("Next report scheduled for {}", next.format("%Y-%m-%d %H:%M"));
    }

    tokio::signal::ctrl_c().await?;
    info!("Stopping scheduler");
    runner.shutdown().await
}
