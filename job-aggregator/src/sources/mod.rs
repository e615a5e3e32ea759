pub mod arbeitnow;
pub mod himalayas;
pub mod remoteok;
pub mod weworkremotely;

pub use arbeitnow::{ArbeitnowSource, DEFAULT_RELEVANCE_KEYWORDS};
pub use himalayas::HimalayasSource;
pub use remoteok::RemoteOkSource;
pub use weworkremotely::WeWorkRemotelySource;

use crate::traits::JobSource;
use crate::types::{JobRecord, Result, DEFAULT_LOCATION, UNKNOWN_COMPANY};
use crate::utils;
use chrono::NaiveDate;
use tracing::debug;

/// Fields as found on the page, before defaults and validation.
#[derive(Debug, Default)]
pub struct RawPosting {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
}

impl RawPosting {
    /// Applies the shared record rules: a plausible title and a link are
    /// required, company and location fall back to their defaults.
    pub fn into_record(self, source: &str, base_url: &str, scraped_date: NaiveDate) -> Option<JobRecord> {
        let title = match self.title {
            Some(title) if utils::title::is_plausible(&title) => title,
            other => {
                debug!("{}: skipping posting with title {:?}", source, other);
                return None;
            }
        };
        let link = match self.link.filter(|link| !link.trim().is_empty()) {
            Some(link) => utils::url::resolve_link(base_url, &link),
            None => {
                debug!("{}: skipping {:?}, no link", source, title);
                return None;
            }
        };

        Some(JobRecord {
            title,
            company: self
                .company
                .filter(|company| !company.is_empty())
                .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            location: self
                .location
                .filter(|location| !location.is_empty())
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            link,
            scraped_date,
            source: source.to_string(),
        })
    }
}

/// The production sources, in invocation order.
pub fn default_sources<S: AsRef<str>>(relevance_keywords: &[S]) -> Result<Vec<Box<dyn JobSource>>> {
    Ok(vec![
        Box::new(RemoteOkSource::new()?),
        Box::new(WeWorkRemotelySource::new()?),
        Box::new(ArbeitnowSource::new().with_keywords(relevance_keywords)),
        Box::new(HimalayasSource::new()?),
    ])
}
