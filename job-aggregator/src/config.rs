use crate::sources::DEFAULT_RELEVANCE_KEYWORDS;
use crate::types::{FetchConfig, SourceLimits};
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_SEARCH_KEYWORDS: &[&str] = &[
    "AI Engineer",
    "Machine Learning Engineer",
    "ML Engineer",
    "Data Scientist",
    "AI Researcher",
    "Deep Learning",
    "NLP Engineer",
];

// Values shipped in the sample .env; treated as unset.
const PLACEHOLDER_SENDER: &str = "your.email@gmail.com";
const PLACEHOLDER_PASSWORD: &str = "your-app-password-here";
const PLACEHOLDER_RECIPIENT: &str = "recipient@example.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set; configure SENDER_EMAIL, SENDER_PASSWORD and RECIPIENT_EMAIL")]
    MissingCredential(&'static str),

    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Mail account used to send the report.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub sender: String,
    pub password: String,
    pub recipients: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub sender_email: Option<String>,
    pub sender_password: Option<String>,
    pub recipient_emails: Vec<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub email_subject: String,
    pub search_keywords: Vec<String>,
    pub relevance_keywords: Vec<String>,
    pub top_n: usize,
    pub save_csv: bool,
    pub csv_filename: String,
    pub send_day: String,
    pub send_time: String,
    pub source_limits: SourceLimits,
    pub pacing: Duration,
    pub fetch: FetchConfig,
}

impl Settings {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env file loaded: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut recipient_emails: Vec<String> = get("RECIPIENT_EMAIL").into_iter().collect();
        for extra in split_list(get("RECIPIENT_EMAILS").as_deref().unwrap_or_default()) {
            if !recipient_emails.contains(&extra) {
                recipient_emails.push(extra);
            }
        }

        let fetch = FetchConfig {
            timeout_seconds: parse_or("FETCH_TIMEOUT_SECONDS", get("FETCH_TIMEOUT_SECONDS"), 15)?,
            ..FetchConfig::default()
        };

        Ok(Self {
            sender_email: get("SENDER_EMAIL"),
            sender_password: get("SENDER_PASSWORD"),
            recipient_emails,
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            smtp_port: parse_or("SMTP_PORT", get("SMTP_PORT"), 587)?,
            email_subject: get("EMAIL_SUBJECT").unwrap_or_else(|| "Your Weekly AI Jobs Report".to_string()),
            search_keywords: list_or(get("JOB_SEARCH_KEYWORDS"), DEFAULT_SEARCH_KEYWORDS),
            relevance_keywords: list_or(get("RELEVANCE_KEYWORDS"), DEFAULT_RELEVANCE_KEYWORDS),
            top_n: parse_or("TOP_N_JOBS", get("TOP_N_JOBS"), 5)?,
            save_csv: parse_bool("SAVE_DATA_TO_CSV", get("SAVE_DATA_TO_CSV"), true)?,
            csv_filename: get("CSV_FILENAME").unwrap_or_else(|| "jobs_data_{date}.csv".to_string()),
            send_day: get("SEND_DAY").unwrap_or_else(|| "monday".to_string()),
            send_time: get("SEND_TIME").unwrap_or_else(|| "09:00".to_string()),
            source_limits: parse_limits(get("SOURCE_LIMITS"))?,
            pacing: Duration::from_secs(parse_or("SCRAPE_PACING_SECONDS", get("SCRAPE_PACING_SECONDS"), 2)?),
            fetch,
        })
    }

    /// Mandatory before any scraping happens.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let sender = self
            .sender_email
            .clone()
            .filter(|value| value != PLACEHOLDER_SENDER)
            .ok_or(ConfigError::MissingCredential("SENDER_EMAIL"))?;
        let password = self
            .sender_password
            .clone()
            .filter(|value| value != PLACEHOLDER_PASSWORD)
            .ok_or(ConfigError::MissingCredential("SENDER_PASSWORD"))?;
        let recipients: Vec<String> = self
            .recipient_emails
            .iter()
            .filter(|recipient| recipient.as_str() != PLACEHOLDER_RECIPIENT)
            .cloned()
            .collect();
        if recipients.is_empty() {
            return Err(ConfigError::MissingCredential("RECIPIENT_EMAIL"));
        }

        Ok(Credentials {
            sender,
            password,
            recipients,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn list_or(raw: Option<String>, default: &[&str]) -> Vec<String> {
    match raw {
        Some(raw) => split_list(&raw),
        None => default.iter().map(|item| item.to_string()).collect(),
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

fn parse_bool(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match raw.as_deref().map(str::to_lowercase).as_deref() {
        None => Ok(default),
        Some("true" | "1" | "yes" | "on") => Ok(true),
        Some("false" | "0" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            key,
            value: raw.unwrap_or_default(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// `Name=N,Name=N`; a bare number sets the cap for every other source.
fn parse_limits(raw: Option<String>) -> Result<SourceLimits, ConfigError> {
    let mut limits = SourceLimits::default();
    let Some(raw) = raw else {
        return Ok(limits);
    };

    for entry in split_list(&raw) {
        let invalid = |reason: &str| ConfigError::Invalid {
            key: "SOURCE_LIMITS",
            value: entry.clone(),
            reason: reason.to_string(),
        };
        match entry.split_once('=') {
            Some((name, value)) => {
                let limit = value.trim().parse().map_err(|_| invalid("limit must be a number"))?;
                limits = limits.with_limit(name.trim(), limit);
            }
            None => {
                limits.default_limit = entry.parse().map_err(|_| invalid("expected Name=N"))?;
            }
        }
    }
    Ok(limits)
}
