use crate::types::{JobRecord, SAMPLE_SOURCE};
use chrono::NaiveDate;

struct SampleJob {
    title: &'static str,
    company: &'static str,
    location: &'static str,
    link: &'static str,
}

static SAMPLE_JOBS: [SampleJob; 7] = [
    SampleJob {
        title: "Senior AI Engineer",
        company: "OpenAI",
        location: "Remote",
        link: "https://openai.com/careers",
    },
    SampleJob {
        title: "Machine Learning Engineer",
        company: "Google DeepMind",
        location: "London, UK",
        link: "https://www.deepmind.com/careers",
    },
    SampleJob {
        title: "AI Research Scientist",
        company: "Meta AI",
        location: "Menlo Park, CA",
        link: "https://ai.facebook.com/join-us",
    },
    SampleJob {
        title: "Data Scientist - ML",
        company: "Netflix",
        location: "Los Gatos, CA",
        link: "https://jobs.netflix.com",
    },
    SampleJob {
        title: "NLP Engineer",
        company: "Anthropic",
        location: "San Francisco, CA",
        link: "https://anthropic.com/careers",
    },
    SampleJob {
        title: "Computer Vision Engineer",
        company: "Tesla",
        location: "Palo Alto, CA",
        link: "https://tesla.com/careers",
    },
    SampleJob {
        title: "ML Infrastructure Engineer",
        company: "Databricks",
        location: "Remote",
        link: "https://databricks.com/company/careers",
    },
];

/// Illustrative listings reported when every source came back empty.
pub fn sample_dataset(scraped_date: NaiveDate) -> Vec<JobRecord> {
    SAMPLE_JOBS
        .iter()
        .map(|job| JobRecord {
            title: job.title.to_string(),
            company: job.company.to_string(),
            location: job.location.to_string(),
            link: job.link.to_string(),
            scraped_date,
            source: SAMPLE_SOURCE.to_string(),
        })
        .collect()
}
