use crate::types::{JobRecord, ReportBodies, ReportRenderer};
use askama::Template;
use chrono::{Local, NaiveDate};
use tracing::{debug, error};

/// Weekly report in an HTML and a plain-text rendition.
pub struct JobReportRenderer;

impl JobReportRenderer {
    /// Same as [`ReportRenderer::render`], with the report date fixed.
    pub fn render_on(date: NaiveDate, all_jobs: &[JobRecord], top_jobs: &[JobRecord]) -> ReportBodies {
        let counts = source_counts(all_jobs);
        debug!(
            "Rendering report: {} listings, {} top jobs, {} sources",
            all_jobs.len(),
            top_jobs.len(),
            counts.len()
        );

        ReportBodies {
            html: render_html(date, all_jobs, top_jobs, &counts),
            text: render_text(date, all_jobs, top_jobs, &counts),
        }
    }
}

impl ReportRenderer for JobReportRenderer {
    fn render(all_jobs: &[JobRecord], top_jobs: &[JobRecord]) -> ReportBodies {
        Self::render_on(Local::now().date_naive(), all_jobs, top_jobs)
    }
}

/// Listing count per source, in first-seen order.
fn source_counts(jobs: &[JobRecord]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for job in jobs {
        match counts.iter_mut().find(|(source, _)| *source == job.source) {
            Some((_, count)) => *count += 1,
            None => counts.push((&job.source, 1)),
        }
    }
    counts
}

#[derive(Template)]
#[template(path = "report.html")]
struct HtmlReport<'a> {
    generated_on: String,
    all_jobs: &'a [JobRecord],
    top_jobs: &'a [JobRecord],
    counts: &'a [(&'a str, usize)],
}

fn render_html(date: NaiveDate, all_jobs: &[JobRecord], top_jobs: &[JobRecord], counts: &[(&str, usize)]) -> String {
    let report = HtmlReport {
        generated_on: date.format("%B %d, %Y").to_string(),
        all_jobs,
        top_jobs,
        counts,
    };
    report.render().unwrap_or_else(|e| {
        error!("Failed to render HTML report: {}", e);
        String::new()
    })
}

fn render_text(date: NaiveDate, all_jobs: &[JobRecord], top_jobs: &[JobRecord], counts: &[(&str, usize)]) -> String {
    let mut text = String::new();
    text.push_str("WEEKLY AI JOBS REPORT\n");
    text.push_str(&format!("Generated on {}\n\n", date.format("%B %d, %Y")));

    text.push_str(&format!("Total listings: {}\n", all_jobs.len()));
    for (source, count) in counts {
        text.push_str(&format!("  {}: {}\n", source, count));
    }

    text.push_str(&format!("\nTOP {} JOBS\n", top_jobs.len()));
    if top_jobs.is_empty() {
        text.push_str("No matching jobs this week.\n");
    }
    for (index, job) in top_jobs.iter().enumerate() {
        text.push_str(&format!("\n{}. {}\n", index + 1, job.title));
        text.push_str(&format!("   Company: {}\n", job.company));
        text.push_str(&format!("   Location: {}\n", job.location));
        text.push_str(&format!("   Source: {}\n", job.source));
        text.push_str(&format!("   Link: {}\n", job.link));
    }

    text.push_str("\nALL LISTINGS\n");
    for (index, job) in all_jobs.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} | {} | {} | {}\n",
            index + 1,
            job.title,
            job.company,
            job.location,
            job.link
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: &str, source: &str) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            link: format!("https://jobs.example/{}", title.len()),
            scraped_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            source: source.to_string(),
        }
    }

    #[test]
    fn escapes_markup_in_records() {
        let jobs = vec![job("<script>alert(1)</script>", "Tom & Jerry", "RemoteOK")];
        let bodies = JobReportRenderer::render_on(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(), &jobs, &jobs);

        assert!(!bodies.html.contains("<script>"));
        assert!(bodies.html.contains("&lt;script&gt;"));
        assert!(bodies.html.contains("Tom &amp; Jerry"));
        // Plain text stays verbatim.
        assert!(bodies.text.contains("Tom & Jerry"));
    }

    #[test]
    fn summarises_sources_in_first_seen_order() {
        let all = vec![
            job("ML Engineer", "A", "WeWorkRemotely"),
            job("Data Scientist", "B", "RemoteOK"),
            job("NLP Engineer", "C", "WeWorkRemotely"),
        ];
        assert_eq!(source_counts(&all), vec![("WeWorkRemotely", 2), ("RemoteOK", 1)]);

        let bodies = JobReportRenderer::render_on(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(), &all, &all[..1]);
        assert!(bodies.html.contains("Generated on June 02, 2025"));
        assert!(bodies.html.contains("Total listings: 3"));
        assert!(bodies.html.contains("<h2>Top 1 Jobs</h2>"));
        assert!(bodies.text.contains("TOP 1 JOBS"));
        assert!(bodies.text.contains("1. ML Engineer\n   Company: A"));
        assert!(bodies.text.contains("3. NLP Engineer | C | Remote | https://jobs.example/12"));
    }

    #[test]
    fn empty_top_section_says_so() {
        let bodies = JobReportRenderer::render_on(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(), &[], &[]);
        assert!(bodies.html.contains("No matching jobs this week."));
        assert!(bodies.text.contains("Total listings: 0"));
    }
}
