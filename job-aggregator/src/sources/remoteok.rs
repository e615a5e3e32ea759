use crate::extract::{compile, AttrChain, AttrStrategy, TextChain, TextStrategy};
use crate::sources::RawPosting;
use crate::traits::JobSource;
use crate::types::{JobRecord, Result, DEFAULT_LOCATION};
use async_trait::async_trait;
use chrono::NaiveDate;
use scraper::{Html, Selector};
use tracing::debug;

/// RemoteOK lists postings as `tr.job` table rows.
pub struct RemoteOkSource {
    base_url: String,
    rows: Selector,
    title: TextChain,
    company: TextChain,
    link: AttrChain,
}

impl RemoteOkSource {
    pub const NAME: &'static str = "RemoteOK";
    pub const BASE_URL: &'static str = "https://remoteok.com";
    const PATH: &'static str = "/remote-ai-jobs";

    pub fn new() -> Result<Self> {
        Self::with_base_url(Self::BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            rows: compile("tr.job")?,
            title: TextChain::new(vec![
                TextStrategy::select("h2[itemprop='title']")?,
                TextStrategy::select("h2")?,
                TextStrategy::nested("td.company_and_position", "h2")?,
            ]),
            company: TextChain::new(vec![
                TextStrategy::select("h3[itemprop='name']")?,
                TextStrategy::select("h3.company")?,
                TextStrategy::select("h3")?,
            ]),
            link: AttrChain::new(vec![
                AttrStrategy::own("data-url"),
                AttrStrategy::select("a.preventLink", "href")?,
            ]),
        })
    }
}

#[async_trait]
impl JobSource for RemoteOkSource {
    fn source_name(&self) -> &str {
        Self::NAME
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, Self::PATH)
    }

    fn parse(&self, body: &str, max_records: usize, scraped_date: NaiveDate) -> Result<Vec<JobRecord>> {
        let document = Html::parse_document(body);
        let rows: Vec<_> = document.select(&self.rows).collect();
        debug!("Found {} job rows on {}", rows.len(), Self::NAME);

        Ok(rows
            .into_iter()
            .take(max_records)
            .filter_map(|row| {
                RawPosting {
                    title: self.title.first_text(row),
                    company: self.company.first_text(row),
                    location: Some(DEFAULT_LOCATION.to_string()),
                    link: self.link.first_value(row),
                }
                .into_record(Self::NAME, &self.base_url, scraped_date)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body><table id="jobsboard">
          <tr class="job" data-url="/remote-jobs/1001-senior-ml-engineer">
            <td class="company_and_position">
              <a class="preventLink" href="/remote-jobs/1001"><h2 itemprop="title">Senior ML Engineer</h2></a>
              <h3 itemprop="name">Vector Labs</h3>
            </td>
          </tr>
          <tr class="job">
            <td class="company_and_position">
              <a class="preventLink" href="/remote-jobs/1002"><h2>LLM Platform Engineer</h2></a>
              <h3 class="company">Tokenworks</h3>
            </td>
          </tr>
          <tr class="job" data-url="/remote-jobs/1003">
            <td class="company_and_position"><h2>Dev</h2></td>
          </tr>
          <tr class="job">
            <td class="company_and_position"><h2>Computer Vision Lead</h2></td>
          </tr>
          <tr class="job" data-url="/remote-jobs/1005">
            <td class="company_and_position"><h2>Data Scientist</h2></td>
          </tr>
          <tr class="expand"><td>not a job</td></tr>
        </table></body></html>
    "#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 7).unwrap()
    }

    #[test]
    fn parses_rows_with_fallback_chains() {
        let source = RemoteOkSource::new().unwrap();
        let records = source.parse(PAGE, 25, date()).unwrap();

        assert_eq!(records.len(), 3);

        assert_eq!(records[0].title, "Senior ML Engineer");
        assert_eq!(records[0].company, "Vector Labs");
        assert_eq!(records[0].link, "https://remoteok.com/remote-jobs/1001-senior-ml-engineer");
        assert_eq!(records[0].location, "Remote");
        assert_eq!(records[0].source, "RemoteOK");

        assert_eq!(records[1].title, "LLM Platform Engineer");
        assert_eq!(records[1].company, "Tokenworks");
        assert_eq!(records[1].link, "https://remoteok.com/remote-jobs/1002");

        // No h3 at all: company falls back, the record survives.
        assert_eq!(records[2].title, "Data Scientist");
        assert_eq!(records[2].company, "N/A");
    }

    #[test]
    fn cap_applies_to_rows_examined() {
        let source = RemoteOkSource::new().unwrap();
        let records = source.parse(PAGE, 2, date()).unwrap();
        assert_eq!(records.len(), 2);

        // The short title and the link-less row eat the remaining slots.
        let records = source.parse(PAGE, 4, date()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn page_without_rows_yields_nothing() {
        let source = RemoteOkSource::new().unwrap();
        let records = source.parse("<html><body><p>blocked</p></body></html>", 25, date()).unwrap();
        assert!(records.is_empty());
    }
}
