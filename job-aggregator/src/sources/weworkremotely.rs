use crate::extract::{compile, TextChain, TextStrategy};
use crate::sources::RawPosting;
use crate::traits::JobSource;
use crate::types::{JobRecord, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use scraper::{Html, Selector};
use tracing::debug;

/// WeWorkRemotely search results: `li.feature` items wrapping one anchor
/// whose spans carry title, company and region.
pub struct WeWorkRemotelySource {
    base_url: String,
    items: Selector,
    anchor: Selector,
    title: TextChain,
    company: TextChain,
    region: TextChain,
}

impl WeWorkRemotelySource {
    pub const NAME: &'static str = "WeWorkRemotely";
    pub const BASE_URL: &'static str = "https://weworkremotely.com";
    const PATH: &'static str = "/remote-jobs/search?term=ai+machine+learning";

    pub fn new() -> Result<Self> {
        Self::with_base_url(Self::BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            items: compile("li.feature")?,
            anchor: compile("a[href]")?,
            title: TextChain::new(vec![TextStrategy::select("span.title")?]),
            company: TextChain::new(vec![TextStrategy::select("span.company")?]),
            region: TextChain::new(vec![TextStrategy::select("span.region")?]),
        })
    }
}

#[async_trait]
impl JobSource for WeWorkRemotelySource {
    fn source_name(&self) -> &str {
        Self::NAME
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, Self::PATH)
    }

    fn parse(&self, body: &str, max_records: usize, scraped_date: NaiveDate) -> Result<Vec<JobRecord>> {
        let document = Html::parse_document(body);
        let items: Vec<_> = document.select(&self.items).collect();
        debug!("Found {} job listings on {}", items.len(), Self::NAME);

        Ok(items
            .into_iter()
            .take(max_records)
            .filter_map(|item| {
                let Some(anchor) = item.select(&self.anchor).next() else {
                    debug!("{}: listing without a link, skipped", Self::NAME);
                    return None;
                };
                RawPosting {
                    title: self.title.first_text(anchor),
                    company: self.company.first_text(anchor),
                    location: self.region.first_text(anchor),
                    link: anchor.value().attr("href").map(str::to_string),
                }
                .into_record(Self::NAME, &self.base_url, scraped_date)
            })
            .collect())
    }
}
