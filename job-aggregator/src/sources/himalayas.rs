use crate::extract::{compile, AttrChain, AttrStrategy, TextChain, TextStrategy};
use crate::sources::RawPosting;
use crate::traits::JobSource;
use crate::types::{JobRecord, Result, DEFAULT_LOCATION};
use async_trait::async_trait;
use chrono::NaiveDate;
use scraper::{Html, Selector};
use tracing::debug;

/// Himalayas renders job cards; older markup used bare `article` elements.
pub struct HimalayasSource {
    base_url: String,
    cards: Selector,
    fallback_cards: Selector,
    title: TextChain,
    company: TextChain,
    link: AttrChain,
}

impl HimalayasSource {
    pub const NAME: &'static str = "Himalayas";
    pub const BASE_URL: &'static str = "https://himalayas.app";
    const PATH: &'static str = "/jobs/ai-ml";

    pub fn new() -> Result<Self> {
        Self::with_base_url(Self::BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cards: compile("div[data-test='job-card']")?,
            fallback_cards: compile("article")?,
            title: TextChain::new(vec![
                TextStrategy::select("h3")?,
                TextStrategy::select("a")?,
            ]),
            company: TextChain::new(vec![
                TextStrategy::select("span[data-test='job-card-company']")?,
                TextStrategy::class_contains("div", "company")?,
            ]),
            link: AttrChain::new(vec![AttrStrategy::select("a[href]", "href")?]),
        })
    }
}

#[async_trait]
impl JobSource for HimalayasSource {
    fn source_name(&self) -> &str {
        Self::NAME
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, Self::PATH)
    }

    fn parse(&self, body: &str, max_records: usize, scraped_date: NaiveDate) -> Result<Vec<JobRecord>> {
        let document = Html::parse_document(body);
        let mut cards: Vec<_> = document.select(&self.cards).collect();
        if cards.is_empty() {
            cards = document.select(&self.fallback_cards).collect();
        }
        debug!("Found {} job cards on {}", cards.len(), Self::NAME);

        Ok(cards
            .into_iter()
            .take(max_records)
            .filter_map(|card| {
                RawPosting {
                    title: self.title.first_text(card),
                    company: self.company.first_text(card),
                    location: Some(DEFAULT_LOCATION.to_string()),
                    link: self.link.first_value(card),
                }
                .into_record(Self::NAME, &self.base_url, scraped_date)
            })
            .collect())
    }
}
