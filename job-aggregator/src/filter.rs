use crate::types::JobRecord;
use tracing::{debug, info};

/// Case-insensitive "any keyword is a substring" predicate.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
}

impl KeywordMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|keyword| keyword.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|keyword| text.contains(keyword.as_str()))
    }

    pub fn matches_any(&self, texts: &[&str]) -> bool {
        texts.iter().any(|text| self.matches(text))
    }
}

/// Picks the report's top listings.
///
/// Titles matching any keyword are preferred, in aggregation order. When
/// fewer than `top_n` titles match, the keyword match is dropped altogether
/// and the first `top_n` records of the unfiltered input are returned
/// instead, so the report keeps its volume.
pub fn filter_top<S: AsRef<str>>(records: &[JobRecord], keywords: &[S], top_n: usize) -> Vec<JobRecord> {
    if records.is_empty() {
        return Vec::new();
    }

    let matcher = KeywordMatcher::new(keywords);
    let matched: Vec<&JobRecord> = records
        .iter()
        .filter(|record| matcher.matches(&record.title))
        .collect();

    debug!("{} of {} titles match the search keywords", matched.len(), records.len());

    if matched.len() < top_n {
        info!(
            "Only {} keyword matches for top {}, using the first {} listings instead",
            matched.len(),
            top_n,
            top_n
        );
        return records.iter().take(top_n).cloned().collect();
    }

    matched.into_iter().take(top_n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(title: &str) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            link: format!("https://example.com/{}", title.replace(' ', "-")),
            scraped_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            source: "Test".to_string(),
        }
    }

    fn titles(records: &[JobRecord]) -> Vec<&str> {
        records.iter().map(|record| record.title.as_str()).collect()
    }

    #[test]
    fn matcher_ignores_case() {
        let matcher = KeywordMatcher::new(&["Machine Learning"]);
        assert!(matcher.matches("Senior MACHINE LEARNING Engineer"));
        assert!(!matcher.matches("Backend Engineer"));
        assert!(matcher.matches_any(&["nothing", "applied machine learning"]));
    }

    #[test]
    fn under_fill_returns_unfiltered_head() {
        let records: Vec<JobRecord> = [
            "Backend Engineer", "Designer", "ML Engineer", "Support Lead", "Sales Rep",
            "QA Analyst", "Data Scientist", "Recruiter", "Copywriter", "DevOps Engineer",
        ]
        .iter()
        .map(|title| record(title))
        .collect();

        let top = filter_top(&records, &["ML Engineer", "Data Scientist"], 5);
        assert_eq!(
            titles(&top),
            vec!["Backend Engineer", "Designer", "ML Engineer", "Support Lead", "Sales Rep"]
        );
    }

    #[test]
    fn sufficient_matches_keep_order() {
        let records: Vec<JobRecord> = [
            "AI Engineer 1", "Designer", "AI Engineer 2", "AI Engineer 3", "Recruiter",
            "AI Engineer 4", "AI Engineer 5", "Sales Rep", "AI Engineer 6", "AI Engineer 7",
        ]
        .iter()
        .map(|title| record(title))
        .collect();

        let top = filter_top(&records, &["ai engineer"], 5);
        assert_eq!(
            titles(&top),
            vec!["AI Engineer 1", "AI Engineer 2", "AI Engineer 3", "AI Engineer 4", "AI Engineer 5"]
        );
    }

    #[test]
    fn exact_fill_uses_matches() {
        let records: Vec<JobRecord> = ["Designer", "NLP Engineer", "Recruiter"]
            .iter()
            .map(|title| record(title))
            .collect();
        let top = filter_top(&records, &["NLP"], 1);
        assert_eq!(titles(&top), vec!["NLP Engineer"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_top::<&str>(&[], &["AI"], 5).is_empty());
        assert!(filter_top(&[], &[] as &[&str], 0).is_empty());
    }

    #[test]
    fn top_n_larger_than_input_returns_everything() {
        let records = vec![record("Designer"), record("Recruiter")];
        let top = filter_top(&records, &["AI"], 5);
        assert_eq!(top, records);
    }
}
