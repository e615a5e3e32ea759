//! Structure probe for writing extraction rules against a new board.

use crate::extract::{compile, element_text};
use crate::fetcher::Fetcher;
use crate::types::Result;
use scraper::{ElementRef, Html};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use tracing::info;

const CONTAINER_PATTERNS: [(&str, Option<&str>); 6] = [
    ("div", Some("job")),
    ("article", None),
    ("li", Some("job")),
    ("div", Some("card")),
    ("div", Some("listing")),
    ("a", Some("job")),
];

const CLASS_HINTS: [&str; 6] = ["job", "position", "listing", "card", "item", "post"];
const MAX_CLASSES: usize = 20;
const MAX_FALLBACK_CLASSES: usize = 30;
const SAMPLE_CHARS: usize = 100;

/// Candidate job containers found for one tag/class pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub tag: String,
    pub class_hint: Option<String>,
    pub count: usize,
    pub first_classes: Option<String>,
    pub sample_text: String,
    pub link_count: usize,
    pub first_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageStructure {
    pub patterns: Vec<PatternMatch>,
    /// Class names that look job-related, sorted.
    pub job_classes: Vec<String>,
    /// Every class name on the page, sorted; shown when nothing looks job-related.
    pub all_classes: Vec<String>,
}

/// Fetches `url`, optionally saves the raw page, and analyzes it.
pub async fn inspect(fetcher: &Fetcher, url: &str, save_to: Option<&Path>) -> Result<PageStructure> {
    let body = fetcher.fetch_document(url).await?;
    if let Some(path) = save_to {
        std::fs::write(path, &body)?;
        info!("HTML saved to {}", path.display());
    }
    analyze(&body)
}

pub fn analyze(body: &str) -> Result<PageStructure> {
    let document = Html::parse_document(body);
    let anchors = compile("a")?;

    let mut patterns = Vec::new();
    for (tag, hint) in CONTAINER_PATTERNS {
        let selector = compile(tag)?;
        let matching: Vec<ElementRef> = document
            .select(&selector)
            .filter(|el| match hint {
                Some(hint) => class_contains(el, hint),
                None => true,
            })
            .collect();
        let Some(first) = matching.first() else {
            continue;
        };

        let links: Vec<ElementRef> = first.select(&anchors).collect();
        patterns.push(PatternMatch {
            tag: tag.to_string(),
            class_hint: hint.map(str::to_string),
            count: matching.len(),
            first_classes: first.value().attr("class").map(str::to_string),
            sample_text: element_text(*first).chars().take(SAMPLE_CHARS).collect(),
            link_count: links.len(),
            first_link: links.first().and_then(|a| a.value().attr("href")).map(str::to_string),
        });
    }

    let all_classes: BTreeSet<String> = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .flat_map(|el| el.value().classes().map(str::to_string).collect::<Vec<_>>())
        .collect();
    let job_classes = all_classes
        .iter()
        .filter(|class| {
            let lower = class.to_lowercase();
            CLASS_HINTS.iter().any(|hint| lower.contains(hint))
        })
        .cloned()
        .collect();

    Ok(PageStructure {
        patterns,
        job_classes,
        all_classes: all_classes.into_iter().collect(),
    })
}

fn class_contains(el: &ElementRef, needle: &str) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|class| class.to_lowercase().contains(needle))
}

impl fmt::Display for PageStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PAGE STRUCTURE")?;
        for pattern in &self.patterns {
            match &pattern.class_hint {
                Some(hint) => writeln!(f, "\n{} <{}> elements with '{}' in class", pattern.count, pattern.tag, hint)?,
                None => writeln!(f, "\n{} <{}> elements", pattern.count, pattern.tag)?,
            }
            writeln!(f, "   Classes: {}", pattern.first_classes.as_deref().unwrap_or("none"))?;
            writeln!(f, "   Sample text: {}...", pattern.sample_text)?;
            if pattern.link_count > 0 {
                writeln!(f, "   Contains {} links", pattern.link_count)?;
                writeln!(f, "   First link: {}", pattern.first_link.as_deref().unwrap_or("no href"))?;
            }
        }

        writeln!(f, "\nJOB-RELATED CLASS NAMES")?;
        if self.job_classes.is_empty() {
            writeln!(f, "   none found; all classes:")?;
            for class in self.all_classes.iter().take(MAX_FALLBACK_CLASSES) {
                writeln!(f, "   .{}", class)?;
            }
        } else {
            for class in self.job_classes.iter().take(MAX_CLASSES) {
                writeln!(f, "   .{}", class)?;
            }
        }
        Ok(())
    }
}
