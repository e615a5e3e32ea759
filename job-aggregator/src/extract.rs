//! Ranked field extraction over parsed HTML.
//!
//! Each field of a posting is described by an ordered chain of strategies.
//! The chain is walked front to back and the first strategy producing a
//! non-empty value wins, so the most specific structural hint goes first and
//! the generic tag fallback goes last.

use crate::types::{AggregatorError, Result};
use scraper::{ElementRef, Selector};

pub fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AggregatorError::Selector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Visible text of an element with whitespace runs collapsed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub enum TextStrategy {
    /// First descendant matching the selector.
    Select(Selector),
    /// First descendant matching `inner` within the first match of `outer`.
    Nested { outer: Selector, inner: Selector },
    /// First descendant `tag` whose class attribute contains `needle`, ignoring case.
    ClassContains { tag: Selector, needle: String },
}

impl TextStrategy {
    pub fn select(selector: &str) -> Result<Self> {
        Ok(Self::Select(compile(selector)?))
    }

    pub fn nested(outer: &str, inner: &str) -> Result<Self> {
        Ok(Self::Nested {
            outer: compile(outer)?,
            inner: compile(inner)?,
        })
    }

    pub fn class_contains(tag: &str, needle: &str) -> Result<Self> {
        Ok(Self::ClassContains {
            tag: compile(tag)?,
            needle: needle.to_lowercase(),
        })
    }

    fn apply(&self, element: ElementRef<'_>) -> Option<String> {
        let found = match self {
            Self::Select(selector) => element.select(selector).next().map(element_text),
            Self::Nested { outer, inner } => element
                .select(outer)
                .next()
                .and_then(|scope| scope.select(inner).next())
                .map(element_text),
            Self::ClassContains { tag, needle } => element
                .select(tag)
                .find(|candidate| {
                    candidate
                        .value()
                        .attr("class")
                        .map(|class| class.to_lowercase().contains(needle.as_str()))
                        .unwrap_or(false)
                })
                .map(element_text),
        };
        found.and_then(non_empty)
    }
}

pub struct TextChain {
    strategies: Vec<TextStrategy>,
}

impl TextChain {
    pub fn new(strategies: Vec<TextStrategy>) -> Self {
        Self { strategies }
    }

    pub fn first_text(&self, element: ElementRef<'_>) -> Option<String> {
        self.strategies.iter().find_map(|strategy| strategy.apply(element))
    }
}

pub enum AttrStrategy {
    /// Attribute on the element itself.
    Own(String),
    /// Attribute of the first descendant matching the selector.
    Select { selector: Selector, attr: String },
}

impl AttrStrategy {
    pub fn own(attr: &str) -> Self {
        Self::Own(attr.to_string())
    }

    pub fn select(selector: &str, attr: &str) -> Result<Self> {
        Ok(Self::Select {
            selector: compile(selector)?,
            attr: attr.to_string(),
        })
    }

    fn apply(&self, element: ElementRef<'_>) -> Option<String> {
        let raw = match self {
            Self::Own(attr) => element.value().attr(attr),
            Self::Select { selector, attr } => element
                .select(selector)
                .next()
                .and_then(|found| found.value().attr(attr)),
        };
        raw.map(|value| value.trim().to_string()).and_then(non_empty)
    }
}

pub struct AttrChain {
    strategies: Vec<AttrStrategy>,
}

impl AttrChain {
    pub fn new(strategies: Vec<AttrStrategy>) -> Self {
        Self { strategies }
    }

    pub fn first_value(&self, element: ElementRef<'_>) -> Option<String> {
        self.strategies.iter().find_map(|strategy| strategy.apply(element))
    }
}
