/// Listing title helpers
pub mod title {
    /// Titles of three characters or fewer are navigation noise, not postings.
    pub fn is_plausible(title: &str) -> bool {
        title.chars().count() > 3
    }
}

/// URL utilities
pub mod url {
    use url::Url;

    /// Absolute links are kept as they are; anything else is resolved against `base`.
    pub fn resolve_link(base: &str, raw: &str) -> String {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return raw.to_string();
        }
        match Url::parse(base).and_then(|base_url| base_url.join(raw)) {
            Ok(resolved) => resolved.to_string(),
            Err(_) => format!("{}/{}", base.trim_end_matches('/'), raw.trim_start_matches('/')),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_titles_are_rejected() {
        assert!(!title::is_plausible("Job"));
        assert!(!title::is_plausible(""));
        assert!(title::is_plausible("MLOps"));
    }

    #[test]
    fn relative_link_gets_base_origin() {
        assert_eq!(
            url::resolve_link("https://himalayas.app", "/companies/acme/jobs/ml-engineer"),
            "https://himalayas.app/companies/acme/jobs/ml-engineer"
        );
        assert_eq!(
            url::resolve_link("https://remoteok.com/", "/remote-jobs/123"),
            "https://remoteok.com/remote-jobs/123"
        );
    }

    #[test]
    fn absolute_link_is_kept() {
        assert_eq!(
            url::resolve_link("https://himalayas.app", "https://jobs.example.org/42"),
            "https://jobs.example.org/42"
        );
    }
}
