use serde::{Deserialize, Serialize};

/// What the caller already knows before planning starts.
///
/// Immutable once constructed; the builder reads it to prune or retarget
/// steps. An empty `known_urls` means "no known URLs"; the builder does not
/// distinguish that from "not supplied".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchContext {
    pub known_urls: Vec<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

impl ResearchContext {
    pub fn with_known_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_urls: urls.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// First syntactically valid known URL, if any.
    ///
    /// Malformed entries are skipped rather than rejected: the context is
    /// caller-supplied data, not a defect, and a bad URL should not poison
    /// planning when a later entry is usable.
    pub fn first_usable_url(&self) -> Option<&str> {
        self.known_urls
            .iter()
            .find(|u| webscout_core::parse_url(u).is_ok())
            .map(|u| u.as_str())
    }

    pub fn has_usable_url(&self) -> bool {
        self.first_usable_url().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_has_no_usable_url() {
        let ctx = ResearchContext::default();
        assert!(ctx.first_usable_url().is_none());
        assert!(!ctx.has_usable_url());
    }

    #[test]
    fn malformed_urls_are_skipped_not_fatal() {
        let ctx = ResearchContext::with_known_urls(["not a url", "https://example.com/docs"]);
        assert_eq!(ctx.first_usable_url(), Some("https://example.com/docs"));
    }
}
