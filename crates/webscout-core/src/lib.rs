use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("search failed: {0}")]
    Search(String),
    #[error("scrape failed: {0}")]
    Scrape(String),
    #[error("crawl failed: {0}")]
    Crawl(String),
    #[error("processing failed: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parse and lightly validate a URL string.
///
/// Collaborator implementations should call this before touching the network
/// so that malformed input fails with `Error::InvalidUrl` instead of a
/// provider-specific error.
pub fn parse_url(raw: &str) -> Result<url::Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidUrl("empty url".to_string()));
    }
    url::Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub limit: Option<usize>,
    pub language: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub provider: String,
}

/// A scraped page, split into sections when the backend can recover
/// structure. `text` is always the full extracted text, so consumers that do
/// not care about sections can ignore them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub title: Option<String>,
    pub sections: Vec<Section>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub heading: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSummary {
    pub url: String,
    pub title: Option<String>,
    pub summary: String,
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub root_url: String,
    /// Link-follow depth from the root. Implementations should treat 0 as
    /// "root page only".
    pub depth: usize,
    /// Hard cap on pages fetched, regardless of depth.
    pub max_pages: usize,
}

#[async_trait::async_trait]
pub trait SearchTool: Send + Sync {
    fn name(&self) -> &'static str;
    async fn search(&self, q: &SearchQuery) -> Result<SearchResponse>;
}

#[async_trait::async_trait]
pub trait ScrapeTool: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<Document>;
}

#[async_trait::async_trait]
pub trait CrawlTool: Send + Sync {
    async fn crawl(&self, req: &CrawlRequest) -> Result<Vec<Document>>;
}

/// Condensation tools: summarize an already-fetched document, or fetch and
/// condense a single URL in one shot (`deep_dive`).
#[async_trait::async_trait]
pub trait ResearchTool: Send + Sync {
    async fn summarize(&self, doc: &Document) -> Result<PageSummary>;
    async fn deep_dive(&self, url: &str) -> Result<PageSummary>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_url_rejects_empty_and_garbage() {
        assert!(matches!(parse_url(""), Err(Error::InvalidUrl(_))));
        assert!(matches!(parse_url("   "), Err(Error::InvalidUrl(_))));
        assert!(matches!(parse_url("not a url"), Err(Error::InvalidUrl(_))));
        assert!(parse_url("https://example.com/docs").is_ok());
    }

    #[test]
    fn parses_minimal_document_shape() {
        let js = r#"
        {
          "url": "https://example.com/docs",
          "title": "Docs",
          "sections": [{"heading": "Intro", "text": "Hello"}],
          "text": "Hello"
        }
        "#;
        let doc: Document = serde_json::from_str(js).unwrap();
        assert_eq!(doc.url, "https://example.com/docs");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].heading.as_deref(), Some("Intro"));
    }

    #[test]
    fn parses_minimal_search_response_shape() {
        let js = r#"
        {
          "results": [
            {"url":"https://example.com","title":"Example","snippet":"Hello","source":"test"}
          ],
          "provider": "test"
        }
        "#;
        let parsed: SearchResponse = serde_json::from_str(js).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].source, "test");
    }
}
