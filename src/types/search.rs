//! Web search.

use serde::{Deserialize, Serialize};

use super::{Document, Location, ScrapeOptions};

/// Result categories a search can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    Web,
    News,
    Images,
}

/// Body of `POST /v2/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    /// Categories to search; the server defaults to web only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SearchSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Time-based filter, e.g. `qdr:d` for the past day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tbs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(
        rename = "ignoreInvalidURLs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ignore_invalid_urls: Option<bool>,
    /// Server-side timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Scrape each web hit with these options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrape_options: Option<ScrapeOptions>,
}

impl SearchRequest {
    /// Search for `query` with server defaults.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// A web result, with scraped content when `scrapeOptions` was set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub document: Document,
}

/// A news result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsHit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

/// An image result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageHit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

/// Search results grouped by source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub web: Vec<SearchHit>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub news: Vec<NewsHit>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageHit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_encodes_sources() {
        let request = SearchRequest {
            sources: vec![SearchSource::Web, SearchSource::News],
            limit: Some(5),
            ..SearchRequest::new("rust async runtime")
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "query": "rust async runtime",
                "sources": ["web", "news"],
                "limit": 5
            })
        );
    }

    #[test]
    fn web_hit_carries_scraped_content() {
        let json = r##"{
            "web": [{
                "url": "https://tokio.rs",
                "title": "Tokio",
                "markdown": "# Tokio",
                "metadata": {"statusCode": 200}
            }],
            "news": [{"title": "Release", "url": "https://news.example/a", "date": "1 day ago"}]
        }"##;

        let data: SearchData = serde_json::from_str(json).unwrap();

        let hit = &data.web[0];
        assert_eq!(hit.title.as_deref(), Some("Tokio"));
        assert_eq!(hit.document.markdown.as_deref(), Some("# Tokio"));
        assert_eq!(data.news[0].date.as_deref(), Some("1 day ago"));
        assert!(data.images.is_empty());
    }
}
