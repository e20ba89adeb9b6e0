//! Single-page scrape request options and the scraped document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{JsonValue, Location, SchemaProperty};

/// Output formats that need no options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimpleFormat {
    /// Cleaned markdown
    Markdown,
    /// Cleaned HTML
    Html,
    /// Unmodified page HTML
    RawHtml,
    /// Links found on the page
    Links,
    /// Image URLs found on the page
    Images,
    /// LLM-generated summary
    Summary,
    /// Viewport screenshot URL
    Screenshot,
}

/// Output formats that carry options, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FormatOptions {
    /// Structured extraction into `json`
    Json {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<SchemaProperty>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prompt: Option<String>,
    },
    /// Screenshot with explicit settings
    Screenshot {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        full_page: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quality: Option<u8>,
    },
    /// Diff against the previous scrape of the same URL
    ChangeTracking {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modes: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tag: Option<String>,
    },
}

/// A requested output format: either a bare name or an options object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Format {
    /// `"markdown"`, `"html"`, ...
    Simple(SimpleFormat),
    /// `{"type": "json", ...}`
    Options(FormatOptions),
}

impl From<SimpleFormat> for Format {
    fn from(format: SimpleFormat) -> Self {
        Self::Simple(format)
    }
}

impl From<FormatOptions> for Format {
    fn from(options: FormatOptions) -> Self {
        Self::Options(options)
    }
}

/// A browser action performed before the page is captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Wait for a duration or until a selector appears
    Wait {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        milliseconds: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selector: Option<String>,
    },
    /// Click an element
    Click { selector: String },
    /// Type text into the focused element
    Write { text: String },
    /// Press a key
    Press { key: String },
    /// Scroll the page
    Scroll {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selector: Option<String>,
    },
    /// Take a screenshot
    Screenshot {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        full_page: Option<bool>,
    },
    /// Capture the current page content
    Scrape,
    /// Run JavaScript in the page
    ExecuteJavascript { script: String },
}

/// Options controlling how a page is scraped.
///
/// Every field is optional; unset fields use the server's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<Format>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_main_content: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_tags: Vec<String>,
    /// Accept a cached copy up to this many milliseconds old
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Extra delay in milliseconds before capture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_tls_verification: Option<bool>,
    /// Server-side timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_base64_images: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_ads: Option<bool>,
    /// `"basic"`, `"stealth"` or `"auto"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_in_cache: Option<bool>,
}

impl ScrapeOptions {
    /// Options requesting the given formats.
    #[must_use]
    pub fn with_formats<I, F>(formats: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Format>,
    {
        Self {
            formats: formats.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Body of `POST /v2/scrape`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// Page to scrape
    pub url: String,
    #[serde(flatten)]
    pub options: ScrapeOptions,
}

impl ScrapeRequest {
    /// Scrape `url` with server defaults.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            options: ScrapeOptions::default(),
        }
    }

    /// Replaces the scrape options.
    #[must_use]
    pub fn with_options(mut self, options: ScrapeOptions) -> Self {
        self.options = options;
        self
    }
}

/// Page metadata reported alongside a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(
        rename = "sourceURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Any other metadata keys (`og:*`, `keywords`, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

/// A scraped page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Structured output of a `json` format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_tracking: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_flattens_options() {
        let request = ScrapeRequest::new("https://example.com").with_options(ScrapeOptions {
            only_main_content: Some(true),
            wait_for: Some(500),
            ..ScrapeOptions::with_formats([SimpleFormat::Markdown, SimpleFormat::RawHtml])
        });

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://example.com",
                "formats": ["markdown", "rawHtml"],
                "onlyMainContent": true,
                "waitFor": 500
            })
        );
    }

    #[test]
    fn default_options_encode_to_url_only() {
        let json = serde_json::to_string(&ScrapeRequest::new("https://example.com")).unwrap();

        assert_eq!(json, r#"{"url":"https://example.com"}"#);
    }

    #[test]
    fn mixed_formats_decode_by_shape() {
        let formats: Vec<Format> = serde_json::from_str(
            r#"["markdown", {"type": "json", "prompt": "Extract prices"}, {"type": "screenshot", "fullPage": true}]"#,
        )
        .unwrap();

        assert_eq!(formats[0], Format::Simple(SimpleFormat::Markdown));
        assert_eq!(
            formats[1],
            Format::Options(FormatOptions::Json {
                schema: None,
                prompt: Some("Extract prices".to_string()),
            })
        );
        assert_eq!(
            formats[2],
            Format::Options(FormatOptions::Screenshot {
                full_page: Some(true),
                quality: None,
            })
        );
    }

    #[test]
    fn actions_use_type_tag() {
        let actions = vec![
            Action::Wait {
                milliseconds: Some(1000),
                selector: None,
            },
            Action::Click {
                selector: "#load-more".to_string(),
            },
            Action::ExecuteJavascript {
                script: "window.scrollTo(0, 0)".to_string(),
            },
        ];

        let json = serde_json::to_value(&actions).unwrap();

        assert_eq!(json[0], serde_json::json!({"type": "wait", "milliseconds": 1000}));
        assert_eq!(json[1]["type"], "click");
        assert_eq!(json[2]["type"], "executeJavascript");
    }

    #[test]
    fn document_keeps_unknown_metadata() {
        let json = r##"{
            "markdown": "# Hello",
            "metadata": {
                "title": "Hello",
                "sourceURL": "https://example.com",
                "statusCode": 200,
                "og:image": "https://example.com/a.png"
            }
        }"##;

        let document: Document = serde_json::from_str(json).unwrap();
        let metadata = document.metadata.as_ref().unwrap();

        assert_eq!(document.markdown.as_deref(), Some("# Hello"));
        assert_eq!(metadata.source_url.as_deref(), Some("https://example.com"));
        assert_eq!(metadata.status_code, Some(200));
        assert_eq!(
            metadata.extra.get("og:image").and_then(JsonValue::as_str),
            Some("https://example.com/a.png")
        );
    }

    #[test]
    fn document_encoding_is_stable() {
        let json = r#"{"markdown":"text","links":["https://a.example"],"json":{"price":10},"metadata":{"title":"T","statusCode":200,"keywords":"a,b"}}"#;
        let document: Document = serde_json::from_str(json).unwrap();
        let once = serde_json::to_string(&document).unwrap();
        let again: Document = serde_json::from_str(&once).unwrap();

        assert_eq!(serde_json::to_string(&again).unwrap(), once);
        assert_eq!(again, document);
    }
}
