//! Structured extraction jobs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{JsonValue, SchemaProperty, ScrapeOptions, WebhookConfig};
use crate::jobs::{JobSnapshot, JobStatus};

/// Body of `POST /v2/extract`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    /// Pages to extract from; glob patterns like `https://example.com/*` are allowed
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_external_links: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_web_search: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_sources: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrape_options: Option<ScrapeOptions>,
    #[serde(
        rename = "ignoreInvalidURLs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ignore_invalid_urls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<WebhookConfig>,
}

impl ExtractRequest {
    /// Extract from `urls` guided by `prompt`.
    #[must_use]
    pub fn new<I, S>(urls: I, prompt: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    /// Constrains the output to `schema`.
    #[must_use]
    pub fn with_schema(mut self, schema: SchemaProperty) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Status snapshot of an extract job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub status: JobStatus,
    /// Extracted data, shaped by the request schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Source URLs per extracted field, when `showSources` was set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_used: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
}

impl JobSnapshot for ExtractJob {
    fn status(&self) -> JobStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_includes_schema() {
        let request = ExtractRequest::new(["https://shop.example/*"], "Product names")
            .with_schema(SchemaProperty::object([(
                "products",
                SchemaProperty::array(SchemaProperty::string()),
            )]));

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["urls"][0], "https://shop.example/*");
        assert_eq!(json["prompt"], "Product names");
        assert_eq!(json["schema"]["properties"]["products"]["type"], "array");
    }

    #[test]
    fn completed_job_exposes_data() {
        let json = r#"{
            "success": true,
            "status": "completed",
            "data": {"products": ["Widget", "Gadget"]},
            "tokensUsed": 1200
        }"#;

        let job: ExtractJob = serde_json::from_str(json).unwrap();

        assert!(job.status().is_terminal());
        let products = job.data.as_ref().and_then(|d| d.get("products")).unwrap();
        assert_eq!(products.as_array().map(<[_]>::len), Some(2));
        assert_eq!(job.tokens_used, Some(1200));
    }

    #[test]
    fn processing_job_has_no_data() {
        let job: ExtractJob =
            serde_json::from_str(r#"{"success": true, "status": "processing"}"#).unwrap();

        assert_eq!(job.status(), JobStatus::Processing);
        assert!(job.data.is_none());
    }
}
