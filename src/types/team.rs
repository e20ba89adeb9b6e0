//! Team usage and queue observation.

use serde::{Deserialize, Serialize};

/// Data of `GET /v2/team/credit-usage`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditUsage {
    pub remaining_credits: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_credits: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_period_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_period_end: Option<String>,
}

/// Data of `GET /v2/team/token-usage`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub remaining_tokens: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_period_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_period_end: Option<String>,
}

/// Credits consumed in one billing period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditUsagePeriod {
    pub start_date: String,
    pub end_date: String,
    /// Set when the history was requested per API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub credits_used: u64,
}

/// Tokens consumed in one billing period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsagePeriod {
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub tokens_used: u64,
}

/// Response of `GET /v2/team/credit-usage/historical`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditUsageHistory {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub periods: Vec<CreditUsagePeriod>,
}

/// Response of `GET /v2/team/token-usage/historical`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsageHistory {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub periods: Vec<TokenUsagePeriod>,
}

/// Response of `GET /v2/team/queue-status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub jobs_in_queue: u64,
    #[serde(default)]
    pub active_jobs_in_queue: u64,
    #[serde(default)]
    pub waiting_jobs_in_queue: u64,
    #[serde(default)]
    pub max_concurrency: u64,
    /// When the most recent job finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_recent_success: Option<String>,
}
