use crate::utils::error::RequestError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 成功的 GET 回應
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse {
    pub url: String,
    pub status: u16,
    pub status_text: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// 可解析為 JSON 時為解析後的值，否則為原始文字
    pub data: serde_json::Value,
}

/// 單一 URL 的最終結果，序列化為 `{status, value}` 或 `{status, reason}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Fulfilled { value: FetchResponse },
    Rejected { reason: RequestError },
}

impl Outcome {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Outcome::Fulfilled { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected { .. })
    }

    pub fn value(&self) -> Option<&FetchResponse> {
        match self {
            Outcome::Fulfilled { value } => Some(value),
            Outcome::Rejected { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&RequestError> {
        match self {
            Outcome::Fulfilled { .. } => None,
            Outcome::Rejected { reason } => Some(reason),
        }
    }
}

impl From<std::result::Result<FetchResponse, RequestError>> for Outcome {
    fn from(result: std::result::Result<FetchResponse, RequestError>) -> Self {
        match result {
            Ok(value) => Outcome::Fulfilled { value },
            Err(reason) => Outcome::Rejected { reason },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FanoutReport {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u128,
    pub total: usize,
    pub fulfilled: usize,
    pub rejected: usize,
    pub outcomes: Vec<Outcome>,
}

impl FanoutReport {
    pub fn new(started_at: DateTime<Utc>, elapsed_ms: u128, outcomes: Vec<Outcome>) -> Self {
        let fulfilled = outcomes.iter().filter(|o| o.is_fulfilled()).count();

        Self {
            started_at,
            elapsed_ms,
            total: outcomes.len(),
            fulfilled,
            rejected: outcomes.len() - fulfilled,
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> FetchResponse {
        FetchResponse {
            url: "https://example.com/a.json".to_string(),
            status: 200,
            status_text: "OK".to_string(),
            headers: BTreeMap::new(),
            data: serde_json::json!({"id": 1}),
        }
    }

    #[test]
    fn test_outcome_serializes_as_settled_result() {
        let fulfilled = serde_json::to_value(Outcome::Fulfilled {
            value: sample_response(),
        })
        .unwrap();
        assert_eq!(fulfilled["status"], "fulfilled");
        assert_eq!(fulfilled["value"]["statusText"], "OK");
        assert_eq!(fulfilled["value"]["data"]["id"], 1);
        assert!(fulfilled.get("reason").is_none());

        let rejected = serde_json::to_value(Outcome::Rejected {
            reason: RequestError::invalid_url(),
        })
        .unwrap();
        assert_eq!(rejected["status"], "rejected");
        assert_eq!(rejected["reason"]["code"], "INVALID_URL");
        assert_eq!(rejected["reason"]["response"]["status"], 400);
        assert!(rejected.get("value").is_none());
    }

    #[test]
    fn test_report_counts() {
        let outcomes = vec![
            Outcome::from(Ok(sample_response())),
            Outcome::from(Err(RequestError::invalid_url())),
            Outcome::from(Ok(sample_response())),
        ];

        let report = FanoutReport::new(Utc::now(), 12, outcomes);

        assert_eq!(report.total, 3);
        assert_eq!(report.fulfilled, 2);
        assert_eq!(report.rejected, 1);
        assert!(report.outcomes[1].is_rejected());
        assert!(report.outcomes[1].value().is_none());
    }
}
