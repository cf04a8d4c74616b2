use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

pub const BAD_REQUEST: u16 = 400;
pub const BAD_REQUEST_TEXT: &str = "Bad Request";

/// 機器可讀的錯誤代碼
///
/// 本地驗證錯誤與 transport 錯誤共用同一組代碼；設定檔中出現的其他代碼以
/// `Other` 原樣保留。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ErrorCode {
    InputMustBeOfTypeArray,
    InputArrayCannotBeEmpty,
    InvalidUrl,
    BadRequest,
    BadResponse,
    Network,
    ConnectionAborted,
    TooManyRedirects,
    Other(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::InputMustBeOfTypeArray => "INPUT_MUST_BE_OF_TYPE_ARRAY",
            ErrorCode::InputArrayCannotBeEmpty => "INPUT_ARRAY_CANNOT_BE_EMPTY",
            ErrorCode::InvalidUrl => "INVALID_URL",
            ErrorCode::BadRequest => "ERR_BAD_REQUEST",
            ErrorCode::BadResponse => "ERR_BAD_RESPONSE",
            ErrorCode::Network => "ERR_NETWORK",
            ErrorCode::ConnectionAborted => "ECONNABORTED",
            ErrorCode::TooManyRedirects => "ERR_FR_TOO_MANY_REDIRECTS",
            ErrorCode::Other(code) => code,
        }
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "INPUT_MUST_BE_OF_TYPE_ARRAY" => ErrorCode::InputMustBeOfTypeArray,
            "INPUT_ARRAY_CANNOT_BE_EMPTY" => ErrorCode::InputArrayCannotBeEmpty,
            "INVALID_URL" => ErrorCode::InvalidUrl,
            "ERR_BAD_REQUEST" => ErrorCode::BadRequest,
            "ERR_BAD_RESPONSE" => ErrorCode::BadResponse,
            "ERR_NETWORK" => ErrorCode::Network,
            "ECONNABORTED" => ErrorCode::ConnectionAborted,
            "ERR_FR_TOO_MANY_REDIRECTS" => ErrorCode::TooManyRedirects,
            _ => ErrorCode::Other(code),
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        ErrorCode::from(code.to_string())
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status: u16,
    pub status_text: String,
    /// 伺服器回應的內容（僅在有 HTTP 回應時存在）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// 統一的錯誤描述：`code` 加上 `response.{status, statusText}`
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message} ({code}, {} {})", .response.status, .response.status_text)]
pub struct RequestError {
    pub message: String,
    pub code: ErrorCode,
    pub response: ErrorResponse,
}

impl RequestError {
    pub fn new(
        message: impl Into<String>,
        code: impl Into<ErrorCode>,
        status: u16,
        status_text: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            response: ErrorResponse {
                status,
                status_text: status_text.into(),
                data: None,
            },
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.response.data = Some(data);
        self
    }

    pub fn input_not_array() -> Self {
        Self::new(
            "Input must be of type array!",
            ErrorCode::InputMustBeOfTypeArray,
            BAD_REQUEST,
            BAD_REQUEST_TEXT,
        )
    }

    pub fn input_empty() -> Self {
        Self::new(
            "Input array cannot be empty!",
            ErrorCode::InputArrayCannotBeEmpty,
            BAD_REQUEST,
            BAD_REQUEST_TEXT,
        )
    }

    pub fn invalid_url() -> Self {
        Self::new(
            "Entry is not a valid URL!",
            ErrorCode::InvalidUrl,
            BAD_REQUEST,
            BAD_REQUEST_TEXT,
        )
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }

    pub fn status_text(&self) -> &str {
        &self.response.status_text
    }
}

/// 非 2xx 狀態碼對應的錯誤代碼
///
/// 預設 4xx 為 `ERR_BAD_REQUEST`、5xx 為 `ERR_BAD_RESPONSE`，個別狀態碼可覆寫。
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorCodeMap {
    pub client_error: ErrorCode,
    pub server_error: ErrorCode,
    pub overrides: HashMap<u16, ErrorCode>,
}

impl Default for ErrorCodeMap {
    fn default() -> Self {
        Self {
            client_error: ErrorCode::BadRequest,
            server_error: ErrorCode::BadResponse,
            overrides: HashMap::new(),
        }
    }
}

impl ErrorCodeMap {
    pub fn code_for(&self, status: u16) -> ErrorCode {
        if let Some(code) = self.overrides.get(&status) {
            return code.clone();
        }

        if status >= 500 {
            self.server_error.clone()
        } else {
            self.client_error.clone()
        }
    }
}

#[derive(Error, Debug)]
pub enum FanoutError {
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Request failed: {0}")]
    RequestFailed(#[from] RequestError),
}

pub type Result<T> = std::result::Result<T, FanoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_shape() {
        let error = RequestError::new("boom", "SOME_CODE", 418, "I'm a teapot");

        assert_eq!(error.code, ErrorCode::Other("SOME_CODE".to_string()));
        assert_eq!(error.status(), 418);
        assert_eq!(error.status_text(), "I'm a teapot");
        assert_eq!(error.message, "boom");
        assert!(error.response.data.is_none());
    }

    #[test]
    fn test_request_error_serializes_like_error_descriptor() {
        let json = serde_json::to_value(RequestError::invalid_url()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "message": "Entry is not a valid URL!",
                "code": "INVALID_URL",
                "response": { "status": 400, "statusText": "Bad Request" }
            })
        );
    }

    #[test]
    fn test_error_code_roundtrips_known_names() {
        assert_eq!(ErrorCode::from("ERR_BAD_REQUEST"), ErrorCode::BadRequest);
        assert_eq!(ErrorCode::from("ECONNABORTED"), ErrorCode::ConnectionAborted);
        assert_eq!(ErrorCode::InputArrayCannotBeEmpty.to_string(), "INPUT_ARRAY_CANNOT_BE_EMPTY");
        assert_eq!(ErrorCode::from("ERR_NOT_FOUND").as_str(), "ERR_NOT_FOUND");
    }

    #[test]
    fn test_error_code_map_defaults_and_overrides() {
        let mut map = ErrorCodeMap::default();
        assert_eq!(map.code_for(404), ErrorCode::BadRequest);
        assert_eq!(map.code_for(503), ErrorCode::BadResponse);

        map.overrides.insert(404, ErrorCode::from("ERR_NOT_FOUND"));
        assert_eq!(map.code_for(404).as_str(), "ERR_NOT_FOUND");
        assert_eq!(map.code_for(410), ErrorCode::BadRequest);
    }
}
