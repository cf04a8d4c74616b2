use crate::domain::model::FetchResponse;
use crate::domain::ports::Transport;
use crate::utils::error::{ErrorCode, ErrorCodeMap, RequestError, Result};
use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::{redirect, Client, Response, StatusCode};
use std::collections::BTreeMap;
use std::time::Duration;

pub const NO_RESPONSE_STATUS: u16 = 0;

#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
    pub max_redirects: usize,
    pub error_codes: ErrorCodeMap,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: None,
            max_redirects: 10,
            error_codes: ErrorCodeMap::default(),
        }
    }
}

/// 以 reqwest 實作的 `Transport`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    error_codes: ErrorCodeMap,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        Self::with_options(TransportOptions::default())
    }

    pub fn with_options(options: TransportOptions) -> Result<Self> {
        let mut builder = Client::builder().redirect(redirect::Policy::limited(options.max_redirects));

        // 未設定時沿用 reqwest 預設（不逾時）
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
            error_codes: options.error_codes,
        })
    }

    fn status_error(
        &self,
        url: &str,
        status: StatusCode,
        status_text: String,
        body: String,
    ) -> RequestError {
        RequestError::new(
            format!("Request to {} failed with status code {}", url, status.as_u16()),
            self.error_codes.code_for(status.as_u16()),
            status.as_u16(),
            status_text,
        )
        .with_data(parse_body(body))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> std::result::Result<FetchResponse, RequestError> {
        if let Some(scheme) = unsupported_scheme(url) {
            return Err(RequestError::new(
                format!("Unsupported protocol {}:", scheme),
                ErrorCode::BadRequest,
                NO_RESPONSE_STATUS,
                "Unsupported Protocol",
            ));
        }

        let response = self.client.get(url).send().await.map_err(map_transport_error)?;

        let status = response.status();
        let reason = status_text(&response);
        let final_url = response.url().to_string();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();

        if !status.is_success() {
            // 讀不到錯誤內容時仍保留 HTTP 狀態
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("GET {} -> {}: body unreadable: {}", url, status, e);
                    String::new()
                }
            };
            return Err(self.status_error(url, status, reason, body));
        }

        let body = response.text().await.map_err(map_transport_error)?;

        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(FetchResponse {
            url: final_url,
            status: status.as_u16(),
            status_text: reason,
            headers,
            data: parse_body(body),
        })
    }
}

fn unsupported_scheme(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    match parsed.scheme() {
        "http" | "https" => None,
        scheme => Some(scheme.to_string()),
    }
}

/// 伺服器送來的 reason phrase；hyper 只在與標準不同時保留，否則用標準值
fn status_text(response: &Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => canonical_text(response.status()),
    }
}

fn canonical_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("").to_string()
}

/// 回應內容能解析為 JSON 就解析，否則保留為字串
fn parse_body(body: String) -> serde_json::Value {
    serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body))
}

fn map_transport_error(err: reqwest::Error) -> RequestError {
    let (code, status_text) = if err.is_timeout() {
        (ErrorCode::ConnectionAborted, "Timeout")
    } else if err.is_redirect() {
        (ErrorCode::TooManyRedirects, "Too Many Redirects")
    } else if err.is_builder() {
        (ErrorCode::BadRequest, "Bad Request")
    } else {
        (ErrorCode::Network, "Network Error")
    };

    RequestError::new(err.to_string(), code, NO_RESPONSE_STATUS, status_text)
}
