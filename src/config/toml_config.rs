use crate::adapters::http::TransportOptions;
use crate::utils::error::{ErrorCode, ErrorCodeMap, FanoutError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub error_codes: ErrorCodesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransportConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub max_redirects: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorCodesConfig {
    pub client_error: Option<String>,
    pub server_error: Option<String>,
    pub overrides: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FanoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FanoutError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${USER_AGENT})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;

        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FanoutError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn urls(&self) -> &[String] {
        &self.input.urls
    }

    pub fn pretty_output(&self) -> bool {
        self.output.pretty.unwrap_or(false)
    }

    /// 將 `[error_codes]` 轉成狀態碼對應表
    pub fn error_code_map(&self) -> Result<ErrorCodeMap> {
        let mut map = ErrorCodeMap::default();

        if let Some(code) = &self.error_codes.client_error {
            map.client_error = ErrorCode::from(code.as_str());
        }
        if let Some(code) = &self.error_codes.server_error {
            map.server_error = ErrorCode::from(code.as_str());
        }

        if let Some(overrides) = &self.error_codes.overrides {
            for (status, code) in overrides {
                let parsed: u16 =
                    status
                        .trim()
                        .parse()
                        .map_err(|_| FanoutError::InvalidConfigValueError {
                            field: "error_codes.overrides".to_string(),
                            value: status.clone(),
                            reason: "Key must be an HTTP status code".to_string(),
                        })?;
                validate_range("error_codes.overrides", parsed, 400, 599)?;
                map.overrides.insert(parsed, ErrorCode::from(code.as_str()));
            }
        }

        Ok(map)
    }

    pub fn transport_options(&self) -> Result<TransportOptions> {
        let defaults = TransportOptions::default();

        Ok(TransportOptions {
            timeout: self.transport.timeout_seconds.map(Duration::from_secs),
            user_agent: self.transport.user_agent.clone(),
            max_redirects: self.transport.max_redirects.unwrap_or(defaults.max_redirects),
            error_codes: self.error_code_map()?,
        })
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(timeout) = self.transport.timeout_seconds {
            validate_positive_number("transport.timeout_seconds", timeout, 1)?;
        }

        if let Some(user_agent) = &self.transport.user_agent {
            validate_non_empty_string("transport.user_agent", user_agent)?;
        }

        if let Some(max_redirects) = self.transport.max_redirects {
            validate_range("transport.max_redirects", max_redirects, 0, 50)?;
        }

        if let Some(code) = &self.error_codes.client_error {
            validate_non_empty_string("error_codes.client_error", code)?;
        }
        if let Some(code) = &self.error_codes.server_error {
            validate_non_empty_string("error_codes.server_error", code)?;
        }

        self.error_code_map()?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
