pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "url-fanout")]
#[command(about = "Fetch many URLs concurrently and report every outcome")]
pub struct CliConfig {
    /// URLs to request (GET)
    pub urls: Vec<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Raw JSON input, expected to be an array of URL strings")]
    pub json: Option<String>,

    #[arg(long, help = "Read the JSON input from stdin")]
    pub stdin: bool,

    #[arg(long, help = "Pretty-print the JSON report")]
    pub pretty: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 決定輸入來源：stdin、--json、命令列 URL、設定檔 `[input].urls`
    ///
    /// `stdin` 只在 `--stdin` 時由呼叫端讀入並傳進來。
    pub fn resolve_input(
        &self,
        file_config: &TomlConfig,
        stdin: Option<&str>,
    ) -> Result<serde_json::Value> {
        if self.stdin {
            return Ok(serde_json::from_str(stdin.unwrap_or_default())?);
        }

        if let Some(raw) = &self.json {
            return Ok(serde_json::from_str(raw)?);
        }

        let urls = if self.urls.is_empty() {
            file_config.urls()
        } else {
            self.urls.as_slice()
        };

        Ok(serde_json::Value::from(urls.to_vec()))
    }
}
