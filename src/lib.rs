pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::{ReqwestTransport, TransportOptions};
pub use config::toml_config::TomlConfig;
pub use core::fanout::{request_multiple_urls, FanoutRequester};
pub use domain::model::{FanoutReport, FetchResponse, Outcome};
pub use domain::ports::Transport;
pub use utils::error::{ErrorCode, ErrorCodeMap, FanoutError, RequestError, Result};
pub use utils::validation::is_valid_url;
