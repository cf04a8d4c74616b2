pub mod fanout;

pub use crate::domain::model::{FanoutReport, FetchResponse, Outcome};
pub use crate::domain::ports::Transport;
pub use crate::utils::error::Result;
