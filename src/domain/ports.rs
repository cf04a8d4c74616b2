use crate::domain::model::FetchResponse;
use crate::utils::error::RequestError;
use async_trait::async_trait;

/// HTTP GET 能力
///
/// 失敗時必須回傳已正規化的 `RequestError`，讓呼叫端只面對一種錯誤格式。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<FetchResponse, RequestError>;
}
