use crate::adapters::http::ReqwestTransport;
use crate::domain::model::Outcome;
use crate::domain::ports::Transport;
use crate::utils::error::RequestError;
use crate::utils::validation::is_valid_url;
use futures::future::join_all;
use std::sync::Arc;

/// 對每個 URL 同時發出 GET，等待全部結束後依輸入順序回傳結果
///
/// 單一 URL 的失敗只影響該位置的 `Outcome`；整個呼叫只會因輸入格式錯誤而失敗。
pub struct FanoutRequester<T: Transport> {
    transport: Arc<T>,
}

impl<T: Transport> Clone for FanoutRequester<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl FanoutRequester<ReqwestTransport> {
    pub fn with_default_transport() -> crate::utils::error::Result<Self> {
        Ok(Self::new(ReqwestTransport::new()?))
    }
}

impl<T: Transport> FanoutRequester<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn from_shared(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub async fn fetch_all<S: AsRef<str>>(
        &self,
        urls: &[S],
    ) -> std::result::Result<Vec<Outcome>, RequestError> {
        if urls.is_empty() {
            tracing::warn!("Rejecting fan-out call: input array is empty");
            return Err(RequestError::input_empty());
        }

        let candidates: Vec<Option<&str>> = urls.iter().map(|url| Some(url.as_ref())).collect();
        Ok(self.settle(candidates).await)
    }

    /// JSON 邊界的進入點：輸入可能根本不是陣列
    ///
    /// 陣列中的非字串元素視為無效 URL。
    pub async fn fetch_all_value(
        &self,
        input: &serde_json::Value,
    ) -> std::result::Result<Vec<Outcome>, RequestError> {
        let items = match input.as_array() {
            Some(items) => items,
            None => {
                tracing::warn!("Rejecting fan-out call: input is not an array");
                return Err(RequestError::input_not_array());
            }
        };

        if items.is_empty() {
            tracing::warn!("Rejecting fan-out call: input array is empty");
            return Err(RequestError::input_empty());
        }

        let candidates: Vec<Option<&str>> = items.iter().map(|item| item.as_str()).collect();
        Ok(self.settle(candidates).await)
    }

    async fn settle(&self, candidates: Vec<Option<&str>>) -> Vec<Outcome> {
        tracing::info!("🚀 Dispatching {} requests", candidates.len());

        let futures = candidates
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| self.request_one(index, candidate));

        let outcomes = join_all(futures).await;

        let fulfilled = outcomes.iter().filter(|o| o.is_fulfilled()).count();
        tracing::info!(
            "✅ Settled {} requests: {} fulfilled, {} rejected",
            outcomes.len(),
            fulfilled,
            outcomes.len() - fulfilled
        );

        outcomes
    }

    async fn request_one(&self, index: usize, candidate: Option<&str>) -> Outcome {
        let url = match candidate {
            Some(url) if is_valid_url(url) => url,
            _ => {
                tracing::debug!("[{}] invalid URL entry: {:?}", index, candidate);
                return Outcome::Rejected {
                    reason: RequestError::invalid_url(),
                };
            }
        };

        let outcome = Outcome::from(self.transport.get(url).await);

        match &outcome {
            Outcome::Fulfilled { value } => {
                tracing::debug!("[{}] {} fulfilled with {}", index, url, value.status)
            }
            Outcome::Rejected { reason } => {
                tracing::debug!("[{}] {} rejected: {}", index, url, reason)
            }
        }

        outcome
    }
}

/// 使用預設 reqwest transport 的便利函式
pub async fn request_multiple_urls<S: AsRef<str>>(
    urls: &[S],
) -> crate::utils::error::Result<Vec<Outcome>> {
    let requester = FanoutRequester::with_default_transport()?;
    Ok(requester.fetch_all(urls).await?)
}
