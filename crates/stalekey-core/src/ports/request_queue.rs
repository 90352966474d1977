//! RequestQueue port - ローテーション依頼の送信先
//!
//! 送るのは JSON 化済みの本文だけ。キューのセマンティクス（重複排除など）は実装側に任せる。

use async_trait::async_trait;

use crate::domain::UpstreamError;

#[async_trait]
pub trait RequestQueue: Send + Sync {
    async fn send(&self, body: String) -> Result<(), UpstreamError>;
}
