//! InMemoryRequestQueue - 開発用の送信先
//!
//! 送られた本文を順番に保持する。`fail_after` を設定すると、その件数を
//! 送った後の送信がエラーになる（送信失敗時の挙動確認用）。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::UpstreamError;
use crate::ports::RequestQueue;

#[derive(Default)]
pub struct InMemoryRequestQueue {
    sent: Mutex<Vec<String>>,
    fail_after: Option<usize>,
}

impl InMemoryRequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(accepted: usize) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_after: Some(accepted),
        }
    }

    /// これまでに受け取った本文（送信順）
    pub async fn sent(&self) -> Vec<String> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl RequestQueue for InMemoryRequestQueue {
    async fn send(&self, body: String) -> Result<(), UpstreamError> {
        let mut sent = self.sent.lock().await;
        if let Some(limit) = self.fail_after
            && sent.len() >= limit
        {
            return Err(UpstreamError::new("in-memory queue", "queue rejected message"));
        }
        sent.push(body);
        Ok(())
    }
}
