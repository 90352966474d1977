//! RecordingNotifier - 通知を記録するだけの Notifier
//!
//! ローカル実行（dry run）とテストで使う。記録と同時に tracing にも出す。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::UpstreamError;
use crate::ports::{Notifier, Severity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        subject: &str,
        message: &str,
        severity: Severity,
    ) -> Result<(), UpstreamError> {
        tracing::info!(%severity, subject, message, "notification recorded");
        self.sent.lock().await.push(Notification {
            subject: subject.to_string(),
            message: message.to_string(),
            severity,
        });
        Ok(())
    }
}
