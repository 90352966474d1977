//! SnsNotifier - 運用者向けの通知を SNS トピックに流す

use async_trait::async_trait;
use aws_sdk_sns::Client;
use stalekey_core::domain::UpstreamError;
use stalekey_core::ports::{Notifier, Severity};

use crate::convert::upstream;

/// SNS の Subject は 100 文字まで
const MAX_SUBJECT_CHARS: usize = 100;

#[derive(Clone)]
pub struct SnsNotifier {
    client: Client,
    topic_arn: String,
}

impl SnsNotifier {
    pub fn new(client: Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }

    pub fn from_conf(sdk_config: &aws_config::SdkConfig, topic_arn: impl Into<String>) -> Self {
        Self::new(Client::new(sdk_config), topic_arn)
    }
}

fn subject_line(subject: &str, severity: Severity) -> String {
    format!("[{severity}] {subject}")
        .chars()
        .take(MAX_SUBJECT_CHARS)
        .collect()
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn notify(
        &self,
        subject: &str,
        message: &str,
        severity: Severity,
    ) -> Result<(), UpstreamError> {
        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject_line(subject, severity))
            .message(message)
            .send()
            .await
            .map_err(|e| upstream("sns", e))?;
        tracing::info!(%severity, topic = %self.topic_arn, "notification published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_carries_severity() {
        assert_eq!(
            subject_line("IAM credential check failed", Severity::Error),
            "[ERROR] IAM credential check failed"
        );
    }

    #[test]
    fn subject_is_capped() {
        let long = "x".repeat(300);
        assert_eq!(subject_line(&long, Severity::Warning).chars().count(), MAX_SUBJECT_CHARS);
    }
}
