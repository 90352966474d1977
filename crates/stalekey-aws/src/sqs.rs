//! SqsRequestQueue - ローテーション依頼を SQS に送る

use async_trait::async_trait;
use aws_sdk_sqs::Client;
use stalekey_core::domain::UpstreamError;
use stalekey_core::ports::RequestQueue;

use crate::convert::upstream;

#[derive(Clone)]
pub struct SqsRequestQueue {
    client: Client,
    queue_url: String,
}

impl SqsRequestQueue {
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    pub fn from_conf(sdk_config: &aws_config::SdkConfig, queue_url: impl Into<String>) -> Self {
        Self::new(Client::new(sdk_config), queue_url)
    }
}

#[async_trait]
impl RequestQueue for SqsRequestQueue {
    async fn send(&self, body: String) -> Result<(), UpstreamError> {
        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| upstream("sqs", e))?;
        tracing::debug!(message_id = ?output.message_id(), "message accepted by SQS");
        Ok(())
    }
}
