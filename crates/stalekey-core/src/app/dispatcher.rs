//! Dispatcher - 1 回の実行（解決 → 判定 → 送信）の順序付け
//!
//! # 失敗時の方針
//! - ユーザー単位のリトライはしない。最初のエラーで残りを打ち切る
//! - 打ち切ったら運用者に 1 回だけ通知し、エラーを呼び出し元に返す
//! - 通知自体が失敗してもログに残すだけで、元のエラーを返す

use std::sync::Arc;

use serde::Serialize;
use tracing::Instrument;

use crate::app::walker::DirectoryWalker;
use crate::domain::{RefreshCredentialRequest, RunError, RunId};
use crate::ports::{Notifier, RequestQueue, RunIdGenerator, Severity, StalenessCheck};

/// 正常終了した実行の集計
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub run_id: RunId,
    /// Email タグを持ち、依頼が組み立てられたユーザー数
    pub candidates: usize,
    /// 鮮度判定を行った数
    pub evaluated: usize,
    /// キューに送った数
    pub published: usize,
}

pub struct Dispatcher {
    walker: DirectoryWalker,
    staleness: Arc<dyn StalenessCheck>,
    queue: Arc<dyn RequestQueue>,
    notifier: Arc<dyn Notifier>,
    id_generator: Arc<dyn RunIdGenerator>,
    account_id: String,
}

impl Dispatcher {
    pub fn new(
        walker: DirectoryWalker,
        staleness: Arc<dyn StalenessCheck>,
        queue: Arc<dyn RequestQueue>,
        notifier: Arc<dyn Notifier>,
        id_generator: Arc<dyn RunIdGenerator>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            walker,
            staleness,
            queue,
            notifier,
            id_generator,
            account_id: account_id.into(),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// ディレクトリ全体を 1 回走査し、古い資格情報を持つユーザーの依頼を送る
    pub async fn run(&self) -> Result<RunReport, RunError> {
        let run_id = self.id_generator.generate_run_id();
        let span = tracing::info_span!("run", %run_id, account_id = %self.account_id);
        async {
            match self.dispatch(run_id).await {
                Ok(report) => {
                    tracing::info!(
                        candidates = report.candidates,
                        evaluated = report.evaluated,
                        published = report.published,
                        "run finished"
                    );
                    Ok(report)
                }
                Err(err) => {
                    self.report_failure(&err).await;
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, run_id: RunId) -> Result<RunReport, RunError> {
        let requests = self.walker.resolve_requests().await?;
        tracing::info!("{} user(s) to check", requests.len());

        let mut report = RunReport {
            run_id,
            candidates: requests.len(),
            evaluated: 0,
            published: 0,
        };

        for request in &requests {
            tracing::info!(user = request.user_name(), "processing request");
            report.evaluated += 1;
            let stale = self
                .staleness
                .is_obsolete(request)
                .await
                .map_err(|source| RunError::Staleness {
                    user_name: request.user_name().to_string(),
                    source,
                })?;
            if stale {
                self.publish(request).await?;
                report.published += 1;
            } else {
                tracing::debug!(user = request.user_name(), "credentials are current");
            }
        }

        Ok(report)
    }

    async fn publish(&self, request: &RefreshCredentialRequest) -> Result<(), RunError> {
        let body = request.to_message_body().map_err(|source| RunError::Encode {
            user_name: request.user_name().to_string(),
            source,
        })?;
        self.queue
            .send(body)
            .await
            .map_err(|source| RunError::Publish {
                user_name: request.user_name().to_string(),
                source,
            })?;
        tracing::info!(
            user = request.user_name(),
            "sent a credentials renewal request"
        );
        Ok(())
    }

    async fn report_failure(&self, err: &RunError) {
        tracing::error!(error = %err, details = ?err, kind = ?err.kind(), "run aborted");
        let message = format!(
            "Failed to check IAM credentials of account {}, reason: {err}",
            self.account_id
        );
        if let Err(notify_err) = self
            .notifier
            .notify("IAM credential check failed", &message, Severity::Error)
            .await
        {
            tracing::error!(error = %notify_err, "failed to send failure notification");
        }
    }
}
