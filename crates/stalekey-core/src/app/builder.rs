//! AppBuilder - Dispatcher の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）: 足りない部品を全部まとめて報告する

use std::sync::Arc;

use crate::app::dispatcher::Dispatcher;
use crate::app::walker::DirectoryWalker;
use crate::domain::PolicyDefaults;
use crate::ports::{
    Notifier, RequestQueue, RunIdGenerator, StalenessCheck, SystemClock, UlidGenerator,
    UserDirectory,
};

/// AppBuilder は Dispatcher を構築
///
/// # 使用例
/// ```ignore
/// let dispatcher = AppBuilder::new()
///     .directory(directory)
///     .staleness(staleness)
///     .queue(queue)
///     .notifier(notifier)
///     .account_id("123456789012")
///     .defaults(PolicyDefaults::new(Some(30), Some(90)))
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - build() 時に必須部品がそろっているかチェック
/// - 不足があれば BuildError::MissingComponents を返す
/// - id_generator は省略可（SystemClock の UlidGenerator を使う）
#[derive(Default)]
pub struct AppBuilder {
    directory: Option<Arc<dyn UserDirectory>>,
    staleness: Option<Arc<dyn StalenessCheck>>,
    queue: Option<Arc<dyn RequestQueue>>,
    notifier: Option<Arc<dyn Notifier>>,
    id_generator: Option<Arc<dyn RunIdGenerator>>,
    account_id: Option<String>,
    defaults: PolicyDefaults,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing components: {0:?}. These must be provided before build().")]
    MissingComponents(Vec<&'static str>),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn staleness(mut self, staleness: Arc<dyn StalenessCheck>) -> Self {
        self.staleness = Some(staleness);
        self
    }

    pub fn queue(mut self, queue: Arc<dyn RequestQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn id_generator(mut self, id_generator: Arc<dyn RunIdGenerator>) -> Self {
        self.id_generator = Some(id_generator);
        self
    }

    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn defaults(mut self, defaults: PolicyDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn build(self) -> Result<Dispatcher, BuildError> {
        let mut missing = Vec::new();
        if self.directory.is_none() {
            missing.push("directory");
        }
        if self.staleness.is_none() {
            missing.push("staleness");
        }
        if self.queue.is_none() {
            missing.push("queue");
        }
        if self.notifier.is_none() {
            missing.push("notifier");
        }
        if self.account_id.is_none() {
            missing.push("account_id");
        }

        match (
            self.directory,
            self.staleness,
            self.queue,
            self.notifier,
            self.account_id,
        ) {
            (Some(directory), Some(staleness), Some(queue), Some(notifier), Some(account_id)) => {
                let id_generator: Arc<dyn RunIdGenerator> = match self.id_generator {
                    Some(id_generator) => id_generator,
                    None => Arc::new(UlidGenerator::new(SystemClock)),
                };
                Ok(Dispatcher::new(
                    DirectoryWalker::new(directory, self.defaults),
                    staleness,
                    queue,
                    notifier,
                    id_generator,
                    account_id,
                ))
            }
            _ => Err(BuildError::MissingComponents(missing)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::staleness::CredentialAgePolicy;
    use crate::impls::{InMemoryDirectory, InMemoryRequestQueue, RecordingNotifier};

    fn complete() -> AppBuilder {
        let directory = Arc::new(InMemoryDirectory::new());
        AppBuilder::new()
            .directory(directory.clone())
            .staleness(Arc::new(CredentialAgePolicy::new(
                directory,
                Arc::new(SystemClock),
            )))
            .queue(Arc::new(InMemoryRequestQueue::new()))
            .notifier(Arc::new(RecordingNotifier::new()))
            .account_id("123456789012")
    }

    #[test]
    fn test_build_success() {
        let dispatcher = complete().build();
        assert!(dispatcher.is_ok());
        assert_eq!(dispatcher.unwrap().account_id(), "123456789012");
    }

    #[test]
    fn test_build_missing_components() {
        let built = AppBuilder::new()
            .queue(Arc::new(InMemoryRequestQueue::new()))
            .build();
        assert!(matches!(
            built,
            Err(BuildError::MissingComponents(missing))
                if missing == vec!["directory", "staleness", "notifier", "account_id"]
        ));
    }

    #[tokio::test]
    async fn test_built_dispatcher_runs_on_empty_directory() {
        let report = complete().build().unwrap().run().await.unwrap();
        assert_eq!(report.candidates, 0);
        assert_eq!(report.published, 0);
    }
}
