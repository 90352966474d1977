//! Errors - エラー型と分類
//!
//! 実行を止めるエラーは 2 系統:
//! - 設定不備（タグにもデフォルトにも値がない）
//! - 外部サービス（IAM / SQS / SNS）の失敗
//!
//! どちらも個別に回復せず、Dispatcher の境界まで伝播させる。

use thiserror::Error;

/// ErrorKind は実行エラーの分類
///
/// - Configuration: タグ・環境変数の不備（再実行しても直らない）
/// - Upstream: 外部サービスの失敗（次回のスケジュール実行で回復しうる）
/// - Encoding: リクエストの JSON 化に失敗
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Upstream,
    Encoding,
}

/// 時間制限やメールアドレスが解決できなかった
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no value for {tag_key} on user {user_name} and no default configured")]
    MissingTimeLimit { user_name: String, tag_key: String },

    #[error("invalid value {value:?} for {tag_key} on user {user_name}: expected a whole number of days")]
    InvalidTimeLimit {
        user_name: String,
        tag_key: String,
        value: String,
    },

    #[error("empty email for user {user_name}")]
    MissingEmail { user_name: String },
}

/// 外部サービス呼び出しの失敗
///
/// SDK 固有のエラー型は adapter 側で文字列に落とす（core は SDK に依存しない）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{service} call failed: {message}")]
pub struct UpstreamError {
    pub service: &'static str,
    pub message: String,
}

impl UpstreamError {
    pub fn new(service: &'static str, message: impl Into<String>) -> Self {
        Self {
            service,
            message: message.into(),
        }
    }
}

/// Walker がリクエストを組み立てる間に起きるエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::Configuration(_) => ErrorKind::Configuration,
            ResolveError::Upstream(_) => ErrorKind::Upstream,
        }
    }
}

/// Dispatcher の 1 回の実行を中断させたエラー
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to resolve refresh requests: {0}")]
    Resolve(#[from] ResolveError),

    #[error("staleness check failed for user {user_name}: {source}")]
    Staleness {
        user_name: String,
        #[source]
        source: UpstreamError,
    },

    #[error("failed to encode request for user {user_name}: {source}")]
    Encode {
        user_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to publish request for user {user_name}: {source}")]
    Publish {
        user_name: String,
        #[source]
        source: UpstreamError,
    },
}

impl RunError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::Resolve(e) => e.kind(),
            RunError::Staleness { .. } | RunError::Publish { .. } => ErrorKind::Upstream,
            RunError::Encode { .. } => ErrorKind::Encoding,
        }
    }
}
