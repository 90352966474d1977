//! StalenessCheck port - 資格情報が古いかどうかの判定
//!
//! Dispatcher はこの trait だけに依存する。既定の実装は
//! `app::staleness::CredentialAgePolicy`。

use async_trait::async_trait;

use crate::domain::{RefreshCredentialRequest, UpstreamError};

/// 解決済みの依頼に対し、どちらかの時間制限を超えていれば `true`
///
/// Walker から見て副作用を持たないこと。
#[async_trait]
pub trait StalenessCheck: Send + Sync {
    async fn is_obsolete(&self, request: &RefreshCredentialRequest)
    -> Result<bool, UpstreamError>;
}
