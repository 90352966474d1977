//! CredentialInventory port - ユーザーの資格情報メタデータ

use async_trait::async_trait;

use crate::domain::{AccessKeyInfo, LoginProfileInfo, UpstreamError};

/// 鮮度判定のための読み取り専用ビュー
#[async_trait]
pub trait CredentialInventory: Send + Sync {
    /// ユーザーの全 access key（状態を問わず）
    async fn access_keys(&self, user_name: &str) -> Result<Vec<AccessKeyInfo>, UpstreamError>;

    /// コンソールパスワードが無いユーザーは `None`
    async fn login_profile(
        &self,
        user_name: &str,
    ) -> Result<Option<LoginProfileInfo>, UpstreamError>;
}
