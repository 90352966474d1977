//! CredentialAgePolicy - 作成からの経過日数で鮮度を判定する
//!
//! - 有効な access key のどれかが `cli_time_limit` 日を超えていれば古い
//! - login profile があり、`login_profile_time_limit` 日を超えていれば古い
//! - 無効化済みの key、パスワードを持たないユーザーは判定に影響しない

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{RefreshCredentialRequest, UpstreamError};
use crate::ports::{Clock, CredentialInventory, StalenessCheck};

pub struct CredentialAgePolicy {
    inventory: Arc<dyn CredentialInventory>,
    clock: Arc<dyn Clock>,
}

impl CredentialAgePolicy {
    pub fn new(inventory: Arc<dyn CredentialInventory>, clock: Arc<dyn Clock>) -> Self {
        Self { inventory, clock }
    }
}

#[async_trait]
impl StalenessCheck for CredentialAgePolicy {
    async fn is_obsolete(
        &self,
        request: &RefreshCredentialRequest,
    ) -> Result<bool, UpstreamError> {
        let now = self.clock.now();
        let user = request.user_name();

        let keys = self.inventory.access_keys(user).await?;
        let limit = i64::from(request.cli_time_limit());
        if let Some(key) = keys
            .iter()
            .filter(|k| k.is_active())
            .find(|k| k.age_days(now) > limit)
        {
            tracing::info!(
                user,
                access_key_id = %key.access_key_id,
                age_days = key.age_days(now),
                limit_days = limit,
                "access key is older than its limit"
            );
            return Ok(true);
        }

        if let Some(profile) = self.inventory.login_profile(user).await? {
            let limit = i64::from(request.login_profile_time_limit());
            if profile.age_days(now) > limit {
                tracing::info!(
                    user,
                    age_days = profile.age_days(now),
                    limit_days = limit,
                    "login profile is older than its limit"
                );
                return Ok(true);
            }
        }

        Ok(false)
    }
}
