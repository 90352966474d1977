//! Policy - タグ上書きと環境デフォルトから依頼を組み立てる
//!
//! I/O を持たない純粋な解決ロジック。タグの取得は `app::walker` が行う。

use super::errors::ConfigurationError;
use super::request::RefreshCredentialRequest;
use super::tags::{TagKey, UserTags};

/// タグが無いときに使う環境レベルのデフォルト（日数）
///
/// どちらも未設定でありうる。未設定が問題になるのは、タグも無いユーザーに
/// 出会ったときだけ。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyDefaults {
    pub cli_time_limit: Option<u32>,
    pub login_profile_time_limit: Option<u32>,
}

impl PolicyDefaults {
    pub fn new(cli_time_limit: Option<u32>, login_profile_time_limit: Option<u32>) -> Self {
        Self {
            cli_time_limit,
            login_profile_time_limit,
        }
    }

    fn default_for(&self, key: TagKey) -> Option<u32> {
        match key {
            TagKey::CliTimeLimit => self.cli_time_limit,
            TagKey::LoginProfileTimeLimit => self.login_profile_time_limit,
            TagKey::Email => None,
        }
    }

    /// 1 ユーザー分の依頼を解決する
    ///
    /// # 戻り値
    /// - `Ok(None)`: Email タグが無い（または空）ので対象外
    /// - `Ok(Some(_))`: 依頼を構築できた
    /// - `Err(_)`: 時間制限がタグからもデフォルトからも決まらない、または数値でない
    pub fn resolve(
        &self,
        user_name: &str,
        tags: &UserTags,
    ) -> Result<Option<RefreshCredentialRequest>, ConfigurationError> {
        let Some(email) = tags.non_blank(TagKey::Email) else {
            return Ok(None);
        };
        let cli_time_limit = self.time_limit(user_name, tags, TagKey::CliTimeLimit)?;
        let login_profile_time_limit =
            self.time_limit(user_name, tags, TagKey::LoginProfileTimeLimit)?;
        RefreshCredentialRequest::new(user_name, email, cli_time_limit, login_profile_time_limit)
            .map(Some)
    }

    fn time_limit(
        &self,
        user_name: &str,
        tags: &UserTags,
        key: TagKey,
    ) -> Result<u32, ConfigurationError> {
        match tags.non_blank(key) {
            Some(raw) => {
                raw.trim()
                    .parse::<u32>()
                    .map_err(|_| ConfigurationError::InvalidTimeLimit {
                        user_name: user_name.to_string(),
                        tag_key: key.to_string(),
                        value: raw.to_string(),
                    })
            }
            None => self
                .default_for(key)
                .ok_or_else(|| ConfigurationError::MissingTimeLimit {
                    user_name: user_name.to_string(),
                    tag_key: key.to_string(),
                }),
        }
    }
}
