//! IamDirectory - IAM を UserDirectory / CredentialInventory として使う
//!
//! ListUsers / ListUserTags は 1 ページずつ返し、ページを辿るのは walker に任せる。
//! ListAccessKeys は鮮度判定側から見て 1 回の問い合わせなので、ここで全ページ読む。

use async_trait::async_trait;
use aws_sdk_iam::Client;
use aws_sdk_iam::primitives::DateTime as SdkDateTime;
use aws_sdk_iam::types::{LoginProfile, StatusType};
use stalekey_core::domain::{
    AccessKeyInfo, KeyStatus, LoginProfileInfo, Page, Tag, UpstreamError, UserSummary,
};
use stalekey_core::ports::{CredentialInventory, UserDirectory};

use crate::convert::{to_chrono, upstream};

const SERVICE: &str = "iam";

#[derive(Clone)]
pub struct IamDirectory {
    client: Client,
}

impl IamDirectory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl UserDirectory for IamDirectory {
    async fn list_users(&self, marker: Option<&str>) -> Result<Page<UserSummary>, UpstreamError> {
        let output = self
            .client
            .list_users()
            .set_marker(marker.map(str::to_string))
            .send()
            .await
            .map_err(|e| upstream(SERVICE, e))?;

        Ok(Page {
            items: output
                .users()
                .iter()
                .map(|u| UserSummary::new(u.user_name()))
                .collect(),
            is_truncated: Option::from(output.is_truncated()),
            marker: output.marker().map(str::to_string),
        })
    }

    async fn list_user_tags(
        &self,
        user_name: &str,
        marker: Option<&str>,
    ) -> Result<Page<Tag>, UpstreamError> {
        let output = self
            .client
            .list_user_tags()
            .user_name(user_name)
            .set_marker(marker.map(str::to_string))
            .send()
            .await
            .map_err(|e| upstream(SERVICE, e))?;

        Ok(Page {
            items: output
                .tags()
                .iter()
                .map(|t| Tag::new(t.key(), t.value()))
                .collect(),
            is_truncated: Option::from(output.is_truncated()),
            marker: output.marker().map(str::to_string),
        })
    }
}

#[async_trait]
impl CredentialInventory for IamDirectory {
    async fn access_keys(&self, user_name: &str) -> Result<Vec<AccessKeyInfo>, UpstreamError> {
        let mut keys = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let output = self
                .client
                .list_access_keys()
                .user_name(user_name)
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| upstream(SERVICE, e))?;

            for meta in output.access_key_metadata() {
                // 作成日時の無いメタデータは判定できないので飛ばす
                let Some(created) = meta.create_date() else {
                    tracing::warn!(user = user_name, "access key without create date");
                    continue;
                };
                let status = match meta.status() {
                    Some(StatusType::Active) => KeyStatus::Active,
                    _ => KeyStatus::Inactive,
                };
                keys.push(AccessKeyInfo {
                    access_key_id: meta.access_key_id().unwrap_or_default().to_string(),
                    status,
                    created_at: to_chrono(created)?,
                });
            }

            let truncated: Option<bool> = Option::from(output.is_truncated());
            match (truncated.unwrap_or(false), output.marker()) {
                (true, Some(next)) => marker = Some(next.to_string()),
                (true, None) => {
                    return Err(UpstreamError::new(
                        SERVICE,
                        "list_access_keys returned a truncated page without a marker",
                    ));
                }
                (false, _) => return Ok(keys),
            }
        }
    }

    async fn login_profile(
        &self,
        user_name: &str,
    ) -> Result<Option<LoginProfileInfo>, UpstreamError> {
        let result = self
            .client
            .get_login_profile()
            .user_name(user_name)
            .send()
            .await;

        match result {
            Ok(output) => {
                // SDK のバージョンによって必須メンバーが Option で来ることがある
                let profile: Option<&LoginProfile> = Option::from(output.login_profile());
                let Some(profile) = profile else {
                    return Ok(None);
                };
                let created: Option<&SdkDateTime> = Option::from(profile.create_date());
                match created {
                    Some(created) => Ok(Some(LoginProfileInfo {
                        created_at: to_chrono(created)?,
                    })),
                    None => Err(UpstreamError::new(
                        SERVICE,
                        format!("login profile of {user_name} has no create date"),
                    )),
                }
            }
            // パスワードを持たないユーザーは NoSuchEntity が返る
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_no_such_entity_exception()) =>
            {
                Ok(None)
            }
            Err(e) => Err(upstream(SERVICE, e)),
        }
    }
}
