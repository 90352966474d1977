//! RefreshCredentialRequest - キューに流すローテーション依頼
//!
//! 1 回のスキャンで作られ、変更されず、破棄されるか JSON にしてキューに渡される。

use serde::{Deserialize, Serialize};

use super::errors::ConfigurationError;

/// 1 ユーザー分のローテーション依頼
///
/// # 不変条件
/// - `email` は空でない
/// - 時間制限は両方とも具体的な整数（日数）に解決済み
///
/// フィールドは非公開にして、`new` を通らない構築を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshCredentialRequest {
    user_name: String,
    email: String,
    cli_time_limit: u32,
    login_profile_time_limit: u32,
}

impl RefreshCredentialRequest {
    pub fn new(
        user_name: impl Into<String>,
        email: impl Into<String>,
        cli_time_limit: u32,
        login_profile_time_limit: u32,
    ) -> Result<Self, ConfigurationError> {
        let user_name = user_name.into();
        let email = email.into();
        if email.trim().is_empty() {
            return Err(ConfigurationError::MissingEmail { user_name });
        }
        Ok(Self {
            user_name,
            email,
            cli_time_limit,
            login_profile_time_limit,
        })
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Max age in days for access keys.
    pub fn cli_time_limit(&self) -> u32 {
        self.cli_time_limit
    }

    /// Max age in days for the console password.
    pub fn login_profile_time_limit(&self) -> u32 {
        self.login_profile_time_limit
    }

    /// キューに載せるメッセージ本文（4 フィールドの JSON オブジェクト）
    pub fn to_message_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_body_has_exactly_four_fields() {
        let request = RefreshCredentialRequest::new("alice", "a@x.com", 30, 90).unwrap();
        let body: serde_json::Value =
            serde_json::from_str(&request.to_message_body().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "user_name": "alice",
                "email": "a@x.com",
                "cli_time_limit": 30,
                "login_profile_time_limit": 90,
            })
        );
    }

    #[test]
    fn blank_email_is_rejected() {
        let err = RefreshCredentialRequest::new("bob", "  ", 30, 90).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingEmail {
                user_name: "bob".into()
            }
        );
    }
}
