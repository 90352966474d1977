//! Credential metadata - 鮮度判定に使う資格情報の情報
//!
//! 値そのもの（シークレット）は扱わない。作成日時と状態だけを持つ。

use chrono::{DateTime, Utc};

/// Access key status as reported by the identity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Active,
    Inactive,
}

/// CLI 用 access key のメタデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKeyInfo {
    pub access_key_id: String,
    pub status: KeyStatus,
    pub created_at: DateTime<Utc>,
}

impl AccessKeyInfo {
    pub fn is_active(&self) -> bool {
        self.status == KeyStatus::Active
    }

    /// 経過日数（端数切り捨て）
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days()
    }
}

/// コンソールログイン用パスワード（login profile）のメタデータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginProfileInfo {
    pub created_at: DateTime<Utc>,
}

impl LoginProfileInfo {
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn age_is_truncated_to_whole_days() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let key = AccessKeyInfo {
            access_key_id: "AKIA1".into(),
            status: KeyStatus::Active,
            created_at: now - Duration::hours(47),
        };
        assert_eq!(key.age_days(now), 1);
        assert!(key.is_active());
    }
}
