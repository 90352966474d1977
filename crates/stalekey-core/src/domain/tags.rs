//! Tags - ユーザーに付いたポリシー上書き
//!
//! IAM のタグはユーザー内でキーが一意なので、1 ユーザーにつき 1 回だけ
//! 全ページを読み、`UserTags` に詰めてから 3 つのキーを引く。

use std::collections::HashMap;
use std::fmt;

/// A key/value annotation attached to a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// このツールが読むタグキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKey {
    Email,
    CliTimeLimit,
    LoginProfileTimeLimit,
}

impl TagKey {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TagKey::Email => "IamRotateCredentials:Email",
            TagKey::CliTimeLimit => "IamRotateCredentials:CliTimeLimit",
            TagKey::LoginProfileTimeLimit => "IamRotateCredentials:LoginProfileTimeLimit",
        }
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1 ユーザー分のタグ表（key -> value）
///
/// 同じキーが複数ページに現れた場合は最初の値を残す（`find_user_tag` と同じ結果になる）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserTags {
    values: HashMap<String, String>,
}

impl UserTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: Tag) {
        self.values.entry(tag.key).or_insert(tag.value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// 値が空白だけのタグは「無い」ものとして扱う
    pub fn non_blank(&self, key: TagKey) -> Option<&str> {
        self.get(key.as_str()).filter(|v| !v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Tag> for UserTags {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut tags = UserTags::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}
