//! InMemoryDirectory - 開発・テスト用のディレクトリ
//!
//! ページはそのまま保持し、`marker` で次のページを引く。
//! marker `m` を受け取ったら「marker が `m` のページの次」を返す（IAM と同じ振る舞い）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    AccessKeyInfo, LoginProfileInfo, Page, Tag, UpstreamError, UserSummary,
};
use crate::ports::{CredentialInventory, UserDirectory};

const SERVICE: &str = "in-memory directory";

/// InMemoryDirectory は UserDirectory と CredentialInventory の両方を提供
///
/// # 使用例
/// ```ignore
/// let dir = InMemoryDirectory::new()
///     .with_user_pages(vec![vec![UserSummary::new("alice")], vec![UserSummary::new("bob")]])
///     .with_tags("alice", vec![Tag::new("IamRotateCredentials:Email", "a@x.com")]);
/// ```
#[derive(Default)]
pub struct InMemoryDirectory {
    user_pages: Vec<Page<UserSummary>>,
    tag_pages: HashMap<String, Vec<Page<Tag>>>,
    access_keys: HashMap<String, Vec<AccessKeyInfo>>,
    login_profiles: HashMap<String, LoginProfileInfo>,
    /// (user_name, marker) ごとの list_user_tags 呼び出し履歴
    tag_calls: Mutex<Vec<(String, Option<String>)>>,
    user_calls: Mutex<Vec<Option<String>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// ユーザー一覧をページ単位で設定（marker は `users-{n}` を自動付与）
    pub fn with_user_pages(mut self, pages: Vec<Vec<UserSummary>>) -> Self {
        self.user_pages = chain_pages(pages, "users");
        self
    }

    /// 生のページをそのまま設定（truncation flag の欠落などを再現するため）
    pub fn with_raw_user_pages(mut self, pages: Vec<Page<UserSummary>>) -> Self {
        self.user_pages = pages;
        self
    }

    /// 1 ページに収まるタグを設定
    pub fn with_tags(self, user_name: &str, tags: Vec<Tag>) -> Self {
        self.with_tag_pages(user_name, vec![tags])
    }

    pub fn with_tag_pages(mut self, user_name: &str, pages: Vec<Vec<Tag>>) -> Self {
        let prefix = format!("tags-{user_name}");
        self.tag_pages
            .insert(user_name.to_string(), chain_pages(pages, &prefix));
        self
    }

    pub fn with_raw_tag_pages(mut self, user_name: &str, pages: Vec<Page<Tag>>) -> Self {
        self.tag_pages.insert(user_name.to_string(), pages);
        self
    }

    pub fn with_access_key(mut self, user_name: &str, key: AccessKeyInfo) -> Self {
        self.access_keys
            .entry(user_name.to_string())
            .or_default()
            .push(key);
        self
    }

    pub fn with_login_profile(mut self, user_name: &str, profile: LoginProfileInfo) -> Self {
        self.login_profiles.insert(user_name.to_string(), profile);
        self
    }

    /// list_user_tags が呼ばれた回数（ユーザー単位）
    pub async fn tag_calls_for(&self, user_name: &str) -> usize {
        self.tag_calls
            .lock()
            .await
            .iter()
            .filter(|(u, _)| u == user_name)
            .count()
    }

    /// list_users に渡された marker の履歴
    pub async fn user_calls(&self) -> Vec<Option<String>> {
        self.user_calls.lock().await.clone()
    }
}

/// チャンクを marker でつないだページ列にする（最後のページだけ truncated = false）
fn chain_pages<T>(chunks: Vec<Vec<T>>, prefix: &str) -> Vec<Page<T>> {
    let count = chunks.len();
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, items)| {
            if i + 1 < count {
                Page::truncated(items, format!("{prefix}-{}", i + 1))
            } else {
                Page::last(items)
            }
        })
        .collect()
}

/// marker の次のページを探す。marker が None なら先頭ページ。
fn page_after<T: Clone>(pages: &[Page<T>], marker: Option<&str>) -> Result<Page<T>, UpstreamError> {
    let index = match marker {
        None => 0,
        Some(m) => {
            let pos = pages
                .iter()
                .position(|p| p.marker.as_deref() == Some(m))
                .ok_or_else(|| UpstreamError::new(SERVICE, format!("unknown marker {m}")))?;
            pos + 1
        }
    };
    Ok(pages
        .get(index)
        .cloned()
        .unwrap_or_else(|| Page::last(Vec::new())))
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn list_users(&self, marker: Option<&str>) -> Result<Page<UserSummary>, UpstreamError> {
        self.user_calls.lock().await.push(marker.map(str::to_string));
        page_after(&self.user_pages, marker)
    }

    async fn list_user_tags(
        &self,
        user_name: &str,
        marker: Option<&str>,
    ) -> Result<Page<Tag>, UpstreamError> {
        self.tag_calls
            .lock()
            .await
            .push((user_name.to_string(), marker.map(str::to_string)));
        match self.tag_pages.get(user_name) {
            Some(pages) => page_after(pages, marker),
            None => Ok(Page::last(Vec::new())),
        }
    }
}

#[async_trait]
impl CredentialInventory for InMemoryDirectory {
    async fn access_keys(&self, user_name: &str) -> Result<Vec<AccessKeyInfo>, UpstreamError> {
        Ok(self.access_keys.get(user_name).cloned().unwrap_or_default())
    }

    async fn login_profile(
        &self,
        user_name: &str,
    ) -> Result<Option<LoginProfileInfo>, UpstreamError> {
        Ok(self.login_profiles.get(user_name).copied())
    }
}
