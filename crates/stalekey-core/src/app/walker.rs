//! DirectoryWalker - ユーザー一覧を辿ってローテーション依頼を組み立てる
//!
//! # ページングの規則
//! - 1 ページ処理するたびに truncation flag を確認する
//! - flag が `Some(true)` のときだけ次のページへ進む（`None` / `false` なら終了）
//! - 中身が空のページでも flag が立っていれば続ける
//! - 再帰ではなく marker を持ち回るループで辿る

use std::sync::Arc;

use crate::domain::{
    Page, PolicyDefaults, RefreshCredentialRequest, ResolveError, UpstreamError, UserTags,
};
use crate::ports::UserDirectory;

pub struct DirectoryWalker {
    directory: Arc<dyn UserDirectory>,
    defaults: PolicyDefaults,
}

impl DirectoryWalker {
    pub fn new(directory: Arc<dyn UserDirectory>, defaults: PolicyDefaults) -> Self {
        Self {
            directory,
            defaults,
        }
    }

    pub fn defaults(&self) -> &PolicyDefaults {
        &self.defaults
    }

    /// ユーザーのタグから `tag_key` の値を探す
    ///
    /// 見つかった時点で打ち切る。全ページ見ても無ければ `None`。
    pub async fn find_user_tag(
        &self,
        user_name: &str,
        tag_key: &str,
    ) -> Result<Option<String>, UpstreamError> {
        let mut marker: Option<String> = None;
        loop {
            let page = self
                .directory
                .list_user_tags(user_name, marker.as_deref())
                .await?;
            let next = next_marker(&page, "list_user_tags")?;
            if let Some(tag) = page.items.into_iter().find(|t| t.key == tag_key) {
                return Ok(Some(tag.value));
            }
            match next {
                Some(m) => marker = Some(m),
                None => return Ok(None),
            }
        }
    }

    /// ユーザーの全タグページを 1 つの表にまとめる
    pub async fn user_tags(&self, user_name: &str) -> Result<UserTags, UpstreamError> {
        let mut tags = UserTags::new();
        let mut marker: Option<String> = None;
        loop {
            let page = self
                .directory
                .list_user_tags(user_name, marker.as_deref())
                .await?;
            let next = next_marker(&page, "list_user_tags")?;
            for tag in page.items {
                tags.insert(tag);
            }
            match next {
                Some(m) => marker = Some(m),
                None => return Ok(tags),
            }
        }
    }

    /// ディレクトリ全体を辿り、Email タグを持つユーザーごとに依頼を作る
    ///
    /// 順序はディレクトリのページ順のまま。
    pub async fn resolve_requests(&self) -> Result<Vec<RefreshCredentialRequest>, ResolveError> {
        let mut requests = Vec::new();
        let mut marker: Option<String> = None;
        let mut page_no = 0usize;
        loop {
            let page = self.directory.list_users(marker.as_deref()).await?;
            let next = next_marker(&page, "list_users")?;
            page_no += 1;
            tracing::debug!(page = page_no, users = page.items.len(), "listed users");

            for user in page.items {
                let tags = self.user_tags(&user.user_name).await?;
                match self.defaults.resolve(&user.user_name, &tags)? {
                    Some(request) => requests.push(request),
                    None => {
                        tracing::debug!(user = %user.user_name, "no email tag, skipping");
                    }
                }
            }

            match next {
                Some(m) => marker = Some(m),
                None => return Ok(requests),
            }
        }
    }
}

/// 次のページの marker。続きが無ければ `None`。
///
/// flag が立っているのに marker が無いページは同じページを取り直すことになるのでエラー。
fn next_marker<T>(page: &Page<T>, operation: &str) -> Result<Option<String>, UpstreamError> {
    if !page.has_more() {
        return Ok(None);
    }
    page.marker.clone().map(Some).ok_or_else(|| {
        UpstreamError::new(
            "directory",
            format!("{operation} returned a truncated page without a marker"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigurationError, Tag, TagKey, UserSummary};
    use crate::impls::InMemoryDirectory;

    fn email(value: &str) -> Tag {
        Tag::new(TagKey::Email.as_str(), value)
    }

    fn users(names: &[&str]) -> Vec<UserSummary> {
        names.iter().map(|n| UserSummary::new(*n)).collect()
    }

    fn walker(dir: InMemoryDirectory) -> (Arc<InMemoryDirectory>, DirectoryWalker) {
        let dir = Arc::new(dir);
        let walker = DirectoryWalker::new(dir.clone(), PolicyDefaults::new(Some(30), Some(90)));
        (dir, walker)
    }

    #[tokio::test]
    async fn resolves_every_page_in_order() {
        let mut dir = InMemoryDirectory::new().with_user_pages(vec![
            users(&["u1", "u2"]),
            users(&["u3", "u4"]),
            users(&["u5"]),
        ]);
        for n in ["u1", "u2", "u3", "u4", "u5"] {
            dir = dir.with_tags(n, vec![email(&format!("{n}@x.com"))]);
        }
        let (dir, walker) = walker(dir);

        let requests = walker.resolve_requests().await.unwrap();
        let names: Vec<&str> = requests.iter().map(|r| r.user_name()).collect();
        assert_eq!(names, vec!["u1", "u2", "u3", "u4", "u5"]);
        assert_eq!(
            dir.user_calls().await,
            vec![None, Some("users-1".to_string()), Some("users-2".to_string())]
        );
    }

    #[tokio::test]
    async fn users_without_email_produce_no_request() {
        let dir = InMemoryDirectory::new()
            .with_user_pages(vec![users(&["alice", "bob"])])
            .with_tags("alice", vec![email("a@x.com")])
            .with_tags(
                "bob",
                vec![Tag::new(TagKey::CliTimeLimit.as_str(), "10")],
            );
        let (_, walker) = walker(dir);

        let requests = walker.resolve_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].user_name(), "alice");
    }

    #[tokio::test]
    async fn alice_gets_environment_defaults() {
        let dir = InMemoryDirectory::new()
            .with_user_pages(vec![users(&["alice"])])
            .with_tags("alice", vec![email("a@x.com")]);
        let (_, walker) = walker(dir);

        let requests = walker.resolve_requests().await.unwrap();
        assert_eq!(
            requests,
            vec![RefreshCredentialRequest::new("alice", "a@x.com", 30, 90).unwrap()]
        );
    }

    #[tokio::test]
    async fn tags_spread_over_pages_are_all_seen() {
        let dir = InMemoryDirectory::new()
            .with_user_pages(vec![users(&["alice"])])
            .with_tag_pages(
                "alice",
                vec![
                    vec![Tag::new(TagKey::CliTimeLimit.as_str(), "7")],
                    vec![],
                    vec![email("a@x.com")],
                ],
            );
        let (dir, walker) = walker(dir);

        let requests = walker.resolve_requests().await.unwrap();
        assert_eq!(requests[0].cli_time_limit(), 7);
        assert_eq!(requests[0].login_profile_time_limit(), 90);
        assert_eq!(dir.tag_calls_for("alice").await, 3);
    }

    #[tokio::test]
    async fn missing_default_fails_before_any_request() {
        let dir = InMemoryDirectory::new()
            .with_user_pages(vec![users(&["alice"])])
            .with_tags("alice", vec![email("a@x.com")]);
        let walker = DirectoryWalker::new(Arc::new(dir), PolicyDefaults::new(None, Some(90)));

        let err = walker.resolve_requests().await.unwrap_err();
        assert_eq!(
            err,
            ResolveError::Configuration(ConfigurationError::MissingTimeLimit {
                user_name: "alice".into(),
                tag_key: TagKey::CliTimeLimit.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn find_user_tag_skips_empty_truncated_page() {
        let dir = InMemoryDirectory::new()
            .with_tag_pages("alice", vec![vec![], vec![email("a@x.com")]]);
        let (dir, walker) = walker(dir);

        let found = walker
            .find_user_tag("alice", TagKey::Email.as_str())
            .await
            .unwrap();
        assert_eq!(found.as_deref(), Some("a@x.com"));
        assert_eq!(dir.tag_calls_for("alice").await, 2);
    }

    #[tokio::test]
    async fn find_user_tag_stops_at_first_match() {
        let dir = InMemoryDirectory::new().with_tag_pages(
            "alice",
            vec![vec![email("first@x.com")], vec![email("second@x.com")]],
        );
        let (dir, walker) = walker(dir);

        let found = walker
            .find_user_tag("alice", TagKey::Email.as_str())
            .await
            .unwrap();
        assert_eq!(found.as_deref(), Some("first@x.com"));
        assert_eq!(dir.tag_calls_for("alice").await, 1);
    }

    #[tokio::test]
    async fn find_user_tag_returns_none_after_last_page() {
        let dir = InMemoryDirectory::new().with_tag_pages(
            "alice",
            vec![vec![Tag::new("team", "infra")], vec![Tag::new("cost", "42")]],
        );
        let (dir, walker) = walker(dir);

        let found = walker
            .find_user_tag("alice", TagKey::Email.as_str())
            .await
            .unwrap();
        assert_eq!(found, None);
        assert_eq!(dir.tag_calls_for("alice").await, 2);
    }

    #[tokio::test]
    async fn absent_truncation_flag_ends_pagination() {
        let dir = InMemoryDirectory::new().with_raw_tag_pages(
            "alice",
            vec![
                Page {
                    items: vec![],
                    is_truncated: None,
                    marker: Some("next".into()),
                },
                Page::last(vec![email("a@x.com")]),
            ],
        );
        let (dir, walker) = walker(dir);

        let found = walker
            .find_user_tag("alice", TagKey::Email.as_str())
            .await
            .unwrap();
        assert_eq!(found, None);
        assert_eq!(dir.tag_calls_for("alice").await, 1);
    }

    #[tokio::test]
    async fn truncated_page_without_marker_is_an_error() {
        let dir = InMemoryDirectory::new().with_raw_user_pages(vec![Page {
            items: users(&["alice"]),
            is_truncated: Some(true),
            marker: None,
        }]);
        let (_, walker) = walker(dir);

        let err = walker.resolve_requests().await.unwrap_err();
        assert!(matches!(err, ResolveError::Upstream(_)));
    }

    #[tokio::test]
    async fn empty_directory_yields_nothing() {
        let (_, walker) = walker(InMemoryDirectory::new());
        assert!(walker.resolve_requests().await.unwrap().is_empty());
    }
}
