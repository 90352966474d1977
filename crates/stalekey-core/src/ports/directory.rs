//! UserDirectory port - ユーザー一覧とタグ一覧（ページング API）
//!
//! # 実装
//! - `stalekey-aws::IamDirectory`（本番用）
//! - `impls::InMemoryDirectory`（テスト・ローカル用）

use async_trait::async_trait;

use crate::domain::{Page, Tag, UpstreamError, UserSummary};

/// ディレクトリサービス
///
/// どちらのメソッドも 1 ページだけ返す。`marker` が `None` なら先頭ページ。
/// ページを辿るのは呼び出し側（`app::walker`）の責務。
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self, marker: Option<&str>) -> Result<Page<UserSummary>, UpstreamError>;

    async fn list_user_tags(
        &self,
        user_name: &str,
        marker: Option<&str>,
    ) -> Result<Page<Tag>, UpstreamError>;
}
