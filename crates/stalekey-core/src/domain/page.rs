//! Page - ページングされた一覧 API の 1 ページ

/// One page of a paginated directory call.
///
/// `is_truncated` はサービスが返さないこともあるので `Option` のまま持つ。
/// 続きがあるのは `Some(true)` のときだけ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub is_truncated: Option<bool>,
    pub marker: Option<String>,
}

impl<T> Page<T> {
    /// 最終ページ
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            is_truncated: Some(false),
            marker: None,
        }
    }

    /// 続きのあるページ
    pub fn truncated(items: Vec<T>, marker: impl Into<String>) -> Self {
        Self {
            items,
            is_truncated: Some(true),
            marker: Some(marker.into()),
        }
    }

    pub fn has_more(&self) -> bool {
        self.is_truncated == Some(true)
    }
}
