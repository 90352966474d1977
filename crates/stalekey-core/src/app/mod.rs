//! App - アプリケーション層
//!
//! ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: 部品のワイヤリングと起動時検証
//! - **DirectoryWalker**: ユーザー一覧・タグのページングと依頼の解決
//! - **CredentialAgePolicy**: 既定の鮮度判定
//! - **Dispatcher**: 解決 → 判定 → 送信の順序付けと失敗時の通知

pub mod builder;
pub mod dispatcher;
pub mod staleness;
pub mod walker;

// 主要な型を再エクスポート
pub use self::builder::{AppBuilder, BuildError};
pub use self::dispatcher::{Dispatcher, RunReport};
pub use self::staleness::CredentialAgePolicy;
pub use self::walker::DirectoryWalker;
