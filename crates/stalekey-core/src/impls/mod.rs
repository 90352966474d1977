//! Impls - 実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryDirectory**: ページを固定で返すディレクトリ（+ 資格情報メタデータ）
//! - **InMemoryRequestQueue**: 本文を保持するだけの送信先
//! - **RecordingNotifier**: 通知を記録する Notifier
//!
//! # 本番用実装
//! AWS 向けの実装は `stalekey-aws` クレートに配置します。

pub mod inmem_directory;
pub mod inmem_queue;
pub mod recording_notifier;

// 主要な型を再エクスポート
pub use self::inmem_directory::InMemoryDirectory;
pub use self::inmem_queue::InMemoryRequestQueue;
pub use self::recording_notifier::{Notification, RecordingNotifier};
