//! Ports - 抽象化レイヤー
//!
//! 外部サービス（IAM, SQS, SNS）へのインターフェースを trait として定義します。
//! 実装は `impls`（インメモリ）と `stalekey-aws` クレート（本番用）にあります。
//! Walker / Dispatcher はコンストラクタでこれらを受け取り、グローバルな
//! クライアントは持ちません。

pub mod clock;
pub mod credential_inventory;
pub mod directory;
pub mod id_generator;
pub mod notifier;
pub mod request_queue;
pub mod staleness;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::credential_inventory::CredentialInventory;
pub use self::directory::UserDirectory;
pub use self::id_generator::{RunIdGenerator, UlidGenerator};
pub use self::notifier::{Notifier, Severity};
pub use self::request_queue::RequestQueue;
pub use self::staleness::StalenessCheck;
