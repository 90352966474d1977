//! stalekey-aws
//!
//! `stalekey-core` の ports を AWS SDK で実装する本番用アダプタ。
//!
//! - **IamDirectory**: UserDirectory + CredentialInventory（IAM）
//! - **SqsRequestQueue**: RequestQueue（SQS）
//! - **SnsNotifier**: Notifier（SNS）
//! - **resolve_account_id**: 通知に載せるアカウント ID（STS）

pub mod config;
pub mod iam;
pub mod sns;
pub mod sqs;
pub mod sts;

mod convert;

pub use self::config::{AwsSettings, load_sdk_config};
pub use self::iam::IamDirectory;
pub use self::sns::SnsNotifier;
pub use self::sqs::SqsRequestQueue;
pub use self::sts::resolve_account_id;
