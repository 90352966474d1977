//! stalekey-core
//!
//! IAM ユーザーを走査し、資格情報が古いユーザーごとにローテーション依頼を
//! キューへ送るための中核部分。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（request, tags, policy, page, credential, ids, errors）
//! - **ports**: 抽象化レイヤー（UserDirectory, CredentialInventory, RequestQueue, Notifier, StalenessCheck, Clock）
//! - **app**: アプリケーションロジック（builder, walker, staleness, dispatcher）
//! - **impls**: インメモリ実装（テスト・ローカル実行用）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
