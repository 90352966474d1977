//! Domain model (requests, tags, policy, credential metadata, ...).

pub mod credential;
pub mod errors;
pub mod ids;
pub mod page;
pub mod policy;
pub mod request;
pub mod tags;
pub mod user;

pub use self::credential::{AccessKeyInfo, KeyStatus, LoginProfileInfo};
pub use self::errors::{ConfigurationError, ErrorKind, ResolveError, RunError, UpstreamError};
pub use self::ids::RunId;
pub use self::page::Page;
pub use self::policy::PolicyDefaults;
pub use self::request::RefreshCredentialRequest;
pub use self::tags::{Tag, TagKey, UserTags};
pub use self::user::UserSummary;
