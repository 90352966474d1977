//! Directory entries.

/// One user account as listed by the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserSummary {
    pub user_name: String,
}

impl UserSummary {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
        }
    }
}
