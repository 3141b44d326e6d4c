use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity of an account, as supplied by the authentication layer.
///
/// Never taken from a request payload. Always non-empty and stored exactly
/// as given; ids with surrounding whitespace are rejected, not rewritten.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid user id: {0:?}")]
pub struct InvalidUserId(pub String);

impl TryFrom<String> for UserId {
    type Error = InvalidUserId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        if raw.is_empty() || raw.trim().len() != raw.len() {
            return Err(InvalidUserId(raw));
        }
        Ok(Self(raw))
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl UserId {
    /// Wraps a raw identifier, returning `None` if it is empty or padded.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        Self::try_from(raw.into()).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The caller of a likes operation.
///
/// Passed explicitly into every service call instead of being read from
/// ambient session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    User(UserId),
}

impl Identity {
    /// Builds an identity from an optional raw id; invalid ids are anonymous.
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.and_then(UserId::new)
            .map(Identity::User)
            .unwrap_or(Identity::Anonymous)
    }

    pub fn user(raw: impl Into<String>) -> Self {
        UserId::new(raw).map(Identity::User).unwrap_or(Identity::Anonymous)
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Identity::User(id) => Some(id),
            Identity::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id().is_some()
    }
}
