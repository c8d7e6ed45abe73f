//! Request identity types.

/// Identity resolved for a request by the soft check.
///
/// `Anonymous` covers both "no cookie" and "cookie failed verification";
/// downstream handlers never learn why a request is anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestIdentity {
    Anonymous,
    Authenticated { user_uuid: String },
}

impl RequestIdentity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, RequestIdentity::Authenticated { .. })
    }

    pub fn user_uuid(&self) -> Option<&str> {
        match self {
            RequestIdentity::Authenticated { user_uuid } => Some(user_uuid),
            RequestIdentity::Anonymous => None,
        }
    }
}

/// Verified identity attached by the hard gate.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Public identifier of the session's subject.
    pub user_uuid: String,
}
