//! State trait required by the auth extractors.

use crate::jwt::JwtConfig;

/// Router state that can verify session tokens.
pub trait HasSessionAuth {
    fn jwt(&self) -> &JwtConfig;
}
