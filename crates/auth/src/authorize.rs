use thiserror::Error;

use crate::{Permission, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{role}' lacks permission '{permission}'")]
    Forbidden { role: Role, permission: Permission },
}

/// Check that `role` holds `required`.
///
/// - No IO
/// - No panics
/// - Pure policy check
pub fn authorize(role: Role, required: Permission) -> Result<(), AuthzError> {
    if role.grants(required) {
        Ok(())
    } else {
        tracing::debug!(%role, permission = %required, "authorization denied");
        Err(AuthzError::Forbidden {
            role,
            permission: required,
        })
    }
}
