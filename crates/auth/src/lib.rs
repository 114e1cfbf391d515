//! `stockbot-auth` — static administrator allow-list and permission checks.
//!
//! This crate is intentionally decoupled from the chat transport and storage.

pub mod admins;
pub mod authorize;
pub mod permissions;
pub mod roles;

pub use admins::AdminList;
pub use authorize::{AuthzError, authorize};
pub use permissions::Permission;
pub use roles::Role;
