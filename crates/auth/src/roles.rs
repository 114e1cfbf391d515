use crate::Permission;

/// Role of a chat participant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Listed in the administrator allow-list; may mutate inventory.
    Admin,
    /// Anyone else; read-only.
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Guest => "guest",
        }
    }

    /// Convention: admin grants every permission, guest only reads.
    pub fn grants(&self, permission: Permission) -> bool {
        match self {
            Role::Admin => true,
            Role::Guest => matches!(permission, Permission::ViewInventory),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
