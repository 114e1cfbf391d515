/// Permission identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Permission {
    ViewInventory,
    ManageInventory,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewInventory => "inventory.read",
            Permission::ManageInventory => "inventory.write",
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
