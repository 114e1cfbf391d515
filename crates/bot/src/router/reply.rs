//! Outgoing replies, reply menus, and fixed reply texts.

pub const VIEW_BUTTON: &str = "📋 View stock";
pub const ADD_BUTTON: &str = "➕ Add item";
pub const EDIT_BUTTON: &str = "✏️ Edit item";
pub const DELETE_BUTTON: &str = "🗑 Delete item";

pub const GREETING_ADMIN: &str = "Welcome, administrator! Choose an action:";
pub const GREETING_GUEST: &str = "Welcome! You can view stock levels.";
pub const UNRECOGNIZED: &str =
    "I don't understand this command. Use the menu to interact with the bot.";
pub const CANCELLED: &str = "Cancelled.";

pub const ADD_PROMPT: &str = "Send the item as: Section, Name, Quantity";
pub const EDIT_PROMPT: &str = "Send the update as: Name, New quantity";
pub const DELETE_PROMPT: &str = "Send the name of the item to delete.";

pub const ADD_FORMAT_ERROR: &str =
    "Error: invalid format. Use: Section, Name, Quantity (quantity is a whole number).";
pub const EDIT_FORMAT_ERROR: &str =
    "Error: invalid format. Use: Name, New quantity (quantity is a whole number).";
pub const DELETE_FORMAT_ERROR: &str = "Error: the item name must not be empty.";
pub const STORAGE_ERROR: &str = "The inventory is unavailable right now. Please try again later.";

/// How the chat client should interpret the reply text.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseMode {
    Plain,
    Html,
}

/// Static reply keyboards.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Menu {
    Guest,
    Admin,
}

impl Menu {
    /// Button labels, one inner slice per keyboard row.
    pub fn buttons(&self) -> &'static [&'static [&'static str]] {
        match self {
            Menu::Guest => &[&[VIEW_BUTTON]],
            Menu::Admin => &[&[VIEW_BUTTON], &[ADD_BUTTON, EDIT_BUTTON], &[DELETE_BUTTON]],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub parse_mode: ParseMode,
    pub menu: Option<Menu>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Plain,
            menu: None,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Html,
            menu: None,
        }
    }

    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.menu = Some(menu);
        self
    }
}
