//! Classification of incoming text and parsing of submitted payloads.

use thiserror::Error;

use super::reply::{ADD_BUTTON, DELETE_BUTTON, EDIT_BUTTON, VIEW_BUTTON};

/// A recognized menu command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    View,
    Add,
    Edit,
    Delete,
    Cancel,
}

impl Command {
    /// Recognize a menu button label or slash command; `None` means free text.
    ///
    /// Slash commands may carry a `@botname` suffix, as in group chats.
    pub fn classify(text: &str) -> Option<Self> {
        let text = text.trim();

        match text {
            VIEW_BUTTON => return Some(Command::View),
            ADD_BUTTON => return Some(Command::Add),
            EDIT_BUTTON => return Some(Command::Edit),
            DELETE_BUTTON => return Some(Command::Delete),
            _ => {}
        }

        let slash = text.strip_prefix('/')?;
        let name = slash.split('@').next().unwrap_or_default();
        match name {
            "start" => Some(Command::Start),
            "stock" | "view" => Some(Command::View),
            "add" => Some(Command::Add),
            "edit" => Some(Command::Edit),
            "delete" => Some(Command::Delete),
            "cancel" => Some(Command::Cancel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::View => "view",
            Command::Add => "add",
            Command::Edit => "edit",
            Command::Delete => "delete",
            Command::Cancel => "cancel",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("expected {expected} comma-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("quantity '{0}' is not an integer")]
    BadQuantity(String),

    #[error("fields must not be empty")]
    EmptyField,
}

/// Payload of an add submission: `Section, Name, Quantity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub section: String,
    pub item: String,
    pub quantity: i64,
}

/// Payload of an edit submission: `Name, New quantity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub item: String,
    pub quantity: i64,
}

pub fn parse_add(text: &str) -> Result<AddRequest, InputError> {
    let [section, item, quantity] = split_fields::<3>(text)?;
    Ok(AddRequest {
        section: section.to_string(),
        item: item.to_string(),
        quantity: parse_quantity(quantity)?,
    })
}

pub fn parse_edit(text: &str) -> Result<EditRequest, InputError> {
    let [item, quantity] = split_fields::<2>(text)?;
    Ok(EditRequest {
        item: item.to_string(),
        quantity: parse_quantity(quantity)?,
    })
}

fn split_fields<const N: usize>(text: &str) -> Result<[&str; N], InputError> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    let fields: [&str; N] = fields
        .try_into()
        .map_err(|found: Vec<&str>| InputError::FieldCount {
            expected: N,
            found: found.len(),
        })?;
    if fields.iter().any(|f| f.is_empty()) {
        return Err(InputError::EmptyField);
    }
    Ok(fields)
}

fn parse_quantity(raw: &str) -> Result<i64, InputError> {
    raw.parse::<i64>()
        .map_err(|_| InputError::BadQuantity(raw.to_string()))
}
