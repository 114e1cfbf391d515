//! Maps incoming chat text to inventory operations and builds the reply.
//!
//! Routing is driven by an explicit per-sender `ConversationState`:
//!
//! ```text
//! Idle --add--> AwaitingAdd --"Section, Name, Qty"--> Idle
//! Idle --edit--> AwaitingEdit --"Name, Qty"--> Idle
//! Idle --delete--> AwaitingDelete --"Name"--> Idle
//! ```
//!
//! Any recognized command resets the sender to `Idle` before it runs, and a
//! submission always returns the sender to `Idle`, whether it succeeded or not.

pub mod command;
pub mod reply;

use tracing::Instrument;

use stockbot_auth::{Permission, Role, authorize};
use stockbot_core::{ChatUserId, DomainError};
use stockbot_infra::{ConversationState, InventoryStore, StoreError};
use stockbot_inventory::{NewItem, Quantity};

use crate::context::BotContext;
use crate::format::format_inventory;

pub use command::{AddRequest, Command, EditRequest, InputError, parse_add, parse_edit};
pub use reply::{Menu, ParseMode, Reply};

pub struct CommandRouter<S> {
    ctx: BotContext<S>,
}

impl<S: InventoryStore> CommandRouter<S> {
    pub fn new(ctx: BotContext<S>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &BotContext<S> {
        &self.ctx
    }

    /// Handle one message from `sender` and produce the reply to send back.
    pub async fn handle(&self, sender: ChatUserId, text: &str) -> Reply {
        let role = self.ctx.role_of(sender);
        let span = tracing::info_span!("message", %sender, %role);

        async move {
            match Command::classify(text) {
                Some(command) => {
                    self.ctx.conversations().clear(sender);
                    tracing::debug!(command = command.as_str(), "command received");
                    self.on_command(sender, role, command).await
                }
                None => self.on_text(sender, role, text).await,
            }
        }
        .instrument(span)
        .await
    }

    async fn on_command(&self, sender: ChatUserId, role: Role, command: Command) -> Reply {
        match command {
            Command::Start => match role {
                Role::Admin => Reply::plain(reply::GREETING_ADMIN).with_menu(Menu::Admin),
                Role::Guest => Reply::plain(reply::GREETING_GUEST).with_menu(Menu::Guest),
            },
            Command::View => self.view().await,
            Command::Add => self.prompt(sender, role, ConversationState::AwaitingAdd, reply::ADD_PROMPT),
            Command::Edit => self.prompt(sender, role, ConversationState::AwaitingEdit, reply::EDIT_PROMPT),
            Command::Delete => {
                self.prompt(sender, role, ConversationState::AwaitingDelete, reply::DELETE_PROMPT)
            }
            Command::Cancel => Reply::plain(reply::CANCELLED).with_menu(menu_for(role)),
        }
    }

    async fn view(&self) -> Reply {
        match self.ctx.store().try_get_inventory().await {
            Ok(snapshot) => Reply::html(format_inventory(&snapshot, self.ctx.low_stock_threshold())),
            Err(err) => {
                tracing::error!(error = %err, "failed to read inventory");
                Reply::plain(reply::STORAGE_ERROR)
            }
        }
    }

    fn prompt(&self, sender: ChatUserId, role: Role, next: ConversationState, text: &str) -> Reply {
        if authorize(role, Permission::ManageInventory).is_err() {
            return unrecognized(role);
        }
        self.ctx.conversations().set(sender, next);
        tracing::debug!(state = next.as_str(), "awaiting input");
        Reply::plain(text)
    }

    async fn on_text(&self, sender: ChatUserId, role: Role, text: &str) -> Reply {
        let state = self.ctx.conversations().take(sender);
        if state == ConversationState::Idle {
            return unrecognized(role);
        }
        if authorize(role, Permission::ManageInventory).is_err() {
            tracing::warn!(state = state.as_str(), "submission from a non-administrator dropped");
            return unrecognized(role);
        }

        match state {
            ConversationState::Idle => unrecognized(role),
            ConversationState::AwaitingAdd => self.submit_add(text).await,
            ConversationState::AwaitingEdit => self.submit_edit(text).await,
            ConversationState::AwaitingDelete => self.submit_delete(text).await,
        }
    }

    async fn submit_add(&self, text: &str) -> Reply {
        let request = match parse_add(text) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(error = %err, "malformed add payload");
                return Reply::plain(reply::ADD_FORMAT_ERROR);
            }
        };

        let new_item = match NewItem::new(&request.section, &request.item, request.quantity) {
            Ok(new_item) => new_item,
            Err(err) => return rejected(&err),
        };

        match self.ctx.store().add_item(new_item).await {
            Ok(record) => Reply::plain(format!(
                "Item {} added to section {}.",
                record.item, record.section
            )),
            Err(err) => store_failure(&err, &request.item),
        }
    }

    async fn submit_edit(&self, text: &str) -> Reply {
        let request = match parse_edit(text) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(error = %err, "malformed edit payload");
                return Reply::plain(reply::EDIT_FORMAT_ERROR);
            }
        };

        let quantity = match Quantity::new(request.quantity) {
            Ok(quantity) => quantity,
            Err(err) => return rejected(&err),
        };

        match self.ctx.store().update_item(&request.item, quantity).await {
            Ok(record) => Reply::plain(format!(
                "Quantity of {} updated to {}.",
                record.item, record.quantity
            )),
            Err(err) => store_failure(&err, &request.item),
        }
    }

    async fn submit_delete(&self, text: &str) -> Reply {
        let item = text.trim();
        if item.is_empty() {
            return Reply::plain(reply::DELETE_FORMAT_ERROR);
        }

        match self.ctx.store().delete_item(item).await {
            Ok(()) => Reply::plain(format!("Item {item} deleted.")),
            Err(err) => store_failure(&err, item),
        }
    }
}

fn menu_for(role: Role) -> Menu {
    match role {
        Role::Admin => Menu::Admin,
        Role::Guest => Menu::Guest,
    }
}

fn unrecognized(role: Role) -> Reply {
    Reply::plain(reply::UNRECOGNIZED).with_menu(menu_for(role))
}

fn rejected(err: &DomainError) -> Reply {
    let reason = match err {
        DomainError::Validation(msg) | DomainError::InvariantViolation(msg) => msg.as_str(),
        _ => "invalid input",
    };
    Reply::plain(format!("Error: {reason}."))
}

fn store_failure(err: &StoreError, item: &str) -> Reply {
    match err {
        StoreError::Domain(DomainError::Conflict(_)) => {
            Reply::plain(format!("Item {item} already exists."))
        }
        StoreError::Domain(DomainError::NotFound) => Reply::plain(format!("Item {item} not found.")),
        StoreError::Domain(domain) => rejected(domain),
        StoreError::Database(_) | StoreError::Closed => Reply::plain(reply::STORAGE_ERROR),
    }
}
