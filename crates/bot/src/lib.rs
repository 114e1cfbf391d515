//! Chat front end for the stock table: configuration, command routing,
//! reply formatting, and the chat transport.

pub mod config;
pub mod context;
pub mod format;
pub mod router;
pub mod runtime;
pub mod transport;

pub use config::{ConfigError, Settings};
pub use context::BotContext;
pub use router::{CommandRouter, Menu, ParseMode, Reply};
