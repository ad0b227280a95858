//! # Seasonplan Bot Library
//!
//! The chat-bot front-end of the seasonplan planner. It deep-links users
//! into the web UI and relays exported task lists back into the chat; it
//! shares nothing with the API process beyond the deployed web URL.
//!
//! ## Modules
//!
//! - `config`: Environment-driven bot configuration
//! - `telegram`: Minimal Bot API client (getUpdates, sendMessage)
//! - `dispatcher`: Long-polling update loop and command handling

pub mod config;
pub mod dispatcher;
pub mod telegram;
