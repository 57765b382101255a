//! chat-settings Library
//!
//! Settings panel for a chat application: general preferences, API key,
//! local model endpoints, appearance, and settings file import/export.

pub mod config;
pub mod db;
pub mod panel;
pub mod runner;
pub mod settings;

#[cfg(feature = "tui")]
pub mod tui;
