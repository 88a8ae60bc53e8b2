//! # Connector Layer
//!
//! External integrations and outer surfaces:
//! - Advisory backends (Gemini, Anthropic-compatible, mock)
//! - Wiring and command dispatch
//! - Terminal rendering of the consultant

pub mod adapter;
pub mod api;
pub mod tui;

pub use adapter::*;
pub use api::*;
