//! # Domain Layer
//!
//! The consultation state machine, its render policy and the error type.
//! This layer is independent of runtimes, transports and UI frameworks.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
