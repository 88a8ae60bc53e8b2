//! # Application Layer
//!
//! The advisory service seam and the widget that drives a consultation
//! through it.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
