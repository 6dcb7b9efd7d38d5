//! Peanut Invoicing
//!
//! Server-side implementation of the Peanut Suite invoice computation
//! engine: line-item amount derivation, invoice totals, submission
//! validation, and currency display formatting, exposed over a small REST
//! surface so server and dashboard previews can never drift.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use crate::core::{Currency, FormatStyle};
pub use crate::modules::invoices;
