//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `ledger` - Ledger generation from the order history reports
//! - `digest` - Ship-to suffix digest helper for the config file

pub mod digest;
pub mod ledger;

// Re-export command functions for main.rs
pub use digest::*;
pub use ledger::*;
