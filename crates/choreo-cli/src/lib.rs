//! # choreo-cli — Command-Line Interface
//!
//! Drives the booking collaboration over a file-backed ledger, one
//! invocation per command, the way a chain client would submit one
//! transaction at a time.
//!
//! ## Subcommands
//!
//! - `init` — seed the process instance
//! - `advance` — fire an element's transition as a given party
//! - `show` — print one element's stored record
//! - `list-messages` — print every message record
//! - `validate-definition` — structurally check a topology file
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates — no engine logic here.

pub mod advance;
pub mod init;
pub mod list;
pub mod show;
pub mod validate;

mod common;
