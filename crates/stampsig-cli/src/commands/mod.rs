//! Subcommand handlers.

pub mod demo;
pub mod keys;
pub mod stamp;
