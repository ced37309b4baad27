//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list;
pub mod show;
pub mod stats;
