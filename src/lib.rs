//! Linux tunables profile-and-reconciliation engine.
//!
//! Classifies the host as a server, desktop or laptop, diffs the live kernel
//! tunables (CPU scaling, virtual memory, block queues, TCP stack) against
//! that profile's target table, applies the differences, and can persist or
//! revert them across reboots.
//!
//! The public API is organised into layers:
//!
//! - **[`sysfs`]**: path-level reads and writes beneath a filesystem root
//! - **[`detect`]**: snapshot of every managed tunable
//! - **[`profile`]**: host classification and per-profile target values
//! - **[`tune`]**: compute and apply changes
//! - **[`persist`]**: backups, drop-in files and reload hooks
//! - **[`commands`]**: top-level subcommand orchestration (`apply`, `save`, `reset`, `profile`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod detect;
pub mod error;
pub mod exec;
pub mod logging;
pub mod persist;
pub mod platform;
pub mod profile;
pub mod sysfs;
pub mod tune;
