//! Command-line definitions for the `tuner` binary.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the tunables engine.
#[derive(Parser, Debug)]
#[command(
    name = "tuner",
    about = "Reconcile Linux kernel tunables against a machine profile",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Treat this directory as `/` for sysfs, procfs and artifacts
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Configuration file (default: /etc/tuner/tuner.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the detected profile and power state
    Profile,
    /// Apply tuning changes for a profile
    Apply(ApplyOpts),
    /// Persist tuning across reboots via sysctl.d and udev rules
    Save(SaveOpts),
    /// Restore original values from backup and remove persisted files
    Reset,
    /// Print version information
    Version,
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct ApplyOpts {
    /// Profile to apply (server, desktop, laptop); detected when omitted
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Apply without confirmation
    #[arg(long)]
    pub auto: bool,

    /// List changes without applying them
    #[arg(short = 'd', long)]
    pub dry_run: bool,
}

/// Options for the `save` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct SaveOpts {
    /// Profile to persist (server, desktop, laptop); detected when omitted
    #[arg(short, long)]
    pub profile: Option<String>,
}
