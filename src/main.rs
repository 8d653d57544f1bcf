//! `tuner` command-line entry point.

use anyhow::Result;
use clap::Parser;

use tuner_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    let command = match &args.command {
        cli::Command::Profile => "profile",
        cli::Command::Apply(_) => "apply",
        cli::Command::Save(_) => "save",
        cli::Command::Reset => "reset",
        cli::Command::Version => "version",
    };
    logging::init_subscriber(args.verbose, command);
    let log = logging::Logger::new(command);

    match args.command {
        cli::Command::Profile => commands::profile::run(&args.global, &log),
        cli::Command::Apply(opts) => commands::apply::run(&args.global, &opts, &log),
        cli::Command::Save(opts) => commands::save::run(&args.global, &opts, &log),
        cli::Command::Reset => commands::reset::run(&args.global, &log),
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
