mod check;
mod completions;
mod generate;
mod info;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use info::InfoCommand;
use strata_codegen::StructuralError;

/// Extension trait for exiting on declaration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for strata_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for std::result::Result<T, Vec<StructuralError>> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(errors) => {
                for error in errors {
                    eprintln!("{:?}", miette::Report::new(error));
                }
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "strata")]
#[command(version)]
#[command(about = "Validate data-model declarations and generate typed clients")]
pub(crate) struct Cli {
    /// Log pipeline progress to stderr (overrides STRATA_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Check(cmd) => cmd.run(),
            Commands::Info(cmd) => cmd.run(),
            Commands::Generate(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate strata.toml and report every structural error
    Check(CheckCommand),

    /// Show models, relationships and access of a valid schema
    Info(InfoCommand),

    /// Generate client types or the JSON schema handoff
    Generate(GenerateCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
