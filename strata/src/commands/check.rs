use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use strata_manifest::{DEFAULT_FILENAME, StrataToml};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to strata.toml (defaults to ./strata.toml)
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let strata_toml = StrataToml::open(&self.config).unwrap_or_exit();

        let report = ops::check(strata_toml.into_declarations(), &self.config);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
