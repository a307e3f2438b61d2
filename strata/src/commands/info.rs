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
pub struct InfoCommand {
    /// Path to strata.toml (defaults to ./strata.toml)
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub config: PathBuf,
}

impl InfoCommand {
    pub fn run(&self) -> Result<()> {
        let strata_toml = StrataToml::open(&self.config).unwrap_or_exit();
        let schema = strata_codegen::validate(strata_toml.into_declarations()).unwrap_or_exit();

        let report = ops::info(&schema, &self.config);
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
