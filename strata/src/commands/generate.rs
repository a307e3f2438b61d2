use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use strata_manifest::{DEFAULT_FILENAME, StrataToml};

use super::UnwrapOrExit;
use crate::{
    format::OutputFormat,
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to strata.toml (defaults to ./strata.toml)
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// What to generate
    #[arg(short, long, value_enum, default_value_t = OutputFormat::TypeScript)]
    pub format: OutputFormat,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let strata_toml = StrataToml::open(&self.config).unwrap_or_exit();
        let schema = strata_codegen::validate(strata_toml.into_declarations()).unwrap_or_exit();

        let report = ops::generate(
            &schema,
            self.format,
            GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
