use super::helpers;
use super::{GlobalConfiguration, Subcommand};
use anyhow::Result;
use clap::{Parser, ValueHint};
use std::path::PathBuf;
use std::process::ExitCode;

/// Shows the bins of a table.
#[derive(Parser)]
pub struct Opts {
    /// Path to the input table.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

impl Subcommand for Opts {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode> {
        let series = helpers::read_table(&self.input)?;

        helpers::series_table(&series, cfg.digits_abs).printstd();

        Ok(ExitCode::SUCCESS)
    }
}
