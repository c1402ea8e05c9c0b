use super::helpers;
use super::{GlobalConfiguration, Subcommand};
use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use std::path::PathBuf;
use std::process::ExitCode;
use uncbox::channels;

/// Sums tables, adding the uncertainties in quadrature.
#[derive(Parser)]
pub struct Opts {
    /// Path(s) of the tables that should be summed.
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    input: Vec<PathBuf>,
}

impl Subcommand for Opts {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode> {
        let tables = self
            .input
            .iter()
            .map(|path| helpers::read_table(path))
            .collect::<Result<Vec<_>>>()?;

        // UNWRAP: clap guarantees at least one input
        let sum = channels::aggregate(&tables)
            .context("tables can not be summed")?
            .unwrap();

        helpers::series_table(&sum, cfg.digits_abs).printstd();

        Ok(ExitCode::SUCCESS)
    }
}
