use super::helpers;
use super::{GlobalConfiguration, Subcommand};
use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use std::path::PathBuf;
use std::process::ExitCode;
use uncbox::ratio;

/// Divides two tables bin by bin, propagating their uncertainties.
#[derive(Parser)]
pub struct Opts {
    /// Path to the table of the numerator.
    #[arg(value_hint = ValueHint::FilePath)]
    numerator: PathBuf,
    /// Path to the table of the denominator.
    #[arg(value_hint = ValueHint::FilePath)]
    denominator: PathBuf,
}

impl Subcommand for Opts {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode> {
        let numerator = helpers::read_table(&self.numerator)?;
        let denominator = helpers::read_table(&self.denominator)?;
        let result = ratio::ratio(&numerator, &denominator).with_context(|| {
            format!(
                "unable to divide '{}' by '{}'",
                self.numerator.display(),
                self.denominator.display()
            )
        })?;

        helpers::series_table(&result, cfg.digits_abs).printstd();

        Ok(ExitCode::SUCCESS)
    }
}
