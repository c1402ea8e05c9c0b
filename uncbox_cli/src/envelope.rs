use super::helpers;
use super::{GlobalConfiguration, Subcommand};
use anyhow::{Context, Result};
use clap::{Args, Parser, ValueHint};
use prettytable::cell;
use std::path::PathBuf;
use std::process::ExitCode;
use uncbox::basis::{BasisConfig, BasisKind};
use uncbox::{envelope, ratio};

#[derive(Args)]
#[group(multiple = false)]
struct Scale {
    /// Number of colours N, the envelope is scaled with 1/N^2.
    #[arg(default_value_t = 3.0, long)]
    nc: f64,
    /// Scale the envelope with the given factor instead of 1/N^2.
    #[arg(long)]
    scale: Option<f64>,
}

impl Scale {
    fn factor(&self) -> f64 {
        self.scale.unwrap_or_else(|| 1.0 / self.nc.powi(2))
    }
}

/// Calculates the uncertainty envelope of a table.
#[derive(Parser)]
pub struct Opts {
    /// Path to the input table.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
    /// Polynomial basis of the envelope.
    #[arg(default_value = "bernstein", long, short, value_parser = parse_basis)]
    basis: BasisKind,
    /// Degree of the polynomial basis.
    #[arg(allow_negative_numbers = true, default_value_t = 2, long, short)]
    degree: i64,
    #[command(flatten)]
    scale: Scale,
    /// Show the envelope divided by the given table instead of absolute numbers.
    #[arg(long, value_hint = ValueHint::FilePath, value_name = "TABLE")]
    ratio_to: Option<PathBuf>,
}

pub fn parse_basis(arg: &str) -> Result<BasisKind, String> {
    arg.parse().map_err(|err: uncbox::Error| err.to_string())
}

impl Subcommand for Opts {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode> {
        let config = BasisConfig::new(self.basis, self.degree)?;
        let series = helpers::read_table(&self.input)?;
        let mut result = envelope::compute_envelope_with(&series, self.scale.factor(), &config)?;
        let mut central = series.clone();

        if let Some(path) = &self.ratio_to {
            let reference = helpers::read_table(path)?;
            let context = || {
                format!(
                    "unable to divide '{}' by '{}'",
                    self.input.display(),
                    path.display()
                )
            };

            result = result.ratio_to(&reference).with_context(context)?;
            central = ratio::ratio(&series, &reference).with_context(context)?;
        }

        let mut table = helpers::create_table();
        table.set_titles(helpers::title_row(&["val", "lower", "upper", "unc [%]"]));

        for bin in 0..central.bins() {
            let val = central.val()[bin];
            let lower = result.lower.val()[bin];
            let upper = result.upper.val()[bin];

            let row = helpers::add_bin_row(&mut table, &central, bin);
            row.add_cell(cell!(r->format!("{:.*e}", cfg.digits_abs, val)));
            row.add_cell(cell!(r->format!("{:.*e}", cfg.digits_abs, lower)));
            row.add_cell(cell!(r->format!("{:.*e}", cfg.digits_abs, upper)));
            row.add_cell(cell!(r->format!(
                "{:.*}",
                cfg.digits_rel,
                100.0 * (upper - val) / val.abs()
            )));
        }

        table.printstd();

        Ok(ExitCode::SUCCESS)
    }
}
