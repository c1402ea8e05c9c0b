use super::envelope::parse_basis;
use super::helpers;
use super::{GlobalConfiguration, Subcommand};
use anyhow::Result;
use clap::{Parser, ValueHint};
use prettytable::cell;
use std::path::PathBuf;
use std::process::ExitCode;
use uncbox::basis::{BasisConfig, BasisKind};
use uncbox::envelope;

/// Evaluates the basis functions of an envelope at the bin midpoints of a table.
#[derive(Parser)]
pub struct Opts {
    /// Path to the table providing the bin midpoints.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
    /// Polynomial basis.
    #[arg(default_value = "bernstein", long, short, value_parser = parse_basis)]
    basis: BasisKind,
    /// Degree of the polynomial basis.
    #[arg(allow_negative_numbers = true, default_value_t = 2, long, short)]
    degree: i64,
    /// Evaluate the deformation with the given nuisance parameters, one for each basis function.
    #[arg(
        allow_negative_numbers = true,
        long,
        num_args = 1,
        short,
        value_delimiter = ','
    )]
    params: Vec<f64>,
}

impl Subcommand for Opts {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode> {
        let config = BasisConfig::new(self.basis, self.degree)?;
        let series = helpers::read_table(&self.input)?;
        let xmid = series.xmid();
        let degree = config.degree();

        let functions = (0..=degree)
            .map(|nu| config.kind().evaluate_array(degree, nu, xmid))
            .collect::<Result<Vec<_>, _>>()?;
        let magnitude = envelope::magnitude(&config, xmid)?;
        let deformation = if self.params.is_empty() {
            None
        } else {
            Some(envelope::tnp_array(
                config.kind(),
                degree,
                &self.params,
                xmid,
            )?)
        };

        let labels: Vec<_> = (0..=degree)
            .map(|nu| match config.kind() {
                BasisKind::Bernstein => format!("B({degree},{nu})"),
                BasisKind::Chebyshev => format!("T{nu}"),
            })
            .chain(["magnitude".to_owned()])
            .chain(deformation.iter().map(|_| "TNP".to_owned()))
            .collect();
        let mut titles = vec!["xmid"];
        titles.extend(labels.iter().map(String::as_str));

        let mut table = helpers::create_table();
        table.set_titles(helpers::title_row(&titles));

        for bin in 0..series.bins() {
            let row = helpers::add_bin_row(&mut table, &series, bin);
            row.add_cell(cell!(r->format!("{}", xmid[bin])));

            for value in functions
                .iter()
                .chain([&magnitude])
                .chain(deformation.as_ref())
                .map(|values| values[bin])
            {
                row.add_cell(cell!(r->format!("{:.*e}", cfg.digits_abs, value)));
            }
        }

        table.printstd();

        Ok(ExitCode::SUCCESS)
    }
}
