#![allow(missing_docs)]

mod basis;
mod config;
mod envelope;
mod help;
mod helpers;
mod plot;
mod ratio;
mod read;
mod sum;

use anyhow::Result;
use clap::Parser;
use enum_dispatch::enum_dispatch;
use git_version::git_version;
use std::process::ExitCode;

#[derive(Parser)]
pub struct GlobalConfiguration {
    /// Number of fractional digits for absolute numbers.
    #[arg(default_value_t = 7, global = true, long, value_name = "ABS")]
    pub digits_abs: usize,
    /// Number of fractional digits for relative numbers.
    #[arg(default_value_t = 2, global = true, long, value_name = "REL")]
    pub digits_rel: usize,
}

#[enum_dispatch]
pub trait Subcommand {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode>;
}

#[enum_dispatch(Subcommand)]
#[derive(Parser)]
pub enum SubcommandEnum {
    Basis(basis::Opts),
    Envelope(envelope::Opts),
    Help(help::Opts),
    Plot(plot::Opts),
    Ratio(ratio::Opts),
    Read(read::Opts),
    Sum(sum::Opts),
}

#[derive(Parser)]
#[command(
    arg_required_else_help = true,
    author,
    about,
    disable_help_subcommand = true,
    name = "uncbox",
    version = git_version!(
        args = ["--always", "--dirty", "--long", "--tags"],
        cargo_prefix = "",
        fallback = "unknown"
    )
)]
pub struct Opts {
    #[command(flatten)]
    pub configuration: GlobalConfiguration,
    #[command(subcommand)]
    pub subcommand: SubcommandEnum,
}
