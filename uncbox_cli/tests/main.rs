#![allow(missing_docs)]

use assert_cmd::Command;

const HELP_STR: &str = "Compute and plot theory-nuisance-parameter envelopes of binned predictions

Usage: uncbox [OPTIONS] <COMMAND>

Commands:
  basis     Evaluates the basis functions of an envelope at the bin midpoints of a table
  envelope  Calculates the uncertainty envelope of a table
  help      Display a manpage for selected subcommands
  plot      Creates a matplotlib script plotting the envelopes of all observables
  ratio     Divides two tables bin by bin, propagating their uncertainties
  read      Shows the bins of a table
  sum       Sums tables, adding the uncertainties in quadrature

Options:
      --digits-abs <ABS>  Number of fractional digits for absolute numbers [default: 7]
      --digits-rel <REL>  Number of fractional digits for relative numbers [default: 2]
  -h, --help              Print help
  -V, --version           Print version
";

#[test]
fn help() {
    Command::cargo_bin("uncbox")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(HELP_STR);
}

#[test]
fn no_arguments() {
    Command::cargo_bin("uncbox")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicates::str::contains("Usage: uncbox [OPTIONS] <COMMAND>"));
}

#[test]
fn help_for_unknown_subcommand() {
    Command::cargo_bin("uncbox")
        .unwrap()
        .args(["help", "convolve"])
        .assert()
        .failure()
        .stderr(predicates::str::contains(
            "unknown subcommand 'convolve', expected one of: basis, envelope, help, plot, ratio, read, sum",
        ));
}
