use super::{GlobalConfiguration, Subcommand};
use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use clap_mangen::Man;
use std::io::{ErrorKind, Write};
use std::process::{Command, ExitCode, Stdio};

/// Display a manpage for selected subcommands.
#[derive(Parser)]
pub struct Opts {
    /// Name of the (chain of) subcommand(s) to read the manpage of.
    subcommand: Vec<String>,
}

impl Opts {
    /// Walks down the chain of subcommands starting from the top-level command.
    fn command(&self) -> Result<clap::Command> {
        let mut cmd = crate::Opts::command();
        cmd.build();

        self.subcommand.iter().try_fold(cmd, |cmd, name| {
            match cmd.find_subcommand(name) {
                Some(subcmd) => Ok(subcmd.clone()),
                None => bail!(
                    "unknown subcommand '{}', expected one of: {}",
                    self.subcommand.join(" "),
                    cmd.get_subcommands()
                        .map(clap::Command::get_name)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }
        })
    }
}

impl Subcommand for Opts {
    fn run(&self, _: &GlobalConfiguration) -> Result<ExitCode> {
        let mut cmd = self.command()?;
        let mut page = Vec::new();
        Man::new(cmd.clone()).render(&mut page)?;

        let mut man = match Command::new("man")
            .arg("/dev/stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .spawn()
        {
            Ok(man) => man,
            // without `man` show the regular help
            Err(err) if err.kind() == ErrorKind::NotFound => {
                print!("{}", cmd.render_long_help());
                return Ok(ExitCode::SUCCESS);
            }
            Err(err) => return Err(err).context("unable to run `man`"),
        };

        man.stdin
            .take()
            .context("unable to open the standard input of `man`")?
            .write_all(&page)?;
        let status = man.wait()?;

        Ok(if status.success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}
