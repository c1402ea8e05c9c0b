#![allow(missing_docs)]

use anyhow::{Context, Result, bail};
use clap::CommandFactory;
use clap_mangen::Man;
use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

fn main() -> Result<()> {
    let args: Vec<_> = env::args().skip(1).collect();

    match args.as_slice() {
        [cmd, dir] if cmd == "install-manpages" => install_manpages(Path::new(dir)),
        _ => bail!("usage: cargo xtask install-manpages <DIR>"),
    }
}

/// Returns `cmd` and all of its (nested) subcommands, parents first.
fn all_commands(cmd: &clap::Command) -> Vec<clap::Command> {
    let mut commands = vec![cmd.clone()];
    let mut index = 0;

    while index < commands.len() {
        let children: Vec<_> = commands[index].get_subcommands().cloned().collect();
        commands.extend(children);
        index += 1;
    }

    commands
}

fn install_manpages(dir: &Path) -> Result<()> {
    let mut cmd = uncbox_cli::Opts::command();
    // `git describe` prefixes tags with `v`, the manpages show the bare version
    let version = cmd
        .get_version()
        .map_or("unknown", |version| version.trim_start_matches('v'))
        .to_owned();
    cmd = cmd.version(version.clone());
    // fills in the `bin_name` of every subcommand
    cmd.build();

    fs::create_dir_all(dir)
        .with_context(|| format!("unable to create directory '{}'", dir.display()))?;

    for command in all_commands(&cmd) {
        let name = command
            .get_bin_name()
            .unwrap_or_else(|| command.get_name())
            .replace(' ', "-");
        let path = dir.join(format!("{name}.1"));

        Man::new(command)
            // a single space keeps the remaining columns of the footer in place
            .date(" ")
            .manual("uncbox CLI Manual")
            .source(format!("uncbox {version}"))
            .title(name.to_ascii_uppercase())
            .render(&mut BufWriter::new(File::create(&path).with_context(
                || format!("unable to create manpage '{}'", path.display()),
            )?))?;

        println!("{}", path.display());
    }

    Ok(())
}
