use anyhow::Result;
use clap::Parser;
use zfs_snaps::cli::Cli;
use zfs_snaps::commands;
use zfs_snaps::logging::init::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    commands::dispatch(&cli)
}
