use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// zfs-snaps command-line interface
#[derive(Parser, Debug, Clone)]
#[command(name = "zfs-snaps", version, about = "Inspect ZFS snapshots covering a path", long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv). `RUST_LOG` overrides the log level.
    /// At -v and above, snapshot rows include the materialized path.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List snapshots that contain PATH, newest first, marking each as
    /// same or diff against the live copy
    Snaps {
        /// File or directory to look up
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Diff the live path against the snapshot with this display index
        #[arg(short, long, value_name = "INDEX")]
        diff: Option<String>,
    },
}
