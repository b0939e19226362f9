use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::Command;
use crate::app::context::AppContext;
use crate::core::zfs::{self, CompareState, MountTable};
use crate::render;

pub struct SnapsCommand<'a> {
    pub path: &'a Path,
    pub diff: Option<&'a str>,
}

impl Command for SnapsCommand<'_> {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        // Symlink-free absolute path; everything downstream works on this.
        let resolved = fs::canonicalize(self.path)
            .with_context(|| format!("failed to resolve {}", self.path.display()))?;

        let table = zfs::load_mount_table(&ctx.cfg)?;
        let owner = table.lookup(&resolved).unwrap_or_else(|_| {
            warn!("{} is outside any known ZFS mount", resolved.display());
            MountTable::synthetic(&resolved)
        });
        debug!(
            "dataset {} mounted at {}",
            owner.dataset,
            owner.mountpoint.display()
        );

        let remainder = resolved
            .strip_prefix(&owner.mountpoint)
            .unwrap_or_else(|_| Path::new(""));

        let records = zfs::enumerate(&ctx.cfg, &owner.dataset, &owner.mountpoint, remainder)?;
        let states: Vec<CompareState> = records
            .iter()
            .map(|record| zfs::compare(&resolved, &record.target))
            .collect();

        render::print_report(
            &resolved,
            &owner.dataset,
            &owner.mountpoint,
            &records,
            &states,
            ctx.verbosity > 0,
        );

        if let Some(index) = self.diff {
            match zfs::diff::find_by_index(&records, index) {
                Ok(record) => {
                    let output = zfs::diff::run_diff(&ctx.cfg, &resolved, &record.target)?;
                    print!("{output}");
                }
                Err(_) => println!("Couldn't diff with {index}"),
            }
        }

        Ok(())
    }
}
