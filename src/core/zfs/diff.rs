use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use super::snapshot::SnapshotRecord;
use crate::config::SnapsConfig;
use crate::error::Error;

/// Find the record whose display index matches the requested string form.
///
/// # Errors
/// Returns `Error::IndexNotFound` when no record carries that index; the
/// command layer reports it as a single informational line.
pub fn find_by_index<'a>(
    records: &'a [SnapshotRecord],
    index: &str,
) -> Result<&'a SnapshotRecord, Error> {
    records
        .iter()
        .find(|r| r.index.to_string() == index)
        .ok_or_else(|| Error::IndexNotFound {
            index: index.to_string(),
        })
}

/// Run the configured diff tool over the live path and the snapshot copy,
/// returning captured stdout.
///
/// `diff` exits 1 when contents differ, so exit status is ignored; only a
/// failure to spawn a child process is an error.
///
/// # Errors
/// Returns `Error::DiffInvocationFailed` when the diff tool or the grep
/// filter cannot be run.
pub fn run_diff(cfg: &SnapsConfig, live: &Path, snapshot: &Path) -> Result<String, Error> {
    debug!(
        "diffing {} against {} with {}",
        live.display(),
        snapshot.display(),
        cfg.diff_tool.display()
    );

    if !live.is_dir() {
        let output = Command::new(&cfg.diff_tool)
            .arg(live)
            .arg(snapshot)
            .output()
            .map_err(|e| spawn_failed(&cfg.diff_tool, &e))?;
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    // Plain diff knows -q and reports differing files itself. Any other tool
    // runs unflagged, with lines about identical files filtered out.
    if cfg.diff_tool.file_name().is_some_and(|name| name == "diff") {
        let output = Command::new(&cfg.diff_tool)
            .arg("-q")
            .arg(live)
            .arg(snapshot)
            .output()
            .map_err(|e| spawn_failed(&cfg.diff_tool, &e))?;
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let mut child = Command::new(&cfg.diff_tool)
        .arg(live)
        .arg(snapshot)
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_failed(&cfg.diff_tool, &e))?;

    let child_out = child.stdout.take().ok_or_else(|| Error::DiffInvocationFailed {
        reason: "diff tool produced no stdout handle".to_string(),
    })?;

    let filtered = Command::new("grep")
        .args(["-v", "identical"])
        .stdin(Stdio::from(child_out))
        .output()
        .map_err(|e| Error::DiffInvocationFailed {
            reason: format!("failed to run grep: {e}"),
        })?;

    child.wait().map_err(|e| Error::DiffInvocationFailed {
        reason: format!("diff tool did not exit: {e}"),
    })?;

    Ok(String::from_utf8_lossy(&filtered.stdout).into_owned())
}

fn spawn_failed(tool: &Path, err: &io::Error) -> Error {
    Error::DiffInvocationFailed {
        reason: format!("failed to run {}: {err}", tool.display()),
    }
}
