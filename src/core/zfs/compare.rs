use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

/// Outcome of comparing live content against a snapshot's copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareState {
    Same,
    Differs,
}

/// Compare the live path against its copy under a snapshot.
///
/// Regular files are compared byte for byte. Directories are compared at the
/// top level only: differing entry-name sets, or a common regular file with
/// different bytes, make them unequal. Any I/O failure counts as a
/// difference.
#[must_use]
pub fn compare(live: &Path, snapshot: &Path) -> CompareState {
    let same = if live.is_dir() {
        dirs_equal(live, snapshot)
    } else {
        files_equal(live, snapshot)
    };

    match same {
        Ok(true) => CompareState::Same,
        Ok(false) | Err(_) => CompareState::Differs,
    }
}

fn files_equal(a: &Path, b: &Path) -> io::Result<bool> {
    if fs::metadata(a)?.len() != fs::metadata(b)?.len() {
        return Ok(false);
    }
    Ok(fs::read(a)? == fs::read(b)?)
}

fn dirs_equal(a: &Path, b: &Path) -> io::Result<bool> {
    let names = entry_names(a)?;
    if names != entry_names(b)? {
        return Ok(false);
    }

    for name in &names {
        let left = a.join(name);
        let right = b.join(name);
        if left.is_file() && right.is_file() && !files_equal(&left, &right)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn entry_names(dir: &Path) -> io::Result<BTreeSet<OsString>> {
    fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect()
}
