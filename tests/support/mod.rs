#![allow(dead_code)] // not every test binary uses every fixture

//! Test fixtures: a fake pool layout plus a `zfs` stub reproducing the
//! output shapes the tool parses (mount table, snapshot listing, creation
//! properties). Installed via the `ZFS_SNAPS_ZFS` override so the whole
//! pipeline runs without a real pool.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct FakePool {
    /// Keeps the layout alive for the duration of a test.
    pub temp: TempDir,
    /// The fake `zfs` executable.
    pub zfs: PathBuf,
    /// Canonicalized mount point of the fake dataset.
    pub mount: PathBuf,
    pub dataset: String,
}

/// Write an executable shell script and return its path.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Build a pool with one dataset and the given `(snapname, creation)` pairs.
/// Each snapshot gets a materialized directory under `.zfs/snapshot/`.
pub fn fake_pool(dataset: &str, snapshots: &[(&str, &str)]) -> FakePool {
    let temp = TempDir::new().unwrap();
    let mount = temp.path().join("pool");
    fs::create_dir_all(&mount).unwrap();
    let mount = mount.canonicalize().unwrap();

    for (snapname, _) in snapshots {
        fs::create_dir_all(mount.join(".zfs").join("snapshot").join(snapname)).unwrap();
    }

    let mut get_cases = String::new();
    for (snapname, creation) in snapshots {
        get_cases.push_str(&format!(
            "    {dataset}@{snapname}) printf '{dataset}@{snapname}\\tcreation\\t{creation}\\t-\\n' ;;\n"
        ));
    }

    let list_snapshots = snapshots
        .iter()
        .map(|(snapname, _)| format!("printf '{dataset}@{snapname}\\n'"))
        .collect::<Vec<_>>()
        .join("\n  ");

    let body = format!(
        "#!/bin/sh\n\
         if [ \"$1\" = get ]; then\n\
         \x20 case \"$4\" in\n\
         {get_cases}\
         \x20 esac\n\
         \x20 exit 0\n\
         fi\n\
         if [ \"$2\" = -t ]; then\n\
         \x20 {list_snapshots}\n\
         \x20 exit 0\n\
         fi\n\
         printf '{dataset}\\t{mountpoint}\\n'\n",
        mountpoint = mount.display()
    );
    let zfs = write_script(temp.path(), "zfs", &body);

    FakePool {
        temp,
        zfs,
        mount,
        dataset: dataset.to_string(),
    }
}

impl FakePool {
    /// Path of a snapshot's copy of `name` under the materialized tree.
    pub fn snap_path(&self, snapname: &str, name: &str) -> PathBuf {
        self.mount
            .join(".zfs")
            .join("snapshot")
            .join(snapname)
            .join(name)
    }
}
