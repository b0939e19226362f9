use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::exec;
use crate::config::SnapsConfig;
use crate::error::Error;

/// A dataset name paired with its mount point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetMount {
    pub dataset: String,
    pub mountpoint: PathBuf,
}

/// Mounted ZFS filesystems, rebuilt on every invocation and never persisted.
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    entries: Vec<DatasetMount>,
}

impl MountTable {
    /// Parse `zfs list -H -o name,mountpoint` output. Meaningful lines carry
    /// exactly two whitespace-separated tokens, dataset name first; anything
    /// else is skipped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .lines()
            .filter_map(|line| {
                let mut fields = line.split_whitespace();
                match (fields.next(), fields.next(), fields.next()) {
                    (Some(dataset), Some(mountpoint), None) => Some(DatasetMount {
                        dataset: dataset.to_string(),
                        mountpoint: PathBuf::from(mountpoint),
                    }),
                    _ => None,
                }
            })
            .collect();
        Self { entries }
    }

    /// Resolve the dataset owning `path`: the path's own mount point if it is
    /// one, otherwise the longest mount point that is a prefix of it.
    ///
    /// Prefix matching goes through `Path::starts_with`, so it only matches
    /// whole components: `/pool/foo` does not claim `/pool/foobar`.
    ///
    /// # Errors
    /// Returns `Error::DatasetNotFound` when no mount point covers `path`;
    /// callers fall back to [`MountTable::synthetic`].
    pub fn lookup(&self, path: &Path) -> Result<DatasetMount, Error> {
        if let Some(exact) = self.entries.iter().find(|e| e.mountpoint == path) {
            return Ok(exact.clone());
        }

        self.entries
            .iter()
            .filter(|e| path.starts_with(&e.mountpoint))
            .max_by_key(|e| e.mountpoint.as_os_str().len())
            .cloned()
            .ok_or_else(|| Error::DatasetNotFound {
                path: path.to_path_buf(),
            })
    }

    /// Degenerate fallback for paths outside any known mount: the path itself
    /// stands in as both dataset name and mount point.
    #[must_use]
    pub fn synthetic(path: &Path) -> DatasetMount {
        DatasetMount {
            dataset: path.display().to_string(),
            mountpoint: path.to_path_buf(),
        }
    }
}

/// Query mounted ZFS filesystems and parse the result.
///
/// # Errors
/// Returns an error if the `zfs list` invocation fails.
pub fn load_mount_table(cfg: &SnapsConfig) -> Result<MountTable> {
    let raw = exec::capture_stdout(&cfg.zfs_bin, &["list", "-H", "-o", "name,mountpoint"])
        .context("failed to query mounted ZFS filesystems")?;
    Ok(MountTable::parse(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MountTable {
        MountTable::parse(
            "tank\t/tank\n\
             tank/home\t/tank/home\n\
             tank/home/docs\t/tank/home/docs\n",
        )
    }

    #[test]
    fn parse_skips_malformed_lines() {
        let t = MountTable::parse("tank /tank\nNAME MOUNTPOINT EXTRA\n\nonly-one-token\n");
        assert_eq!(
            t.lookup(Path::new("/tank")).unwrap(),
            DatasetMount {
                dataset: "tank".to_string(),
                mountpoint: PathBuf::from("/tank"),
            }
        );
        assert!(t.lookup(Path::new("/only-one-token")).is_err());
    }

    #[test]
    fn exact_mount_point_wins() {
        let found = table().lookup(Path::new("/tank/home")).unwrap();
        assert_eq!(found.dataset, "tank/home");
    }

    #[test]
    fn longest_prefix_wins() {
        let found = table()
            .lookup(Path::new("/tank/home/docs/notes/todo.txt"))
            .unwrap();
        assert_eq!(found.dataset, "tank/home/docs");
        assert_eq!(found.mountpoint, PathBuf::from("/tank/home/docs"));
    }

    #[test]
    fn prefix_match_respects_component_boundaries() {
        let found = table().lookup(Path::new("/tank/homestead/file")).unwrap();
        assert_eq!(found.dataset, "tank");
    }

    #[test]
    fn lookup_is_idempotent() {
        let t = table();
        let path = Path::new("/tank/home/doc.txt");
        assert_eq!(t.lookup(path).unwrap(), t.lookup(path).unwrap());
    }

    #[test]
    fn unmatched_path_reports_dataset_not_found() {
        let err = table().lookup(Path::new("/rpool/data")).unwrap_err();
        assert!(matches!(err, Error::DatasetNotFound { .. }));
    }

    #[test]
    fn synthetic_fallback_mirrors_the_path() {
        let fallback = MountTable::synthetic(Path::new("/srv/plain"));
        assert_eq!(fallback.dataset, "/srv/plain");
        assert_eq!(fallback.mountpoint, PathBuf::from("/srv/plain"));
    }
}
