use std::env;
use std::path::PathBuf;

/// Name of the environment variable overriding the diff executable.
pub const DIFF_TOOL_ENV: &str = "ZFS_SNAPS_DIFF";

/// Name of the environment variable overriding the `zfs` executable.
pub const ZFS_BIN_ENV: &str = "ZFS_SNAPS_ZFS";

const DEFAULT_DIFF_TOOL: &str = "/usr/bin/diff";

/// Executable overrides sourced from the environment.
#[derive(Debug, Clone)]
pub struct SnapsConfig {
    /// Diff tool used when a diff-target index is requested.
    pub diff_tool: PathBuf,
    /// `zfs` executable used for all dataset and snapshot queries.
    pub zfs_bin: PathBuf,
}

impl Default for SnapsConfig {
    fn default() -> Self {
        Self {
            diff_tool: PathBuf::from(DEFAULT_DIFF_TOOL),
            zfs_bin: PathBuf::from("zfs"),
        }
    }
}

impl SnapsConfig {
    /// Load overrides from the environment, falling back to defaults.
    /// Empty values are treated as unset.
    #[must_use]
    pub fn load() -> Self {
        let mut out = Self::default();

        if let Ok(v) = env::var(DIFF_TOOL_ENV)
            && !v.is_empty()
        {
            out.diff_tool = PathBuf::from(v);
        }
        if let Ok(v) = env::var(ZFS_BIN_ENV)
            && !v.is_empty()
        {
            out.zfs_bin = PathBuf::from(v);
        }

        out
    }
}
