use std::path::PathBuf;

use thiserror::Error;

/// Failure kinds surfaced by the snapshot pipeline.
///
/// `DatasetNotFound` and `IndexNotFound` are downgraded to informational
/// output by the command layer; the rest terminate the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no ZFS mount owns {path:?}")]
    DatasetNotFound { path: PathBuf },

    #[error("snapshot query failed: {reason}")]
    SnapshotQueryFailed { reason: String },

    #[error("property query failed for {snapshot}: {reason}")]
    PropertyQueryFailed { snapshot: String, reason: String },

    #[error("diff invocation failed: {reason}")]
    DiffInvocationFailed { reason: String },

    #[error("no snapshot with index {index}")]
    IndexNotFound { index: String },
}
