pub mod compare;
pub mod dataset;
pub mod diff;
pub mod exec;
pub mod snapshot;

pub use compare::{CompareState, compare};
pub use dataset::{DatasetMount, MountTable, load_mount_table};
pub use snapshot::{SnapshotRecord, enumerate};
