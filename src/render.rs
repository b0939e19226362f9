use std::path::Path;

use console::Style;

use crate::core::zfs::snapshot::CREATION_FORMAT;
use crate::core::zfs::{CompareState, SnapshotRecord};

/// Render the resolved-path header and the snapshot table.
///
/// `same` rows print green, `diff` rows red; color is cosmetic only and
/// carries no meaning beyond emphasis. With `verbose`, each row also shows
/// the materialized target path under the snapshot.
pub fn print_report(
    resolved: &Path,
    dataset: &str,
    mountpoint: &Path,
    records: &[SnapshotRecord],
    states: &[CompareState],
    verbose: bool,
) {
    let label = Style::new().cyan().bold();
    let same = Style::new().green();
    let differs = Style::new().red();

    println!("{} {}", label.apply_to("Mount point:"), mountpoint.display());
    println!("{} {}", label.apply_to("Path:       "), resolved.display());
    println!("{} {}", label.apply_to("Dataset:    "), dataset);
    println!();

    for (record, state) in records.iter().zip(states) {
        let (marker, style) = match state {
            CompareState::Same => ("same", &same),
            CompareState::Differs => ("diff", &differs),
        };

        let created = record
            .created
            .format(CREATION_FORMAT)
            .unwrap_or_else(|_| record.created.to_string());

        let mut line = format!(
            "{:>3}  {}  {}  {}",
            record.index, marker, created, record.name
        );
        if verbose {
            line.push_str(&format!("  {}", record.target.display()));
        }
        println!("{}", style.apply_to(line));
    }
}
