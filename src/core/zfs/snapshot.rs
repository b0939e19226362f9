use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Month, PrimitiveDateTime, Time};
use tracing::debug;

use super::exec;
use crate::config::SnapsConfig;
use crate::error::Error;

/// Display shape of a parsed creation date, matching what
/// `zfs get creation` prints, e.g. `Wed Jun 30 13:51 2021`.
pub const CREATION_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[weekday repr:short] [month repr:short] [day padding:none] [hour]:[minute] [year]"
);

/// One snapshot that materializes the target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    /// Full `dataset@snapname` identifier.
    pub name: String,
    /// Parsed `creation` property.
    pub created: PrimitiveDateTime,
    /// Snapshot mount root, `<mountpoint>/.zfs/snapshot/<snapname>`.
    pub snap_root: PathBuf,
    /// The target path as materialized under this snapshot.
    pub target: PathBuf,
    /// Display index: dense, zero-based, descending creation order.
    /// Stable only within one invocation.
    pub index: usize,
}

/// Keep the first token of each line, filtered to snapshots of `dataset`.
#[must_use]
pub fn parse_snapshot_names(raw: &str, dataset: &str) -> Vec<String> {
    let prefix = format!("{dataset}@");
    raw.lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|name| name.starts_with(&prefix))
        .map(str::to_string)
        .collect()
}

/// Third tab-separated field of a `zfs get -H` line.
#[must_use]
pub fn parse_property_value(raw: &str) -> Option<&str> {
    raw.lines().next()?.split('\t').nth(2)
}

/// Parse a `creation` value in the fixed
/// `abbreviated-weekday abbreviated-month day hour:minute year` shape,
/// tolerating runs of whitespace between fields. The weekday token is not
/// cross-checked against the date.
///
/// # Errors
/// Returns an error when the value does not match the fixed format.
pub fn parse_creation(raw: &str) -> Result<PrimitiveDateTime> {
    let fields: Vec<&str> = raw.split_whitespace().collect();
    let [_weekday, month, day, clock, year] = fields[..] else {
        bail!("unexpected creation date shape: {raw:?}");
    };

    let month = month_from_abbrev(month)
        .with_context(|| format!("unknown month abbreviation: {month:?}"))?;
    let day: u8 = day
        .parse()
        .with_context(|| format!("invalid day of month: {day:?}"))?;
    let year: i32 = year.parse().with_context(|| format!("invalid year: {year:?}"))?;

    let (hour, minute) = clock
        .split_once(':')
        .with_context(|| format!("invalid clock time: {clock:?}"))?;
    let hour: u8 = hour
        .parse()
        .with_context(|| format!("invalid hour: {hour:?}"))?;
    let minute: u8 = minute
        .parse()
        .with_context(|| format!("invalid minute: {minute:?}"))?;

    let date = Date::from_calendar_date(year, month, day)
        .with_context(|| format!("invalid calendar date in {raw:?}"))?;
    let time = Time::from_hms(hour, minute, 0)
        .with_context(|| format!("invalid clock time in {raw:?}"))?;
    Ok(PrimitiveDateTime::new(date, time))
}

fn month_from_abbrev(abbrev: &str) -> Option<Month> {
    Some(match abbrev {
        "Jan" => Month::January,
        "Feb" => Month::February,
        "Mar" => Month::March,
        "Apr" => Month::April,
        "May" => Month::May,
        "Jun" => Month::June,
        "Jul" => Month::July,
        "Aug" => Month::August,
        "Sep" => Month::September,
        "Oct" => Month::October,
        "Nov" => Month::November,
        "Dec" => Month::December,
        _ => return None,
    })
}

/// Assemble the filtered, ordered record list: drop snapshots whose
/// materialized target path does not exist, sort newest first (stable, so
/// ties keep enumeration order), and assign display indices.
#[must_use]
pub fn build_records(
    named: Vec<(String, PrimitiveDateTime)>,
    mountpoint: &Path,
    remainder: &Path,
) -> Vec<SnapshotRecord> {
    let mut records: Vec<SnapshotRecord> = named
        .into_iter()
        .filter_map(|(name, created)| {
            let (_, snapname) = name.split_once('@')?;
            let snap_root = mountpoint.join(".zfs").join("snapshot").join(snapname);
            let target = snap_root.join(remainder);
            target.exists().then(|| SnapshotRecord {
                name,
                created,
                snap_root,
                target,
                index: 0,
            })
        })
        .collect();

    records.sort_by(|a, b| b.created.cmp(&a.created));
    for (index, record) in records.iter_mut().enumerate() {
        record.index = index;
    }
    records
}

/// Fetch and parse the `creation` property of one snapshot.
///
/// # Errors
/// Returns `Error::PropertyQueryFailed` when the query fails or the value
/// does not parse.
pub fn creation(cfg: &SnapsConfig, name: &str) -> Result<PrimitiveDateTime, Error> {
    let raw = exec::capture_stdout(&cfg.zfs_bin, &["get", "-H", "creation", name]).map_err(
        |e| Error::PropertyQueryFailed {
            snapshot: name.to_string(),
            reason: format!("{e:#}"),
        },
    )?;

    let value = parse_property_value(&raw).ok_or_else(|| Error::PropertyQueryFailed {
        snapshot: name.to_string(),
        reason: "unexpected `zfs get` output shape".to_string(),
    })?;

    parse_creation(value).map_err(|e| Error::PropertyQueryFailed {
        snapshot: name.to_string(),
        reason: format!("{e:#}"),
    })
}

/// Enumerate snapshots of `dataset` that contain the target, newest first.
///
/// One `zfs get` child process per snapshot; the cost is linear in the
/// snapshot count.
///
/// # Errors
/// Returns an error if the snapshot listing or any property query fails.
pub fn enumerate(
    cfg: &SnapsConfig,
    dataset: &str,
    mountpoint: &Path,
    remainder: &Path,
) -> Result<Vec<SnapshotRecord>> {
    let raw = exec::capture_stdout(&cfg.zfs_bin, &["list", "-t", "snapshot", "-H", "-o", "name"])
        .map_err(|e| Error::SnapshotQueryFailed {
            reason: format!("{e:#}"),
        })?;

    let names = parse_snapshot_names(&raw, dataset);
    debug!("{} snapshots belong to dataset {dataset}", names.len());

    let mut named = Vec::with_capacity(names.len());
    for name in names {
        let created = creation(cfg, &name)?;
        named.push((name, created));
    }

    Ok(build_records(named, mountpoint, remainder))
}
