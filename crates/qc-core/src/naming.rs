//! Output file naming (pass 2).
//!
//! Names depend on how many reports in the whole batch share a date, so
//! they can only be assigned after every printout has been processed.
//!
//! - undated report: `<input stem>.csv`
//! - date seen once: `<date>.csv`
//! - date seen more than once: the first report in batch order keeps
//!   `<date>.csv`, later ones get `<date>_<HHMM>.csv` from the printout's
//!   creation time.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::warn;

use crate::batch::BatchEntry;

/// Supplies the `HHMM` suffix for a printout.
pub trait StampSource {
    fn stamp(&self, path: &Path) -> Option<String>;
}

impl<F> StampSource for F
where
    F: Fn(&Path) -> Option<String>,
{
    fn stamp(&self, path: &Path) -> Option<String> {
        self(path)
    }
}

/// Reads the creation time from file metadata, in local time.
///
/// Falls back to the modification time on filesystems that do not record
/// creation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCreationTime;

impl StampSource for FileCreationTime {
    fn stamp(&self, path: &Path) -> Option<String> {
        let metadata = std::fs::metadata(path).ok()?;
        let time = metadata.created().or_else(|_| metadata.modified()).ok()?;
        let local: DateTime<Local> = time.into();
        Some(local.format("%H%M").to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// `<date>.csv`
    Plain,
    /// `<date>_<HHMM>.csv`
    Timestamped,
    /// `<date>_<input stem>.csv`, used when no timestamp is available.
    SourceSuffixed,
    /// `<input stem>.csv`
    Undated,
}

/// Output name for one batch entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameAssignment {
    /// Index into the batch entries.
    pub entry_index: usize,
    pub file_name: String,
    pub kind: NameKind,
}

/// Assigns output names to every entry, in batch order.
///
/// Names are unique across the batch except for later duplicates that share
/// a creation minute; those are logged as collisions.
pub fn resolve_output_names(
    entries: &[BatchEntry],
    stamps: &impl StampSource,
) -> Vec<FilenameAssignment> {
    let mut date_counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        if let Some(date) = entry.date() {
            *date_counts.entry(date.as_str()).or_default() += 1;
        }
    }

    let mut used_plain_dates: HashSet<&str> = HashSet::new();
    let mut assignments: Vec<FilenameAssignment> = entries
        .iter()
        .enumerate()
        .map(|(entry_index, entry)| {
            let stem = input_stem(&entry.file_name);
            let (file_name, kind) = match entry.date() {
                None => (format!("{stem}.csv"), NameKind::Undated),
                Some(date) => {
                    let date = date.as_str();
                    let shared = date_counts.get(date).copied().unwrap_or(0) > 1;
                    if !used_plain_dates.insert(date) && shared {
                        match stamps.stamp(&entry.file_path) {
                            Some(hhmm) => (format!("{date}_{hhmm}.csv"), NameKind::Timestamped),
                            None => {
                                warn!(
                                    file = %entry.file_name,
                                    "creation time unavailable; suffixing with input name"
                                );
                                (format!("{date}_{stem}.csv"), NameKind::SourceSuffixed)
                            }
                        }
                    } else {
                        (format!("{date}.csv"), NameKind::Plain)
                    }
                }
            };
            FilenameAssignment {
                entry_index,
                file_name,
                kind,
            }
        })
        .collect();

    disambiguate(&mut assignments, entries);

    for (name, indices) in find_collisions(&assignments) {
        let files: Vec<&str> = indices
            .iter()
            .map(|&index| entries[index].file_name.as_str())
            .collect();
        warn!(output = %name, ?files, "output name shared by several printouts");
    }

    assignments
}

/// Rank used when two kinds of name clash; the lower rank keeps the name.
fn claim_rank(kind: NameKind) -> u8 {
    match kind {
        NameKind::Plain => 0,
        NameKind::Timestamped => 1,
        NameKind::SourceSuffixed => 2,
        NameKind::Undated => 3,
    }
}

/// Renames assignments whose name is already claimed, so only same-minute
/// timestamped duplicates can still share a name.
///
/// Claims go by rank, then batch order. A losing name gets `-2`, `-3`, ...
/// before the extension, which never parses as a time suffix.
fn disambiguate(assignments: &mut [FilenameAssignment], entries: &[BatchEntry]) {
    let proposed: HashSet<String> = assignments.iter().map(|a| a.file_name.clone()).collect();
    let mut order: Vec<usize> = (0..assignments.len()).collect();
    order.sort_by_key(|&i| (claim_rank(assignments[i].kind), assignments[i].entry_index));

    let mut claimed: HashMap<String, NameKind> = HashMap::new();
    for i in order {
        let assignment = &mut assignments[i];
        match claimed.get(&assignment.file_name) {
            None => {}
            Some(NameKind::Timestamped) if assignment.kind == NameKind::Timestamped => continue,
            Some(_) => {
                let base = assignment
                    .file_name
                    .strip_suffix(".csv")
                    .unwrap_or(&assignment.file_name)
                    .to_string();
                let mut n = 2;
                let renamed = loop {
                    let candidate = format!("{base}-{n}.csv");
                    if !proposed.contains(&candidate) && !claimed.contains_key(&candidate) {
                        break candidate;
                    }
                    n += 1;
                };
                warn!(
                    file = %entries[assignment.entry_index].file_name,
                    taken = %assignment.file_name,
                    output = %renamed,
                    "output name already claimed; renamed"
                );
                assignment.file_name = renamed;
            }
        }
        claimed.insert(assignment.file_name.clone(), assignment.kind);
    }
}

/// Output names assigned to more than one entry, with the entry indices.
pub fn find_collisions(assignments: &[FilenameAssignment]) -> BTreeMap<String, Vec<usize>> {
    let mut by_name: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for assignment in assignments {
        by_name
            .entry(assignment.file_name.clone())
            .or_default()
            .push(assignment.entry_index);
    }
    by_name.retain(|_, indices| indices.len() > 1);
    by_name
}

fn input_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BuildStats;
    use qc_model::{Report, ReportDate};
    use std::path::PathBuf;

    fn entry(file_name: &str, date: Option<&str>) -> BatchEntry {
        let mut report = Report::new(file_name);
        report.set_date(date.and_then(ReportDate::from_token));
        BatchEntry {
            file_name: file_name.to_string(),
            file_path: PathBuf::from(file_name),
            report,
            stats: BuildStats::default(),
        }
    }

    fn stamp_from_name(path: &Path) -> Option<String> {
        match path.to_str()? {
            "b.txt" => Some("0930".to_string()),
            "c.txt" => Some("1415".to_string()),
            _ => None,
        }
    }

    fn names(assignments: &[FilenameAssignment]) -> Vec<&str> {
        assignments.iter().map(|a| a.file_name.as_str()).collect()
    }

    #[test]
    fn unique_dates_use_plain_names() {
        let entries = vec![entry("a.txt", Some("05/30/2025")), entry("b.txt", Some("05/31/2025"))];
        let assignments = resolve_output_names(&entries, &stamp_from_name);
        assert_eq!(names(&assignments), vec!["05_30_2025.csv", "05_31_2025.csv"]);
        assert!(assignments.iter().all(|a| a.kind == NameKind::Plain));
    }

    #[test]
    fn first_entry_keeps_plain_name_for_shared_date() {
        let entries = vec![
            entry("a.txt", Some("05/31/2025")),
            entry("b.txt", Some("05/31/2025")),
            entry("c.txt", Some("05/31/2025")),
        ];
        let assignments = resolve_output_names(&entries, &stamp_from_name);
        assert_eq!(
            names(&assignments),
            vec!["05_31_2025.csv", "05_31_2025_0930.csv", "05_31_2025_1415.csv"]
        );
        assert_eq!(assignments[1].kind, NameKind::Timestamped);
        assert!(find_collisions(&assignments).is_empty());
    }

    #[test]
    fn undated_entries_use_input_stem() {
        let entries = vec![entry("run 7.txt", None), entry("x.final.txt", None)];
        let assignments = resolve_output_names(&entries, &stamp_from_name);
        assert_eq!(names(&assignments), vec!["run 7.csv", "x.final.csv"]);
        assert_eq!(assignments[0].kind, NameKind::Undated);
    }

    #[test]
    fn missing_stamp_falls_back_to_input_stem() {
        let entries = vec![entry("a.txt", Some("05/31/2025")), entry("d.txt", Some("05/31/2025"))];
        let assignments = resolve_output_names(&entries, &stamp_from_name);
        assert_eq!(names(&assignments), vec!["05_31_2025.csv", "05_31_2025_d.csv"]);
        assert_eq!(assignments[1].kind, NameKind::SourceSuffixed);
    }

    #[test]
    fn same_minute_duplicates_are_reported_as_collisions() {
        let entries = vec![
            entry("a.txt", Some("05/31/2025")),
            entry("b.txt", Some("05/31/2025")),
            entry("b.txt", Some("05/31/2025")),
        ];
        let assignments = resolve_output_names(&entries, &stamp_from_name);
        let collisions = find_collisions(&assignments);
        assert_eq!(collisions.get("05_31_2025_0930.csv"), Some(&vec![1, 2]));
    }

    #[test]
    fn undated_stem_never_takes_a_date_name() {
        let entries = vec![entry("05_31_2025.txt", None), entry("z.txt", Some("05/31/2025"))];
        let assignments = resolve_output_names(&entries, &stamp_from_name);
        assert_eq!(names(&assignments), vec!["05_31_2025-2.csv", "05_31_2025.csv"]);
        assert_eq!(assignments[0].kind, NameKind::Undated);
        assert!(find_collisions(&assignments).is_empty());
    }

    #[test]
    fn source_suffix_yields_to_matching_stamp() {
        // 0930.txt has no stamp and falls back to its stem; b.txt is stamped 0930.
        let entries = vec![
            entry("a.txt", Some("05/31/2025")),
            entry("0930.txt", Some("05/31/2025")),
            entry("b.txt", Some("05/31/2025")),
        ];
        let assignments = resolve_output_names(&entries, &stamp_from_name);
        assert_eq!(
            names(&assignments),
            vec!["05_31_2025.csv", "05_31_2025_0930-2.csv", "05_31_2025_0930.csv"]
        );
        assert_eq!(assignments[1].kind, NameKind::SourceSuffixed);
        assert!(find_collisions(&assignments).is_empty());
    }

    #[test]
    fn file_creation_time_formats_hours_and_minutes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("p.txt");
        std::fs::write(&path, "x").unwrap();

        let stamp = FileCreationTime.stamp(&path).unwrap();
        assert_eq!(stamp.len(), 4);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        assert!(FileCreationTime.stamp(&dir.path().join("missing.txt")).is_none());
    }
}
