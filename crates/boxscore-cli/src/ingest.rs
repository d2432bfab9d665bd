//! Batch jobs that fill the store: game logs and the reference files.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use boxscore_core::{
    parse_park_fields, parse_person_fields, parse_team_fields, split_fields, GameStore,
    ParseError, RecordParser,
};
use boxscore_store_sqlite::{SqliteGameStore, StoreError};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, Serialize, Eq, PartialEq)]
pub struct IngestReport {
    pub files: usize,
    pub unreadable_files: usize,
    pub lines: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub rejected: usize,
    pub failed: usize,
    pub recovered_fields: usize,
}

#[derive(Debug, Clone, Default, Serialize, Eq, PartialEq)]
pub struct ImportReport {
    pub kind: &'static str,
    pub read: usize,
    pub inserted: usize,
    pub failed: usize,
}

/// Every `*.txt` file directly under `dir`, sorted by path.
pub fn game_log_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read game log directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list {}", dir.display()))?
            .path();
        let is_txt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if is_txt && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Parses and inserts every game of every log file in `dir`, one line at a
/// time. A bad line or a failed insert is logged, counted and skipped.
pub fn ingest_game_logs(
    store: &impl GameStore,
    parser: &RecordParser,
    dir: &Path,
) -> Result<IngestReport> {
    Ok(ingest_game_log_files(store, parser, &game_log_files(dir)?))
}

/// Ingests `files` in order. A file that cannot be read is logged and
/// counted in `unreadable_files`; games read from it before the failure stay
/// stored.
pub fn ingest_game_log_files(
    store: &impl GameStore,
    parser: &RecordParser,
    files: &[PathBuf],
) -> IngestReport {
    let mut report = IngestReport::default();

    for path in files {
        let file = path.display().to_string();
        info!(file = %file, "Ingesting game log");
        let before = report.clone();

        let read = for_each_line(path, |line_number, line| {
            report.lines += 1;

            let parsed = match parser.parse_line(line) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(file = %file, line = line_number, error = %err, "Rejected game log line");
                    report.rejected += 1;
                    return;
                }
            };

            for field in &parsed.recovered {
                debug!(
                    file = %file,
                    line = line_number,
                    field = field.name,
                    index = field.index,
                    raw = %field.raw,
                    "Field fell back to its sentinel"
                );
            }
            report.recovered_fields += parsed.recovered.len();

            match store.insert_game(&parsed.record) {
                Ok(()) => report.inserted += 1,
                Err(err) => {
                    if let Some(StoreError::DuplicateGame(key)) = err.downcast_ref::<StoreError>() {
                        warn!(file = %file, line = line_number, game = %key, "Skipped duplicate game");
                        report.duplicates += 1;
                    } else {
                        warn!(file = %file, line = line_number, error = %format!("{err:#}"), "Failed to store game");
                        report.failed += 1;
                    }
                }
            }
        });

        if let Err(err) = read {
            warn!(file = %file, error = %format!("{err:#}"), "Skipped unreadable game log");
            report.unreadable_files += 1;
            continue;
        }

        report.files += 1;
        info!(
            file = %file,
            lines = report.lines - before.lines,
            inserted = report.inserted - before.inserted,
            skipped = (report.duplicates + report.rejected + report.failed)
                - (before.duplicates + before.rejected + before.failed),
            "Finished game log"
        );
    }

    report
}

pub fn import_teams(store: &SqliteGameStore, path: &Path) -> Result<ImportReport> {
    import_reference(path, "teams", parse_team_fields::<String>, |team| store.insert_team(team))
}

pub fn import_parks(store: &SqliteGameStore, path: &Path) -> Result<ImportReport> {
    import_reference(path, "parks", parse_park_fields::<String>, |park| store.insert_park(park))
}

pub fn import_people(store: &SqliteGameStore, path: &Path) -> Result<ImportReport> {
    import_reference(path, "people", parse_person_fields::<String>, |person| {
        store.insert_person(person)
    })
}

fn import_reference<T>(
    path: &Path,
    kind: &'static str,
    parse: impl Fn(&[String]) -> Result<T, ParseError>,
    insert: impl Fn(&T) -> Result<()>,
) -> Result<ImportReport> {
    let file = path.display().to_string();
    info!(file = %file, kind, "Importing reference data");

    let mut report = ImportReport {
        kind,
        ..ImportReport::default()
    };

    for_each_line(path, |line_number, line| {
        report.read += 1;

        let record = match split_fields(line).and_then(|fields| parse(fields.as_slice())) {
            Ok(record) => record,
            Err(err) => {
                warn!(file = %file, line = line_number, kind, error = %err, "Rejected reference line");
                report.failed += 1;
                return;
            }
        };

        match insert(&record) {
            Ok(()) => report.inserted += 1,
            Err(err) => {
                warn!(file = %file, line = line_number, kind, error = %format!("{err:#}"), "Failed to store reference row");
                report.failed += 1;
            }
        }
    })?;

    info!(
        kind,
        read = report.read,
        inserted = report.inserted,
        failed = report.failed,
        "Imported reference data"
    );
    Ok(report)
}

/// Calls `visit` with the 1-based number and text of every non-blank line.
/// Bytes that are not UTF-8 are replaced rather than failing the file.
fn for_each_line(path: &Path, mut visit: impl FnMut(usize, &str)) -> Result<()> {
    let handle = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(handle);

    for (index, chunk) in reader.split(b'\n').enumerate() {
        let bytes = chunk.with_context(|| format!("failed to read {}", path.display()))?;
        let line = String::from_utf8_lossy(&bytes);
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        visit(index + 1, line);
    }

    Ok(())
}
