/// Reading the editor log while the editor still holds it open.
///
/// The running editor keeps its log locked for writing on some platforms,
/// so the file is copied to a sibling first and the copy is read. The copy
/// is always removed, even when reading it fails.
use crate::error::ReportError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Distinguishes snapshots taken by concurrent readers in one process.
static SNAPSHOT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Snapshot the log at `path` and return its text.
///
/// Invalid UTF-8 is replaced rather than rejected; the report section is
/// ASCII and other tools write arbitrary bytes into the same log.
pub fn read_editor_log(path: &Path) -> Result<String, ReportError> {
    let copy = snapshot_path(path);
    if let Err(source) = fs::copy(path, &copy) {
        remove_snapshot(&copy);
        return Err(ReportError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    debug!(from = %path.display(), to = %copy.display(), "Copied editor log");

    let read = fs::read(&copy);
    remove_snapshot(&copy);
    let bytes = read.map_err(|source| ReportError::Io { path: copy, source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Remove a snapshot that may or may not have been created.
fn remove_snapshot(copy: &Path) {
    match fs::remove_file(copy) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!(path = %copy.display(), "Could not remove log snapshot: {err}"),
    }
}

/// `Editor.log` -> `Editor.assetsleuth-<pid>-<n>.log`, next to the original.
fn snapshot_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Editor".to_string());
    let n = SNAPSHOT_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(
        "{stem}.assetsleuth-{}-{n}.log",
        std::process::id()
    ))
}
