/// End-to-end tests of the build log analysis through a `Session`.
///
/// The editor log lives in a temporary directory and is read the same way
/// as a real one (copy, read, delete). Covers snapshot replacement,
/// failure isolation, and background runs reporting over the channel.
use assetsleuth_core::analysis::{AnalysisEvent, AnalysisKind, AnalysisTree, Session};
use assetsleuth_core::config::AnalyzerConfig;
use assetsleuth_core::error::{AnalysisError, ReportError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn report(lines: &[&str]) -> String {
    let mut text = String::from(
        "Refreshing native plugins\n\
-------------------------------------------------------------------------------\n\
Build Report\n\
Uncompressed usage by category (Percentages based on user generated assets only):\n\
Textures               1.4 mb\t 70.0% \n\
\n\
Used Assets and files from the Resources folder, sorted by uncompressed size:\n",
    );
    for line in lines {
        text.push(' ');
        text.push_str(line);
        text.push('\n');
    }
    text.push_str("-------------------------------------------------------------------------------\n");
    text
}

fn log_session(dir: &TempDir, content: &str) -> (Session, PathBuf) {
    let log = dir.path().join("Editor.log");
    fs::write(&log, content).unwrap();
    let config = AnalyzerConfig {
        editor_log: Some(log.clone()),
        ..AnalyzerConfig::default()
    };
    (Session::new(config), log)
}

fn paths(session: &Session) -> Vec<String> {
    let snapshot = session.snapshot(AnalysisKind::BuildLog).unwrap();
    let AnalysisTree::BuildLog(tree) = &snapshot.tree else {
        panic!("expected a build log tree");
    };
    tree.row_elements()
        .map(|e| e.data.file_path.clone())
        .collect()
}

fn only_log_left(dir: &Path) {
    let names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Editor.log"]);
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn parses_the_latest_report_from_disk() {
    let dir = TempDir::new().unwrap();
    let old = report(&["9.0 mb\t 90.0% Assets/Old/huge.png"]);
    let new = report(&[
        "1.0 mb\t 50.0% Assets/Textures/a.png",
        "12.3 kb\t 4.5% Assets/Textures/b.png",
        "3.0 kb\t 0.1% Packages/com.unity.ui/p.png",
    ]);
    let (session, _log) = log_session(&dir, &format!("{old}Rebuilding\n{new}"));

    let snapshot = session.run(AnalysisKind::BuildLog).unwrap();
    assert_eq!(snapshot.kind(), AnalysisKind::BuildLog);
    assert_eq!(paths(&session), vec!["Assets/Textures/a.png", "Assets/Textures/b.png"]);
    assert!(snapshot.skipped.is_empty());
    only_log_left(dir.path());
}

#[test]
fn failed_refresh_keeps_the_previous_tree() {
    let dir = TempDir::new().unwrap();
    let (session, log) = log_session(&dir, &report(&["1.0 kb\t 1.0% Assets/a.png"]));
    let first = session.run(AnalysisKind::BuildLog).unwrap();

    fs::write(&log, report(&["one kb\t 1.0% Assets/a.png"])).unwrap();
    let err = session.run(AnalysisKind::BuildLog).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::Report(ReportError::MalformedLine { .. })
    ));
    let current = session.snapshot(AnalysisKind::BuildLog).unwrap();
    assert!(Arc::ptr_eq(&first, &current));

    fs::remove_file(&log).unwrap();
    assert!(matches!(
        session.run(AnalysisKind::BuildLog),
        Err(AnalysisError::Report(ReportError::Io { .. }))
    ));
    assert!(Arc::ptr_eq(
        &first,
        &session.snapshot(AnalysisKind::BuildLog).unwrap()
    ));
    assert!(!session.is_busy(AnalysisKind::BuildLog));
}

#[test]
fn refresh_replaces_rows_and_keeps_the_sort() {
    let dir = TempDir::new().unwrap();
    let (session, log) = log_session(
        &dir,
        &report(&["1.0 kb\t 1.0% Assets/a.png", "2.0 kb\t 2.0% Assets/b.png"]),
    );
    session.run(AnalysisKind::BuildLog).unwrap();
    session.sort(AnalysisKind::BuildLog, "size", false).unwrap();
    assert_eq!(paths(&session), vec!["Assets/b.png", "Assets/a.png"]);

    fs::write(
        &log,
        report(&["1.0 kb\t 1.0% Assets/a.png", "1.0 mb\t 90.0% Assets/c.png"]),
    )
    .unwrap();
    session.run(AnalysisKind::BuildLog).unwrap();
    assert_eq!(paths(&session), vec!["Assets/c.png", "Assets/a.png"]);
}

#[test]
fn background_run_reports_and_calls_back() {
    let dir = TempDir::new().unwrap();
    let (session, _log) = log_session(&dir, &report(&["1.0 kb\t 1.0% Assets/a.png"]));

    let (done_tx, done_rx) = crossbeam_channel::bounded(1);
    let handle = session
        .spawn(AnalysisKind::BuildLog, move |result| {
            let _ = done_tx.send(result.map(|s| s.tree.len()));
        })
        .unwrap();
    assert_eq!(handle.kind(), AnalysisKind::BuildLog);

    let deadline = Instant::now() + Duration::from_secs(30);
    let mut events = Vec::new();
    while !matches!(events.last(), Some(AnalysisEvent::Completed { .. })) {
        assert!(Instant::now() < deadline, "analysis did not complete in time");
        match handle.events.recv_timeout(Duration::from_millis(100)) {
            Ok(AnalysisEvent::Failed { message, .. }) => panic!("analysis failed: {message}"),
            Ok(event) => events.push(event),
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                panic!("event channel closed before completion")
            }
        }
    }
    assert_eq!(events.first(), Some(&AnalysisEvent::Started(AnalysisKind::BuildLog)));

    let rows = done_rx
        .recv_timeout(Duration::from_secs(30))
        .unwrap()
        .unwrap();
    assert_eq!(rows, 1);
    handle.wait();

    assert_eq!(paths(&session), vec!["Assets/a.png"]);
    assert!(!session.is_busy(AnalysisKind::BuildLog));
}

#[test]
fn asset_kinds_need_a_project() {
    let dir = TempDir::new().unwrap();
    let (session, _log) = log_session(&dir, &report(&[]));
    assert!(matches!(
        session.run(AnalysisKind::Textures),
        Err(AnalysisError::NoProject(AnalysisKind::Textures))
    ));
    assert!(session.run(AnalysisKind::BuildLog).unwrap().tree.is_empty());
}
