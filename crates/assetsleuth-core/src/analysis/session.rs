/// The caller-owned analysis session.
///
/// A [`Session`] holds one slot per [`AnalysisKind`]: a busy flag that
/// rejects re-entrant runs of the same kind, and the current snapshot. A
/// completed run swaps in a new snapshot under a single write lock, so a
/// reader sees either the old tree or the new one and never a mix. Failed or
/// cancelled runs leave the slot untouched.
///
/// Runs can block the caller ([`Session::run`]) or go to a background
/// thread ([`Session::spawn`]) that reports through a crossbeam channel and
/// an injected completion callback.
use super::runner::{analyse_assets, analyse_build_log, AssetAttributes};
use super::{AnalysisKind, AnalysisSnapshot, AnalysisTree};
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::model::attributes::{AudioAttributes, ModelAttributes, TextureAttributes};
use crate::resolver::{AttributeProvider, ProjectEnvironment};
use chrono::Local;
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Capacity of a run's event channel. A run sends `Started` and then
/// exactly one other event.
pub const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Progress of a background run.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent {
    Started(AnalysisKind),
    /// The new snapshot is already installed in the session.
    Completed {
        kind: AnalysisKind,
        rows: usize,
        skipped: usize,
        duration: Duration,
    },
    Failed {
        kind: AnalysisKind,
        message: String,
    },
    Cancelled(AnalysisKind),
}

/// Handle to a background run.
pub struct AnalysisHandle {
    /// Receiver for progress events from the worker thread.
    pub events: Receiver<AnalysisEvent>,
    kind: AnalysisKind,
    cancel: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl AnalysisHandle {
    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    /// Request the run to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Block until the worker thread has finished.
    pub fn wait(mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!(kind = self.kind.label(), "Analysis thread panicked");
            }
        }
    }
}

#[derive(Default)]
struct Slot {
    busy: AtomicBool,
    current: RwLock<Option<Arc<AnalysisSnapshot>>>,
}

type Project = (Arc<dyn ProjectEnvironment>, Arc<dyn AttributeProvider>);

struct Inner {
    config: AnalyzerConfig,
    project: Option<Project>,
    slots: [Slot; 4],
}

/// Owns the current result of every analysis kind.
///
/// Cheap to clone; clones share the same slots.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

impl Session {
    /// A session that can only run the build log analysis.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::build(config, None)
    }

    /// A session over a project, able to run every analysis.
    pub fn with_project(
        config: AnalyzerConfig,
        env: Arc<dyn ProjectEnvironment>,
        provider: Arc<dyn AttributeProvider>,
    ) -> Self {
        Self::build(config, Some((env, provider)))
    }

    fn build(config: AnalyzerConfig, project: Option<Project>) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                project,
                slots: Default::default(),
            }),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.inner.config
    }

    /// Whether a run of `kind` is in progress.
    pub fn is_busy(&self, kind: AnalysisKind) -> bool {
        self.inner.slot(kind).busy.load(Ordering::Acquire)
    }

    /// The snapshot currently displayed for `kind`, if any run completed.
    pub fn snapshot(&self, kind: AnalysisKind) -> Option<Arc<AnalysisSnapshot>> {
        self.inner.slot(kind).current.read().clone()
    }

    /// Run `kind` on the calling thread and install the result.
    pub fn run(&self, kind: AnalysisKind) -> Result<Arc<AnalysisSnapshot>, AnalysisError> {
        let guard = BusyGuard::acquire(&self.inner, kind)?;
        self.inner.execute(&guard, &AtomicBool::new(false))
    }

    /// Run `kind` on a background thread.
    ///
    /// Fails immediately with [`AnalysisError::Busy`] if `kind` is already
    /// running. `on_complete` is called on the worker thread after the
    /// session has been updated (or left alone on failure).
    pub fn spawn<F>(
        &self,
        kind: AnalysisKind,
        on_complete: F,
    ) -> Result<AnalysisHandle, AnalysisError>
    where
        F: FnOnce(Result<Arc<AnalysisSnapshot>, AnalysisError>) + Send + 'static,
    {
        let guard = BusyGuard::acquire(&self.inner, kind)?;
        let (tx, rx) = bounded::<AnalysisEvent>(EVENT_CHANNEL_CAPACITY);
        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_clone = Arc::clone(&cancel);
        let inner = Arc::clone(&self.inner);

        let thread = thread::Builder::new()
            .name(format!("assetsleuth-{}", kind.id()))
            .spawn(move || {
                let _ = tx.send(AnalysisEvent::Started(kind));
                let start = Instant::now();
                let result = inner.execute(&guard, &cancel_clone);
                // Release before notifying so the callback may start a new run.
                drop(guard);
                send_outcome(&tx, kind, &result, start.elapsed());
                on_complete(result);
            })
            .map_err(AnalysisError::Thread)?;

        Ok(AnalysisHandle {
            events: rx,
            kind,
            cancel,
            thread: Some(thread),
        })
    }

    /// Reorder the current `kind` snapshot by `column`.
    ///
    /// Readers holding the previous `Arc` keep their order; the slot gets a
    /// re-sorted copy.
    pub fn sort(
        &self,
        kind: AnalysisKind,
        column: &str,
        ascending: bool,
    ) -> Result<(), AnalysisError> {
        let mut current = self.inner.slot(kind).current.write();
        let snapshot = current.as_mut().ok_or(AnalysisError::NoResults(kind))?;
        let mut sorted = (**snapshot).clone();
        if !sorted.tree.sort(column, ascending) {
            return Err(AnalysisError::UnknownColumn {
                kind,
                column: column.to_string(),
            });
        }
        *snapshot = Arc::new(sorted);
        Ok(())
    }

    /// Project path of row `id` in the current `kind` snapshot.
    pub fn path_for(&self, kind: AnalysisKind, id: i32) -> Option<String> {
        let current = self.inner.slot(kind).current.read();
        current
            .as_ref()
            .and_then(|s| s.tree.path_of(id))
            .map(str::to_string)
    }
}

impl Inner {
    fn slot(&self, kind: AnalysisKind) -> &Slot {
        &self.slots[kind.slot()]
    }

    /// Compute `guard`'s kind and install the result.
    fn execute(
        &self,
        guard: &BusyGuard,
        cancel: &AtomicBool,
    ) -> Result<Arc<AnalysisSnapshot>, AnalysisError> {
        let kind = guard.kind;
        let (mut tree, skipped) = match kind {
            AnalysisKind::Textures => self.assets::<TextureAttributes>(cancel)?,
            AnalysisKind::Audio => self.assets::<AudioAttributes>(cancel)?,
            AnalysisKind::Models => self.assets::<ModelAttributes>(cancel)?,
            AnalysisKind::BuildLog => (
                AnalysisTree::BuildLog(analyse_build_log(&self.config, cancel)?),
                Vec::new(),
            ),
        };

        let mut current = self.slot(kind).current.write();
        if let Some(previous) = current.as_ref() {
            tree.carry_sort_from(&previous.tree);
        }
        let snapshot = Arc::new(AnalysisSnapshot {
            tree,
            completed_at: Local::now(),
            skipped,
        });
        *current = Some(Arc::clone(&snapshot));
        debug!(
            kind = kind.label(),
            rows = snapshot.tree.len(),
            "Installed new snapshot"
        );
        Ok(snapshot)
    }

    fn assets<A: AssetAttributes>(
        &self,
        cancel: &AtomicBool,
    ) -> Result<(AnalysisTree, Vec<String>), AnalysisError> {
        let (env, provider) = self
            .project
            .as_ref()
            .ok_or(AnalysisError::NoProject(A::KIND))?;
        let report =
            analyse_assets::<A>(env.as_ref(), provider.as_ref(), &self.config, cancel)?;
        Ok((A::into_tree(report.tree), report.skipped))
    }
}

/// Holds a slot's busy flag for the lifetime of one run.
struct BusyGuard {
    inner: Arc<Inner>,
    kind: AnalysisKind,
}

impl BusyGuard {
    fn acquire(inner: &Arc<Inner>, kind: AnalysisKind) -> Result<Self, AnalysisError> {
        inner
            .slot(kind)
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AnalysisError::Busy(kind))?;
        Ok(Self {
            inner: Arc::clone(inner),
            kind,
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.inner.slot(self.kind).busy.store(false, Ordering::Release);
    }
}

fn send_outcome(
    tx: &Sender<AnalysisEvent>,
    kind: AnalysisKind,
    result: &Result<Arc<AnalysisSnapshot>, AnalysisError>,
    duration: Duration,
) {
    let event = match result {
        Ok(snapshot) => {
            info!(
                kind = kind.label(),
                rows = snapshot.tree.len(),
                "Background analysis complete"
            );
            AnalysisEvent::Completed {
                kind,
                rows: snapshot.tree.len(),
                skipped: snapshot.skipped.len(),
                duration,
            }
        }
        Err(AnalysisError::Cancelled(_)) => AnalysisEvent::Cancelled(kind),
        Err(err) => {
            warn!(kind = kind.label(), "Background analysis failed: {err}");
            AnalysisEvent::Failed {
                kind,
                message: err.to_string(),
            }
        }
    };
    let _ = tx.send(event);
}
