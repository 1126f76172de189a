// Orchestration state
//
// OrchestrationContext owns the applied-tweak ledger and the last backup
// reference, serializes apply/restore runs, and broadcasts notifications.

mod ledger;

pub use ledger::{LEDGER_FILE_NAME, LedgerError, LedgerStore};

use crate::metrics::Metrics;
use crate::models::{BackupArtifact, MAX_CONCURRENT_ORCHESTRATIONS, Scope, Tier};
use crate::services::backup::{BackupError, SnapshotOutcome};
use indexmap::IndexSet;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, broadcast};
use tokio::task::JoinHandle;

/// Kind of run holding the orchestration permit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Apply(Tier),
    Restore,
    Backup,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Apply(tier) => write!(f, "apply ({})", tier),
            Operation::Restore => f.write_str("restore"),
            Operation::Backup => f.write_str("backup"),
        }
    }
}

/// Events broadcast to subscribers.
///
/// Background tasks report through these instead of touching caller state.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    OperationStarted {
        operation: Operation,
    },

    /// A tweak's action was run; `failed_commands` of its commands did not succeed
    TweakDispatched {
        id: String,
        name: String,
        failed_commands: usize,
    },

    OperationFinished {
        operation: Operation,
    },

    LedgerChanged {
        ledger: Vec<String>,
    },

    /// One scope was exported by a background snapshot
    BackupCompleted {
        artifact: BackupArtifact,
    },

    BackupFailed {
        scope: Scope,
        detail: String,
    },

    /// The last backup reference moved to `artifact`
    BackupRecorded {
        artifact: BackupArtifact,
    },

    RestorePointCreated,

    RestorePointFailed {
        detail: String,
    },

    /// A ledger entry had no inverse and was left to the baseline reset
    InverseMissing {
        id: String,
    },
}

#[derive(Error, Debug)]
pub enum OrchestrationError {
    #[error("Another operation is already running: {0}")]
    Busy(Operation),

    #[error("Unknown tweak: {0}")]
    UnknownTweak(String),

    #[error(transparent)]
    BackupIo(#[from] BackupError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Cloneable sending half of the notification channel
#[derive(Clone, Debug)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
    metrics: Arc<Metrics>,
}

impl Notifier {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { tx, metrics }
    }

    pub fn send(&self, notification: Notification) {
        self.metrics.record_notification();
        // Ignore send errors - it's OK if no one is listening
        let _ = self.tx.send(notification);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

/// Plain data guarded by [`OrchestrationContext`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrchestrationState {
    /// Identifiers of tweaks currently in effect, in first-applied order
    pub ledger: IndexSet<String>,

    pub last_backup: Option<BackupArtifact>,

    /// Run currently holding the permit
    pub active: Option<Operation>,
}

#[derive(Debug)]
struct Shared {
    state: RwLock<OrchestrationState>,
    pending_backup: Mutex<Option<JoinHandle<SnapshotOutcome>>>,
    ledger_store: Mutex<Option<LedgerStore>>,
    notifier: Notifier,
}

impl Shared {
    fn read(&self) -> RwLockReadGuard<'_, OrchestrationState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, OrchestrationState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `update_fn`, then broadcast whatever it changed
    fn update<F>(&self, update_fn: F) -> Vec<Notification>
    where
        F: FnOnce(&mut OrchestrationState),
    {
        let mut state = self.write();
        self.update_locked(&mut state, update_fn)
    }

    /// [`update`](Self::update) for a caller already holding the write lock
    fn update_locked<F>(&self, state: &mut OrchestrationState, update_fn: F) -> Vec<Notification>
    where
        F: FnOnce(&mut OrchestrationState),
    {
        let old_state = state.clone();

        update_fn(state);

        let changes = detect_changes(&old_state, state);
        for change in &changes {
            self.notifier.send(change.clone());
        }

        changes
    }

    fn ledger_store(&self) -> Option<LedgerStore> {
        self.ledger_store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn detect_changes(old: &OrchestrationState, new: &OrchestrationState) -> Vec<Notification> {
    let mut changes = Vec::new();

    if let (None, Some(operation)) = (old.active, new.active) {
        changes.push(Notification::OperationStarted { operation });
    }

    if old.ledger != new.ledger {
        changes.push(Notification::LedgerChanged {
            ledger: new.ledger.iter().cloned().collect(),
        });
    }

    if old.last_backup != new.last_backup {
        if let Some(artifact) = &new.last_backup {
            changes.push(Notification::BackupRecorded {
                artifact: artifact.clone(),
            });
        }
    }

    if let (Some(operation), None) = (old.active, new.active) {
        changes.push(Notification::OperationFinished { operation });
    }

    changes
}

/// Explicit owner of the mutable orchestration state.
///
/// One context is created per optimizer handle and shared by cloning.
/// Reading is always allowed; every mutation goes through an
/// [`OperationGuard`], and at most [`MAX_CONCURRENT_ORCHESTRATIONS`] guards
/// exist at a time. Starting a run while another is active fails with
/// [`OrchestrationError::Busy`] rather than waiting.
///
/// Only apply and restore runs get a [`LedgerGuard`], the one handle that
/// can change the ledger.
#[derive(Clone, Debug)]
pub struct OrchestrationContext {
    shared: Arc<Shared>,
    permits: Arc<Semaphore>,
}

impl OrchestrationContext {
    pub fn new() -> Self {
        Self::with_metrics(Arc::new(Metrics::new()))
    }

    pub fn with_metrics(metrics: Arc<Metrics>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(OrchestrationState::default()),
                pending_backup: Mutex::new(None),
                ledger_store: Mutex::new(None),
                notifier: Notifier::new(metrics),
            }),
            permits: Arc::new(Semaphore::new(MAX_CONCURRENT_ORCHESTRATIONS)),
        }
    }

    /// Start an apply run at `tier`
    pub fn begin_apply(&self, tier: Tier) -> Result<LedgerGuard, OrchestrationError> {
        Ok(LedgerGuard {
            guard: self.begin(Operation::Apply(tier))?,
        })
    }

    /// Start a restore run
    pub fn begin_restore(&self) -> Result<LedgerGuard, OrchestrationError> {
        Ok(LedgerGuard {
            guard: self.begin(Operation::Restore)?,
        })
    }

    /// Start a backup run, which may record backups but not touch the ledger
    pub fn begin_backup(&self) -> Result<OperationGuard, OrchestrationError> {
        self.begin(Operation::Backup)
    }

    /// Take the orchestration permit for `operation`.
    ///
    /// The permit and `active` only change together under the state write
    /// lock, so a rejected caller always sees the run that holds the permit.
    fn begin(&self, operation: Operation) -> Result<OperationGuard, OrchestrationError> {
        let mut state = self.shared.write();

        if let Some(active) = state.active {
            tracing::warn!("Rejected {}: {} is still running", operation, active);
            return Err(OrchestrationError::Busy(active));
        }
        // Free whenever `active` is None
        let permit = Arc::clone(&self.permits)
            .try_acquire_owned()
            .map_err(|_| OrchestrationError::Busy(operation))?;

        self.shared
            .update_locked(&mut state, |state| state.active = Some(operation));
        drop(state);
        tracing::info!("Started {}", operation);

        Ok(OperationGuard {
            shared: Arc::clone(&self.shared),
            operation,
            permit: Some(permit),
        })
    }

    /// Persist the ledger through `store` from now on.
    ///
    /// Entries already in the store are loaded first, ahead of anything
    /// tracked in memory. Fails with [`OrchestrationError::Busy`] during a run.
    pub fn attach_ledger(&self, store: LedgerStore) -> Result<(), OrchestrationError> {
        let stored = store.load()?;

        let mut state = self.shared.write();
        if let Some(active) = state.active {
            return Err(OrchestrationError::Busy(active));
        }
        self.shared.update_locked(&mut state, |state| {
            let mut ledger = stored;
            ledger.extend(state.ledger.drain(..));
            state.ledger = ledger;
        });

        *self
            .shared
            .ledger_store
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(store);
        Ok(())
    }

    pub fn snapshot(&self) -> OrchestrationState {
        self.shared.read().clone()
    }

    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrchestrationState) -> R,
    {
        let state = self.shared.read();
        f(&state)
    }

    pub fn ledger(&self) -> Vec<String> {
        self.read(|state| state.ledger.iter().cloned().collect())
    }

    pub fn last_backup(&self) -> Option<BackupArtifact> {
        self.read(|state| state.last_backup.clone())
    }

    pub fn is_busy(&self) -> bool {
        self.permits.available_permits() == 0
    }

    /// A background snapshot has been started and not yet reconciled
    pub fn has_pending_backup(&self) -> bool {
        self.shared
            .pending_backup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.shared.notifier
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.shared.notifier.subscribe()
    }
}

impl Default for OrchestrationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof of holding the orchestration permit.
///
/// The ledger and the last backup reference can only be changed through a
/// guard. Dropping the guard ends the run and releases the permit.
#[derive(Debug)]
pub struct OperationGuard {
    shared: Arc<Shared>,
    operation: Operation,
    permit: Option<OwnedSemaphorePermit>,
}

impl OperationGuard {
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn ledger(&self) -> Vec<String> {
        self.shared.read().ledger.iter().cloned().collect()
    }

    pub fn record_backup(&self, artifact: BackupArtifact) {
        self.shared.update(|state| state.last_backup = Some(artifact));
    }

    /// Track a background snapshot so a later run can record its result.
    ///
    /// An earlier snapshot that is still unreconciled is replaced; its
    /// artifacts stay on disk but are not recorded.
    pub fn track_backup(&self, handle: JoinHandle<SnapshotOutcome>) {
        let previous = self
            .shared
            .pending_backup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if previous.is_some() {
            tracing::debug!("Replaced an unreconciled backup snapshot");
        }
    }

    /// Record the result of a finished background snapshot, if any.
    ///
    /// Never waits: a snapshot still running stays pending. Returns the
    /// newly recorded artifact.
    pub async fn reconcile_backup(&self) -> Option<BackupArtifact> {
        let handle = {
            let mut pending = self
                .shared
                .pending_backup
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let finished = pending.as_ref().is_some_and(JoinHandle::is_finished);
            if finished { pending.take() } else { None }
        }?;

        self.record_snapshot(handle).await
    }

    /// Wait for the tracked snapshot, if any, and record its result
    pub async fn wait_for_backup(&self) -> Option<BackupArtifact> {
        let handle = self
            .shared
            .pending_backup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;

        self.record_snapshot(handle).await
    }

    async fn record_snapshot(&self, handle: JoinHandle<SnapshotOutcome>) -> Option<BackupArtifact> {
        match handle.await {
            Ok(outcome) => {
                let artifact = outcome.preferred()?.clone();
                self.record_backup(artifact.clone());
                Some(artifact)
            }
            Err(e) => {
                tracing::error!("Backup task did not complete: {}", e);
                None
            }
        }
    }
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        let mut state = self.shared.write();
        self.shared
            .update_locked(&mut state, |state| state.active = None);
        drop(self.permit.take());
        drop(state);
        tracing::info!("Finished {}", self.operation);
    }
}

/// [`OperationGuard`] of an apply or restore run, which may also change the
/// ledger. Every change is written to the attached [`LedgerStore`], if any.
#[derive(Debug)]
pub struct LedgerGuard {
    guard: OperationGuard,
}

impl LedgerGuard {
    /// Add `id` to the ledger. Returns false if it was already present.
    pub async fn record_applied(&self, id: &str) -> bool {
        if self.guard.shared.read().ledger.contains(id) {
            return false;
        }
        self.guard.shared.update(|state| {
            state.ledger.insert(id.to_string());
        });
        self.persist().await;
        true
    }

    pub async fn clear_ledger(&self) {
        self.guard.shared.update(|state| state.ledger.clear());
        self.persist().await;
    }

    async fn persist(&self) {
        let Some(store) = self.guard.shared.ledger_store() else {
            return;
        };
        let ledger = self.guard.shared.read().ledger.clone();
        if let Err(e) = store.save(&ledger).await {
            tracing::error!("{}", e);
        }
    }
}

impl Deref for LedgerGuard {
    type Target = OperationGuard;

    fn deref(&self) -> &OperationGuard {
        &self.guard
    }
}
