use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use crate::error::{Result, TestraError};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    ProjectResolved,
    ExecutionResolved,
    /// At least one execution-scoped report has been accepted.
    Reporting,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Uninitialized => write!(f, "Uninitialized"),
            SessionPhase::ProjectResolved => write!(f, "ProjectResolved"),
            SessionPhase::ExecutionResolved => write!(f, "ExecutionResolved"),
            SessionPhase::Reporting => write!(f, "Reporting"),
        }
    }
}

/// Resolved identifiers that scope every reporting call.
///
/// The execution slot is a `Mutex` rather than a `RwLock` because its guard
/// is held across the whole check-then-create sequence. Lock order is
/// execution slot, then project id.
#[derive(Debug, Default)]
pub struct SessionState {
    project_id: RwLock<Option<String>>,
    execution_id: Mutex<Option<String>>,
    reporting: AtomicBool,
}

impl SessionState {
    pub fn project_id(&self) -> Option<String> {
        self.project_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn execution_id(&self) -> Option<String> {
        self.lock_execution().clone()
    }

    /// Store the project id. When it replaces a different id the execution
    /// id is cleared in the same critical section and `true` is returned.
    pub(crate) fn set_project_id(&self, id: String) -> bool {
        let mut execution = self.lock_execution();
        let mut slot = self
            .project_id
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let changed = slot.as_deref().is_some_and(|current| current != id);
        *slot = Some(id);
        if changed {
            *execution = None;
            self.reporting.store(false, Ordering::SeqCst);
        }
        changed
    }

    pub(crate) fn lock_execution(&self) -> MutexGuard<'_, Option<String>> {
        self.execution_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Store an externally supplied execution id, replacing any current one.
    pub(crate) fn adopt_execution(&self, id: String) {
        let mut slot = self.lock_execution();
        if slot.as_deref() != Some(id.as_str()) {
            self.reporting.store(false, Ordering::SeqCst);
        }
        *slot = Some(id);
    }

    pub(crate) fn mark_reporting(&self) {
        self.reporting.store(true, Ordering::SeqCst);
    }

    pub fn phase(&self) -> SessionPhase {
        if self.project_id().is_none() {
            return SessionPhase::Uninitialized;
        }
        if self.execution_id().is_none() {
            return SessionPhase::ProjectResolved;
        }
        if self.reporting.load(Ordering::SeqCst) {
            SessionPhase::Reporting
        } else {
            SessionPhase::ExecutionResolved
        }
    }

    pub(crate) fn require_project(&self) -> Result<String> {
        self.project_id()
            .ok_or(TestraError::SessionNotInitialized {
                missing: "project id",
            })
    }

    /// Both scoping ids, or `SessionNotInitialized` naming the first one missing.
    pub(crate) fn require_scope(&self) -> Result<(String, String)> {
        let project_id = self.require_project()?;
        let execution_id = self
            .execution_id()
            .ok_or(TestraError::SessionNotInitialized {
                missing: "execution id",
            })?;
        Ok((project_id, execution_id))
    }
}
