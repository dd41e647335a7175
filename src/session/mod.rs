//! Session lifecycle: resolve the project, create or adopt one execution, and
//! scope every reporting call by the resolved ids.
//!
//! A [`Session`] is an explicit handle; several independent sessions can live
//! in one process. Share one across threads by reference or `Arc`.

mod lifecycle;
mod reporting;
mod state;

pub use state::{SessionPhase, SessionState};

use crate::config::ClientConfig;
use crate::transport::Transport;

pub struct Session<T: Transport> {
    config: ClientConfig,
    transport: T,
    state: SessionState,
}

impl<T: Transport> Session<T> {
    /// Create an unresolved session. Nothing is sent until
    /// [`resolve_project`](Session::resolve_project) is called.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            state: SessionState::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn project_id(&self) -> Option<String> {
        self.state.project_id()
    }

    pub fn execution_id(&self) -> Option<String> {
        self.state.execution_id()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }
}
