//! Error types for the Testra client.
//!
//! Resolution failures (project, execution) represent misconfiguration and are
//! always surfaced. Whether failures from soft telemetry calls propagate is
//! decided by [`ErrorPolicy`](crate::config::ErrorPolicy).

use thiserror::Error;

use crate::transport::TransportError;

pub type Result<T> = std::result::Result<T, TestraError>;

#[derive(Debug, Error)]
pub enum TestraError {
    /// The service answered 404 for a project lookup.
    #[error("Project '{name}' not found in Testra")]
    ProjectNotFound { name: String },

    /// The service answered 404 for an execution lookup while adopting an id.
    #[error("Execution (id:{execution_id}) not found in Testra")]
    ExecutionNotFound { execution_id: String },

    #[error("Error creating execution: {message}")]
    ExecutionCreationFailed {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    #[error("Result (id:{result_id}) not found in execution {execution_id}")]
    ResultNotFound {
        result_id: String,
        execution_id: String,
    },

    /// Non-2xx response; `body` is the service's error payload.
    #[error("Remote call '{operation}' failed with HTTP {status}: {body}")]
    RemoteCallFailed {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// No usable response was obtained.
    #[error("Transport error during '{operation}': {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: TransportError,
    },

    /// The reachability probe got no response at all.
    #[error("Testra api url ({api_url}) is not reachable: {source}")]
    Unreachable {
        api_url: String,
        #[source]
        source: TransportError,
    },

    /// A reporting call was issued before the session was resolved.
    #[error("Session not initialized: {missing} is not set")]
    SessionNotInitialized { missing: &'static str },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl TestraError {
    /// Translate a transport failure for `operation` into the generic taxonomy.
    ///
    /// Lookups that have a domain-specific "not found" meaning map 404s
    /// themselves before falling back to this.
    pub fn from_transport(operation: &'static str, err: TransportError) -> Self {
        match err {
            TransportError::Status { status, body } => TestraError::RemoteCallFailed {
                operation,
                status,
                body,
            },
            source => TestraError::Transport { operation, source },
        }
    }

    /// Check if this is one of the "not found" variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TestraError::ProjectNotFound { .. }
                | TestraError::ExecutionNotFound { .. }
                | TestraError::ResultNotFound { .. }
        )
    }
}
