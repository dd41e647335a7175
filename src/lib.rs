//! Client for reporting automated test runs to a Testra test-management
//! service.
//!
//! ```no_run
//! use testra::{ClientConfig, ExecutionMetadata, HttpTransport, ResultStatus, Session, TestResultRequest};
//!
//! # fn main() -> testra::Result<()> {
//! let config = ClientConfig::new("http://testra.internal:8080", "acme").apply_env()?;
//! let transport = HttpTransport::new(&config)?;
//! let session = Session::connect(config, transport)?;
//!
//! let metadata = ExecutionMetadata::from_config(session.config());
//! session.resolve_execution(None, &metadata)?;
//! session.create_result(&TestResultRequest::new("t-1", ResultStatus::Passed))?;
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod models;
pub mod session;
pub mod transport;

pub use config::{ClientConfig, ErrorPolicy};
pub use error::{Result, TestraError};
pub use models::*;
pub use session::{Session, SessionPhase};
pub use transport::{HttpTransport, Transport, TransportError};
