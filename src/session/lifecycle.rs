use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use super::Session;
use crate::config::{ClientConfig, ErrorPolicy};
use crate::error::{Result, TestraError};
use crate::fs::write_execution_id;
use crate::models::ExecutionMetadata;
use crate::transport::{Transport, TransportError};

impl<T: Transport> Session<T> {
    /// Validate the configuration, check the service is reachable and resolve
    /// the configured project.
    pub fn connect(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let session = Self::new(config, transport);
        session.check_reachable()?;
        let project = session.config.project.clone();
        session.resolve_project(&project)?;
        Ok(session)
    }

    /// Probe the service. Only a failure to get any response counts as
    /// unreachable; an error status still proves the host is up.
    pub fn check_reachable(&self) -> Result<()> {
        match self.transport.counters() {
            Ok(counters) => {
                debug!(
                    projects = counters.projects_count,
                    executions = counters.executions_count,
                    "testra reachable"
                );
                Ok(())
            }
            Err(source @ TransportError::Network { .. }) => Err(TestraError::Unreachable {
                api_url: self.config.api_url.clone(),
                source,
            }),
            Err(err) => {
                warn!(error = %err, "testra counters probe failed, continuing");
                Ok(())
            }
        }
    }

    /// Resolve `name` to the project's durable id and store it.
    ///
    /// Replaces any previously stored id. If the id changes, the stored
    /// execution id is cleared since it belonged to the previous project.
    /// On failure the session is left untouched.
    pub fn resolve_project(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TestraError::InvalidArgument(
                "project name must not be empty".to_string(),
            ));
        }

        let project = self.transport.get_project(name).map_err(|err| {
            if err.is_not_found() {
                error!(project = name, "no project found with this name");
                TestraError::ProjectNotFound {
                    name: name.to_string(),
                }
            } else {
                TestraError::from_transport("get_project", err)
            }
        })?;

        self.store_project(name, project.id.clone());
        Ok(project.id)
    }

    /// Resolve `name` by listing all projects and matching the name exactly.
    /// For services that only expose project lookup by id.
    pub fn resolve_project_from_list(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TestraError::InvalidArgument(
                "project name must not be empty".to_string(),
            ));
        }

        let projects = self
            .transport
            .list_projects()
            .map_err(|err| TestraError::from_transport("list_projects", err))?;

        let Some(project) = projects.into_iter().find(|p| p.name == name) else {
            error!(project = name, "no project found with this name");
            return Err(TestraError::ProjectNotFound {
                name: name.to_string(),
            });
        };

        self.store_project(name, project.id.clone());
        Ok(project.id)
    }

    fn store_project(&self, name: &str, id: String) {
        info!(project = name, project_id = %id, "project resolved");
        if self.state.set_project_id(id) {
            warn!(project = name, "project changed, discarded previous execution id");
        }
    }

    /// Adopt `execution_id` when given, otherwise create the run's execution
    /// exactly once.
    ///
    /// Creation holds the execution slot for the whole check-then-create
    /// sequence: concurrent callers issue a single create call and all
    /// observe the same id. Once an id is stored, further calls without an
    /// explicit id return it without contacting the service.
    pub fn resolve_execution(
        &self,
        execution_id: Option<&str>,
        metadata: &ExecutionMetadata,
    ) -> Result<String> {
        match execution_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => self.adopt_execution(id),
            None => self.create_execution(metadata),
        }
    }

    fn adopt_execution(&self, execution_id: &str) -> Result<String> {
        let project_id = self.state.require_project()?;

        if self.config.verify_adopted_execution {
            match self.transport.get_execution(&project_id, execution_id) {
                Ok(_) => debug!(execution_id, "adopted execution verified"),
                Err(err) if err.is_not_found() => {
                    error!(execution_id, "execution to adopt not found");
                    return Err(TestraError::ExecutionNotFound {
                        execution_id: execution_id.to_string(),
                    });
                }
                Err(err) => {
                    let err = TestraError::from_transport("get_execution", err);
                    match self.config.error_policy {
                        ErrorPolicy::Strict => return Err(err),
                        ErrorPolicy::Lenient => {
                            warn!(execution_id, error = %err, "could not verify execution, adopting unverified")
                        }
                    }
                }
            }
        }

        self.state.adopt_execution(execution_id.to_string());
        info!(execution_id, "execution adopted");
        Ok(execution_id.to_string())
    }

    fn create_execution(&self, metadata: &ExecutionMetadata) -> Result<String> {
        // project is read under the slot lock so a concurrent project switch
        // cannot pair the new execution with the old project
        let mut slot = self.state.lock_execution();
        let project_id = self.state.require_project()?;
        if let Some(existing) = slot.as_ref() {
            debug!(execution_id = %existing, "execution already resolved");
            return Ok(existing.clone());
        }

        let request = metadata.to_request();
        let execution = self
            .transport
            .create_execution(&project_id, &request)
            .map_err(|err| {
                error!(error = %err, "error creating execution");
                TestraError::ExecutionCreationFailed {
                    message: err.to_string(),
                    source: Some(err),
                }
            })?;

        if execution.id.trim().is_empty() {
            error!("service returned an execution without an id");
            return Err(TestraError::ExecutionCreationFailed {
                message: "service returned an empty execution id".to_string(),
                source: None,
            });
        }

        info!(execution_id = %execution.id, host = %request.host, "execution created");
        *slot = Some(execution.id.clone());
        Ok(execution.id)
    }

    /// Write the resolved execution id to the configured exec file.
    pub fn write_execution_file(&self) -> Result<PathBuf> {
        let execution_id = self
            .state
            .execution_id()
            .ok_or(TestraError::SessionNotInitialized {
                missing: "execution id",
            })?;
        let path = self.config.exec_file.clone();
        write_execution_id(&path, &execution_id)?;
        Ok(path)
    }
}
