/// Default name of the file that carries the execution id between CI steps.
pub const DEFAULT_EXEC_FILE: &str = "testra.exec";

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "testra.toml";

/// Path prefix for every Testra REST resource.
pub const API_PREFIX: &str = "/api/v1";

/// Seconds allowed to establish a TCP connection to the service.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Seconds allowed for a whole request (connection + transfer).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Host name reported when the local one cannot be determined.
pub const UNKNOWN_HOST: &str = "unknown-host";

/// Environment variables read by [`ClientConfig::apply_env`](crate::config::ClientConfig::apply_env).
pub mod env {
    pub const API_URL: &str = "TESTRA_API_URL";
    pub const PROJECT: &str = "TESTRA_PROJECT";
    pub const BRANCH: &str = "TESTRA_BRANCH";
    pub const ENVIRONMENT: &str = "TESTRA_ENVIRONMENT";
    pub const BUILD_REF: &str = "TESTRA_BUILD_REF";
    pub const EXECUTION_DESCRIPTION: &str = "TESTRA_EXECUTION_DESCRIPTION";
    pub const DEBUG: &str = "TESTRA_DEBUG";
    pub const ERROR_POLICY: &str = "TESTRA_ERROR_POLICY";
    /// Full `EnvFilter` directive; overrides the debug toggle.
    pub const LOG: &str = "TESTRA_LOG";
}
