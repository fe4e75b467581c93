//! Error types for the load-test CLI
//!
//! Failed checks are never errors: they are recorded and the run goes on.
//! These variants cover the things that stop a run from starting at all.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the load-test CLI
#[derive(Error, Debug)]
pub enum Error {
    // === Parameter Errors ===
    #[error("Test parameter '{0}' is not set. Export it (e.g. 'export {0}=http://localhost:5551') or add it to the config file")]
    MissingParameter(String),

    // === Scenario Errors ===
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Scenario name '{0}' is used more than once. Scenario names must be unique")]
    DuplicateScenario(String),

    #[error("Scenario '{name}' not found. Available: {available}")]
    ScenarioNotFound { name: String, available: String },

    // === HTTP Errors ===
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a scenario not found error listing the loaded names
    pub fn scenario_not_found<S: AsRef<str>>(name: &str, available: &[S]) -> Self {
        Self::ScenarioNotFound {
            name: name.to_string(),
            available: available
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
