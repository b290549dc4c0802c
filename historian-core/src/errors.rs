use thiserror::Error;

/// Result type used across the historian crates.
pub type Result<T> = std::result::Result<T, HistorianError>;

/// Canonical error returned by the alert state query path.
///
/// Every variant is terminal for the request; nothing here is retried.
#[derive(Debug, Error)]
pub enum HistorianError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Engine(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Config(String),
}

impl HistorianError {
    /// HTTP status code reported to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            HistorianError::Unauthenticated => 401,
            HistorianError::BadRequest(_) => 400,
            HistorianError::Engine(_) | HistorianError::Schema(_) | HistorianError::Config(_) => {
                500
            }
        }
    }

    /// Plain-text message exposed to the caller.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn engine<M: Into<String>>(message: M) -> Self {
        HistorianError::Engine(message.into())
    }
}

impl From<serde_json::Error> for HistorianError {
    fn from(err: serde_json::Error) -> Self {
        HistorianError::BadRequest(err.to_string())
    }
}

/// Structural mismatch between the engine's frame and the two-column contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("no Line field found in historian query response")]
    MissingLineField,

    #[error("no Time field found in historian query response")]
    MissingTimeField,

    #[error(
        "log Time field not a time.Time in historian query response (row {row}, found {found})"
    )]
    TimeFieldType { row: usize, found: &'static str },

    #[error("log Line field not a string in historian query response (row {row}, found {found})")]
    LineFieldType { row: usize, found: &'static str },
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {key}: {value:?}")]
    InvalidEnvVar { key: String, value: String },
}

impl From<ConfigError> for HistorianError {
    fn from(value: ConfigError) -> Self {
        HistorianError::Config(value.to_string())
    }
}
