use phid_types::{Phid, PhidType, PhidTypeError};

/// Failures surfaced to callers of the resolver.
///
/// Missing objects are never errors: they resolve to placeholder handles. Store
/// failures are absorbed per type group. What remains are wiring problems.
#[derive(Debug, thiserror::Error)]
pub enum HandleError {
    #[error("no loader factory registered for kind '{kind}' (configured for '{key}')")]
    UnknownLoader { key: String, kind: String },
    #[error("external loader '{kind}' configured for '{key}' is invalid: {reason}")]
    InvalidLoader {
        key: String,
        kind: String,
        reason: String,
    },
    #[error("invalid external loader key '{key}': {source}")]
    InvalidLoaderKey {
        key: String,
        #[source]
        source: PhidTypeError,
    },
    #[error("external loader config for '{0}' must be a string or a table")]
    InvalidLoaderEntry(String),
    #[error("handler '{name}' declares type {phid_type} already owned by '{existing}'")]
    DuplicateHandler {
        name: &'static str,
        phid_type: PhidType,
        existing: &'static str,
    },
    #[error("no handle was produced for {0}")]
    MissingHandle(Phid),
    #[error("failed to read configuration file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

pub type HandleResult<T> = Result<T, HandleError>;
