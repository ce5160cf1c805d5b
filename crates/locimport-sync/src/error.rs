use locimport_ingest::DecodeError;
use locimport_storage::StorageError;

/// Reasons a run fails. Stopping is not one of them.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to open location input {input}: {source}")]
    Input {
        input: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("root container `{root_key}` is not registered")]
    Configuration { root_key: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
