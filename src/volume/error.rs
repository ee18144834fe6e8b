use super::types::VolumeId;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Failures raised while talking to the host about its volumes.
///
/// Only [`VolumeError::VolumeTable`] ever reaches callers of `list_volumes`.
/// Everything else is folded into the affected volume's record by the inspector.
#[derive(Debug, Error)]
pub(crate) enum VolumeError {
    #[error("cannot read volume table {table}: {source}")]
    VolumeTable { table: String, source: io::Error },

    #[error("capacity query failed for {id}: {source}")]
    Capacity { id: VolumeId, source: io::Error },

    #[error("query for {id} timed out after {}ms", timeout.as_millis())]
    Timeout { id: VolumeId, timeout: Duration },

    #[error("query for {id} aborted: {message}")]
    Aborted { id: VolumeId, message: String },
}
