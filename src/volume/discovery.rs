use super::error::VolumeError;
use super::host::VolumeHost;
use super::types::VolumeId;
use tracing::debug;

/// List every volume the host exposes, sorted ascending with duplicates removed.
///
/// A host with no volumes yields an empty list. The only error is the volume
/// table itself being unreadable.
pub(crate) fn list_volumes(host: &dyn VolumeHost) -> Result<Vec<VolumeId>, VolumeError> {
    let mut ids = host.volume_ids()?;
    ids.sort();
    ids.dedup();
    debug!("Enumerated {} volumes", ids.len());
    Ok(ids)
}
