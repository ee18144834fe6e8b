use super::error::VolumeError;
use super::types::{DiskSpace, VolumeId};

/// Get disk space info via statvfs.
///
/// `free` counts blocks available to unprivileged callers (`f_bavail`), so
/// root-reserved blocks show up as used.
#[allow(unsafe_code)]
pub(crate) fn get_disk_space(id: &VolumeId) -> Result<DiskSpace, VolumeError> {
    use std::ffi::CString;
    use std::io;

    let c_path = CString::new(id.as_str()).map_err(|e| VolumeError::Capacity {
        id: id.clone(),
        source: io::Error::new(io::ErrorKind::InvalidInput, e),
    })?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };

    let ret = unsafe { libc::statvfs(c_path.as_ptr(), &raw mut stat) };
    if ret != 0 {
        return Err(VolumeError::Capacity { id: id.clone(), source: io::Error::last_os_error() });
    }

    let block_size = stat.f_frsize as u64;
    let total = (stat.f_blocks as u64).saturating_mul(block_size);
    let free = (stat.f_bavail as u64).saturating_mul(block_size);

    Ok(DiskSpace { total, free })
}
