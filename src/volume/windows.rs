use super::error::VolumeError;
use super::types::{DiskSpace, VolumeId, VolumeType};
use std::ffi::OsStr;
use std::io;
use std::os::windows::ffi::OsStrExt;
use windows_sys::Win32::Storage::FileSystem::{
    GetDiskFreeSpaceExW, GetDriveTypeW, GetLogicalDrives,
};

// GetDriveTypeW return codes. 0 (DRIVE_UNKNOWN) and anything unlisted map to Unknown.
const DRIVE_NO_ROOT_DIR: u32 = 1;
const DRIVE_REMOVABLE: u32 = 2;
const DRIVE_FIXED: u32 = 3;
const DRIVE_REMOTE: u32 = 4;
const DRIVE_CDROM: u32 = 5;
const DRIVE_RAMDISK: u32 = 6;

fn wide(path: &str) -> Vec<u16> {
    OsStr::new(path).encode_wide().chain(std::iter::once(0)).collect()
}

/// Drive roots (`A:\` .. `Z:\`) present in the logical drive bitmask.
#[allow(unsafe_code)]
pub(crate) fn logical_drives() -> Vec<VolumeId> {
    let mask = unsafe { GetLogicalDrives() };
    drives_from_mask(mask)
}

pub(crate) fn drives_from_mask(mask: u32) -> Vec<VolumeId> {
    (b'A'..=b'Z')
        .enumerate()
        .filter(|(bit, _)| mask & (1 << bit) != 0)
        .map(|(_, letter)| VolumeId::new(format!("{}:\\", char::from(letter))))
        .collect()
}

#[allow(unsafe_code)]
pub(crate) fn drive_type(id: &VolumeId) -> VolumeType {
    let root = wide(id.as_str());
    let code = unsafe { GetDriveTypeW(root.as_ptr()) };
    volume_type_from_code(code)
}

pub(crate) const fn volume_type_from_code(code: u32) -> VolumeType {
    match code {
        DRIVE_NO_ROOT_DIR => VolumeType::InvalidRoot,
        DRIVE_REMOVABLE => VolumeType::Removable,
        DRIVE_FIXED => VolumeType::Fixed,
        DRIVE_REMOTE => VolumeType::Remote,
        DRIVE_CDROM => VolumeType::Optical,
        DRIVE_RAMDISK => VolumeType::RamDisk,
        _ => VolumeType::Unknown,
    }
}

/// Total bytes and bytes available to the caller, via GetDiskFreeSpaceExW.
#[allow(unsafe_code)]
pub(crate) fn get_disk_space(id: &VolumeId) -> Result<DiskSpace, VolumeError> {
    let root = wide(id.as_str());
    let mut available: u64 = 0;
    let mut total: u64 = 0;

    let ok = unsafe {
        GetDiskFreeSpaceExW(root.as_ptr(), &raw mut available, &raw mut total, std::ptr::null_mut())
    };
    if ok == 0 {
        return Err(VolumeError::Capacity { id: id.clone(), source: io::Error::last_os_error() });
    }

    Ok(DiskSpace { total, free: available })
}
