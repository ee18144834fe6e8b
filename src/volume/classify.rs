use super::mounts::MountEntry;
use super::types::VolumeType;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Filesystems served over a network.
const REMOTE_FS_TYPES: &[&str] = &[
    "9p",
    "afs",
    "ceph",
    "cifs",
    "davfs",
    "fuse.rclone",
    "fuse.s3fs",
    "fuse.sshfs",
    "glusterfs",
    "ncpfs",
    "nfs",
    "nfs4",
    "smb3",
    "smbfs",
];

const OPTICAL_FS_TYPES: &[&str] = &["iso9660", "udf"];

const RAM_FS_TYPES: &[&str] = &["ramfs", "tmpfs"];

/// Classify a mounted filesystem.
///
/// `removable` answers whether a block device name (e.g. `sdb1`) sits on
/// removable media, or `None` when the host doesn't say.
pub(crate) fn classify_mount(
    entry: Option<&MountEntry>,
    removable: impl Fn(&str) -> Option<bool>,
) -> VolumeType {
    let Some(entry) = entry else {
        return VolumeType::InvalidRoot;
    };

    let fs_type = entry.fs_type.as_str();
    let device_name = entry.device.strip_prefix("/dev/");

    if REMOTE_FS_TYPES.contains(&fs_type) || entry.device.starts_with("//") {
        return VolumeType::Remote;
    }
    if OPTICAL_FS_TYPES.contains(&fs_type)
        || device_name.is_some_and(|d| d.starts_with("sr") || d.starts_with("cdrom"))
    {
        return VolumeType::Optical;
    }
    if RAM_FS_TYPES.contains(&fs_type) || device_name.is_some_and(is_ram_device) {
        return VolumeType::RamDisk;
    }

    match device_name.map(&removable) {
        Some(Some(true)) => VolumeType::Removable,
        Some(Some(false)) => VolumeType::Fixed,
        Some(None) | None => VolumeType::Unknown,
    }
}

/// Classify the volume mounted at `mount_point`.
///
/// Only a mount point missing from the table, or one that stats as something
/// other than a directory, is an invalid root. A stat failure (EACCES on
/// another user's FUSE mount, say) leaves the table entry to decide.
pub(crate) fn classify_mount_point(
    mount_point: &str,
    entry: Option<&MountEntry>,
    is_dir: impl Fn(&str) -> io::Result<bool>,
    removable: impl Fn(&str) -> Option<bool>,
) -> VolumeType {
    if entry.is_none() {
        return VolumeType::InvalidRoot;
    }
    match is_dir(mount_point) {
        Ok(true) => {}
        Ok(false) => return VolumeType::InvalidRoot,
        Err(e) => debug!("Cannot stat {}, classifying from the mount table: {}", mount_point, e),
    }
    classify_mount(entry, removable)
}

/// Like `Path::is_dir`, but a failed stat is an error rather than `false`.
pub(crate) fn stat_is_dir(path: &str) -> io::Result<bool> {
    fs::metadata(path).map(|m| m.is_dir())
}

fn is_ram_device(name: &str) -> bool {
    ["ram", "zram"].iter().any(|prefix| {
        name.strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
    })
}

/// Look up the sysfs `removable` flag for a block device, walking from a
/// partition to its parent disk.
pub(crate) fn sysfs_removable(device_name: &str) -> Option<bool> {
    // /dev/mapper/* and /dev/disk/by-*/* are symlinks to the kernel name.
    let kernel_name = fs::canonicalize(Path::new("/dev").join(device_name))
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| device_name.to_string());

    let class_dir = fs::canonicalize(Path::new("/sys/class/block").join(&kernel_name)).ok()?;
    let disk_dir = if class_dir.join("partition").exists() {
        class_dir.parent()?.to_path_buf()
    } else {
        class_dir
    };

    let flag = fs::read_to_string(disk_dir.join("removable")).ok()?;
    match flag.trim() {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}
