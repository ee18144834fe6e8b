use super::error::VolumeError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Kernel-provided filesystems with no storage behind them.
const PSEUDO_FS_TYPES: &[&str] = &[
    "autofs",
    "binfmt_misc",
    "bpf",
    "cgroup",
    "cgroup2",
    "configfs",
    "debugfs",
    "devpts",
    "devtmpfs",
    "efivarfs",
    "fusectl",
    "hugetlbfs",
    "mqueue",
    "nsfs",
    "proc",
    "pstore",
    "rpc_pipefs",
    "securityfs",
    "selinuxfs",
    "sysfs",
    "tracefs",
];

/// One line of the mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MountEntry {
    pub device: String,
    pub mount_point: String,
    pub fs_type: String,
}

impl MountEntry {
    pub(crate) fn is_pseudo(&self) -> bool {
        PSEUDO_FS_TYPES.contains(&self.fs_type.as_str())
    }
}

/// Read and parse a mount table such as `/proc/self/mounts`.
pub(crate) fn read_mount_table(path: &Path) -> Result<Vec<MountEntry>, VolumeError> {
    let contents = fs::read_to_string(path).map_err(|source| VolumeError::VolumeTable {
        table: path.display().to_string(),
        source,
    })?;
    Ok(parse_mount_table(&contents))
}

/// Parse `fstab(5)`-formatted mount table text. Malformed lines are skipped.
pub(crate) fn parse_mount_table(contents: &str) -> Vec<MountEntry> {
    contents
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mount_point = fields.next()?;
            let fs_type = fields.next()?;
            Some(MountEntry {
                device: unescape_octal(device),
                mount_point: unescape_octal(mount_point),
                fs_type: fs_type.to_string(),
            })
        })
        .collect()
}

/// The entry currently visible at each mount point, keyed by mount point.
/// Later lines shadow earlier ones.
pub(crate) fn visible_mounts(entries: Vec<MountEntry>) -> BTreeMap<String, MountEntry> {
    entries.into_iter().map(|e| (e.mount_point.clone(), e)).collect()
}

/// Decode the `\NNN` octal escapes the kernel uses for spaces, tabs, newlines
/// and backslashes in mount table fields.
fn unescape_octal(field: &str) -> String {
    if !field.contains('\\') {
        return field.to_string();
    }

    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            if let Some(digits) = bytes.get(i + 1..i + 4) {
                if digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
                    let value = digits.iter().fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
                    if let Ok(byte) = u8::try_from(value) {
                        out.push(byte);
                        i += 4;
                        continue;
                    }
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
