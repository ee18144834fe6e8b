use super::error::VolumeError;
use super::types::{DiskSpace, VolumeId, VolumeType};
#[cfg(unix)]
use super::mounts::MountEntry;
#[cfg(unix)]
use std::collections::BTreeMap;
#[cfg(unix)]
use std::sync::{Arc, Mutex, PoisonError};

/// Access to the host's volume table and per-volume queries.
///
/// Every method may block on the OS. The inspector runs them on the blocking
/// pool under a timeout.
pub(crate) trait VolumeHost: Send + Sync + 'static {
    /// Identifiers of every volume currently visible, in any order.
    fn volume_ids(&self) -> Result<Vec<VolumeId>, VolumeError>;

    /// Classify a volume. Returns [`VolumeType::Unknown`] rather than failing.
    fn volume_type(&self, id: &VolumeId) -> VolumeType;

    /// Total and free bytes for a volume.
    fn disk_space(&self, id: &VolumeId) -> Result<DiskSpace, VolumeError>;
}

/// The machine this process runs on.
#[derive(Debug)]
pub(crate) struct SystemHost {
    #[cfg_attr(not(unix), allow(dead_code))]
    mount_table: std::path::PathBuf,
    #[cfg_attr(not(unix), allow(dead_code))]
    include_pseudo: bool,
    /// Mount table as read by the last `volume_ids`, reused for classification.
    #[cfg(unix)]
    snapshot: Mutex<Option<MountSnapshot>>,
}

#[cfg(unix)]
type MountSnapshot = Arc<BTreeMap<String, MountEntry>>;

impl SystemHost {
    pub(crate) fn new(config: &crate::config::AppConfig) -> Self {
        Self {
            mount_table: config.mount_table.clone().into(),
            include_pseudo: config.include_pseudo,
            #[cfg(unix)]
            snapshot: Mutex::new(None),
        }
    }
}

#[cfg(unix)]
impl SystemHost {
    fn read_mounts(&self) -> Result<MountSnapshot, VolumeError> {
        let entries = super::mounts::read_mount_table(&self.mount_table)?;
        let mounts = Arc::new(super::mounts::visible_mounts(entries));
        let mut slot = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&mounts));
        Ok(mounts)
    }

    fn mounts(&self) -> Result<MountSnapshot, VolumeError> {
        let cached = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner).clone();
        match cached {
            Some(mounts) => Ok(mounts),
            None => self.read_mounts(),
        }
    }
}

#[cfg(unix)]
impl VolumeHost for SystemHost {
    fn volume_ids(&self) -> Result<Vec<VolumeId>, VolumeError> {
        let mounts = self.read_mounts()?;
        Ok(mounts
            .values()
            .filter(|e| self.include_pseudo || !e.is_pseudo())
            .map(|e| VolumeId::new(e.mount_point.clone()))
            .collect())
    }

    fn volume_type(&self, id: &VolumeId) -> VolumeType {
        use super::classify::{classify_mount_point, stat_is_dir, sysfs_removable};

        let mounts = match self.mounts() {
            Ok(mounts) => mounts,
            Err(e) => {
                tracing::debug!("Cannot classify {}: {}", id, e);
                return VolumeType::Unknown;
            }
        };

        classify_mount_point(id.as_str(), mounts.get(id.as_str()), stat_is_dir, sysfs_removable)
    }

    fn disk_space(&self, id: &VolumeId) -> Result<DiskSpace, VolumeError> {
        super::disk_space::get_disk_space(id)
    }
}

#[cfg(windows)]
impl VolumeHost for SystemHost {
    fn volume_ids(&self) -> Result<Vec<VolumeId>, VolumeError> {
        Ok(super::windows::logical_drives())
    }

    fn volume_type(&self, id: &VolumeId) -> VolumeType {
        super::windows::drive_type(id)
    }

    fn disk_space(&self, id: &VolumeId) -> Result<DiskSpace, VolumeError> {
        super::windows::get_disk_space(id)
    }
}

/// Fallback for platforms without a volume table implementation.
#[cfg(not(any(unix, windows)))]
impl VolumeHost for SystemHost {
    fn volume_ids(&self) -> Result<Vec<VolumeId>, VolumeError> {
        Err(VolumeError::VolumeTable {
            table: "(unsupported platform)".to_string(),
            source: std::io::ErrorKind::Unsupported.into(),
        })
    }

    fn volume_type(&self, _id: &VolumeId) -> VolumeType {
        VolumeType::Unknown
    }

    fn disk_space(&self, id: &VolumeId) -> Result<DiskSpace, VolumeError> {
        Err(VolumeError::Capacity { id: id.clone(), source: std::io::ErrorKind::Unsupported.into() })
    }
}
