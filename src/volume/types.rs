use super::error::VolumeError;
use chrono::{DateTime, Utc};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::fmt;

/// Name of a volume as the host reports it: a drive root such as `C:\` on
/// Windows, a mount point such as `/home` on Unix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub(crate) struct VolumeId(String);

impl VolumeId {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VolumeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Media or connection category of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum VolumeType {
    Unknown,
    /// The identifier does not name a mounted root.
    InvalidRoot,
    Removable,
    Fixed,
    Remote,
    Optical,
    RamDisk,
}

impl VolumeType {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::InvalidRoot => "invalid-root",
            Self::Removable => "removable",
            Self::Fixed => "fixed",
            Self::Remote => "remote",
            Self::Optical => "optical",
            Self::RamDisk => "ram-disk",
        }
    }

    /// Human-readable label for table output.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown drive type",
            Self::InvalidRoot => "Invalid root directory",
            Self::Removable => "Removable drive",
            Self::Fixed => "Fixed drive",
            Self::Remote => "Remote drive",
            Self::Optical => "CD-ROM drive",
            Self::RamDisk => "RAM disk",
        }
    }
}

impl fmt::Display for VolumeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte counts from a successful capacity query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DiskSpace {
    pub total: u64,
    /// Bytes available to this process.
    pub free: u64,
}

impl DiskSpace {
    pub(crate) const fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }

    /// Used space as a percentage (0.0 - 100.0). Zero for a zero-sized volume.
    pub(crate) fn used_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used() as f64 / self.total as f64 * 100.0
    }
}

/// Outcome of the capacity query for one volume.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Capacity {
    Measured(DiskSpace),
    /// The host refused or failed to report capacity (no medium, not ready,
    /// access denied, timed out...).
    Unavailable { reason: String },
}

/// One volume's type and capacity at the time of the pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VolumeRecord {
    pub id: VolumeId,
    pub volume_type: VolumeType,
    pub capacity: Capacity,
}

impl VolumeRecord {
    /// Combine a classification and the result of a capacity query.
    pub(crate) fn from_query(
        id: VolumeId,
        volume_type: VolumeType,
        space: Result<DiskSpace, VolumeError>,
    ) -> Self {
        let capacity = match space {
            Ok(space) => Capacity::Measured(space),
            Err(e) => Capacity::Unavailable { reason: e.to_string() },
        };
        Self { id, volume_type, capacity }
    }

    pub(crate) const fn disk_space(&self) -> Option<&DiskSpace> {
        match &self.capacity {
            Capacity::Measured(space) => Some(space),
            Capacity::Unavailable { .. } => None,
        }
    }

    pub(crate) const fn capacity_unavailable(&self) -> bool {
        matches!(self.capacity, Capacity::Unavailable { .. })
    }

    pub(crate) fn unavailable_reason(&self) -> Option<&str> {
        match &self.capacity {
            Capacity::Unavailable { reason } => Some(reason),
            Capacity::Measured(_) => None,
        }
    }

    pub(crate) fn total_bytes(&self) -> u64 {
        self.disk_space().map_or(0, |s| s.total)
    }

    pub(crate) fn free_bytes(&self) -> u64 {
        self.disk_space().map_or(0, |s| s.free)
    }

    pub(crate) fn used_bytes(&self) -> u64 {
        self.disk_space().map_or(0, DiskSpace::used)
    }

    pub(crate) fn used_percentage(&self) -> f64 {
        self.disk_space().map_or(0.0, DiskSpace::used_percentage)
    }
}

// Flat shape handed to presentation: unavailable volumes keep all columns, zeroed.
impl Serialize for VolumeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("VolumeRecord", 8)?;
        s.serialize_field("identifier", &self.id)?;
        s.serialize_field("type", &self.volume_type)?;
        s.serialize_field("total_bytes", &self.total_bytes())?;
        s.serialize_field("free_bytes", &self.free_bytes())?;
        s.serialize_field("used_bytes", &self.used_bytes())?;
        s.serialize_field("used_percentage", &self.used_percentage())?;
        s.serialize_field("capacity_unavailable", &self.capacity_unavailable())?;
        match self.unavailable_reason() {
            Some(reason) => s.serialize_field("unavailable_reason", reason)?,
            None => s.skip_field("unavailable_reason")?,
        }
        s.end()
    }
}

/// Result of one enumeration pass, in enumeration order.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct VolumeReport {
    pub generated_at: DateTime<Utc>,
    pub volumes: Vec<VolumeRecord>,
    /// Cancellation stopped the pass before every volume was inspected.
    pub interrupted: bool,
}

impl VolumeReport {
    pub(crate) fn new(volumes: Vec<VolumeRecord>, interrupted: bool) -> Self {
        Self { generated_at: Utc::now(), volumes, interrupted }
    }

    pub(crate) fn len(&self) -> usize {
        self.volumes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, VolumeRecord> {
        self.volumes.iter()
    }

    pub(crate) fn unavailable_count(&self) -> usize {
        self.volumes.iter().filter(|v| v.capacity_unavailable()).count()
    }
}
