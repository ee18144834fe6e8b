use crate::volume::error::VolumeError;
use crate::volume::types::{DiskSpace, VolumeId, VolumeType};
use crate::volume::VolumeHost;
use std::io;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Scripted answer to a capacity query.
#[derive(Debug, Clone)]
pub(super) enum Space {
    Reports(DiskSpace),
    Fails,
    Hangs(Duration),
    Panics,
}

/// A host whose volumes and query outcomes are fixed up front.
#[derive(Debug, Default)]
pub(super) struct FakeHost {
    volumes: Vec<(VolumeId, VolumeType, Space)>,
    table_missing: bool,
    cancel_on_query: Option<CancellationToken>,
    classify_delay: Option<Duration>,
}

impl FakeHost {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn volume(mut self, id: &str, volume_type: VolumeType, space: Space) -> Self {
        self.volumes.push((VolumeId::from(id), volume_type, space));
        self
    }

    pub(super) fn measured(self, id: &str, volume_type: VolumeType, total: u64, free: u64) -> Self {
        self.volume(id, volume_type, Space::Reports(DiskSpace { total, free }))
    }

    pub(super) fn failing(self, id: &str, volume_type: VolumeType) -> Self {
        self.volume(id, volume_type, Space::Fails)
    }

    /// Volume table itself can't be read.
    pub(super) fn without_table(mut self) -> Self {
        self.table_missing = true;
        self
    }

    /// Cancel `token` from inside every capacity query.
    pub(super) fn cancelling(mut self, token: CancellationToken) -> Self {
        self.cancel_on_query = Some(token);
        self
    }

    /// Every classification blocks for `delay` before answering.
    pub(super) fn slow_classification(mut self, delay: Duration) -> Self {
        self.classify_delay = Some(delay);
        self
    }

    fn find(&self, id: &VolumeId) -> Option<&(VolumeId, VolumeType, Space)> {
        self.volumes.iter().find(|(v, _, _)| v == id)
    }
}

impl VolumeHost for FakeHost {
    fn volume_ids(&self) -> Result<Vec<VolumeId>, VolumeError> {
        if self.table_missing {
            return Err(VolumeError::VolumeTable {
                table: "fake".to_string(),
                source: io::ErrorKind::NotFound.into(),
            });
        }
        Ok(self.volumes.iter().map(|(id, _, _)| id.clone()).collect())
    }

    fn volume_type(&self, id: &VolumeId) -> VolumeType {
        if let Some(delay) = self.classify_delay {
            std::thread::sleep(delay);
        }
        self.find(id).map_or(VolumeType::Unknown, |(_, t, _)| *t)
    }

    fn disk_space(&self, id: &VolumeId) -> Result<DiskSpace, VolumeError> {
        if let Some(token) = &self.cancel_on_query {
            token.cancel();
        }
        match self.find(id).map(|(_, _, space)| space) {
            Some(Space::Reports(space)) => Ok(*space),
            Some(Space::Hangs(delay)) => {
                std::thread::sleep(*delay);
                Ok(DiskSpace { total: 1, free: 1 })
            }
            Some(Space::Panics) => panic!("driver crashed while querying {id}"),
            Some(Space::Fails) => Err(VolumeError::Capacity {
                id: id.clone(),
                source: io::Error::other("device is not ready"),
            }),
            None => Err(VolumeError::Capacity { id: id.clone(), source: io::ErrorKind::NotFound.into() }),
        }
    }
}
