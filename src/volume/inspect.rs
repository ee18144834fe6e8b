use super::error::VolumeError;
use super::host::VolumeHost;
use super::types::{DiskSpace, VolumeId, VolumeRecord, VolumeReport, VolumeType};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Classifies volumes and measures their capacity.
///
/// Every host call runs on the blocking pool and is abandoned after
/// `query_timeout`. An abandoned capacity query counts as unavailable.
pub(crate) struct Inspector {
    host: Arc<dyn VolumeHost>,
    query_timeout: Duration,
    concurrency: usize,
}

impl Inspector {
    pub(crate) fn new(host: Arc<dyn VolumeHost>, query_timeout: Duration, concurrency: usize) -> Self {
        Self { host, query_timeout, concurrency: concurrency.max(1) }
    }

    /// Build the record for one volume. Never fails: a capacity query that
    /// errors or times out produces an unavailable record.
    pub(crate) async fn inspect(&self, id: VolumeId) -> VolumeRecord {
        let volume_type = self.query_type(&id).await;
        let space = self.query_disk_space(&id).await;

        match &space {
            Ok(s) => debug!("{}: {} bytes total, {} free ({})", id, s.total, s.free, volume_type),
            Err(e) => warn!("{}", e),
        }

        VolumeRecord::from_query(id, volume_type, space)
    }

    /// Inspect every volume, keeping input order.
    ///
    /// `cancel` is checked before each volume. A cancelled pass returns the
    /// records completed so far with `interrupted` set.
    pub(crate) async fn inspect_all(
        &self,
        ids: Vec<VolumeId>,
        cancel: &CancellationToken,
    ) -> VolumeReport {
        let expected = ids.len();
        let start = Instant::now();
        let mut volumes = Vec::with_capacity(expected);
        let mut pending = stream::iter(ids).map(|id| self.inspect(id)).buffered(self.concurrency);

        loop {
            if cancel.is_cancelled() {
                break;
            }
            let Some(record) = pending.next().await else {
                break;
            };
            volumes.push(record);
        }

        let interrupted = volumes.len() < expected;
        if interrupted {
            warn!("Inspection cancelled after {} of {} volumes", volumes.len(), expected);
        }

        let report = VolumeReport::new(volumes, interrupted);
        info!(
            "Inspected {} volumes ({} without capacity) in {:.2}s",
            report.len(),
            report.unavailable_count(),
            start.elapsed().as_secs_f64()
        );
        report
    }

    async fn query_type(&self, id: &VolumeId) -> VolumeType {
        let target = id.clone();
        match self.run_blocking(id, move |host| host.volume_type(&target)).await {
            Ok(volume_type) => volume_type,
            Err(e) => {
                debug!("Classification failed, treating as unknown: {}", e);
                VolumeType::Unknown
            }
        }
    }

    async fn query_disk_space(&self, id: &VolumeId) -> Result<DiskSpace, VolumeError> {
        let target = id.clone();
        self.run_blocking(id, move |host| host.disk_space(&target)).await?
    }

    /// Run a host call on the blocking pool, bounded by the query timeout.
    async fn run_blocking<T, F>(&self, id: &VolumeId, query: F) -> Result<T, VolumeError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn VolumeHost) -> T + Send + 'static,
    {
        let host = Arc::clone(&self.host);
        let task = tokio::task::spawn_blocking(move || query(host.as_ref()));

        match tokio::time::timeout(self.query_timeout, task).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(join_err)) => {
                Err(VolumeError::Aborted { id: id.clone(), message: join_err.to_string() })
            }
            Err(_elapsed) => Err(VolumeError::Timeout { id: id.clone(), timeout: self.query_timeout }),
        }
    }
}
