use super::fake_host::{FakeHost, Space};
use crate::volume::types::{Capacity, DiskSpace, VolumeId, VolumeRecord, VolumeType};
use crate::volume::{list_volumes, Inspector, VolumeHost};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const TIMEOUT: Duration = Duration::from_secs(5);

fn setup(host: FakeHost, concurrency: usize) -> (Arc<dyn VolumeHost>, Inspector) {
    let host: Arc<dyn VolumeHost> = Arc::new(host);
    let inspector = Inspector::new(Arc::clone(&host), TIMEOUT, concurrency);
    (host, inspector)
}

fn assert_zeroed(record: &VolumeRecord) {
    assert!(record.capacity_unavailable());
    assert_eq!(record.total_bytes(), 0);
    assert_eq!(record.free_bytes(), 0);
    assert_eq!(record.used_bytes(), 0);
    assert!(record.used_percentage().abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_fixed_and_failing_optical_drive() {
    let (host, inspector) = setup(
        FakeHost::new()
            .measured("C", VolumeType::Fixed, 100_000_000_000, 40_000_000_000)
            .failing("D", VolumeType::Optical),
        1,
    );

    let ids = list_volumes(host.as_ref()).unwrap();
    let report = inspector.inspect_all(ids, &CancellationToken::new()).await;

    assert_eq!(report.len(), 2);
    assert!(!report.interrupted);

    let c = &report.volumes[0];
    assert_eq!(c.id, VolumeId::from("C"));
    assert_eq!(c.volume_type, VolumeType::Fixed);
    assert_eq!(c.total_bytes(), 100_000_000_000);
    assert_eq!(c.free_bytes(), 40_000_000_000);
    assert_eq!(c.used_bytes(), 60_000_000_000);
    assert!((c.used_percentage() - 60.0).abs() < 1e-9);
    assert!(!c.capacity_unavailable());

    let d = &report.volumes[1];
    assert_eq!(d.id, VolumeId::from("D"));
    assert_eq!(d.volume_type, VolumeType::Optical);
    assert_zeroed(d);
    assert_eq!(report.unavailable_count(), 1);
}

#[tokio::test]
async fn test_empty_host_gives_empty_report() {
    let (host, inspector) = setup(FakeHost::new(), 1);

    let ids = list_volumes(host.as_ref()).unwrap();
    let report = inspector.inspect_all(ids, &CancellationToken::new()).await;

    assert!(report.is_empty());
    assert!(!report.interrupted);
}

#[tokio::test]
async fn test_zero_capacity_success_is_not_unavailable() {
    let (_host, inspector) = setup(FakeHost::new().measured("R", VolumeType::RamDisk, 0, 0), 1);

    let record = inspector.inspect(VolumeId::from("R")).await;

    assert_eq!(record.capacity, Capacity::Measured(DiskSpace { total: 0, free: 0 }));
    assert!(!record.capacity_unavailable());
    assert!(record.used_percentage().abs() < f64::EPSILON);
    assert!(!record.used_percentage().is_nan());
}

#[tokio::test]
async fn test_every_volume_yields_one_record_in_order() {
    let mut host = FakeHost::new();
    for (i, letter) in ('A'..='Z').enumerate() {
        let name = letter.to_string();
        host = if i % 3 == 0 {
            host.failing(&name, VolumeType::Remote)
        } else {
            host.measured(&name, VolumeType::Fixed, 1_000 * (i as u64 + 1), 100 * i as u64)
        };
    }
    let (host, inspector) = setup(host, 4);

    let ids = list_volumes(host.as_ref()).unwrap();
    let report = inspector.inspect_all(ids.clone(), &CancellationToken::new()).await;

    let reported: Vec<VolumeId> = report.iter().map(|r| r.id.clone()).collect();
    assert_eq!(reported, ids);

    for record in report.iter() {
        if record.capacity_unavailable() {
            assert_zeroed(record);
        } else {
            assert_eq!(record.used_bytes(), record.total_bytes() - record.free_bytes());
            assert!((0.0..=100.0).contains(&record.used_percentage()));
        }
    }
}

#[tokio::test]
async fn test_free_exceeding_total_stays_in_range() {
    let (_host, inspector) = setup(FakeHost::new().measured("X", VolumeType::Fixed, 10, 20), 1);

    let record = inspector.inspect(VolumeId::from("X")).await;

    assert_eq!(record.used_bytes(), 0);
    assert!(record.used_percentage().abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_hung_capacity_query_times_out() {
    let host: Arc<dyn VolumeHost> = Arc::new(FakeHost::new().volume(
        "Z",
        VolumeType::Remote,
        Space::Hangs(Duration::from_millis(300)),
    ));
    let inspector = Inspector::new(host, Duration::from_millis(20), 1);

    let record = inspector.inspect(VolumeId::from("Z")).await;

    assert_eq!(record.volume_type, VolumeType::Remote);
    assert_zeroed(&record);
    let reason = record.unavailable_reason().unwrap_or_default();
    assert!(reason.contains("timed out"), "unexpected reason: {reason}");
}

#[tokio::test]
async fn test_unknown_identifier_is_still_reported() {
    let (_host, inspector) = setup(FakeHost::new(), 1);

    let record = inspector.inspect(VolumeId::from("Q")).await;

    assert_eq!(record.volume_type, VolumeType::Unknown);
    assert_zeroed(&record);
}

#[tokio::test]
async fn test_cancelled_before_start_returns_empty_partial_report() {
    let (host, inspector) = setup(FakeHost::new().measured("C", VolumeType::Fixed, 10, 5), 1);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let ids = list_volumes(host.as_ref()).unwrap();
    let report = inspector.inspect_all(ids, &cancel).await;

    assert!(report.is_empty());
    assert!(report.interrupted);
}

#[tokio::test]
async fn test_cancel_mid_pass_keeps_completed_records() {
    let cancel = CancellationToken::new();
    let (host, inspector) = setup(
        FakeHost::new()
            .measured("C", VolumeType::Fixed, 10, 5)
            .measured("D", VolumeType::Fixed, 10, 5)
            .measured("E", VolumeType::Fixed, 10, 5)
            .cancelling(cancel.clone()),
        1,
    );

    let ids = list_volumes(host.as_ref()).unwrap();
    let report = inspector.inspect_all(ids, &cancel).await;

    assert_eq!(report.len(), 1);
    assert_eq!(report.volumes[0].id, VolumeId::from("C"));
    assert!(!report.volumes[0].capacity_unavailable());
    assert!(report.interrupted);
}

#[tokio::test]
async fn test_classification_timeout_gives_unknown_type() {
    let host: Arc<dyn VolumeHost> = Arc::new(
        FakeHost::new()
            .measured("N", VolumeType::Remote, 10, 4)
            .slow_classification(Duration::from_millis(300)),
    );
    let inspector = Inspector::new(host, Duration::from_millis(50), 1);

    let record = inspector.inspect(VolumeId::from("N")).await;

    assert_eq!(record.volume_type, VolumeType::Unknown);
    assert!(!record.capacity_unavailable());
    assert_eq!(record.total_bytes(), 10);
    assert_eq!(record.free_bytes(), 4);
}

#[tokio::test]
async fn test_panicking_capacity_query_is_unavailable() {
    let (host, inspector) = setup(
        FakeHost::new()
            .volume("P", VolumeType::Fixed, Space::Panics)
            .measured("Q", VolumeType::Fixed, 10, 5),
        1,
    );

    let ids = list_volumes(host.as_ref()).unwrap();
    let report = inspector.inspect_all(ids, &CancellationToken::new()).await;

    assert_eq!(report.len(), 2);
    assert!(!report.interrupted);

    let p = &report.volumes[0];
    assert_eq!(p.volume_type, VolumeType::Fixed);
    assert_zeroed(p);
    let reason = p.unavailable_reason().unwrap_or_default();
    assert!(reason.contains("aborted"), "unexpected reason: {reason}");

    assert!(!report.volumes[1].capacity_unavailable());
}

#[tokio::test]
async fn test_cancel_with_concurrency_returns_ordered_prefix() {
    let cancel = CancellationToken::new();
    let mut host = FakeHost::new().cancelling(cancel.clone());
    for letter in 'A'..='H' {
        host = host.measured(&letter.to_string(), VolumeType::Fixed, 10, 5);
    }
    let (host, inspector) = setup(host, 4);

    let ids = list_volumes(host.as_ref()).unwrap();
    let report = inspector.inspect_all(ids.clone(), &cancel).await;

    assert!(report.interrupted);
    assert!(!report.is_empty());
    assert!(report.len() < ids.len());
    let reported: Vec<VolumeId> = report.iter().map(|r| r.id.clone()).collect();
    assert_eq!(reported, ids[..report.len()]);
    assert!(report.iter().all(|r| !r.capacity_unavailable()));
}
