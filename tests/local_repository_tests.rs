//! Integration tests for the in-memory repository implementation.

use wastespotter::api::{
    CameraStatus, CameraUpdate, NewCamera, NewReport, Priority, ReportFilter, ReportId,
    ReportStatus, ReportUpdate, Statistics,
};
use wastespotter::db::repositories::LocalRepository;
use wastespotter::db::repository::{
    CameraRepository, FullRepository, ReportRepository, RepositoryError, StatisticsRepository,
};

fn new_report(location: &str, priority: Priority, ai_confidence: i32) -> NewReport {
    NewReport {
        location: location.to_string(),
        priority,
        status: ReportStatus::Pending,
        ai_confidence,
        image_data: Some(vec![0xFF, 0xD8, 0xFF]),
        image_name: Some("annotated.jpg".to_string()),
    }
}

fn new_camera(name: &str, status: CameraStatus) -> NewCamera {
    NewCamera {
        name: name.to_string(),
        location: "Yard".to_string(),
        status,
        ip_address: "192.168.1.20".to_string(),
    }
}

#[tokio::test]
async fn test_insert_and_fetch_report() {
    let repo = LocalRepository::new();
    let created = repo
        .insert_report(&new_report("Main Street", Priority::High, 85))
        .await
        .unwrap();

    let fetched = repo.fetch_report(created.id).await.unwrap();
    assert_eq!(fetched.location, "Main Street");
    assert_eq!(fetched.priority, Priority::High);
    assert_eq!(fetched.ai_confidence, 85);
    assert!(fetched.has_image());
}

#[tokio::test]
async fn test_fetch_missing_report_is_not_found() {
    let repo = LocalRepository::new();
    let err = repo.fetch_report(ReportId::new(42)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_reports_filters_and_orders() {
    let repo = LocalRepository::new();
    repo.insert_report(&new_report("A", Priority::Low, 10))
        .await
        .unwrap();
    repo.insert_report(&new_report("B", Priority::High, 90))
        .await
        .unwrap();
    let last = repo
        .insert_report(&new_report("C", Priority::High, 70))
        .await
        .unwrap();

    let all = repo.list_reports(&ReportFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    // Most recent first
    assert_eq!(all[0].id, last.id);

    let high_only = repo
        .list_reports(&ReportFilter {
            priority: Some(Priority::High),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(high_only.len(), 2);
    assert!(high_only.iter().all(|r| r.priority == Priority::High));

    let limited = repo
        .list_reports(&ReportFilter {
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn test_list_reports_by_status() {
    let repo = LocalRepository::new();
    let first = repo
        .insert_report(&new_report("A", Priority::Low, 10))
        .await
        .unwrap();
    repo.insert_report(&new_report("B", Priority::Low, 20))
        .await
        .unwrap();

    repo.update_report(
        first.id,
        &ReportUpdate {
            status: Some(ReportStatus::Resolved),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let pending = repo
        .list_reports(&ReportFilter {
            status: Some(ReportStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].location, "B");
}

#[tokio::test]
async fn test_update_report_partial_fields() {
    let repo = LocalRepository::new();
    let created = repo
        .insert_report(&new_report("Old Town", Priority::Medium, 55))
        .await
        .unwrap();

    let updated = repo
        .update_report(
            created.id,
            &ReportUpdate {
                status: Some(ReportStatus::InProgress),
                ai_confidence: Some(61),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, ReportStatus::InProgress);
    assert_eq!(updated.ai_confidence, 61);
    // Untouched fields stay put
    assert_eq!(updated.location, "Old Town");
    assert_eq!(updated.priority, Priority::Medium);
}

#[tokio::test]
async fn test_update_missing_report_is_not_found() {
    let repo = LocalRepository::new();
    let err = repo
        .update_report(ReportId::new(7), &ReportUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_report() {
    let repo = LocalRepository::new();
    let created = repo
        .insert_report(&new_report("X", Priority::Low, 0))
        .await
        .unwrap();

    repo.delete_report(created.id).await.unwrap();
    assert!(repo.fetch_report(created.id).await.is_err());
    assert!(repo.delete_report(created.id).await.is_err());
}

#[tokio::test]
async fn test_report_aggregates() {
    let repo = LocalRepository::new();
    repo.insert_report(&new_report("A", Priority::High, 90))
        .await
        .unwrap();
    repo.insert_report(&new_report("B", Priority::Low, 0))
        .await
        .unwrap();
    repo.insert_report(&NewReport {
        image_data: None,
        image_name: None,
        ..new_report("C", Priority::High, 41)
    })
    .await
    .unwrap();

    assert_eq!(repo.count_reports().await.unwrap(), 3);
    assert_eq!(repo.count_reports_with_image().await.unwrap(), 2);
    assert_eq!(repo.count_reports_detected().await.unwrap(), 2);
    // (90 + 0 + 41) / 3 = 43 truncated
    assert_eq!(repo.average_confidence().await.unwrap(), Some(43));
    assert_eq!(
        repo.count_reports_by_status(ReportStatus::Pending)
            .await
            .unwrap(),
        3
    );
    assert_eq!(
        repo.count_reports_by_priority(Priority::High).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn test_average_confidence_none_when_empty() {
    let repo = LocalRepository::new();
    assert_eq!(repo.average_confidence().await.unwrap(), None);
}

#[tokio::test]
async fn test_camera_crud() {
    let repo = LocalRepository::new();
    let created = repo
        .insert_camera(&new_camera("Gate 1", CameraStatus::Active))
        .await
        .unwrap();

    let fetched = repo.fetch_camera(created.id).await.unwrap();
    assert_eq!(fetched.name, "Gate 1");
    assert_eq!(fetched.status, CameraStatus::Active);

    let updated = repo
        .update_camera(
            created.id,
            &CameraUpdate {
                status: Some(CameraStatus::Inactive),
                ip_address: Some("10.1.1.5".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, CameraStatus::Inactive);
    assert_eq!(updated.ip_address, "10.1.1.5");
    assert_eq!(updated.name, "Gate 1");

    assert_eq!(repo.list_cameras().await.unwrap().len(), 1);
    repo.delete_camera(created.id).await.unwrap();
    assert!(repo.fetch_camera(created.id).await.is_err());
}

#[tokio::test]
async fn test_camera_counts() {
    let repo = LocalRepository::new();
    repo.insert_camera(&new_camera("Gate 1", CameraStatus::Active))
        .await
        .unwrap();
    repo.insert_camera(&new_camera("Gate 2", CameraStatus::Inactive))
        .await
        .unwrap();
    repo.insert_camera(&new_camera("Gate 3", CameraStatus::Active))
        .await
        .unwrap();

    assert_eq!(repo.count_cameras().await.unwrap(), 3);
    assert_eq!(repo.count_active_cameras().await.unwrap(), 2);
}

#[tokio::test]
async fn test_statistics_roundtrip() {
    let repo = LocalRepository::new();

    // Zeroed before anything is written
    assert_eq!(repo.fetch_statistics().await.unwrap(), Statistics::default());

    let stats = Statistics {
        images_analyzed: 4,
        waste_detected: 3,
        average_confidence: 71,
        detection_rate: 75,
    };
    repo.upsert_statistics(&stats).await.unwrap();
    assert_eq!(repo.fetch_statistics().await.unwrap(), stats);

    // Second upsert replaces the single row
    let newer = Statistics {
        images_analyzed: 5,
        ..stats
    };
    repo.upsert_statistics(&newer).await.unwrap();
    assert_eq!(repo.fetch_statistics().await.unwrap(), newer);
}

#[tokio::test]
async fn test_health_check() {
    let repo = LocalRepository::new();
    assert!(repo.health_check().await.unwrap());
}
