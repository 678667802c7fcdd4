#[cfg(test)]
mod tests {
    use crate::api::{NewCamera, NewReport, Priority, ReportStatus, ReportUpdate};
    use crate::db::repositories::LocalRepository;
    use crate::db::services;
    use crate::models::report::CameraStatus;

    fn create_new_report(ai_confidence: i32, with_image: bool) -> NewReport {
        NewReport {
            location: "Market Street".to_string(),
            priority: Priority::High,
            status: ReportStatus::Pending,
            ai_confidence,
            image_data: with_image.then(|| vec![1u8, 2, 3]),
            image_name: with_image.then(|| "annotated.jpg".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_report_refreshes_statistics() {
        let repo = LocalRepository::new();

        services::create_report(&repo, &create_new_report(80, true))
            .await
            .unwrap();

        let stats = services::get_statistics(&repo).await.unwrap();
        assert_eq!(stats.images_analyzed, 1);
        assert_eq!(stats.waste_detected, 1);
        assert_eq!(stats.average_confidence, 80);
        assert_eq!(stats.detection_rate, 100);
    }

    #[tokio::test]
    async fn test_update_report_refreshes_statistics() {
        let repo = LocalRepository::new();
        let report = services::create_report(&repo, &create_new_report(80, true))
            .await
            .unwrap();

        let changes = ReportUpdate {
            ai_confidence: Some(0),
            ..Default::default()
        };
        services::update_report(&repo, report.id, &changes)
            .await
            .unwrap();

        let stats = services::get_statistics(&repo).await.unwrap();
        assert_eq!(stats.waste_detected, 0);
        assert_eq!(stats.average_confidence, 0);
        assert_eq!(stats.detection_rate, 0);
    }

    #[tokio::test]
    async fn test_delete_report_refreshes_statistics() {
        let repo = LocalRepository::new();
        let report = services::create_report(&repo, &create_new_report(80, true))
            .await
            .unwrap();

        services::delete_report(&repo, report.id).await.unwrap();

        let stats = services::get_statistics(&repo).await.unwrap();
        assert_eq!(stats.images_analyzed, 0);
        assert_eq!(stats.waste_detected, 0);
    }

    #[tokio::test]
    async fn test_refresh_statistics_idempotent() {
        let repo = LocalRepository::new();
        services::create_report(&repo, &create_new_report(64, true))
            .await
            .unwrap();
        services::create_report(&repo, &create_new_report(0, false))
            .await
            .unwrap();

        let first = services::refresh_statistics(&repo).await.unwrap();
        let second = services::refresh_statistics(&repo).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(services::get_statistics(&repo).await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_statistics_zeroed_before_first_report() {
        let repo = LocalRepository::new();
        let stats = services::get_statistics(&repo).await.unwrap();

        assert_eq!(stats.images_analyzed, 0);
        assert_eq!(stats.waste_detected, 0);
        assert_eq!(stats.average_confidence, 0);
        assert_eq!(stats.detection_rate, 0);
    }

    #[tokio::test]
    async fn test_dashboard_summary_counts() {
        let repo = LocalRepository::new();

        services::add_camera(
            &repo,
            &NewCamera {
                name: "Gate A".to_string(),
                location: "North".to_string(),
                status: CameraStatus::Active,
                ip_address: "10.0.0.10".to_string(),
            },
        )
        .await
        .unwrap();
        services::add_camera(
            &repo,
            &NewCamera {
                name: "Gate B".to_string(),
                location: "South".to_string(),
                status: CameraStatus::Inactive,
                ip_address: "10.0.0.11".to_string(),
            },
        )
        .await
        .unwrap();

        services::create_report(&repo, &create_new_report(90, true))
            .await
            .unwrap();

        let summary = services::dashboard_summary(&repo).await.unwrap();
        assert_eq!(summary.total_cameras, 2);
        assert_eq!(summary.active_cameras, 1);
        assert_eq!(summary.total_reports, 1);
        assert_eq!(summary.pending_reports, 1);
        assert_eq!(summary.high_priority_reports, 1);
        assert_eq!(summary.statistics.images_analyzed, 1);
    }
}
