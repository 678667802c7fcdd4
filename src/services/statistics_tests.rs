#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::api::{Priority, Report, ReportId, ReportStatus};
    use crate::services::statistics::{compose, recompute};

    fn create_report(id: i64, ai_confidence: i32, with_image: bool) -> Report {
        Report {
            id: ReportId::new(id),
            location: "Depot 4".to_string(),
            priority: Priority::Medium,
            status: ReportStatus::Pending,
            ai_confidence,
            reported_at: Utc::now(),
            image_data: with_image.then(|| vec![0u8; 16]),
            image_name: with_image.then(|| format!("{}.jpg", id)),
        }
    }

    #[test]
    fn test_recompute_empty() {
        let stats = recompute(&[]);

        assert_eq!(stats.images_analyzed, 0);
        assert_eq!(stats.waste_detected, 0);
        assert_eq!(stats.average_confidence, 0);
        assert_eq!(stats.detection_rate, 0);
    }

    #[test]
    fn test_recompute_basic() {
        let reports = vec![
            create_report(1, 80, true),
            create_report(2, 0, false),
            create_report(3, 61, true),
        ];
        let stats = recompute(&reports);

        assert_eq!(stats.images_analyzed, 2);
        assert_eq!(stats.waste_detected, 2);
        // (80 + 0 + 61) / 3 = 47 (truncated)
        assert_eq!(stats.average_confidence, 47);
        // 2 * 100 / 3 = 66 (truncated)
        assert_eq!(stats.detection_rate, 66);
    }

    #[test]
    fn test_recompute_idempotent() {
        let reports = vec![create_report(1, 90, true), create_report(2, 55, true)];

        let first = recompute(&reports);
        let second = recompute(&reports);
        assert_eq!(first, second);
    }

    #[test]
    fn test_recompute_matches_compose_over_aggregates() {
        let reports = vec![
            create_report(1, 70, true),
            create_report(2, 0, true),
            create_report(3, 88, false),
            create_report(4, 52, true),
        ];

        let total = reports.len() as i64;
        let with_images = reports.iter().filter(|r| r.has_image()).count() as i64;
        let detected = reports.iter().filter(|r| r.ai_confidence > 0).count() as i64;
        let average =
            reports.iter().map(|r| i64::from(r.ai_confidence)).sum::<i64>() / total;

        assert_eq!(recompute(&reports), compose(total, with_images, detected, average));
    }

    #[test]
    fn test_zero_confidence_reports_do_not_count_as_detected() {
        let reports = vec![create_report(1, 0, true), create_report(2, 0, true)];
        let stats = recompute(&reports);

        assert_eq!(stats.images_analyzed, 2);
        assert_eq!(stats.waste_detected, 0);
        assert_eq!(stats.detection_rate, 0);
    }
}
