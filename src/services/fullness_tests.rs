#[cfg(test)]
mod tests {
    use crate::models::detection::Detection;
    use crate::services::fullness::{
        classify, confidence_percent, waste_type, FullnessStatus, Urgency,
    };

    fn create_detection(width: f64, height: f64, class: &str, confidence: f64) -> Detection {
        Detection {
            x_center: width / 2.0,
            y_center: height / 2.0,
            width,
            height,
            class_label: class.to_string(),
            confidence,
        }
    }

    #[test]
    fn test_classify_empty_detections() {
        let result = classify(1000, 1000, &[]);

        assert_eq!(result.status, FullnessStatus::Empty);
        assert_eq!(result.urgency, Urgency::Low);
        assert_eq!(result.fill_level, 0.0);
        assert_eq!(result.occupancy_ratio, 0.0);
        assert_eq!(confidence_percent(&[]), 0.0);
        assert_eq!(waste_type(&[]), "Unknown");
    }

    #[test]
    fn test_classify_zero_area_boxes_count_as_empty() {
        let detections = vec![create_detection(0.0, 0.0, "bottle", 0.9)];
        let result = classify(1000, 1000, &detections);

        assert_eq!(result.status, FullnessStatus::Empty);
        assert_eq!(result.fill_level, 0.0);
    }

    #[test]
    fn test_classify_single_bag_twelve_percent() {
        // 1000x1000 image, one 400x300 bag at 0.8 confidence: ratio 12%.
        let detections = vec![create_detection(400.0, 300.0, "bag", 0.8)];
        let result = classify(1000, 1000, &detections);

        assert_eq!(result.status, FullnessStatus::Low);
        assert_eq!(result.fill_level, 12.0);
        assert_eq!(result.urgency, Urgency::Low);
        assert_eq!(confidence_percent(&detections), 80.0);
        assert_eq!(waste_type(&detections), "bag");
    }

    #[test]
    fn test_classify_exact_twenty_percent_is_half_full() {
        // 400x500 = 200000 over 1000x1000: the 20 boundary is inclusive-low.
        let detections = vec![create_detection(400.0, 500.0, "bag", 0.5)];
        let result = classify(1000, 1000, &detections);

        assert_eq!(result.status, FullnessStatus::HalfFull);
        assert_eq!(result.urgency, Urgency::Medium);
        assert_eq!(result.fill_level, 20.0);
    }

    #[test]
    fn test_classify_just_below_twenty_is_low() {
        let detections = vec![create_detection(400.0, 499.0, "bag", 0.5)];
        let result = classify(1000, 1000, &detections);

        assert_eq!(result.status, FullnessStatus::Low);
        assert_eq!(result.urgency, Urgency::Low);
    }

    #[test]
    fn test_classify_sixty_percent_is_almost_full() {
        let detections = vec![create_detection(600.0, 1000.0, "bag", 0.5)];
        let result = classify(1000, 1000, &detections);

        assert_eq!(result.status, FullnessStatus::AlmostFull);
        assert_eq!(result.urgency, Urgency::High);
    }

    #[test]
    fn test_classify_exact_ninety_percent_is_overflow() {
        let detections = vec![create_detection(900.0, 1000.0, "bag", 0.5)];
        let result = classify(1000, 1000, &detections);

        assert_eq!(result.status, FullnessStatus::Overflow);
        assert_eq!(result.urgency, Urgency::Critical);
        assert_eq!(result.fill_level, 90.0);
    }

    #[test]
    fn test_classify_ratio_above_hundred_not_clamped() {
        // Two overlapping near-full boxes: 2 * 960000 over 1000000 = 192%.
        let detections = vec![
            create_detection(1200.0, 800.0, "bag", 0.7),
            create_detection(1200.0, 800.0, "bag", 0.6),
        ];
        let result = classify(1000, 1000, &detections);

        assert_eq!(result.status, FullnessStatus::Overflow);
        assert_eq!(result.urgency, Urgency::Critical);
        assert!(result.occupancy_ratio > 100.0);
        assert_eq!(result.fill_level, 192.0);
    }

    #[test]
    fn test_classify_monotone_in_total_area() {
        let mut last_fill = 0.0;
        let mut last_urgency = Urgency::Low;
        for width in [0.0, 50.0, 150.0, 300.0, 500.0, 700.0, 900.0, 1100.0] {
            let detections = vec![create_detection(width, 1000.0, "bag", 0.5)];
            let result = classify(1000, 1000, &detections);
            assert!(result.fill_level >= last_fill);
            assert!(result.urgency >= last_urgency);
            last_fill = result.fill_level;
            last_urgency = result.urgency;
        }
    }

    #[test]
    fn test_fill_level_rounded_to_one_decimal() {
        // 123456 / 1000000 = 12.3456%
        let detections = vec![create_detection(384.0, 321.5, "bag", 0.5)];
        let result = classify(1000, 1000, &detections);

        assert_eq!(result.fill_level, 12.3);
        assert!(result.occupancy_ratio != result.fill_level);
    }

    #[test]
    fn test_confidence_percent_mean_rounded() {
        let detections = vec![
            create_detection(10.0, 10.0, "bottle", 0.8),
            create_detection(10.0, 10.0, "bottle", 0.85),
        ];
        // mean 0.825 -> 82.5
        assert_eq!(confidence_percent(&detections), 82.5);
    }

    #[test]
    fn test_waste_type_single_class() {
        let detections = vec![
            create_detection(10.0, 10.0, "bottle", 0.8),
            create_detection(10.0, 10.0, "bottle", 0.7),
        ];
        assert_eq!(waste_type(&detections), "bottle");
    }

    #[test]
    fn test_waste_type_mixed_classes() {
        let detections = vec![
            create_detection(10.0, 10.0, "bottle", 0.8),
            create_detection(10.0, 10.0, "can", 0.7),
        ];
        assert_eq!(waste_type(&detections), "Mixed Waste");
    }
}
