#[cfg(test)]
mod tests {
    use crate::models::detection::{parse_prediction_payload, Detection};
    use serde_json::json;

    #[test]
    fn test_parse_valid_payload() {
        let payload = json!({
            "predictions": [
                {"x": 500.0, "y": 400.0, "width": 200.0, "height": 100.0,
                 "class": "bottle", "confidence": 0.87}
            ]
        });

        let detections = parse_prediction_payload(&payload).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].class_label, "bottle");
        assert_eq!(detections[0].width, 200.0);
        assert_eq!(detections[0].confidence, 0.87);
    }

    #[test]
    fn test_parse_empty_predictions() {
        let payload = json!({"predictions": []});
        let detections = parse_prediction_payload(&payload).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_missing_predictions_field_rejected() {
        let payload = json!({"time": 0.2});
        let err = parse_prediction_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("predictions"));
    }

    #[test]
    fn test_missing_field_rejected() {
        let payload = json!({
            "predictions": [{"x": 1.0, "y": 1.0, "width": 10.0, "class": "can", "confidence": 0.5}]
        });
        assert!(parse_prediction_payload(&payload).is_err());
    }

    #[test]
    fn test_negative_width_rejected() {
        let payload = json!({
            "predictions": [{"x": 1.0, "y": 1.0, "width": -10.0, "height": 5.0,
                             "class": "can", "confidence": 0.5}]
        });
        let err = parse_prediction_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn test_confidence_above_one_rejected() {
        let payload = json!({
            "predictions": [{"x": 1.0, "y": 1.0, "width": 10.0, "height": 5.0,
                             "class": "can", "confidence": 1.5}]
        });
        let err = parse_prediction_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("confidence"));
    }

    #[test]
    fn test_corners_from_center_geometry() {
        let det = Detection {
            x_center: 100.0,
            y_center: 50.0,
            width: 40.0,
            height: 20.0,
            class_label: "bag".to_string(),
            confidence: 0.9,
        };

        let (x1, y1, x2, y2) = det.corners();
        assert_eq!((x1, y1), (80.0, 40.0));
        assert_eq!((x2, y2), (120.0, 60.0));
        assert_eq!(det.area(), 800.0);
    }
}
