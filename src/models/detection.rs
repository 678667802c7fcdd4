//! Detection records and wire-boundary validation.
//!
//! The hosted detection service answers with dynamically-typed JSON. That
//! payload is mapped into validated [`Detection`] records here, failing
//! fast on missing or invalid fields instead of letting raw maps travel
//! through the rest of the system.

use serde::{Deserialize, Serialize};

/// One object found by the detection model, described by a center-point
/// bounding box, class label, and confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Box center X in pixels
    pub x_center: f64,
    /// Box center Y in pixels
    pub y_center: f64,
    /// Box width in pixels
    pub width: f64,
    /// Box height in pixels
    pub height: f64,
    /// Predicted class label
    pub class_label: String,
    /// Model confidence in [0, 1]
    pub confidence: f64,
}

impl Detection {
    /// Area covered by the bounding box, in square pixels.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Top-left and bottom-right corners derived from the center geometry,
    /// as `(x1, y1, x2, y2)`.
    pub fn corners(&self) -> (f64, f64, f64, f64) {
        let x1 = self.x_center - self.width / 2.0;
        let y1 = self.y_center - self.height / 2.0;
        (x1, y1, x1 + self.width, y1 + self.height)
    }
}

/// Raised when a detection service payload cannot be mapped into
/// [`Detection`] records.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct MalformedPrediction(pub String);

/// Raw prediction entry as returned by the hosted service.
#[derive(Debug, Deserialize)]
struct RawPrediction {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(rename = "class")]
    class_label: String,
    confidence: f64,
}

/// Map the service's `{"predictions": [...]}` payload into validated records.
pub fn parse_prediction_payload(
    payload: &serde_json::Value,
) -> Result<Vec<Detection>, MalformedPrediction> {
    let predictions = payload
        .get("predictions")
        .ok_or_else(|| MalformedPrediction("missing 'predictions' field".to_string()))?;

    let raw: Vec<RawPrediction> = serde_json::from_value(predictions.clone())
        .map_err(|e| MalformedPrediction(format!("invalid prediction entry: {}", e)))?;

    raw.into_iter().map(validate).collect()
}

fn validate(raw: RawPrediction) -> Result<Detection, MalformedPrediction> {
    for (name, value) in [
        ("x", raw.x),
        ("y", raw.y),
        ("width", raw.width),
        ("height", raw.height),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(MalformedPrediction(format!(
                "field '{}' out of range: {}",
                name, value
            )));
        }
    }

    if !raw.confidence.is_finite() || !(0.0..=1.0).contains(&raw.confidence) {
        return Err(MalformedPrediction(format!(
            "confidence out of range: {}",
            raw.confidence
        )));
    }

    Ok(Detection {
        x_center: raw.x,
        y_center: raw.y,
        width: raw.width,
        height: raw.height,
        class_label: raw.class_label,
        confidence: raw.confidence,
    })
}
