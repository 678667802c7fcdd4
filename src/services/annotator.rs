//! Bounding-box rendering for annotated result images.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::models::detection::Detection;

/// Box outline color (green, matching the reporting UI).
const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
/// Outline thickness in pixels.
const BOX_THICKNESS: i64 = 2;

/// Draw one hollow rectangle per detection onto the raster.
///
/// Corners come from the center-point geometry and are clamped to the frame,
/// so boxes that spill past the edges still render as a partial outline.
pub fn draw_detections(img: &mut RgbImage, detections: &[Detection]) {
    let (frame_w, frame_h) = (i64::from(img.width()), i64::from(img.height()));

    for det in detections {
        let (x1, y1, x2, y2) = det.corners();
        let x1 = (x1 as i64).clamp(0, frame_w - 1);
        let y1 = (y1 as i64).clamp(0, frame_h - 1);
        let x2 = (x2 as i64).clamp(0, frame_w - 1);
        let y2 = (y2 as i64).clamp(0, frame_h - 1);
        if x2 <= x1 || y2 <= y1 {
            continue;
        }

        for inset in 0..BOX_THICKNESS {
            let w = x2 - x1 - 2 * inset;
            let h = y2 - y1 - 2 * inset;
            if w <= 0 || h <= 0 {
                break;
            }
            let rect =
                Rect::at((x1 + inset) as i32, (y1 + inset) as i32).of_size(w as u32, h as u32);
            draw_hollow_rect_mut(img, rect, BOX_COLOR);
        }
    }
}

/// Encode the raster as JPEG bytes.
pub fn encode_jpeg(img: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new(std::io::Cursor::new(&mut buf));
    img.write_with_encoder(encoder)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered_detection(width: f64, height: f64) -> Detection {
        Detection {
            x_center: 50.0,
            y_center: 50.0,
            width,
            height,
            class_label: "bottle".to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_draw_detections_outlines_box() {
        let mut img = RgbImage::new(100, 100);
        draw_detections(&mut img, &[centered_detection(40.0, 40.0)]);

        // Box spans 30..70; the outline sits on the edge, the center stays dark.
        assert_eq!(*img.get_pixel(30, 50), Rgb([0, 255, 0]));
        assert_eq!(*img.get_pixel(50, 30), Rgb([0, 255, 0]));
        assert_eq!(*img.get_pixel(50, 50), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(5, 5), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_oversized_box_is_clamped_to_frame() {
        let mut img = RgbImage::new(100, 100);
        draw_detections(&mut img, &[centered_detection(500.0, 500.0)]);

        assert_eq!(*img.get_pixel(0, 50), Rgb([0, 255, 0]));
        assert_eq!(*img.get_pixel(50, 50), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_encode_jpeg_produces_bytes() {
        let img = RgbImage::new(32, 32);
        let bytes = encode_jpeg(&img).unwrap();
        assert!(!bytes.is_empty());
        // JPEG SOI marker
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
