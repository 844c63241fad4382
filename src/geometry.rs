use crate::error::{AnnotateError, Result};
use crate::models::{BBox, PixelRect};

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(AnnotateError::ZeroDimension { width, height });
    }
    Ok(())
}

pub fn normalize(rect: PixelRect, width: u32, height: u32) -> Result<BBox> {
    check_dimensions(width, height)?;
    let right = u64::from(rect.x) + u64::from(rect.width);
    let bottom = u64::from(rect.y) + u64::from(rect.height);
    if right > u64::from(width) || bottom > u64::from(height) {
        return Err(AnnotateError::OutOfBounds { width, height });
    }

    let (w, h) = (f64::from(width), f64::from(height));
    Ok(BBox {
        ymin: f64::from(rect.y) / h,
        xmin: f64::from(rect.x) / w,
        ymax: bottom as f64 / h,
        xmax: right as f64 / w,
    })
}

pub fn scale_to_pixels(bbox: &BBox, width: u32, height: u32) -> Result<BBox> {
    check_dimensions(width, height)?;
    bbox.check_normalized()?;
    let (w, h) = (f64::from(width), f64::from(height));
    Ok(BBox {
        ymin: bbox.ymin * h,
        xmin: bbox.xmin * w,
        ymax: bbox.ymax * h,
        xmax: bbox.xmax * w,
    })
}

// normalize 的逆变换，取整到像素
pub fn denormalize(bbox: &BBox, width: u32, height: u32) -> Result<PixelRect> {
    let px = scale_to_pixels(bbox, width, height)?;
    let x = px.xmin.round() as u32;
    let y = px.ymin.round() as u32;
    let right = (px.xmax.round() as u32).max(x);
    let bottom = (px.ymax.round() as u32).max(y);
    Ok(PixelRect {
        x,
        y,
        width: right - x,
        height: bottom - y,
    })
}

// 返回 (x, y)
pub fn center(bbox: &BBox) -> (f64, f64) {
    (
        (bbox.xmin + bbox.xmax) / 2.0,
        (bbox.ymin + bbox.ymax) / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn normalize_divides_by_image_size() {
        let rect = PixelRect {
            x: 10,
            y: 20,
            width: 50,
            height: 40,
        };
        let b = normalize(rect, 100, 200).unwrap();
        assert_eq!(b, BBox::new(0.1, 0.1, 0.3, 0.6));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let rect = PixelRect::default();
        assert!(matches!(
            normalize(rect, 0, 10),
            Err(AnnotateError::ZeroDimension { width: 0, height: 10 })
        ));
        let b = BBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(denormalize(&b, 10, 0).unwrap_err().is_geometry());
    }

    #[test]
    fn rect_past_image_edge_is_rejected() {
        let rect = PixelRect {
            x: 90,
            y: 0,
            width: 20,
            height: 5,
        };
        assert!(matches!(
            normalize(rect, 100, 100),
            Err(AnnotateError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn inverted_box_is_rejected() {
        let b = BBox::new(0.6, 0.1, 0.2, 0.5);
        assert!(matches!(
            denormalize(&b, 100, 100),
            Err(AnnotateError::InvertedBox)
        ));
    }

    #[test]
    fn out_of_range_box_is_not_normalized() {
        let b = BBox::new(0.0, 0.0, 1.5, 0.5);
        assert!(matches!(
            denormalize(&b, 100, 100),
            Err(AnnotateError::NotNormalized)
        ));
    }

    #[test]
    fn round_trip_stays_within_a_pixel() {
        let sizes = [(1, 1), (7, 3), (84, 84), (100, 100), (641, 479), (1920, 1080)];
        let steps = [0.0, 0.013, 0.25, 0.333, 0.5, 0.77, 0.999, 1.0];
        for &(w, h) in &sizes {
            for &a in &steps {
                for &b in &steps {
                    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                    let bbox = BBox::new(lo, lo, hi, hi);
                    let rect = denormalize(&bbox, w, h).unwrap();
                    let back = normalize(rect, w, h).unwrap();
                    let (tx, ty) = (1.0 / f64::from(w), 1.0 / f64::from(h));
                    assert!(close(back.xmin, bbox.xmin, tx), "{bbox:?} on {w}x{h}");
                    assert!(close(back.xmax, bbox.xmax, tx), "{bbox:?} on {w}x{h}");
                    assert!(close(back.ymin, bbox.ymin, ty), "{bbox:?} on {w}x{h}");
                    assert!(close(back.ymax, bbox.ymax, ty), "{bbox:?} on {w}x{h}");
                }
            }
        }
    }

    #[test]
    fn pixel_rect_round_trip_is_exact() {
        let rect = PixelRect {
            x: 10,
            y: 10,
            width: 50,
            height: 40,
        };
        let b = normalize(rect, 100, 100).unwrap();
        assert_eq!(denormalize(&b, 100, 100).unwrap(), rect);
    }

    #[test]
    fn unit_box_center() {
        assert_eq!(center(&BBox::new(0.0, 0.0, 1.0, 1.0)), (0.5, 0.5));
    }

    #[test]
    fn center_is_x_then_y() {
        let (x, y) = center(&BBox::new(0.1, 0.5, 0.3, 0.9));
        assert!(close(x, 0.7, 1e-12));
        assert!(close(y, 0.2, 1e-12));
    }
}
