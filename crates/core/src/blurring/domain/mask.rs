use crate::shared::constants::ELLIPSE_VERTICAL_RATIO;
use crate::shared::error::AnonymizeError;

use super::blur_mode::BlurMode;

/// Binary per-pixel selection over a region: opaque pixels take the
/// blurred value, transparent pixels keep the original.
///
/// Built fresh for every face box and dropped after compositing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    opaque: Vec<bool>,
}

impl Mask {
    /// Builds the mask for a `width` x `height` region under `mode`.
    ///
    /// `SoftPolygon` is an ellipse centred on the region with semi-axes
    /// `width / 2` and `trunc(height * 0.60)` (at least 1), tested at pixel
    /// centres. The vertical axis deliberately overshoots the box so the
    /// ellipse covers forehead and chin. `FullMask` selects every pixel.
    pub fn build(width: u32, height: u32, mode: BlurMode) -> Result<Self, AnonymizeError> {
        if width == 0 || height == 0 {
            return Err(AnonymizeError::InvalidGeometry { width, height });
        }
        let opaque = match mode {
            BlurMode::SoftPolygon => ellipse(width, height),
            BlurMode::FullMask => vec![true; width as usize * height as usize],
        };
        Ok(Self {
            width,
            height,
            opaque,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.opaque[y as usize * self.width as usize + x as usize]
    }

    pub fn opaque_count(&self) -> usize {
        self.opaque.iter().filter(|&&o| o).count()
    }

    /// Row-major opacity flags, one per pixel.
    pub fn as_slice(&self) -> &[bool] {
        &self.opaque
    }
}

fn ellipse(width: u32, height: u32) -> Vec<bool> {
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let semi_a = width as f64 / 2.0;
    let semi_b = ((height as f64 * ELLIPSE_VERTICAL_RATIO) as u32).max(1) as f64;

    let mut opaque = Vec::with_capacity(width as usize * height as usize);
    for row in 0..height {
        let dy = (row as f64 + 0.5 - cy) / semi_b;
        for col in 0..width {
            let dx = (col as f64 + 0.5 - cx) / semi_a;
            opaque.push(dx * dx + dy * dy <= 1.0);
        }
    }
    opaque
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners(w: u32, h: u32) -> [(u32, u32); 4] {
        [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)]
    }

    #[test]
    fn test_full_mask_is_all_opaque() {
        for &(w, h) in &[(1, 1), (1, 9), (7, 1), (13, 8), (128, 144)] {
            let mask = Mask::build(w, h, BlurMode::FullMask).unwrap();
            assert_eq!(mask.dimensions(), (w, h));
            assert_eq!(mask.opaque_count(), (w * h) as usize);
        }
    }

    #[test]
    fn test_soft_polygon_centre_opaque_corners_transparent() {
        for w in 4..=64 {
            for h in 4..=64 {
                let mask = Mask::build(w, h, BlurMode::SoftPolygon).unwrap();
                assert!(mask.is_opaque(w / 2, h / 2), "centre of {w}x{h}");
                for (x, y) in corners(w, h) {
                    assert!(!mask.is_opaque(x, y), "corner ({x},{y}) of {w}x{h}");
                }
            }
        }
    }

    #[test]
    fn test_soft_polygon_tightest_corner_case() {
        // 4x6 is the tightest case: the corners sit just outside the ellipse.
        let mask = Mask::build(4, 6, BlurMode::SoftPolygon).unwrap();
        for (x, y) in corners(4, 6) {
            assert!(!mask.is_opaque(x, y));
        }
    }

    #[test]
    fn test_soft_polygon_spans_full_height_on_centre_column() {
        // The vertical semi-axis (86 for h=144) exceeds half the height.
        let mask = Mask::build(128, 144, BlurMode::SoftPolygon).unwrap();
        for y in 0..144 {
            assert!(mask.is_opaque(64, y));
        }
    }

    #[test]
    fn test_soft_polygon_is_symmetric() {
        let (w, h) = (31, 20);
        let mask = Mask::build(w, h, BlurMode::SoftPolygon).unwrap();
        for y in 0..h {
            for x in 0..w {
                assert_eq!(mask.is_opaque(x, y), mask.is_opaque(w - 1 - x, y));
                assert_eq!(mask.is_opaque(x, y), mask.is_opaque(x, h - 1 - y));
            }
        }
    }

    #[test]
    fn test_soft_polygon_covers_less_than_full() {
        let soft = Mask::build(50, 50, BlurMode::SoftPolygon).unwrap();
        let full = Mask::build(50, 50, BlurMode::FullMask).unwrap();
        assert!(soft.opaque_count() < full.opaque_count());
        assert!(soft.opaque_count() > 0);
    }

    #[test]
    fn test_single_pixel_soft_polygon_is_opaque() {
        let mask = Mask::build(1, 1, BlurMode::SoftPolygon).unwrap();
        assert!(mask.is_opaque(0, 0));
    }

    #[test]
    fn test_zero_dimension_is_invalid_geometry() {
        assert_eq!(
            Mask::build(0, 5, BlurMode::FullMask).unwrap_err(),
            AnonymizeError::InvalidGeometry {
                width: 0,
                height: 5
            }
        );
        assert!(Mask::build(5, 0, BlurMode::SoftPolygon).is_err());
    }
}
