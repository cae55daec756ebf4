use serde::{Deserialize, Serialize};

use super::error::AnonymizeError;

/// A detector-reported face box in normalized frame coordinates (0.0-1.0).
///
/// Values come from an untrusted collaborator: they may be negative, exceed
/// 1.0, or be non-finite. [`NormalizedBox::to_pixel_box`] is the only way
/// into absolute coordinates and enforces the frame-bounds invariant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBox {
    pub x_min: f64,
    pub y_min: f64,
    pub width: f64,
    pub height: f64,
}

/// An absolute pixel rectangle guaranteed to lie inside its frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl NormalizedBox {
    pub fn new(x_min: f64, y_min: f64, width: f64, height: f64) -> Self {
        Self {
            x_min,
            y_min,
            width,
            height,
        }
    }

    /// Converts to absolute pixels and clamps into the frame.
    ///
    /// Coordinates are scaled and truncated toward zero, then clamped so that
    /// `x < frame_width`, `y < frame_height`, both extents are at least 1, and
    /// the box never crosses the right or bottom edge. Oversized boxes are
    /// truncated, never rejected.
    pub fn to_pixel_box(
        &self,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<PixelBox, AnonymizeError> {
        if frame_width == 0 || frame_height == 0 {
            return Err(AnonymizeError::EmptyFrame {
                width: frame_width,
                height: frame_height,
            });
        }
        if ![self.x_min, self.y_min, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(AnonymizeError::MalformedDetection(format!(
                "non-finite coordinates in {self:?}"
            )));
        }

        let (x, width) = clamp_axis(self.x_min, self.width, frame_width);
        let (y, height) = clamp_axis(self.y_min, self.height, frame_height);
        Ok(PixelBox {
            x,
            y,
            width,
            height,
        })
    }
}

/// Scales one axis and clamps origin into `[0, extent)` and length into `[1, extent - origin]`.
fn clamp_axis(origin: f64, length: f64, extent: u32) -> (u32, u32) {
    let extent = extent as i64;
    let start = ((origin * extent as f64) as i64).clamp(0, extent - 1);
    let len = ((length * extent as f64) as i64).max(1).min(extent - start);
    (start as u32, len as u32)
}

impl PixelBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
