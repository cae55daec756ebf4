use crate::shared::error::AnonymizeError;
use crate::shared::pixel_region::PixelRegion;

/// Domain interface for smoothing a face region.
///
/// Implementations return a new region of the same size and must leave
/// `region` untouched. `kernel_size` must be odd and at least 3.
pub trait RegionBlurrer: Send {
    fn blur(&self, region: &PixelRegion, kernel_size: usize) -> Result<PixelRegion, AnonymizeError>;
}
