use crate::shared::constants::FRAME_CHANNELS;
use crate::shared::error::AnonymizeError;
use crate::shared::pixel_region::PixelRegion;

use super::mask::Mask;

/// Selects, per pixel, the blurred value where `mask` is opaque and the
/// original value where it is transparent. There is no partial blending.
pub fn composite(
    original: &PixelRegion,
    blurred: &PixelRegion,
    mask: &Mask,
) -> Result<PixelRegion, AnonymizeError> {
    if original.dimensions() != blurred.dimensions() || original.dimensions() != mask.dimensions() {
        return Err(AnonymizeError::DimensionMismatch {
            original: original.dimensions(),
            blurred: blurred.dimensions(),
            mask: mask.dimensions(),
        });
    }

    let channels = FRAME_CHANNELS as usize;
    let mut out = original.data().to_vec();
    for ((dst, src), &opaque) in out
        .chunks_exact_mut(channels)
        .zip(blurred.data().chunks_exact(channels))
        .zip(mask.as_slice())
    {
        if opaque {
            dst.copy_from_slice(src);
        }
    }
    PixelRegion::new(out, original.width(), original.height())
}
