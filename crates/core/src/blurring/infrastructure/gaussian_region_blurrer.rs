use std::cell::RefCell;

use crate::blurring::domain::region_blurrer::RegionBlurrer;
use crate::shared::constants::{BLUR_SIGMA, FRAME_CHANNELS};
use crate::shared::error::AnonymizeError;
use crate::shared::pixel_region::PixelRegion;

use super::gaussian;

/// CPU region blurrer using a separable Gaussian with a fixed sigma.
///
/// The kernel size only bounds the convolution support, so larger kernels
/// still blur harder at the same sigma. The last kernel and the intermediate
/// buffer are cached across calls since intensity rarely changes between
/// frames.
pub struct GaussianRegionBlurrer {
    sigma: f64,
    kernel: RefCell<Option<(usize, Vec<f32>)>>,
    blur_temp: RefCell<Vec<f32>>,
}

impl GaussianRegionBlurrer {
    pub fn new(sigma: f64) -> Self {
        Self {
            sigma,
            kernel: RefCell::new(None),
            blur_temp: RefCell::new(Vec::new()),
        }
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    fn with_kernel<R>(&self, kernel_size: usize, f: impl FnOnce(&[f32]) -> R) -> R {
        let mut cached = self.kernel.borrow_mut();
        let kernel = match cached.take() {
            Some((size, kernel)) if size == kernel_size => kernel,
            _ => {
                log::debug!(
                    "Building Gaussian kernel (size={kernel_size}, sigma={})",
                    self.sigma
                );
                gaussian::gaussian_kernel_1d(kernel_size, self.sigma)
            }
        };
        let result = f(&kernel);
        *cached = Some((kernel_size, kernel));
        result
    }
}

impl Default for GaussianRegionBlurrer {
    fn default() -> Self {
        Self::new(BLUR_SIGMA)
    }
}

impl RegionBlurrer for GaussianRegionBlurrer {
    fn blur(&self, region: &PixelRegion, kernel_size: usize) -> Result<PixelRegion, AnonymizeError> {
        if kernel_size < 3 || kernel_size % 2 == 0 {
            return Err(AnonymizeError::InvalidKernelSize(kernel_size));
        }
        let (width, height) = region.dimensions();
        let mut out = Vec::new();
        self.with_kernel(kernel_size, |kernel| {
            let mut temp = self.blur_temp.borrow_mut();
            gaussian::separable_gaussian_blur(
                region.data(),
                width as usize,
                height as usize,
                FRAME_CHANNELS as usize,
                kernel,
                &mut temp,
                &mut out,
            );
        });
        PixelRegion::new(out, width, height)
    }
}
