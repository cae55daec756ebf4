/// Odd Gaussian kernel sizes indexed by intensity level 1..=5.
pub const KERNEL_SIZES: [usize; 5] = [15, 25, 45, 75, 99];

/// Spatial standard deviation of the blur, independent of kernel size.
pub const BLUR_SIGMA: f64 = 30.0;

/// Vertical semi-axis of the soft polygon ellipse, as a fraction of region height.
pub const ELLIPSE_VERTICAL_RATIO: f64 = 0.60;

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 5;
pub const DEFAULT_INTENSITY: u8 = 3;

/// Numeric mode codes used by the original control panel.
pub const SOFT_POLYGON_MODE_CODE: i64 = 3;
pub const FULL_MASK_MODE_CODE: i64 = 4;

pub const FRAME_CHANNELS: u8 = 3;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
