use thiserror::Error;

/// Failures raised by the anonymization core.
///
/// Everything here is local to a single `anonymize` call. Mode and intensity
/// problems never appear: those resolve to documented fallbacks instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnonymizeError {
    #[error("invalid region geometry {width}x{height}: dimensions must be positive")]
    InvalidGeometry { width: u32, height: u32 },

    #[error("kernel size {0} is invalid: must be odd and at least 3")]
    InvalidKernelSize(usize),

    #[error("region size mismatch: original {original:?}, blurred {blurred:?}, mask {mask:?}")]
    DimensionMismatch {
        original: (u32, u32),
        blurred: (u32, u32),
        mask: (u32, u32),
    },

    #[error("frame has zero area ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },

    #[error("frame data length {actual} does not match {width}x{height}x3 = {expected}")]
    InvalidFrameData {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("region {x},{y} {width}x{height} exceeds frame {frame_width}x{frame_height}")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        frame_width: u32,
        frame_height: u32,
    },

    #[error("malformed detection: {0}")]
    MalformedDetection(String),
}
