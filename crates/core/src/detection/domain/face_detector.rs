use crate::shared::bounding_box::NormalizedBox;
use crate::shared::frame::Frame;

/// Domain interface for the external face detector.
///
/// Any model (or replay source) that yields normalized boxes per frame
/// fits here. Implementations may be stateful, hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<NormalizedBox>, Box<dyn std::error::Error>>;
}
