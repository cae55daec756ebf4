use crate::shared::frame::Frame;

/// Produces captured frames in capture order.
///
/// Implementations handle decoding and device details; the pipeline only
/// sees RGB [`Frame`]s with increasing indices.
pub trait FrameSource: Send {
    /// Number of frames the source will yield, when known up front.
    fn frame_count(&self) -> Option<usize>;

    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
