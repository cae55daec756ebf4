use crate::blurring::domain::blur_mode::BlurMode;
use crate::blurring::domain::compositor::composite;
use crate::blurring::domain::mask::Mask;
use crate::blurring::domain::region_blurrer::RegionBlurrer;
use crate::blurring::infrastructure::gaussian_region_blurrer::GaussianRegionBlurrer;
use crate::pipeline::anonymize_config::AnonymizeConfig;
use crate::shared::bounding_box::{NormalizedBox, PixelBox};
use crate::shared::error::AnonymizeError;
use crate::shared::frame::Frame;

/// Outcome of one `anonymize` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnonymizeReport {
    /// Clamped pixel boxes that were blurred, in processing order.
    pub blurred: Vec<PixelBox>,
    /// Detections dropped because their coordinates were malformed.
    pub skipped: usize,
}

/// Per-frame orchestrator: clamp each detection, mask, blur, composite,
/// and write the result back into the frame in place.
///
/// Detections are handled one after another against the frame as it is
/// being modified, so where boxes overlap a later box sees (and re-blurs)
/// the output of an earlier one.
pub struct FrameAnonymizer {
    blurrer: Box<dyn RegionBlurrer>,
}

impl FrameAnonymizer {
    pub fn new(blurrer: Box<dyn RegionBlurrer>) -> Self {
        Self { blurrer }
    }

    /// Anonymizes every detection in `frame`.
    ///
    /// A detection with non-finite coordinates is skipped with a warning and
    /// the rest are still processed. Any other failure means a broken
    /// invariant and aborts the call.
    pub fn anonymize(
        &self,
        frame: &mut Frame,
        detections: &[NormalizedBox],
        config: &AnonymizeConfig,
    ) -> Result<AnonymizeReport, AnonymizeError> {
        if frame.is_empty() {
            return Err(AnonymizeError::EmptyFrame {
                width: frame.width(),
                height: frame.height(),
            });
        }

        let mut report = AnonymizeReport::default();
        if detections.is_empty() {
            return Ok(report);
        }

        let kernel_size = config.kernel_size();
        for detection in detections {
            let rect = match detection.to_pixel_box(frame.width(), frame.height()) {
                Ok(rect) => rect,
                Err(AnonymizeError::MalformedDetection(reason)) => {
                    log::warn!("Skipping detection on frame {}: {reason}", frame.index());
                    report.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            log::debug!(
                "Frame {}: blurring {}x{} at ({}, {}) mode={:?} kernel={kernel_size}",
                frame.index(),
                rect.width,
                rect.height,
                rect.x,
                rect.y,
                config.mode
            );
            self.anonymize_box(frame, rect, config.mode, kernel_size)?;
            report.blurred.push(rect);
        }

        Ok(report)
    }

    fn anonymize_box(
        &self,
        frame: &mut Frame,
        rect: PixelBox,
        mode: BlurMode,
        kernel_size: usize,
    ) -> Result<(), AnonymizeError> {
        let region = frame.extract_region(rect)?;
        let mask = Mask::build(rect.width, rect.height, mode)?;
        let blurred = self.blurrer.blur(&region, kernel_size)?;
        let composited = composite(&region, &blurred, &mask)?;
        frame.write_region(rect, &composited)
    }
}

impl Default for FrameAnonymizer {
    fn default() -> Self {
        Self::new(Box::new(GaussianRegionBlurrer::default()))
    }
}
