use std::time::Instant;

use crate::detection::domain::face_detector::FaceDetector;
use crate::pipeline::anonymize_config::AnonymizeConfig;
use crate::pipeline::frame_anonymizer::FrameAnonymizer;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::video::domain::frame_sink::FrameSink;
use crate::video::domain::frame_source::FrameSource;

/// Supplies the config for a frame index. Called once per frame, before
/// any detection of that frame is processed.
pub type ConfigProvider = Box<dyn FnMut(usize) -> AnonymizeConfig + Send>;

/// Totals for one stream run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub frames: usize,
    pub detections: usize,
    pub blurred: usize,
    pub skipped: usize,
    pub detector_failures: usize,
}

/// Capture loop: read → detect → anonymize → write, one frame at a time.
///
/// Each frame is fully anonymized before it reaches the sink. A detector
/// failure on one frame is logged and that frame passes through with no
/// detections; source, sink, and anonymizer failures end the run.
pub struct AnonymizeStreamUseCase {
    source: Box<dyn FrameSource>,
    sink: Box<dyn FrameSink>,
    detector: Box<dyn FaceDetector>,
    anonymizer: FrameAnonymizer,
    config: ConfigProvider,
    logger: Box<dyn PipelineLogger>,
}

impl AnonymizeStreamUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        sink: Box<dyn FrameSink>,
        detector: Box<dyn FaceDetector>,
        anonymizer: FrameAnonymizer,
        config: AnonymizeConfig,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            sink,
            detector,
            anonymizer,
            config: Box::new(move |_: usize| config),
            logger,
        }
    }

    /// Replaces the fixed config with one looked up per frame.
    pub fn with_config_provider(mut self, provider: ConfigProvider) -> Self {
        self.config = provider;
        self
    }

    pub fn execute(&mut self) -> Result<StreamSummary, Box<dyn std::error::Error>> {
        let total = self.source.frame_count();
        let mut summary = StreamSummary::default();

        for frame_result in self.source.frames() {
            let mut frame = frame_result?;
            let config = (self.config)(frame.index());

            let t0 = Instant::now();
            let detections = match self.detector.detect(&frame) {
                Ok(detections) => detections,
                Err(e) => {
                    log::warn!(
                        "Detection failed on frame {}, passing it through: {e}",
                        frame.index()
                    );
                    summary.detector_failures += 1;
                    Vec::new()
                }
            };
            let t1 = Instant::now();

            let report = self.anonymizer.anonymize(&mut frame, &detections, &config)?;
            let t2 = Instant::now();

            self.sink.write(&frame)?;
            let t3 = Instant::now();

            summary.frames += 1;
            summary.detections += detections.len();
            summary.blurred += report.blurred.len();
            summary.skipped += report.skipped;

            self.logger.timing("detect", ms(t0, t1));
            self.logger.timing("anonymize", ms(t1, t2));
            self.logger.timing("write", ms(t2, t3));
            self.logger.metric("detections", detections.len() as f64);
            self.logger.progress(summary.frames, total);
        }

        self.source.close();
        self.sink.close()?;
        self.logger.summary();
        Ok(summary)
    }
}

fn ms(from: Instant, to: Instant) -> f64 {
    to.duration_since(from).as_secs_f64() * 1000.0
}
