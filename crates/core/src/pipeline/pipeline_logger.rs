use std::collections::BTreeMap;
use std::time::Instant;

/// Observer for stream-level events: progress, stage timings, metrics.
///
/// Keeps the use case free of any particular output mechanism.
pub trait PipelineLogger: Send {
    /// Report that `current` frames are done, out of `total` when known.
    fn progress(&mut self, current: usize, total: Option<usize>);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a per-frame value such as the number of detections.
    fn metric(&mut self, name: &str, value: f64);

    /// Emit an end-of-stream summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards everything. Used by tests and embedders with their own reporting.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: Option<usize>) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
}

/// Running aggregate for one stage or metric.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStat {
    pub count: usize,
    pub sum: f64,
    pub max: f64,
}

impl RunningStat {
    fn record(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.max = self.max.max(value);
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Aggregates timings and metrics and reports through the `log` crate.
///
/// Progress lines are throttled to every `every_frames` frames.
pub struct LogPipelineLogger {
    every_frames: usize,
    timings: BTreeMap<String, RunningStat>,
    metrics: BTreeMap<String, RunningStat>,
    frames_done: usize,
    started: Instant,
}

impl LogPipelineLogger {
    pub fn new(every_frames: usize) -> Self {
        Self {
            every_frames: every_frames.max(1),
            timings: BTreeMap::new(),
            metrics: BTreeMap::new(),
            frames_done: 0,
            started: Instant::now(),
        }
    }

    pub fn timing_stat(&self, stage: &str) -> Option<&RunningStat> {
        self.timings.get(stage)
    }

    pub fn metric_stat(&self, name: &str) -> Option<&RunningStat> {
        self.metrics.get(name)
    }

    /// Formatted report, or `None` before anything was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }
        let elapsed_s = self.started.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Anonymized {} frames in {elapsed_s:.2}s",
            self.frames_done
        )];
        for (stage, stat) in &self.timings {
            lines.push(format!(
                "  {stage:10} avg {:6.2}ms  max {:6.2}ms",
                stat.mean(),
                stat.max
            ));
        }
        for (name, stat) in &self.metrics {
            lines.push(format!("  {name:10} avg {:.2}  max {:.0}", stat.mean(), stat.max));
        }
        if self.frames_done > 0 && elapsed_s > 0.0 {
            lines.push(format!(
                "  throughput {:.1} fps",
                self.frames_done as f64 / elapsed_s
            ));
        }
        Some(lines.join("\n"))
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn progress(&mut self, current: usize, total: Option<usize>) {
        self.frames_done = current;
        let at_end = total == Some(current);
        if current % self.every_frames == 0 || at_end {
            match total {
                Some(total) => log::info!("Anonymized {current}/{total} frames"),
                None => log::info!("Anonymized {current} frames"),
            }
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().record(value);
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_logger_accepts_everything() {
        let mut logger = NullPipelineLogger;
        logger.progress(1, Some(10));
        logger.timing("anonymize", 3.0);
        logger.metric("detections", 2.0);
        logger.summary();
    }

    #[test]
    fn test_timing_aggregates() {
        let mut logger = LogPipelineLogger::new(10);
        logger.timing("anonymize", 2.0);
        logger.timing("anonymize", 6.0);
        let stat = logger.timing_stat("anonymize").unwrap();
        assert_eq!(stat.count, 2);
        assert_relative_eq!(stat.mean(), 4.0);
        assert_relative_eq!(stat.max, 6.0);
        assert!(logger.timing_stat("detect").is_none());
    }

    #[test]
    fn test_metric_aggregates() {
        let mut logger = LogPipelineLogger::new(10);
        for n in [0.0, 1.0, 5.0] {
            logger.metric("detections", n);
        }
        let stat = logger.metric_stat("detections").unwrap();
        assert_relative_eq!(stat.mean(), 2.0);
        assert_relative_eq!(stat.max, 5.0);
    }

    #[test]
    fn test_summary_lists_stages_and_metrics() {
        let mut logger = LogPipelineLogger::new(10);
        logger.progress(4, Some(4));
        logger.timing("detect", 1.0);
        logger.timing("write", 1.0);
        logger.metric("detections", 1.0);
        let text = logger.summary_string().unwrap();
        assert!(text.contains("Anonymized 4 frames"));
        assert!(text.contains("detect"));
        assert!(text.contains("write"));
        assert!(text.contains("detections"));
    }

    #[test]
    fn test_empty_summary_is_none() {
        assert!(LogPipelineLogger::default().summary_string().is_none());
    }

    #[test]
    fn test_progress_tracks_frames_without_total() {
        let mut logger = LogPipelineLogger::new(2);
        for i in 1..=5 {
            logger.progress(i, None);
        }
        assert_eq!(logger.frames_done, 5);
    }

    #[test]
    fn test_throttle_never_zero() {
        assert_eq!(LogPipelineLogger::new(0).every_frames, 1);
    }

    #[test]
    fn test_running_stat_mean_of_empty_is_zero() {
        assert_relative_eq!(RunningStat::default().mean(), 0.0);
    }
}
