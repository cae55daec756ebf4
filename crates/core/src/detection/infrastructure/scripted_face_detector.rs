use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::bounding_box::NormalizedBox;
use crate::shared::frame::Frame;

/// Recorded detector output: entry `i` holds the boxes for frame index `i`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionScript {
    #[serde(default)]
    pub frames: Vec<Vec<NormalizedBox>>,
}

impl DetectionScript {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read detections {}: {e}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn detections_for(&self, index: usize) -> &[NormalizedBox] {
        self.frames.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Replays pre-recorded detections by frame index.
///
/// Stands in for a live detection model when the boxes were produced
/// offline. Frames past the end of the script have no detections.
pub struct ScriptedFaceDetector {
    script: DetectionScript,
}

impl ScriptedFaceDetector {
    pub fn new(script: DetectionScript) -> Self {
        Self { script }
    }
}

impl FaceDetector for ScriptedFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<NormalizedBox>, Box<dyn std::error::Error>> {
        Ok(self.script.detections_for(frame.index()).to_vec())
    }
}
