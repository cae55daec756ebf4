use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::blurring::domain::blur_mode::BlurMode;
use crate::blurring::domain::intensity::IntensityLevel;

/// Per-call anonymization parameters.
///
/// Passed explicitly into every `anonymize` call; the core keeps no
/// ambient mode or intensity state. Values may change between frames but
/// are read once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizeConfig {
    #[serde(default)]
    pub mode: BlurMode,
    #[serde(default)]
    pub intensity: IntensityLevel,
}

impl AnonymizeConfig {
    pub fn new(mode: BlurMode, intensity: IntensityLevel) -> Self {
        Self { mode, intensity }
    }

    /// Builds a config from raw control-panel values (mode code 3/4, intensity 1-5).
    ///
    /// Unknown mode codes fall back to full mask; intensity is clamped.
    pub fn from_raw(mode_code: i64, intensity: i64) -> Self {
        Self {
            mode: BlurMode::from_code(mode_code),
            intensity: IntensityLevel::clamped(intensity),
        }
    }

    pub fn kernel_size(&self) -> usize {
        self.intensity.kernel_size()
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}
