use serde::{Deserialize, Serialize};

use crate::shared::constants::{DEFAULT_INTENSITY, KERNEL_SIZES, MAX_INTENSITY, MIN_INTENSITY};

/// Blur strength on the 1-5 scale of the control panel.
///
/// Out-of-range input is clamped to the nearest valid level, so every
/// `IntensityLevel` maps to a defined kernel size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct IntensityLevel(u8);

impl IntensityLevel {
    /// Returns `None` outside 1..=5.
    pub fn new(level: u8) -> Option<Self> {
        (MIN_INTENSITY..=MAX_INTENSITY)
            .contains(&level)
            .then_some(Self(level))
    }

    pub fn clamped(level: i64) -> Self {
        let clamped = level.clamp(MIN_INTENSITY as i64, MAX_INTENSITY as i64) as u8;
        if clamped as i64 != level {
            log::warn!("Blur intensity {level} out of range, clamped to {clamped}");
        }
        Self(clamped)
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Odd Gaussian kernel size for this level.
    pub fn kernel_size(self) -> usize {
        KERNEL_SIZES[(self.0 - MIN_INTENSITY) as usize]
    }
}

impl Default for IntensityLevel {
    fn default() -> Self {
        Self(DEFAULT_INTENSITY)
    }
}

impl From<i64> for IntensityLevel {
    fn from(level: i64) -> Self {
        Self::clamped(level)
    }
}

impl From<IntensityLevel> for u8 {
    fn from(level: IntensityLevel) -> Self {
        level.0
    }
}
