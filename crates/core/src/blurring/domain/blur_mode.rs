use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::constants::{FULL_MASK_MODE_CODE, SOFT_POLYGON_MODE_CODE};

/// Which pixels of a face box receive the blur.
///
/// The set is closed. Anything that does not name one of these modes
/// resolves to [`BlurMode::FullMask`]: when the selection is unclear, the
/// whole box is blurred rather than none of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "serde_json::Value")]
pub enum BlurMode {
    /// Ellipse approximating a face silhouette inside the box.
    #[default]
    SoftPolygon,
    /// The entire box.
    FullMask,
}

impl BlurMode {
    pub const ALL: &[BlurMode] = &[BlurMode::SoftPolygon, BlurMode::FullMask];

    /// Resolves a control-panel mode code (3 or 4).
    pub fn from_code(code: i64) -> Self {
        match code {
            SOFT_POLYGON_MODE_CODE => BlurMode::SoftPolygon,
            FULL_MASK_MODE_CODE => BlurMode::FullMask,
            other => {
                log::warn!("Unrecognized blur mode code {other}, falling back to full mask");
                BlurMode::FullMask
            }
        }
    }

    pub fn code(self) -> i64 {
        match self {
            BlurMode::SoftPolygon => SOFT_POLYGON_MODE_CODE,
            BlurMode::FullMask => FULL_MASK_MODE_CODE,
        }
    }
}

impl FromStr for BlurMode {
    type Err = Infallible;

    /// Never fails: unknown names fall back to full mask.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Ok(match normalized.as_str() {
            "soft_polygon" | "soft" | "ellipse" => BlurMode::SoftPolygon,
            "full_mask" | "full" | "rect" => BlurMode::FullMask,
            other => match other.parse::<i64>() {
                Ok(code) => BlurMode::from_code(code),
                Err(_) => {
                    log::warn!("Unrecognized blur mode '{s}', falling back to full mask");
                    BlurMode::FullMask
                }
            },
        })
    }
}

impl From<serde_json::Value> for BlurMode {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(name) => name.parse().unwrap_or(BlurMode::FullMask),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(code) => BlurMode::from_code(code),
                None => {
                    log::warn!("Non-integer blur mode {n}, falling back to full mask");
                    BlurMode::FullMask
                }
            },
            other => {
                log::warn!("Unrecognized blur mode {other}, falling back to full mask");
                BlurMode::FullMask
            }
        }
    }
}

impl fmt::Display for BlurMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlurMode::SoftPolygon => write!(f, "Soft Polygon"),
            BlurMode::FullMask => write!(f, "Full Facial Mask"),
        }
    }
}
