use ndarray::ArrayView3;

use super::constants::FRAME_CHANNELS;
use super::error::AnonymizeError;

/// An owned, tightly packed RGB sub-image cut out of a [`Frame`](super::frame::Frame).
///
/// Regions are the unit the mask, blur, and composite stages work on. They
/// always have positive dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelRegion {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelRegion {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, AnonymizeError> {
        if width == 0 || height == 0 {
            return Err(AnonymizeError::InvalidGeometry { width, height });
        }
        let expected = width as usize * height as usize * FRAME_CHANNELS as usize;
        if data.len() != expected {
            return Err(AnonymizeError::InvalidFrameData {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A region filled with one RGB colour.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, AnonymizeError> {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * FRAME_CHANNELS as usize)
            .collect();
        Self::new(data, width, height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let channels = FRAME_CHANNELS as usize;
        let offset = (y as usize * self.width as usize + x as usize) * channels;
        &self.data[offset..offset + channels]
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(
            (
                self.height as usize,
                self.width as usize,
                FRAME_CHANNELS as usize,
            ),
            &self.data,
        )
        .expect("PixelRegion data length is validated at construction")
    }
}
