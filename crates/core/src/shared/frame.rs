use ndarray::{ArrayView3, ArrayViewMut3};

use super::bounding_box::PixelBox;
use super::constants::FRAME_CHANNELS;
use super::error::AnonymizeError;
use super::pixel_region::PixelRegion;

/// A single captured frame: contiguous RGB bytes in row-major order.
///
/// Owned by the capture/display side; the anonymizer only borrows it
/// mutably for the duration of one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Result<Self, AnonymizeError> {
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
            index,
        })
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

    pub fn channels(&self) -> u8 {
        FRAME_CHANNELS
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length is validated at construction")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length is validated at construction")
    }

    /// Copies the pixels under `rect` into a new region.
    pub fn extract_region(&self, rect: PixelBox) -> Result<PixelRegion, AnonymizeError> {
        self.check_bounds(rect)?;
        let channels = FRAME_CHANNELS as usize;
        let fw = self.width as usize;
        let row_len = rect.width as usize * channels;

        let mut out = Vec::with_capacity(row_len * rect.height as usize);
        for row in rect.y as usize..rect.bottom() as usize {
            let start = (row * fw + rect.x as usize) * channels;
            out.extend_from_slice(&self.data[start..start + row_len]);
        }
        PixelRegion::new(out, rect.width, rect.height)
    }

    /// Overwrites the pixels under `rect` with `region`.
    pub fn write_region(&mut self, rect: PixelBox, region: &PixelRegion) -> Result<(), AnonymizeError> {
        self.check_bounds(rect)?;
        if region.dimensions() != (rect.width, rect.height) {
            return Err(AnonymizeError::DimensionMismatch {
                original: (rect.width, rect.height),
                blurred: region.dimensions(),
                mask: (rect.width, rect.height),
            });
        }
        let channels = FRAME_CHANNELS as usize;
        let fw = self.width as usize;
        let row_len = rect.width as usize * channels;

        for (i, src) in region.data().chunks_exact(row_len).enumerate() {
            let start = ((rect.y as usize + i) * fw + rect.x as usize) * channels;
            self.data[start..start + row_len].copy_from_slice(src);
        }
        Ok(())
    }

    fn check_bounds(&self, rect: PixelBox) -> Result<(), AnonymizeError> {
        if rect.width == 0 || rect.height == 0 {
            return Err(AnonymizeError::InvalidGeometry {
                width: rect.width,
                height: rect.height,
            });
        }
        if rect.right() > self.width || rect.bottom() > self.height {
            return Err(AnonymizeError::RegionOutOfBounds {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                frame_width: self.width,
                frame_height: self.height,
            });
        }
        Ok(())
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            FRAME_CHANNELS as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(width: u32, height: u32) -> Frame {
        let data = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        Frame::new(data, width, height, 0).unwrap()
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 5).unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_mismatched_data_length_rejected() {
        let err = Frame::new(vec![0u8; 10], 2, 2, 0).unwrap_err();
        assert_eq!(
            err,
            AnonymizeError::InvalidFrameData {
                width: 2,
                height: 2,
                expected: 12,
                actual: 10
            }
        );
    }

    #[test]
    fn test_zero_area_frame_is_empty() {
        let frame = Frame::new(vec![], 0, 0, 0).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::new(vec![100u8; 12], 2, 2, 0).unwrap();
        let mut cloned = frame.clone();
        cloned.data_mut()[0] = 0;
        assert_eq!(frame.data()[0], 100);
        assert_eq!(cloned.data()[0], 0);
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        let mut data = vec![0u8; 12];
        data[6] = 255; // row=1, col=0, R
        let frame = Frame::new(data, 2, 2, 0).unwrap();
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 2, 3]);
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
    }

    #[test]
    fn test_as_ndarray_mut_modification() {
        let mut frame = Frame::new(vec![0u8; 12], 2, 2, 0).unwrap();
        frame.as_ndarray_mut()[[0, 1, 2]] = 128;
        assert_eq!(frame.as_ndarray()[[0, 1, 2]], 128);
    }

    #[test]
    fn test_extract_region_copies_rows() {
        let frame = gradient_frame(6, 5);
        let rect = PixelBox::new(2, 1, 3, 2);
        let region = frame.extract_region(rect).unwrap();
        assert_eq!(region.dimensions(), (3, 2));
        let arr = frame.as_ndarray();
        for y in 0..2u32 {
            for x in 0..3u32 {
                for c in 0..3usize {
                    assert_eq!(
                        region.pixel(x, y)[c],
                        arr[[(y + 1) as usize, (x + 2) as usize, c]]
                    );
                }
            }
        }
    }

    #[test]
    fn test_write_region_only_touches_rect() {
        let mut frame = gradient_frame(6, 5);
        let original = frame.clone();
        let rect = PixelBox::new(1, 2, 2, 2);
        let patch = PixelRegion::filled(2, 2, [9, 9, 9]).unwrap();
        frame.write_region(rect, &patch).unwrap();

        for y in 0..5u32 {
            for x in 0..6u32 {
                for c in 0..3usize {
                    let got = frame.as_ndarray()[[y as usize, x as usize, c]];
                    if rect.contains(x, y) {
                        assert_eq!(got, 9);
                    } else {
                        assert_eq!(got, original.as_ndarray()[[y as usize, x as usize, c]]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_extract_out_of_bounds_rejected() {
        let frame = gradient_frame(4, 4);
        let err = frame.extract_region(PixelBox::new(3, 0, 2, 1)).unwrap_err();
        assert!(matches!(err, AnonymizeError::RegionOutOfBounds { .. }));
    }

    #[test]
    fn test_write_size_mismatch_rejected() {
        let mut frame = gradient_frame(4, 4);
        let patch = PixelRegion::filled(1, 1, [0, 0, 0]).unwrap();
        let err = frame.write_region(PixelBox::new(0, 0, 2, 2), &patch).unwrap_err();
        assert!(matches!(err, AnonymizeError::DimensionMismatch { .. }));
    }
}
