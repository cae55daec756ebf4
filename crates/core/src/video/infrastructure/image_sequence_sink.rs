use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::frame::Frame;
use crate::video::domain::frame_sink::FrameSink;

/// Writes each frame as `frame_{index:06}.png` into an output directory.
pub struct ImageSequenceSink {
    dir: PathBuf,
    written: usize,
}

impl ImageSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:06}.png"))
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FrameSink for ImageSequenceSink {
    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        fs::create_dir_all(&self.dir)?;
        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Failed to create image from frame data")?;
        img.save(self.frame_path(frame.index()))?;
        self.written += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        log::debug!("Wrote {} frames to {}", self.written, self.dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_png_named_by_index() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let mut sink = ImageSequenceSink::new(&out);

        let data: Vec<u8> = (0..3 * 2 * 3).map(|i| (i * 10) as u8).collect();
        let frame = Frame::new(data.clone(), 3, 2, 7).unwrap();
        sink.write(&frame).unwrap();
        sink.close().unwrap();

        let path = out.join("frame_000007.png");
        assert!(path.exists());
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.into_raw(), data);
        assert_eq!(sink.written(), 1);
    }

    #[test]
    fn test_frame_path_zero_padded() {
        let sink = ImageSequenceSink::new("/tmp/x");
        assert_eq!(sink.frame_path(42), PathBuf::from("/tmp/x/frame_000042.png"));
    }
}
