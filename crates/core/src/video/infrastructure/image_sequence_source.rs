use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

/// Treats an ordered list of image files as a frame stream.
///
/// Each file is decoded with the `image` crate and converted to RGB; its
/// position in the list becomes the frame index.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
}

impl ImageSequenceSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Collects every image file in `dir`, sorted by file name.
    pub fn from_directory(dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| format!("Failed to read directory {}: {e}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image(p))
            .collect();
        paths.sort();
        log::info!("Found {} images in {}", paths.len(), dir.display());
        Ok(Self::new(paths))
    }
}

/// True when the extension is one of the supported still-image formats.
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn decode(path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to decode {}: {e}", path.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    Ok(Frame::new(img.into_raw(), width, height, index)?)
}

impl FrameSource for ImageSequenceSource {
    fn frame_count(&self) -> Option<usize> {
        Some(self.paths.len())
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        Box::new(
            self.paths
                .iter()
                .enumerate()
                .map(|(index, path)| decode(path, index)),
        )
    }

    fn close(&mut self) {
        self.paths.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
        img.save(path).unwrap();
    }

    #[test]
    fn test_decodes_frames_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        write_png(&a, 4, 3, [10, 20, 30]);
        write_png(&b, 2, 2, [200, 100, 0]);

        let mut source = ImageSequenceSource::new(vec![a, b]);
        assert_eq!(source.frame_count(), Some(2));
        let frames: Vec<Frame> = source.frames().map(|f| f.unwrap()).collect();

        assert_eq!(frames.len(), 2);
        assert_eq!((frames[0].width(), frames[0].height()), (4, 3));
        assert_eq!(frames[0].index(), 0);
        assert_eq!(&frames[0].data()[..3], &[10, 20, 30]);
        assert_eq!(frames[1].index(), 1);
        assert_eq!(&frames[1].data()[..3], &[200, 100, 0]);
    }

    #[test]
    fn test_from_directory_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("frame_002.png"), 2, 2, [0, 0, 0]);
        write_png(&dir.path().join("frame_001.png"), 2, 2, [0, 0, 0]);
        fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let source = ImageSequenceSource::from_directory(dir.path()).unwrap();
        let names: Vec<_> = source
            .paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["frame_001.png", "frame_002.png"]);
    }

    #[test]
    fn test_missing_file_is_error_naming_path() {
        let mut source = ImageSequenceSource::new(vec![PathBuf::from("/nonexistent/x.png")]);
        let err = source.frames().next().unwrap().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/x.png"));
    }

    #[test]
    fn test_is_image_case_insensitive() {
        assert!(is_image(Path::new("a.JPG")));
        assert!(is_image(Path::new("dir/b.webp")));
        assert!(!is_image(Path::new("c.mp4")));
        assert!(!is_image(Path::new("noext")));
    }
}
