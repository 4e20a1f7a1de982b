use super::PoseDetector;
use crate::landmarks::{LandmarkFile, PoseLandmarks};
use crate::{Error, Result};
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Sidecar extensions tried next to an image, in order
const SIDECAR_EXTENSIONS: [&str; 3] = ["landmarks.yaml", "landmarks.yml", "landmarks.json"];

/// Detector that returns landmarks exported by an external pose estimator
pub struct LandmarkFileDetector {
    path: PathBuf,
}

impl LandmarkFileDetector {
    /// Read landmarks from an explicit file
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Locate the sidecar file of an image, e.g. `set.landmarks.yaml` for `set.jpg`
    ///
    /// # Errors
    ///
    /// Returns an error if no sidecar file exists
    pub fn for_image<P: AsRef<Path>>(image_path: P) -> Result<Self> {
        let image_path = image_path.as_ref();
        sidecar_candidates(image_path)
            .into_iter()
            .find(|candidate| candidate.is_file())
            .map(Self::new)
            .ok_or_else(|| {
                Error::DetectorError(format!(
                    "No landmark file found for {} (expected e.g. {})",
                    image_path.display(),
                    image_path.with_extension(SIDECAR_EXTENSIONS[0]).display()
                ))
            })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Candidate sidecar paths for an image
#[must_use]
pub fn sidecar_candidates(image_path: &Path) -> Vec<PathBuf> {
    SIDECAR_EXTENSIONS
        .iter()
        .map(|ext| image_path.with_extension(ext))
        .collect()
}

impl PoseDetector for LandmarkFileDetector {
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<PoseLandmarks>> {
        let file = LandmarkFile::from_file(&self.path)?;

        if let (Some(width), Some(height)) = (file.image_width, file.image_height) {
            if (width, height) != (image.width(), image.height()) {
                log::warn!(
                    "Landmarks in {} were recorded on a {}x{} image, analysing a {}x{} image",
                    self.path.display(),
                    width,
                    height,
                    image.width(),
                    image.height()
                );
            }
        }

        file.into_pose()
    }

    fn name(&self) -> &str {
        "landmark-file"
    }
}
