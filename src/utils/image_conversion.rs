//! Image preparation for landmark models: letterboxing and tensor layout.

use super::safe_cast::f64_to_u32_clamp;
use crate::{Error, Result};
use image::{imageops, DynamicImage, Rgb, RgbImage};
use ndarray::Array4;

/// Geometry of an aspect-preserving resize into a square model input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    /// Model input side length in pixels
    pub size: u32,
    /// Source pixels to model pixels
    pub scale: f64,
    /// Horizontal padding on the left, model pixels
    pub pad_x: f64,
    /// Vertical padding on the top, model pixels
    pub pad_y: f64,
    /// Original image width
    pub source_width: u32,
    /// Original image height
    pub source_height: u32,
}

impl Letterbox {
    /// Compute the letterbox for a source image of the given size
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is zero
    pub fn new(source_width: u32, source_height: u32, size: u32) -> Result<Self> {
        if source_width == 0 || source_height == 0 || size == 0 {
            return Err(Error::InvalidInput(format!(
                "Invalid letterbox dimensions: {source_width}x{source_height} into {size}"
            )));
        }

        let scale = f64::from(size) / f64::from(source_width.max(source_height));
        let scaled_width = f64::from(source_width) * scale;
        let scaled_height = f64::from(source_height) * scale;

        Ok(Self {
            size,
            scale,
            pad_x: (f64::from(size) - scaled_width) / 2.0,
            pad_y: (f64::from(size) - scaled_height) / 2.0,
            source_width,
            source_height,
        })
    }

    /// Size of the resized image inside the padded square
    #[must_use]
    pub fn scaled_size(&self) -> (u32, u32) {
        (
            f64_to_u32_clamp(f64::from(self.source_width) * self.scale, 1, self.size),
            f64_to_u32_clamp(f64::from(self.source_height) * self.scale, 1, self.size),
        )
    }

    /// Map a point in model input pixels to normalized source image coordinates
    #[must_use]
    pub fn to_normalized(&self, x: f64, y: f64) -> (f64, f64) {
        let source_x = (x - self.pad_x) / self.scale;
        let source_y = (y - self.pad_y) / self.scale;
        (
            source_x / f64::from(self.source_width),
            source_y / f64::from(self.source_height),
        )
    }
}

/// Resize an image into a black-padded square of side `size`
///
/// # Errors
///
/// Returns an error if the image has a zero dimension
pub fn letterbox(image: &DynamicImage, size: u32) -> Result<(RgbImage, Letterbox)> {
    let letterbox = Letterbox::new(image.width(), image.height(), size)?;
    let (width, height) = letterbox.scaled_size();

    let resized = imageops::resize(&image.to_rgb8(), width, height, imageops::FilterType::Triangle);
    let mut canvas = RgbImage::from_pixel(size, size, Rgb([0, 0, 0]));
    let offset_x = f64_to_u32_clamp(letterbox.pad_x, 0, size);
    let offset_y = f64_to_u32_clamp(letterbox.pad_y, 0, size);
    imageops::replace(&mut canvas, &resized, i64::from(offset_x), i64::from(offset_y));

    Ok((canvas, letterbox))
}

/// Convert an RGB image to a `[1, H, W, 3]` tensor scaled to [0, 1]
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match the image shape
pub fn rgb_to_nhwc(image: &RgbImage) -> Result<Array4<f32>> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let data: Vec<f32> = image.as_raw().iter().map(|&v| f32::from(v) / 255.0).collect();

    Array4::from_shape_vec((1, height, width, 3), data)
        .map_err(|e| Error::InvalidInput(format!("Failed to create input tensor: {e}")))
}
