//! Skeleton overlay drawing on the analysed frame.

use crate::config::OverlayConfig;
use crate::landmarks::{PixelLandmarks, PoseLandmark, SKELETON_CONNECTIONS};
use crate::utils::safe_cast::{f64_to_i32_clamp, u32_to_i32};
use crate::Result;
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{Rgb888, RgbColor},
    primitives::{Circle, Line, Primitive, PrimitiveStyle},
    Drawable, Pixel,
};
use image::{Rgb, RgbImage};
use std::convert::Infallible;

/// Landmarks less visible than this are left out of the overlay
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

/// Draw target over an `image` RGB buffer, pixels outside the image are dropped
struct Canvas<'a>(&'a mut RgbImage);

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.0.width(), self.0.height())
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb888;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) {
                if x < self.0.width() && y < self.0.height() {
                    self.0.put_pixel(x, y, Rgb([color.r(), color.g(), color.b()]));
                }
            }
        }

        Ok(())
    }
}

/// Draw the skeleton connections and joint markers onto `image`
///
/// # Errors
///
/// Returns an error if the image is too large for the drawing coordinate space
pub fn draw_skeleton(image: &mut RgbImage, landmarks: &PixelLandmarks, style: &OverlayConfig) -> Result<()> {
    let width = u32_to_i32(image.width())?;
    let height = u32_to_i32(image.height())?;
    let color = Rgb888::new(style.color[0], style.color[1], style.color[2]);

    // Points far outside the frame are pulled in to keep line rasterization bounded
    let to_point = |landmark: PoseLandmark| {
        let p = landmarks.point(landmark);
        Point::new(
            f64_to_i32_clamp(p.x, -width, 2 * width),
            f64_to_i32_clamp(p.y, -height, 2 * height),
        )
    };
    let visible = |landmark: PoseLandmark| landmarks.landmarks().get(landmark).visibility >= VISIBILITY_THRESHOLD;

    let mut canvas = Canvas(image);
    let line_style = PrimitiveStyle::with_stroke(color, style.thickness);
    for (a, b) in SKELETON_CONNECTIONS {
        if !(visible(a) && visible(b)) {
            continue;
        }
        match Line::new(to_point(a), to_point(b))
            .into_styled(line_style)
            .draw(&mut canvas)
        {
            Ok(()) => {}
            Err(infallible) => match infallible {},
        }
    }

    let marker_style = PrimitiveStyle::with_fill(color);
    let diameter = style.marker_radius * 2 + 1;
    for landmark in PoseLandmark::ALL {
        if !visible(landmark) {
            continue;
        }
        match Circle::with_center(to_point(landmark), diameter)
            .into_styled(marker_style)
            .draw(&mut canvas)
        {
            Ok(()) => {}
            Err(infallible) => match infallible {},
        }
    }

    Ok(())
}
