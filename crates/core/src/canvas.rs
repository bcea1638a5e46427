//! Immediate-mode drawing surface.
//!
//! [`Painter`] is the seam between engines and whatever they draw on: the
//! CPU [`Canvas`] raster used for snapshots and tests, or a browser 2D
//! context. Engines only ever need two primitives: a translucent
//! full-surface fill (which leaves motion trails) and borderless filled
//! circles.

use glam::DVec2;

use crate::color::{Rgba, Srgb};
use crate::error::EngineError;

/// A 2D drawing target.
pub trait Painter {
    /// Surface width in pixels.
    fn width(&self) -> f64;

    /// Surface height in pixels.
    fn height(&self) -> f64;

    /// Composites `color` over the entire surface.
    ///
    /// With `alpha < 1` the previous frame shows through, producing trails.
    fn fill_background(&mut self, color: Rgba);

    /// Draws a filled, borderless circle of the given diameter.
    fn fill_circle(&mut self, center: DVec2, diameter: f64, color: Rgba);
}

/// CPU raster of sRGB pixels in row-major order.
///
/// Blending is source-over in sRGB space. A pixel belongs to a circle when
/// its center (`x + 0.5`, `y + 0.5`) lies within the radius.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Srgb>,
}

impl Canvas {
    /// Creates a canvas filled with an opaque `background`.
    ///
    /// Returns `EngineError::InvalidDimensions` if width or height is zero,
    /// or if `width * height` would overflow `usize`.
    pub fn new(width: usize, height: usize, background: Srgb) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            pixels: vec![background; len],
        })
    }

    /// Width in pixels.
    pub fn width_px(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height_px(&self) -> usize {
        self.height
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    /// The pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Srgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }
}

impl Painter for Canvas {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn fill_background(&mut self, color: Rgba) {
        for p in &mut self.pixels {
            *p = p.blend(color.color, color.alpha);
        }
    }

    fn fill_circle(&mut self, center: DVec2, diameter: f64, color: Rgba) {
        let r = diameter * 0.5;
        if r <= 0.0 || color.alpha <= 0.0 || !center.is_finite() {
            return;
        }
        // Pixel-center bounding box, clipped to the raster.
        let x0 = (center.x - r - 0.5).ceil().max(0.0);
        let y0 = (center.y - r - 0.5).ceil().max(0.0);
        let x1 = (center.x + r - 0.5).floor().min(self.width as f64 - 1.0);
        let y1 = (center.y + r - 0.5).floor().min(self.height as f64 - 1.0);
        if x0 > x1 || y0 > y1 {
            return;
        }
        let r2 = r * r;
        for y in y0 as usize..=y1 as usize {
            let dy = y as f64 + 0.5 - center.y;
            for x in x0 as usize..=x1 as usize {
                let dx = x as f64 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    let idx = y * self.width + x;
                    self.pixels[idx] = self.pixels[idx].blend(color.color, color.alpha);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Srgb {
        Srgb::from_rgb8(255, 255, 255)
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(Canvas::new(0, 10, white()).is_err());
        assert!(Canvas::new(10, 0, white()).is_err());
    }

    #[test]
    fn new_rejects_overflowing_dimensions() {
        assert!(Canvas::new(usize::MAX, 2, white()).is_err());
    }

    #[test]
    fn new_fills_with_background() {
        let c = Canvas::new(4, 3, white()).unwrap();
        assert_eq!(c.pixels().len(), 12);
        assert!(c.pixels().iter().all(|&p| p == white()));
    }

    #[test]
    fn translucent_background_moves_pixels_partway() {
        let mut c = Canvas::new(2, 2, Srgb::BLACK).unwrap();
        c.fill_background(white().with_alpha(0.25));
        let p = c.pixel(1, 1).unwrap();
        assert!((p.r - 0.25).abs() < 1e-12);
        c.fill_background(white().with_alpha(0.25));
        let p = c.pixel(1, 1).unwrap();
        assert!((p.r - 0.4375).abs() < 1e-12);
    }

    #[test]
    fn circle_covers_center_not_far_corner() {
        let mut c = Canvas::new(20, 20, white()).unwrap();
        c.fill_circle(DVec2::new(10.0, 10.0), 6.0, Srgb::BLACK.with_alpha(1.0));
        assert_eq!(c.pixel(10, 10), Some(Srgb::BLACK));
        assert_eq!(c.pixel(9, 9), Some(Srgb::BLACK));
        assert_eq!(c.pixel(0, 0), Some(white()));
        assert_eq!(c.pixel(10, 14), Some(white()));
    }

    #[test]
    fn circle_partially_offscreen_is_clipped() {
        let mut c = Canvas::new(8, 8, white()).unwrap();
        c.fill_circle(DVec2::new(-1.0, 4.0), 6.0, Srgb::BLACK.with_alpha(1.0));
        assert_eq!(c.pixel(0, 4), Some(Srgb::BLACK));
        assert_eq!(c.pixel(7, 4), Some(white()));
    }

    #[test]
    fn circle_entirely_offscreen_is_noop() {
        let mut c = Canvas::new(8, 8, white()).unwrap();
        c.fill_circle(DVec2::new(100.0, -50.0), 6.0, Srgb::BLACK.with_alpha(1.0));
        c.fill_circle(DVec2::new(f64::NAN, 3.0), 6.0, Srgb::BLACK.with_alpha(1.0));
        assert!(c.pixels().iter().all(|&p| p == white()));
    }

    #[test]
    fn transparent_circle_draws_nothing() {
        let mut c = Canvas::new(8, 8, white()).unwrap();
        c.fill_circle(DVec2::new(4.0, 4.0), 6.0, Srgb::BLACK.with_alpha(0.0));
        assert!(c.pixels().iter().all(|&p| p == white()));
    }

    #[test]
    fn painter_reports_dimensions_as_f64() {
        let c = Canvas::new(800, 400, white()).unwrap();
        let painter: &dyn Painter = &c;
        assert_eq!(painter.width(), 800.0);
        assert_eq!(painter.height(), 400.0);
    }
}
