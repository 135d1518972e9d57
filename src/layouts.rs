//! Surface sizing and logical-to-physical coordinate mapping
//!
//! A surface is laid out in logical (CSS) pixels. Its backing buffer holds
//! `displayed size × density ratio` physical pixels and every drawing
//! operation is scaled by the same ratio, so strokes stay crisp on
//! high-density displays.

use serde::{Deserialize, Serialize};

use crate::elements::Point;
use crate::errors::{ChartError, Result};

/// Largest backing buffer edge, in physical pixels
pub const MAX_BACKING_EDGE: u32 = 16_384;
/// Largest backing buffer area, in physical pixels (8192 x 8192)
pub const MAX_BACKING_PIXELS: usize = 8_192 * 8_192;

/// Displayed size of a drawable surface plus the display's density ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    /// Displayed width in logical pixels
    pub width: u32,
    /// Displayed height in logical pixels
    pub height: u32,
    /// Platform-reported logical-to-physical scale factor
    pub density_ratio: f64,
}

impl SurfaceDescriptor {
    pub fn new(width: u32, height: u32, density_ratio: f64) -> Self {
        Self {
            width,
            height,
            density_ratio,
        }
    }

    /// Density ratio actually used for drawing: at least 1, and 1 for
    /// missing or non-finite ratios
    pub fn scale(&self) -> f64 {
        if self.density_ratio.is_finite() && self.density_ratio > 1.0 {
            self.density_ratio
        } else {
            1.0
        }
    }

    /// Backing buffer resolution in physical pixels
    pub fn backing_size(&self) -> (u32, u32) {
        let scale = self.scale();
        (
            (self.width as f64 * scale) as u32,
            (self.height as f64 * scale) as u32,
        )
    }

    /// Backing resolution, rejected when an edge exceeds [`MAX_BACKING_EDGE`]
    /// or the area exceeds [`MAX_BACKING_PIXELS`]
    pub fn checked_backing_size(&self) -> Result<(u32, u32)> {
        let (width, height) = self.backing_size();
        let too_large = || ChartError::RenderingError {
            message: format!(
                "surface {}x{} at density {} needs a {}x{} backing buffer, over the limit",
                self.width,
                self.height,
                self.density_ratio,
                width,
                height
            ),
        };
        if width > MAX_BACKING_EDGE || height > MAX_BACKING_EDGE {
            return Err(too_large());
        }
        match (width as usize).checked_mul(height as usize) {
            Some(pixels) if pixels <= MAX_BACKING_PIXELS => Ok((width, height)),
            _ => Err(too_large()),
        }
    }

    pub fn width_f64(&self) -> f64 {
        self.width as f64
    }

    pub fn height_f64(&self) -> f64 {
        self.height as f64
    }

    pub fn is_empty(&self) -> bool {
        let (w, h) = self.backing_size();
        w == 0 || h == 0
    }

    /// Map a logical point to backing pixel coordinates
    pub fn to_physical(&self, point: Point) -> (i32, i32) {
        let scale = self.scale();
        ((point.x * scale).round() as i32, (point.y * scale).round() as i32)
    }

    /// Scale a logical length (radius, stroke width) to physical pixels
    pub fn scale_length(&self, length: f64) -> f64 {
        length * self.scale()
    }

    /// Physical stroke width, never thinner than one pixel
    pub fn stroke_width(&self, logical: f64) -> u32 {
        let physical = self.scale_length(logical).round();
        if physical.is_finite() && physical >= 1.0 {
            physical as u32
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_size_follows_density() {
        assert_eq!(SurfaceDescriptor::new(240, 64, 1.0).backing_size(), (240, 64));
        assert_eq!(SurfaceDescriptor::new(240, 64, 2.0).backing_size(), (480, 128));
        assert_eq!(SurfaceDescriptor::new(101, 33, 1.5).backing_size(), (151, 49));
    }

    #[test]
    fn test_density_ratio_floor() {
        assert_eq!(SurfaceDescriptor::new(100, 50, 0.5).scale(), 1.0);
        assert_eq!(SurfaceDescriptor::new(100, 50, 0.0).scale(), 1.0);
        assert_eq!(SurfaceDescriptor::new(100, 50, f64::NAN).scale(), 1.0);
        assert_eq!(SurfaceDescriptor::new(100, 50, f64::INFINITY).scale(), 1.0);
        assert_eq!(SurfaceDescriptor::new(100, 50, 0.5).backing_size(), (100, 50));
    }

    #[test]
    fn test_physical_mapping() {
        let surface = SurfaceDescriptor::new(100, 50, 2.0);
        assert_eq!(surface.to_physical(Point::new(10.0, 20.25)), (20, 41));
        assert_eq!(surface.stroke_width(2.0), 4);
        assert_eq!(surface.stroke_width(0.1), 1);
        assert_eq!(surface.scale_length(6.0), 12.0);
    }

    #[test]
    fn test_backing_size_limits() {
        assert_eq!(
            SurfaceDescriptor::new(8_192, 8_192, 1.0).checked_backing_size().unwrap(),
            (8_192, 8_192)
        );
        assert_eq!(
            SurfaceDescriptor::new(0, MAX_BACKING_EDGE, 1.0).checked_backing_size().unwrap(),
            (0, MAX_BACKING_EDGE)
        );
        let wide = SurfaceDescriptor::new(MAX_BACKING_EDGE + 1, 1, 1.0);
        assert!(wide.checked_backing_size().is_err());
        assert!(SurfaceDescriptor::new(8_192, 8_193, 1.0).checked_backing_size().is_err());
        assert!(SurfaceDescriptor::new(6_000, 6_000, 2.0).checked_backing_size().is_err());

        let err = SurfaceDescriptor::new(u32::MAX, u32::MAX, 1.0)
            .checked_backing_size()
            .unwrap_err();
        assert!(matches!(err, ChartError::RenderingError { .. }));
    }

    #[test]
    fn test_empty_surface() {
        assert!(SurfaceDescriptor::new(0, 50, 2.0).is_empty());
        assert!(!SurfaceDescriptor::new(1, 1, 1.0).is_empty());
    }
}
