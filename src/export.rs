//! Rasterization of scenes and committing of rendered surfaces
//!
//! Scenes are drawn with the `plotters` bitmap backend into an RGB8 buffer at
//! backing resolution. Exporters are the commit side of a render pass: they
//! take finished outputs and put them somewhere (files, memory).

use std::f64::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::prelude::{BitMapBackend, Circle, Color, IntoDrawingArea, PathElement, ShapeStyle};
use tracing::{debug, warn};

use crate::elements::{Paint, Point, Scene, Shape};
use crate::errors::{ChartError, Result};
use crate::initializer::{RenderOutput, RenderedSurface};
use crate::layouts::SurfaceDescriptor;
use crate::styles::Rgb;

/// Longest gradient piece, in logical pixels
const GRADIENT_STEP: f64 = 2.0;
/// Longest arc chord, in physical pixels
const ARC_STEP: f64 = 3.0;

/// Backing-resolution RGB8 pixels of one surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Buffer filled with a single color. Callers bound the size through
    /// [`SurfaceDescriptor::checked_backing_size`].
    pub(crate) fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&[color.0, color.1, color.2]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw row-major RGB bytes
    pub fn as_rgb(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        Some(Rgb(self.data[offset], self.data[offset + 1], self.data[offset + 2]))
    }

    /// Number of pixels that differ from `color`
    pub fn count_unlike(&self, color: Rgb) -> usize {
        self.data
            .chunks_exact(3)
            .filter(|px| px[0] != color.0 || px[1] != color.1 || px[2] != color.2)
            .count()
    }

    /// Encode as PNG
    #[cfg(feature = "png-export")]
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let image = image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| ChartError::ImageError {
                message: format!("buffer does not match {}x{}", self.width, self.height),
            })?;
        image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Draw a scene onto a fresh buffer sized for `surface`
pub fn rasterize(
    scene: &Scene,
    surface: &SurfaceDescriptor,
    background: Rgb,
) -> Result<PixelBuffer> {
    let (width, height) = surface.checked_backing_size()?;
    let mut buffer = PixelBuffer::filled(width, height, background);
    if buffer.is_empty() {
        return Ok(buffer);
    }

    {
        let root =
            BitMapBackend::with_buffer(&mut buffer.data, (width, height)).into_drawing_area();
        for shape in scene.shapes() {
            draw_shape(&root, shape, surface)?;
        }
        root.present()?;
    }

    Ok(buffer)
}

fn draw_shape(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    shape: &Shape,
    surface: &SurfaceDescriptor,
) -> Result<()> {
    match shape {
        Shape::Polyline {
            points,
            paint,
            width,
        } => draw_polyline(root, points, paint, *width, surface),
        Shape::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            color,
            width,
        } => {
            if !radius.is_finite() || *radius < 0.0 {
                return Ok(());
            }
            let sweep = end_angle - start_angle;
            let chord_count = (sweep.abs().min(TAU) * surface.scale_length(*radius) / ARC_STEP)
                .ceil()
                .clamp(8.0, 4096.0) as usize;
            let points: Vec<(i32, i32)> = (0..=chord_count)
                .map(|i| {
                    let angle = start_angle + sweep * i as f64 / chord_count as f64;
                    surface.to_physical(center.polar(*radius, angle))
                })
                .collect();
            root.draw(&PathElement::new(points, stroke(*color, *width, surface)))?;
            Ok(())
        }
        Shape::Disc {
            center,
            radius,
            color,
            alpha,
        } => {
            let radius = surface.scale_length(*radius).round();
            if !radius.is_finite() || radius < 1.0 {
                return Ok(());
            }
            root.draw(&Circle::new(
                surface.to_physical(*center),
                radius as u32,
                color.with_alpha(*alpha).filled(),
            ))?;
            Ok(())
        }
    }
}

fn draw_polyline(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    points: &[Point],
    paint: &Paint,
    width: f64,
    surface: &SurfaceDescriptor,
) -> Result<()> {
    if points.len() < 2 {
        return Ok(());
    }

    if let Paint::Solid(color) = paint {
        let path: Vec<(i32, i32)> = points.iter().map(|p| surface.to_physical(*p)).collect();
        root.draw(&PathElement::new(path, stroke(*color, width, surface)))?;
        return Ok(());
    }

    // Gradients are approximated by short solid pieces colored at their midpoint
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let pieces = (a.distance(b) / GRADIENT_STEP).ceil().clamp(1.0, 512.0) as usize;
        for i in 0..pieces {
            let t0 = i as f64 / pieces as f64;
            let t1 = (i + 1) as f64 / pieces as f64;
            let p0 = lerp_point(a, b, t0);
            let p1 = lerp_point(a, b, t1);
            let color = paint.color_at(lerp_point(p0, p1, 0.5));
            root.draw(&PathElement::new(
                vec![surface.to_physical(p0), surface.to_physical(p1)],
                stroke(color, width, surface),
            ))?;
        }
    }
    Ok(())
}

fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

fn stroke(color: Rgb, width: f64, surface: &SurfaceDescriptor) -> ShapeStyle {
    ShapeStyle {
        color: color.to_plotters().to_rgba(),
        filled: false,
        stroke_width: surface.stroke_width(width),
    }
}

/// Commit side of a render pass
pub trait ChartExporter {
    fn commit(&mut self, surface: &RenderedSurface) -> Result<()>;
}

/// Writes `<target>.png` for surfaces and `<target>.html` for bar groups
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    output_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectoryExporter {
    /// Create the exporter, creating `output_dir` if needed
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            written: Vec::new(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Files written so far, in commit order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn path_for(&self, target: &str, extension: &str) -> PathBuf {
        let file_name: String = target
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.output_dir.join(format!("{}.{}", file_name, extension))
    }
}

impl ChartExporter for DirectoryExporter {
    fn commit(&mut self, surface: &RenderedSurface) -> Result<()> {
        match &surface.output {
            RenderOutput::Bars(group) => {
                let path = self.path_for(&surface.target, "html");
                fs::write(&path, group.to_html())?;
                debug!(element = %surface.target, path = %path.display(), "bar group committed");
                self.written.push(path);
            }
            RenderOutput::Pixels(buffer) => {
                if buffer.is_empty() {
                    warn!(element = %surface.target, "skipping zero-sized surface");
                    return Ok(());
                }
                let path = self.path_for(&surface.target, "png");
                write_png(buffer, &path)?;
                debug!(element = %surface.target, path = %path.display(), "surface committed");
                self.written.push(path);
            }
        }
        Ok(())
    }
}

#[cfg(feature = "png-export")]
fn write_png(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    buffer.save_png(path)
}

#[cfg(not(feature = "png-export"))]
fn write_png(_buffer: &PixelBuffer, path: &Path) -> Result<()> {
    Err(ChartError::ConfigError {
        message: format!(
            "cannot write {}: built without the png-export feature",
            path.display()
        ),
    })
}

/// Keeps committed surfaces in memory, keyed by target, latest pass winning
#[derive(Debug, Clone, Default)]
pub struct MemoryExporter {
    committed: Vec<RenderedSurface>,
}

impl MemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn committed(&self) -> &[RenderedSurface] {
        &self.committed
    }

    pub fn get(&self, target: &str) -> Option<&RenderedSurface> {
        self.committed.iter().find(|s| s.target == target)
    }
}

impl ChartExporter for MemoryExporter {
    fn commit(&mut self, surface: &RenderedSurface) -> Result<()> {
        let existing = self
            .committed
            .iter_mut()
            .find(|s| s.target == surface.target && s.role == surface.role);
        match existing {
            Some(existing) => *existing = surface.clone(),
            None => self.committed.push(surface.clone()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb = Rgb(0, 0, 0);

    #[test]
    fn test_empty_scene_is_background() {
        let surface = SurfaceDescriptor::new(20, 10, 2.0);
        let buffer = rasterize(&Scene::new(), &surface, BG).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (40, 20));
        assert_eq!(buffer.as_rgb().len(), 40 * 20 * 3);
        assert_eq!(buffer.count_unlike(BG), 0);
    }

    #[test]
    fn test_oversized_surface_is_an_error() {
        let surface = SurfaceDescriptor::new(u32::MAX, u32::MAX, 1.0);
        let err = rasterize(&Scene::new(), &surface, BG).unwrap_err();
        assert!(matches!(err, ChartError::RenderingError { .. }));
    }

    #[test]
    fn test_zero_sized_surface() {
        let surface = SurfaceDescriptor::new(0, 10, 1.0);
        let mut scene = Scene::new();
        scene.push(Shape::Disc {
            center: Point::new(0.0, 0.0),
            radius: 3.0,
            color: Rgb(255, 0, 0),
            alpha: 1.0,
        });
        let buffer = rasterize(&scene, &surface, BG).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_solid_polyline_paints_pixels() {
        let surface = SurfaceDescriptor::new(50, 20, 1.0);
        let mut scene = Scene::new();
        scene.push(Shape::Polyline {
            points: vec![Point::new(0.0, 10.0), Point::new(49.0, 10.0)],
            paint: Paint::Solid(Rgb(255, 0, 0)),
            width: 1.0,
        });
        let buffer = rasterize(&scene, &surface, BG).unwrap();
        assert_eq!(buffer.pixel(25, 10), Some(Rgb(255, 0, 0)));
        assert_eq!(buffer.pixel(25, 2), Some(BG));
    }

    #[test]
    fn test_gradient_polyline_changes_color_along_axis() {
        let surface = SurfaceDescriptor::new(100, 20, 1.0);
        let mut scene = Scene::new();
        scene.push(Shape::Polyline {
            points: vec![Point::new(0.0, 10.0), Point::new(99.0, 10.0)],
            paint: Paint::Linear {
                from: Point::new(0.0, 0.0),
                to: Point::new(100.0, 0.0),
                start: Rgb(0, 0, 255),
                end: Rgb(255, 0, 0),
            },
            width: 1.0,
        });
        let buffer = rasterize(&scene, &surface, BG).unwrap();
        let left = buffer.pixel(2, 10).unwrap();
        let right = buffer.pixel(97, 10).unwrap();
        assert!(left.2 > left.0);
        assert!(right.0 > right.2);
    }

    #[test]
    fn test_negative_radius_arc_is_skipped() {
        let surface = SurfaceDescriptor::new(10, 10, 1.0);
        let mut scene = Scene::new();
        scene.push(Shape::Arc {
            center: Point::new(5.0, 5.0),
            radius: -4.0,
            start_angle: 0.0,
            end_angle: TAU,
            color: Rgb(255, 255, 255),
            width: 2.0,
        });
        let buffer = rasterize(&scene, &surface, BG).unwrap();
        assert_eq!(buffer.count_unlike(BG), 0);
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let buffer = PixelBuffer::filled(2, 2, BG);
        assert_eq!(buffer.pixel(2, 0), None);
        assert_eq!(buffer.pixel(0, 2), None);
        assert_eq!(buffer.pixel(1, 1), Some(BG));
    }
}
