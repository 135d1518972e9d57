//! Wave renderer: two summed sine waves phased by the seed

use crate::elements::{Paint, Point, Scene, Shape};
use crate::errors::Result;
use crate::export::PixelBuffer;
use crate::layouts::SurfaceDescriptor;
use crate::styles::{Rgb, WaveStyle};

/// Vertical position of column `x`. The primary wave is phased by `seed`,
/// the secondary ripple by `2 * seed`.
pub fn wave_y(x: f64, height: f64, seed: f64, style: &WaveStyle) -> f64 {
    height / 2.0
        + (x / style.primary_period + seed).sin() * style.primary_amplitude
        + (x / style.secondary_period + seed * 2.0).sin() * style.secondary_amplitude
}

pub fn scene(surface: &SurfaceDescriptor, seed: f64, style: &WaveStyle) -> Scene {
    let h = surface.height_f64();
    let points: Vec<Point> = (0..surface.width)
        .map(|x| Point::new(x as f64, wave_y(x as f64, h, seed, style)))
        .collect();

    let mut scene = Scene::new();
    if points.len() >= 2 {
        scene.push(Shape::Polyline {
            points,
            paint: Paint::Solid(style.color),
            width: style.line_width,
        });
    }
    scene
}

pub fn render(
    surface: &SurfaceDescriptor,
    seed: f64,
    style: &WaveStyle,
    background: Rgb,
) -> Result<PixelBuffer> {
    super::paint(surface, background, || scene(surface, seed, style))
}
