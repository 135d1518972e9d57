//! Sparkline renderer: gradient polyline with glow dots

use crate::elements::{Paint, Point, Scene, Shape};
use crate::errors::Result;
use crate::export::PixelBuffer;
use crate::layouts::SurfaceDescriptor;
use crate::styles::{LineStyle, Rgb};

/// Map a series onto the padded surface area.
///
/// Index spreads across the padded width, value is normalized against the
/// series' own min/max and inverted so larger values sit higher. A single
/// value is placed at the horizontal center.
pub fn points(surface: &SurfaceDescriptor, data: &[f64], style: &LineStyle) -> Vec<Point> {
    let w = surface.width_f64();
    let h = surface.height_f64();
    let pad = style.padding;

    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let range = max - min + style.epsilon;
    let last = data.len().saturating_sub(1);

    data.iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = if last == 0 {
                pad + (w - 2.0 * pad) / 2.0
            } else {
                pad + (w - 2.0 * pad) * (i as f64 / last as f64)
            };
            let y = h - pad - ((value - min) / range) * (h - 2.0 * pad);
            Point::new(x, y)
        })
        .collect()
}

pub fn scene(surface: &SurfaceDescriptor, data: &[f64], style: &LineStyle) -> Scene {
    let mut scene = Scene::new();
    let points = points(surface, data, style);

    if points.len() >= 2 {
        scene.push(Shape::Polyline {
            points: points.clone(),
            paint: Paint::Linear {
                from: Point::new(0.0, 0.0),
                to: Point::new(surface.width_f64(), 0.0),
                start: style.gradient_left,
                end: style.gradient_right,
            },
            width: style.line_width,
        });
    }

    for center in points {
        scene.push(Shape::Disc {
            center,
            radius: style.glow_radius,
            color: style.glow_color,
            alpha: style.glow_alpha,
        });
    }
    scene
}

/// Paint a series as a sparkline
pub fn render(
    surface: &SurfaceDescriptor,
    data: &[f64],
    style: &LineStyle,
    background: Rgb,
) -> Result<PixelBuffer> {
    super::paint(surface, background, || scene(surface, data, style))
}
