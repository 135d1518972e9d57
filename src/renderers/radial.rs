//! Radial bar renderer: background rings plus a fan of gradient bars

use crate::data::rng;
use crate::elements::{Paint, Point, Scene, Shape};
use crate::errors::Result;
use crate::export::PixelBuffer;
use crate::layouts::SurfaceDescriptor;
use crate::styles::{RadialStyle, Rgb};

pub fn center(surface: &SurfaceDescriptor, style: &RadialStyle) -> Point {
    Point::new(style.center_x, surface.height_f64() / 2.0 + style.center_y_offset)
}

/// Angle between neighbouring bars; zero for a single bar
pub fn angle_step(style: &RadialStyle) -> f64 {
    if style.bar_count > 1 {
        style.sweep / (style.bar_count - 1) as f64
    } else {
        0.0
    }
}

/// Bar lengths, each in `[bar_min_length, bar_min_length + bar_length_span)`
pub fn bar_lengths(seed: f64, style: &RadialStyle) -> Vec<f64> {
    (0..style.bar_count)
        .map(|i| style.bar_min_length + rng(seed + i as f64) * style.bar_length_span)
        .collect()
}

pub fn scene(surface: &SurfaceDescriptor, seed: f64, style: &RadialStyle) -> Scene {
    let center = center(surface, style);
    let mut scene = Scene::new();

    for ring in 0..style.ring_count {
        scene.push(Shape::Arc {
            center,
            radius: style.ring_base_radius + ring as f64 * style.ring_spacing,
            start_angle: 0.0,
            end_angle: std::f64::consts::TAU,
            color: style.ring_color,
            width: style.ring_width,
        });
    }

    let step = angle_step(style);
    for (i, length) in bar_lengths(seed, style).into_iter().enumerate() {
        let angle = style.start_angle + i as f64 * step;
        let inner = center.polar(style.bar_inner_radius, angle);
        let outer = center.polar(style.bar_inner_radius + length, angle);
        scene.push(Shape::Polyline {
            points: vec![inner, outer],
            paint: Paint::Linear {
                from: inner,
                to: outer,
                start: style.gradient_inner,
                end: style.gradient_outer,
            },
            width: style.bar_width,
        });
    }
    scene
}

pub fn render(
    surface: &SurfaceDescriptor,
    seed: f64,
    style: &RadialStyle,
    background: Rgb,
) -> Result<PixelBuffer> {
    super::paint(surface, background, || scene(surface, seed, style))
}
