//! Donut renderer: three jittered arcs and an inner ring
//!
//! The jittered proportions are deliberately left unnormalized, so the arcs
//! plus gaps can fall short of, or run past, a full turn.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::data::rng;
use crate::elements::{Point, Scene, Shape};
use crate::errors::Result;
use crate::export::PixelBuffer;
use crate::layouts::SurfaceDescriptor;
use crate::styles::{DonutStyle, Rgb};

/// Angular extent of one donut segment, in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutArc {
    pub start: f64,
    pub end: f64,
    pub color: Rgb,
}

impl DonutArc {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// Jitter factor for segment `index`, in `[jitter_min, jitter_min + jitter_span)`
pub fn jitter(seed: f64, index: usize, style: &DonutStyle) -> f64 {
    style.jitter_min + rng(seed + index as f64) * style.jitter_span
}

/// Jittered proportions of a full turn
pub fn proportions(seed: f64, style: &DonutStyle) -> [f64; 3] {
    let mut parts = style.weights;
    for (i, part) in parts.iter_mut().enumerate() {
        *part *= jitter(seed, i, style);
    }
    parts
}

/// Segments laid out clockwise from twelve o'clock, separated by `style.gap`
pub fn arcs(seed: f64, style: &DonutStyle) -> Vec<DonutArc> {
    let mut start = -FRAC_PI_2;
    proportions(seed, style)
        .iter()
        .zip(style.colors)
        .map(|(part, color)| {
            let end = start + part * TAU;
            let arc = DonutArc { start, end, color };
            start = end + style.gap;
            arc
        })
        .collect()
}

pub fn scene(surface: &SurfaceDescriptor, seed: f64, style: &DonutStyle) -> Scene {
    let w = surface.width_f64();
    let h = surface.height_f64();
    let center = Point::new(w / 2.0, h / 2.0);
    let radius = w.min(h) / 2.0 - style.inset;

    let mut scene = Scene::new();
    for arc in arcs(seed, style) {
        scene.push(Shape::Arc {
            center,
            radius,
            start_angle: arc.start,
            end_angle: arc.end,
            color: arc.color,
            width: style.arc_width,
        });
    }

    scene.push(Shape::Arc {
        center,
        radius: radius - style.inner_ring_offset,
        start_angle: 0.0,
        end_angle: TAU,
        color: style.inner_ring_color,
        width: style.inner_ring_width,
    });
    scene
}

pub fn render(
    surface: &SurfaceDescriptor,
    seed: f64,
    style: &DonutStyle,
    background: Rgb,
) -> Result<PixelBuffer> {
    super::paint(surface, background, || scene(surface, seed, style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_follow_jittered_weights() {
        let style = DonutStyle::default();
        for seed in [1.0, 6.0, 7.5, -20.0] {
            let arcs = arcs(seed, &style);
            assert_eq!(arcs.len(), 3);
            for (i, arc) in arcs.iter().enumerate() {
                let factor = arc.span() / (style.weights[i] * TAU);
                assert!((0.8..1.2).contains(&factor), "jitter {factor} out of range");
                assert!((factor - jitter(seed, i, &style)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_arcs_start_at_top_and_keep_gaps() {
        let style = DonutStyle::default();
        let arcs = arcs(6.0, &style);
        assert_eq!(arcs[0].start, -FRAC_PI_2);
        for pair in arcs.windows(2) {
            assert!((pair[1].start - pair[0].end - 0.08).abs() < 1e-12);
        }
        assert_eq!(arcs[0].color, style.colors[0]);
        assert_eq!(arcs[2].color, style.colors[2]);
    }

    #[test]
    fn test_proportions_are_not_renormalized() {
        let style = DonutStyle::default();
        // seed 6 jitters every weight upward; total exceeds one turn
        let total: f64 = proportions(6.0, &style).iter().sum();
        assert!(total > 1.0);
        assert!((total - 1.117_922).abs() < 1e-4);
    }

    #[test]
    fn test_scene_has_three_arcs_and_inner_ring() {
        let style = DonutStyle::default();
        let surface = SurfaceDescriptor::new(160, 120, 1.0);
        let scene = scene(&surface, 6.0, &style);
        assert_eq!(scene.arcs().count(), 4);

        match scene.shapes().last() {
            Some(Shape::Arc {
                center,
                radius,
                color,
                width,
                ..
            }) => {
                assert_eq!(*center, Point::new(80.0, 60.0));
                assert_eq!(*radius, 60.0 - 8.0 - 20.0);
                assert_eq!(*color, style.inner_ring_color);
                assert_eq!(*width, 6.0);
            }
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn test_tiny_surface_renders() {
        let style = DonutStyle::default();
        let surface = SurfaceDescriptor::new(10, 10, 1.0);
        let buffer = render(&surface, 6.0, &style, Rgb(0, 0, 0)).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (10, 10));
    }
}
