//! Scene primitives produced by the renderers
//!
//! Renderers describe what to draw in logical coordinates; `export::rasterize`
//! turns a scene into pixels. Keeping the two apart lets tests inspect chart
//! geometry (arc spans, bar counts) without decoding images.

use crate::styles::Rgb;

/// Point in logical (CSS) pixels, y pointing down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` in direction `angle` (radians, clockwise
    /// from the positive x axis since y points down)
    pub fn polar(self, radius: f64, angle: f64) -> Self {
        Self::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// How a stroke is colored
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Rgb),
    /// Linear gradient between two points, clamped beyond either end
    Linear {
        from: Point,
        to: Point,
        start: Rgb,
        end: Rgb,
    },
}

impl Paint {
    /// Color of the paint at a point
    pub fn color_at(&self, point: Point) -> Rgb {
        match *self {
            Paint::Solid(color) => color,
            Paint::Linear {
                from,
                to,
                start,
                end,
            } => {
                let (dx, dy) = (to.x - from.x, to.y - from.y);
                let length_sq = dx * dx + dy * dy;
                if length_sq <= f64::EPSILON {
                    return start;
                }
                let t = ((point.x - from.x) * dx + (point.y - from.y) * dy) / length_sq;
                start.lerp(end, t)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Connected stroke through `points`
    Polyline {
        points: Vec<Point>,
        paint: Paint,
        width: f64,
    },
    /// Circular arc stroked from `start_angle` to `end_angle` (radians)
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        color: Rgb,
        width: f64,
    },
    /// Filled circle blended with `alpha`
    Disc {
        center: Point,
        radius: f64,
        color: Rgb,
        alpha: f64,
    },
}

impl Shape {
    pub fn is_arc(&self) -> bool {
        matches!(self, Shape::Arc { .. })
    }

    pub fn is_polyline(&self) -> bool {
        matches!(self, Shape::Polyline { .. })
    }

    pub fn is_disc(&self) -> bool {
        matches!(self, Shape::Disc { .. })
    }
}

/// Ordered list of shapes; later shapes paint over earlier ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn arcs(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.is_arc())
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.is_polyline())
    }

    pub fn discs(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.is_disc())
    }
}
