//! The five decorative chart renderers
//!
//! Renderers are independent of each other and of any event system. Surface
//! renderers turn `(surface, input, style)` into a [`Scene`] and, through
//! [`crate::export::rasterize`], into a [`PixelBuffer`]. The bar group renderer
//! works on a container instead and produces a structural [`bars::BarGroup`].

pub mod bars;
pub mod donut;
pub mod line;
pub mod radial;
pub mod wave;

pub use bars::{Bar, BarGroup, Fill};
pub use donut::DonutArc;

use crate::elements::Scene;
use crate::errors::Result;
use crate::export::{PixelBuffer, rasterize};
use crate::layouts::SurfaceDescriptor;
use crate::styles::Rgb;

/// Build a renderer's scene and rasterize it onto a freshly sized surface.
/// Oversized surfaces are rejected before the scene is built.
pub(crate) fn paint(
    surface: &SurfaceDescriptor,
    background: Rgb,
    build: impl FnOnce() -> Scene,
) -> Result<PixelBuffer> {
    surface.checked_backing_size()?;
    let scene = build();
    let buffer = rasterize(&scene, surface, background)?;
    tracing::trace!(
        shapes = scene.len(),
        width = buffer.width(),
        height = buffer.height(),
        "scene rasterized"
    );
    Ok(buffer)
}
