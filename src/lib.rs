//! # Decochart
//!
//! Seeded, decorative charts for dashboards: sparklines, bar groups, donuts,
//! radial bar charts and wave lines. Nothing here charts real data; every
//! chart is a deterministic function of a seed, so a page redraws identically
//! on every load and resize.
//!
//! ## Quick Start
//!
//! ```rust
//! use decochart::{Page, PageElement, RenderConfig, Trigger, render};
//!
//! let page = Page::new(2.0, vec![
//!     PageElement::new("card spark", 240, 64).with_id("revenue"),
//!     PageElement::new("donut-canvas", 160, 160),
//! ]);
//!
//! let rendered = render(&page, Trigger::Load, &RenderConfig::default()).unwrap();
//! assert_eq!(rendered.len(), 2);
//!
//! let spark = rendered[0].pixels().unwrap();
//! assert_eq!((spark.width(), spark.height()), (480, 128));
//! ```
//!
//! ## Pipeline
//!
//! 1. **Discovery**: page elements are matched by class marker, role by role
//! 2. **Seed derivation**: declared seed or per-role default, plus position
//!    for positional roles
//! 3. **Scene**: each renderer describes its chart as shapes in logical pixels
//! 4. **Rasterize**: shapes are drawn at `displayed size × density ratio`
//! 5. **Commit**: an exporter writes PNGs and bar-group HTML fragments
//!
//! ## Modules
//!
//! - `data`: seeded generator and bounded series builder
//! - `renderers`: line, bars, donut, radial and wave renderers
//! - `elements`: scene primitives
//! - `layouts`: surface sizing and density scaling
//! - `export`: rasterization and exporters
//! - `page`: page manifest and discovery
//! - `initializer`: whole-page render pass
//! - `adapter`: platform event handling
//! - `config` / `styles`: configuration with defaults

pub mod adapter;
pub mod config;
pub mod data;
pub mod elements;
pub mod errors;
pub mod export;
pub mod initializer;
pub mod layouts;
pub mod page;
pub mod renderers;
pub mod styles;

// Re-export commonly used types for convenience
pub use adapter::{PageAdapter, PlatformEvent, Viewport};
pub use config::RenderConfig;
pub use data::{SeriesShape, rng, series};
pub use elements::{Paint, Point, Scene, Shape};
pub use errors::{ChartError, Result};
pub use export::{ChartExporter, DirectoryExporter, MemoryExporter, PixelBuffer, rasterize};
pub use initializer::{RenderOutput, RenderedSurface, Trigger, render};
pub use layouts::SurfaceDescriptor;
pub use page::{Page, PageElement, Role, SeedAttr};
pub use styles::{BarGroupStyle, DonutStyle, LineStyle, RadialStyle, Rgb, WaveStyle};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!NAME.is_empty());
        assert!(!DESCRIPTION.is_empty());
    }

    #[test]
    fn test_types_export() {
        let values = series(28, 100.0, 1.0);
        assert_eq!(values.len(), 28);
        assert!(values.iter().all(|v| (10.0..=90.0).contains(v)));
        assert!((0.0..1.0).contains(&rng(3.0)));
    }
}
