//! Render pass over a whole page
//!
//! `render` discovers elements role by role, derives each one's seed and
//! dispatches to the matching renderer. It keeps no state between calls, so
//! running it again (on every resize) redraws everything from scratch with
//! identical results for unchanged inputs.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{LineRole, RenderConfig};
use crate::errors::Result;
use crate::export::PixelBuffer;
use crate::page::{Discovered, Page, Role};
use crate::layouts::SurfaceDescriptor;
use crate::renderers::{BarGroup, bars, donut, line, radial, wave};

/// Platform lifecycle event that started a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Load,
    Resize,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Load => f.write_str("load"),
            Trigger::Resize => f.write_str("resize"),
        }
    }
}

/// What a renderer produced for one element
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutput {
    Pixels(PixelBuffer),
    Bars(BarGroup),
}

/// One rendered element
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSurface {
    pub role: Role,
    /// Element id, or `<marker>-<position>` for anonymous elements
    pub target: String,
    pub position: usize,
    pub seed: f64,
    pub output: RenderOutput,
}

impl RenderedSurface {
    pub fn pixels(&self) -> Option<&PixelBuffer> {
        match &self.output {
            RenderOutput::Pixels(buffer) => Some(buffer),
            RenderOutput::Bars(_) => None,
        }
    }

    pub fn bars(&self) -> Option<&BarGroup> {
        match &self.output {
            RenderOutput::Bars(group) => Some(group),
            RenderOutput::Pixels(_) => None,
        }
    }
}

/// Seed for a discovered element: declared attribute or the role default,
/// plus the element's position for positional roles
pub fn derive_seed(found: &Discovered<'_>, config: &RenderConfig) -> f64 {
    let base = found
        .element
        .declared_seed()
        .unwrap_or_else(|| config.roles.default_seed(found.role));
    if found.role.is_positional() {
        base + found.position as f64
    } else {
        base
    }
}

/// Render every chart on the page
pub fn render(
    page: &Page,
    trigger: Trigger,
    config: &RenderConfig,
) -> Result<Vec<RenderedSurface>> {
    let mut rendered = Vec::new();

    for role in Role::ALL {
        for found in page.discover(role) {
            let seed = derive_seed(&found, config);
            let output = render_one(page, &found, seed, config)?;
            debug!(
                %trigger,
                role = %role,
                element = %found.target(),
                seed,
                "element rendered"
            );
            rendered.push(RenderedSurface {
                role,
                target: found.target(),
                position: found.position,
                seed,
                output,
            });
        }
    }

    info!(%trigger, elements = rendered.len(), "render pass complete");
    Ok(rendered)
}

fn render_one(
    page: &Page,
    found: &Discovered<'_>,
    seed: f64,
    config: &RenderConfig,
) -> Result<RenderOutput> {
    let surface = page.surface(found.element);
    let background = config.background;
    let roles = &config.roles;

    let output = match found.role {
        Role::Spark => render_line(&surface, &roles.spark, seed, config)?,
        Role::MiniLine => render_line(&surface, &roles.mini_line, seed, config)?,
        Role::Line => render_line(&surface, &roles.line, seed, config)?,
        Role::BarGroup => RenderOutput::Bars(bars::build(seed, &config.bars)),
        Role::Donut => {
            RenderOutput::Pixels(donut::render(&surface, seed, &config.donut, background)?)
        }
        Role::Radial => {
            RenderOutput::Pixels(radial::render(&surface, seed, &config.radial, background)?)
        }
        Role::Wave => {
            RenderOutput::Pixels(wave::render(&surface, seed, &config.wave, background)?)
        }
    };
    Ok(output)
}

fn render_line(
    surface: &SurfaceDescriptor,
    settings: &LineRole,
    seed: f64,
    config: &RenderConfig,
) -> Result<RenderOutput> {
    let data = settings.series.build(seed);
    let style = config.line_style(settings);
    let pixels = line::render(surface, &data, &style, config.background)?;
    Ok(RenderOutput::Pixels(pixels))
}
