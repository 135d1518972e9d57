//! Platform event adapter
//!
//! Translates platform lifecycle events into render passes and hands the
//! results to an exporter for committing. Resize events are not debounced:
//! every event triggers a full, self-contained redraw.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::RenderConfig;
use crate::errors::Result;
use crate::export::ChartExporter;
use crate::initializer::{RenderedSurface, Trigger, render};
use crate::page::Page;

/// New layout reported with a resize event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewport {
    /// New density ratio, if the display changed
    pub density_ratio: Option<f64>,
    /// New displayed sizes keyed by element id
    pub sizes: HashMap<String, (u32, u32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Full page load
    Load,
    /// Viewport resize, with whatever layout changed
    Resize(Viewport),
}

impl PlatformEvent {
    pub fn trigger(&self) -> Trigger {
        match self {
            PlatformEvent::Load => Trigger::Load,
            PlatformEvent::Resize(_) => Trigger::Resize,
        }
    }
}

/// Owns a page and redraws it through an exporter on every event
pub struct PageAdapter<E: ChartExporter> {
    page: Page,
    config: RenderConfig,
    exporter: E,
}

impl<E: ChartExporter> PageAdapter<E> {
    pub fn new(page: Page, config: RenderConfig, exporter: E) -> Self {
        Self {
            page,
            config,
            exporter,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    pub fn into_exporter(self) -> E {
        self.exporter
    }

    /// Apply the event's layout changes, render the page and commit every
    /// output. Returns what was rendered, in commit order.
    pub fn handle(&mut self, event: &PlatformEvent) -> Result<Vec<RenderedSurface>> {
        if let PlatformEvent::Resize(viewport) = event {
            self.apply_viewport(viewport);
        }

        let trigger = event.trigger();
        let rendered = render(&self.page, trigger, &self.config)?;
        for surface in &rendered {
            self.exporter.commit(surface)?;
        }
        info!(%trigger, committed = rendered.len(), "page redrawn");
        Ok(rendered)
    }

    fn apply_viewport(&mut self, viewport: &Viewport) {
        if let Some(ratio) = viewport.density_ratio {
            debug!(from = self.page.density_ratio, to = ratio, "density ratio changed");
            self.page.density_ratio = ratio;
        }
        for (id, &(width, height)) in &viewport.sizes {
            match self.page.element_mut(id) {
                Some(element) => {
                    element.width = width;
                    element.height = height;
                }
                None => warn!(element = %id, "resize for unknown element"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemoryExporter;
    use crate::page::{PageElement, Role};

    fn adapter() -> PageAdapter<MemoryExporter> {
        let page = Page::new(
            1.0,
            vec![
                PageElement::new("spark", 100, 30).with_id("kpi"),
                PageElement::new("bar-group", 0, 0).with_id("months"),
            ],
        );
        PageAdapter::new(page, RenderConfig::default(), MemoryExporter::new())
    }

    #[test]
    fn test_load_commits_everything() {
        let mut adapter = adapter();
        assert_eq!(adapter.handle(&PlatformEvent::Load).unwrap().len(), 2);
        assert_eq!(adapter.exporter().committed().len(), 2);
        assert!(adapter.exporter().get("months").unwrap().bars().is_some());
    }

    #[test]
    fn test_resize_redraws_at_new_size() {
        let mut adapter = adapter();
        adapter.handle(&PlatformEvent::Load).unwrap();

        let mut sizes = HashMap::new();
        sizes.insert("kpi".to_string(), (150, 40));
        sizes.insert("ghost".to_string(), (1, 1));
        let viewport = Viewport {
            density_ratio: Some(2.0),
            sizes,
        };
        adapter.handle(&PlatformEvent::Resize(viewport)).unwrap();

        let exporter = adapter.exporter();
        assert_eq!(exporter.committed().len(), 2);
        let kpi = exporter.get("kpi").unwrap();
        assert_eq!(kpi.role, Role::Spark);
        let buffer = kpi.pixels().unwrap();
        assert_eq!((buffer.width(), buffer.height()), (300, 80));
    }

    #[test]
    fn test_repeated_resizes_are_identical() {
        let mut adapter = adapter();
        adapter.handle(&PlatformEvent::Resize(Viewport::default())).unwrap();
        let first = adapter.exporter().committed().to_vec();
        adapter.handle(&PlatformEvent::Resize(Viewport::default())).unwrap();
        assert_eq!(adapter.exporter().committed(), first.as_slice());
    }
}
