//! Bar group renderer
//!
//! Unlike the other renderers this one does not touch a drawable surface.
//! It rebuilds the contents of a container: a row of bars, each holding one
//! fill whose height is a percentage of the bar.

use serde::Serialize;

use crate::data::rng;
use crate::styles::BarGroupStyle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fill {
    pub class: String,
    /// Height relative to the enclosing bar, in percent
    pub height_pct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub class: String,
    pub fill: Fill,
}

/// New contents of a bar group container
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BarGroup {
    pub bars: Vec<Bar>,
}

impl BarGroup {
    pub fn heights(&self) -> Vec<u32> {
        self.bars.iter().map(|bar| bar.fill.height_pct).collect()
    }

    /// Inner HTML that replaces the container's previous contents
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for bar in &self.bars {
            html.push_str(&format!(
                "<div class=\"{}\"><div class=\"{}\" style=\"height: {}%\"></div></div>",
                escape_attr(&bar.class),
                escape_attr(&bar.fill.class),
                bar.fill.height_pct
            ));
        }
        html
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Fill height for bar `index`: `min + floor(rng(seed + index) * span)`
pub fn fill_height(seed: f64, index: usize, style: &BarGroupStyle) -> u32 {
    let jitter = (rng(seed + index as f64) * style.height_span_pct as f64).floor();
    // NaN (non-finite seeds) saturates to 0
    style.min_height_pct + jitter as u32
}

/// Clear the container and build `style.bar_count` bars
pub fn build(seed: f64, style: &BarGroupStyle) -> BarGroup {
    let bars = (0..style.bar_count)
        .map(|i| Bar {
            class: style.bar_class.clone(),
            fill: Fill {
                class: style.fill_class.clone(),
                height_pct: fill_height(seed, i, style),
            },
        })
        .collect();
    BarGroup { bars }
}
