//! Page model and surface discovery
//!
//! A page is a list of elements, each with a whitespace-separated class
//! string, an optional seed attribute and its laid-out size. Role markers in
//! the class string decide which renderer an element gets.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{ChartError, Result};
use crate::layouts::SurfaceDescriptor;

/// What an element is drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Spark,
    MiniLine,
    Line,
    BarGroup,
    Donut,
    Radial,
    Wave,
}

impl Role {
    /// Every role, in the order a render pass visits them
    pub const ALL: [Role; 7] = [
        Role::Spark,
        Role::MiniLine,
        Role::Line,
        Role::BarGroup,
        Role::Donut,
        Role::Radial,
        Role::Wave,
    ];

    /// Class marker that selects this role
    pub fn marker(self) -> &'static str {
        match self {
            Role::Spark => "spark",
            Role::MiniLine => "mini-line",
            Role::Line => "line",
            Role::BarGroup => "bar-group",
            Role::Donut => "donut-canvas",
            Role::Radial => "radial-canvas",
            Role::Wave => "wave",
        }
    }

    /// Whether the element's index among same-role elements is added to its seed
    pub fn is_positional(self) -> bool {
        matches!(self, Role::BarGroup | Role::Donut | Role::Radial | Role::Wave)
    }

    /// Bar groups are containers; every other role draws on a surface
    pub fn is_container(self) -> bool {
        self == Role::BarGroup
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Declared seed attribute, either a JSON number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedAttr {
    Number(f64),
    Text(String),
}

impl SeedAttr {
    /// Numeric value of the attribute; `None` means "use the default".
    ///
    /// Empty or whitespace-only text counts as absent. Text that is not a
    /// finite number is logged and treated as absent.
    pub fn value(&self) -> Option<f64> {
        match self {
            SeedAttr::Number(n) if n.is_finite() => Some(*n),
            SeedAttr::Number(n) => {
                warn!(seed = %n, "ignoring non-finite seed attribute");
                None
            }
            SeedAttr::Text(text) => {
                // Blank text means "no seed", never zero. Only decimal
                // notation is accepted, so "0x10" falls back too.
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => Some(n),
                    _ => {
                        warn!(seed = %text, "ignoring unparseable seed attribute");
                        None
                    }
                }
            }
        }
    }
}

/// One element of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageElement {
    #[serde(default)]
    pub id: Option<String>,
    /// Whitespace-separated class list
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub seed: Option<SeedAttr>,
    /// Displayed width in logical pixels
    #[serde(default)]
    pub width: u32,
    /// Displayed height in logical pixels
    #[serde(default)]
    pub height: u32,
}

impl PageElement {
    pub fn new(class: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: None,
            class: class.into(),
            seed: None,
            width,
            height,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_seed(mut self, seed: SeedAttr) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.class.split_whitespace().any(|c| c == name)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.has_class(role.marker())
    }

    /// Declared seed, if any
    pub fn declared_seed(&self) -> Option<f64> {
        self.seed.as_ref().and_then(SeedAttr::value)
    }
}

fn default_density_ratio() -> f64 {
    1.0
}

/// Page manifest: elements in document order plus the display density
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default = "default_density_ratio")]
    pub density_ratio: f64,
    #[serde(default)]
    pub elements: Vec<PageElement>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            density_ratio: default_density_ratio(),
            elements: Vec::new(),
        }
    }
}

/// An element matched by a role query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discovered<'a> {
    pub role: Role,
    /// Index among elements of the same role, in document order
    pub position: usize,
    pub element: &'a PageElement,
}

impl Discovered<'_> {
    /// Name the outputs of this element are committed under
    pub fn target(&self) -> String {
        match &self.element.id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => format!("{}-{}", self.role.marker(), self.position),
        }
    }
}

impl Page {
    pub fn new(density_ratio: f64, elements: Vec<PageElement>) -> Self {
        Self {
            density_ratio,
            elements,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let page: Page = serde_json::from_str(json)?;
        Ok(page)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| ChartError::InvalidPage {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_json_str(&json)
    }

    /// Elements carrying the role's marker, in document order
    pub fn discover(&self, role: Role) -> Vec<Discovered<'_>> {
        self.elements
            .iter()
            .filter(|element| element.has_role(role))
            .enumerate()
            .map(|(position, element)| Discovered {
                role,
                position,
                element,
            })
            .collect()
    }

    /// Surface descriptor for an element at the page's density
    pub fn surface(&self, element: &PageElement) -> SurfaceDescriptor {
        SurfaceDescriptor::new(element.width, element.height, self.density_ratio)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut PageElement> {
        self.elements
            .iter_mut()
            .find(|element| element.id.as_deref() == Some(id))
    }
}
