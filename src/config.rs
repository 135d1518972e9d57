//! Render configuration
//!
//! Every color, size and fallback seed used by the renderers lives here with
//! its default. Configuration is layered with the `config` crate: built-in
//! defaults, then an optional TOML file, then `DECOCHART_*` environment
//! variables (`__` separates nested keys, e.g. `DECOCHART_WAVE__LINE_WIDTH=3`).

use std::path::Path;

use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use crate::data::SeriesShape;
use crate::errors::Result;
use crate::page::Role;
use crate::styles::{BarGroupStyle, DonutStyle, LineStyle, RadialStyle, Rgb, WaveStyle, palette};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DECOCHART";

/// Settings for a role drawn by the line renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRole {
    /// Seed used when the element declares none
    pub default_seed: f64,
    pub series: SeriesShape,
    /// Run the gradient right-to-left
    pub reversed_gradient: bool,
}

/// Settings for a role that only needs a seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRole {
    pub default_seed: f64,
}

/// Per-role defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleTable {
    pub spark: LineRole,
    pub mini_line: LineRole,
    pub line: LineRole,
    pub bar_group: SeedRole,
    pub donut: SeedRole,
    pub radial: SeedRole,
    pub wave: SeedRole,
}

impl Default for RoleTable {
    fn default() -> Self {
        let line_role = |seed: f64, length: usize, amplitude: f64, reversed: bool| LineRole {
            default_seed: seed,
            series: SeriesShape::new(length, amplitude),
            reversed_gradient: reversed,
        };
        Self {
            spark: line_role(1.0, 28, 100.0, false),
            mini_line: line_role(2.0, 18, 80.0, true),
            line: line_role(3.0, 14, 120.0, false),
            bar_group: SeedRole { default_seed: 5.0 },
            donut: SeedRole { default_seed: 6.0 },
            radial: SeedRole { default_seed: 7.0 },
            wave: SeedRole { default_seed: 8.0 },
        }
    }
}

impl RoleTable {
    pub fn default_seed(&self, role: Role) -> f64 {
        match role {
            Role::Spark => self.spark.default_seed,
            Role::MiniLine => self.mini_line.default_seed,
            Role::Line => self.line.default_seed,
            Role::BarGroup => self.bar_group.default_seed,
            Role::Donut => self.donut.default_seed,
            Role::Radial => self.radial.default_seed,
            Role::Wave => self.wave.default_seed,
        }
    }

    /// Line settings for the three line roles
    pub fn line_role(&self, role: Role) -> Option<&LineRole> {
        match role {
            Role::Spark => Some(&self.spark),
            Role::MiniLine => Some(&self.mini_line),
            Role::Line => Some(&self.line),
            _ => None,
        }
    }
}

/// Complete configuration passed to every render pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Color a surface is cleared to before drawing
    pub background: Rgb,
    pub line: LineStyle,
    pub bars: BarGroupStyle,
    pub donut: DonutStyle,
    pub radial: RadialStyle,
    pub wave: WaveStyle,
    pub roles: RoleTable,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: palette::NIGHT,
            line: LineStyle::default(),
            bars: BarGroupStyle::default(),
            donut: DonutStyle::default(),
            radial: RadialStyle::default(),
            wave: WaveStyle::default(),
            roles: RoleTable::default(),
        }
    }
}

impl RenderConfig {
    /// Defaults, then `path` (TOML, required when given), then the process
    /// environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`RenderConfig::load`] but reading environment variables from
    /// `env` instead of the process when it is `Some`
    pub fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: RenderConfig = builder.build()?.try_deserialize()?;
        tracing::debug!(file = ?path, "render configuration loaded");
        Ok(config)
    }

    /// Line style for a line role, honouring its gradient direction
    pub fn line_style_for(&self, role: Role) -> LineStyle {
        match self.roles.line_role(role) {
            Some(settings) => self.line_style(settings),
            None => self.line.clone(),
        }
    }

    /// Shared line style, with the gradient reversed when the role asks for it
    pub fn line_style(&self, settings: &LineRole) -> LineStyle {
        if settings.reversed_gradient {
            self.line.reversed()
        } else {
            self.line.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.roles.default_seed(Role::Spark), 1.0);
        assert_eq!(config.roles.default_seed(Role::MiniLine), 2.0);
        assert_eq!(config.roles.default_seed(Role::Line), 3.0);
        assert_eq!(config.roles.default_seed(Role::BarGroup), 5.0);
        assert_eq!(config.roles.default_seed(Role::Donut), 6.0);
        assert_eq!(config.roles.default_seed(Role::Radial), 7.0);
        assert_eq!(config.roles.default_seed(Role::Wave), 8.0);
        assert_eq!(config.roles.spark.series, SeriesShape::new(28, 100.0));
        assert_eq!(config.roles.mini_line.series, SeriesShape::new(18, 80.0));
        assert_eq!(config.roles.line.series, SeriesShape::new(14, 120.0));
    }

    #[test]
    fn test_mini_line_gradient_is_reversed() {
        let config = RenderConfig::default();
        let mini = config.line_style_for(Role::MiniLine);
        let spark = config.line_style_for(Role::Spark);
        assert_eq!(mini.gradient_left, spark.gradient_right);
        assert_eq!(mini.gradient_right, spark.gradient_left);
        assert_eq!(config.line_style(&config.roles.mini_line), mini);
        assert_eq!(config.line_style(&config.roles.line), config.line);
    }

    #[test]
    fn test_load_without_sources_is_default() {
        let config = RenderConfig::load_with_env(None, Some(Map::new())).unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_toml_file_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r##"
background = "#000000"

[wave]
color = "#ffffff"
line_width = 3.0

[roles.spark]
default_seed = 11.0
series = {{ length = 40, amplitude = 50.0 }}
reversed_gradient = true
"##
        )
        .unwrap();

        let config = RenderConfig::load_with_env(Some(file.path()), Some(Map::new())).unwrap();
        assert_eq!(config.background, Rgb(0, 0, 0));
        assert_eq!(config.wave.color, Rgb(255, 255, 255));
        assert_eq!(config.wave.line_width, 3.0);
        assert_eq!(config.wave.primary_period, 28.0);
        assert_eq!(config.roles.spark.default_seed, 11.0);
        assert_eq!(config.roles.spark.series, SeriesShape::new(40, 50.0));
        assert_eq!(config.roles.donut.default_seed, 6.0);
    }

    #[test]
    fn test_environment_overrides() {
        let mut env = Map::new();
        env.insert("DECOCHART_WAVE__LINE_WIDTH".to_string(), "4".to_string());
        env.insert("DECOCHART_ROLES__DONUT__DEFAULT_SEED".to_string(), "42".to_string());
        env.insert("DECOCHART_BACKGROUND".to_string(), "#101010".to_string());

        let config = RenderConfig::load_with_env(None, Some(env)).unwrap();
        assert_eq!(config.wave.line_width, 4.0);
        assert_eq!(config.roles.donut.default_seed, 42.0);
        assert_eq!(config.background, Rgb(16, 16, 16));
    }

    #[test]
    fn test_invalid_color_is_config_error() {
        let mut env = Map::new();
        env.insert("DECOCHART_BACKGROUND".to_string(), "teal".to_string());
        let err = RenderConfig::load_with_env(None, Some(env)).unwrap_err();
        assert!(matches!(err, crate::errors::ChartError::ConfigError { .. }));
    }

    #[test]
    fn test_missing_file_is_error() {
        let path = Path::new("/nonexistent/decochart.toml");
        let result = RenderConfig::load_with_env(Some(path), Some(Map::new()));
        assert!(result.is_err());
    }
}
