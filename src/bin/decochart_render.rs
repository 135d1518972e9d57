//! Render a page manifest of decorative charts to PNG files and HTML fragments
//!
//! Also prints individual series and bar groups for quick inspection.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{Table, presets::UTF8_FULL};
use tracing_subscriber::EnvFilter;

use decochart::{
    DirectoryExporter, Page, PageAdapter, PlatformEvent, RenderConfig, Trigger, Viewport,
    renderers::bars, series,
};

#[derive(Parser, Debug)]
#[command(name = "decochart-render", version, about = "Seeded decorative chart renderer")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every chart of a page manifest
    Render {
        /// Page manifest (JSON)
        #[arg(long)]
        page: PathBuf,

        /// Output directory for PNG and HTML files
        #[arg(long, default_value = "output")]
        out: PathBuf,

        /// Configuration file (TOML)
        #[arg(long, env = "DECOCHART_CONFIG")]
        config: Option<PathBuf>,

        /// Override the manifest's density ratio
        #[arg(long)]
        dpr: Option<f64>,

        /// Lifecycle event to simulate
        #[arg(long, value_enum, default_value_t = TriggerArg::Load)]
        trigger: TriggerArg,
    },
    /// Print a generated series as JSON
    Series {
        #[arg(long, default_value_t = 28)]
        length: usize,

        #[arg(long, default_value_t = 100.0)]
        amplitude: f64,

        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        seed: f64,
    },
    /// Print a bar group's HTML fragment
    Bars {
        #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
        seed: f64,

        /// Configuration file (TOML)
        #[arg(long, env = "DECOCHART_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum TriggerArg {
    Load,
    Resize,
}

impl From<TriggerArg> for Trigger {
    fn from(arg: TriggerArg) -> Self {
        match arg {
            TriggerArg::Load => Trigger::Load,
            TriggerArg::Resize => Trigger::Resize,
        }
    }
}

fn init_logging(verbose: bool, format: LogFormat) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    match cli.command {
        Command::Render {
            page,
            out,
            config,
            dpr,
            trigger,
        } => run_render(page, out, config, dpr, trigger.into()),
        Command::Series {
            length,
            amplitude,
            seed,
        } => {
            let values = series(length, amplitude, seed);
            println!("{}", serde_json::to_string_pretty(&values)?);
            Ok(())
        }
        Command::Bars { seed, config } => {
            let config = RenderConfig::load(config.as_deref()).context("loading configuration")?;
            println!("{}", bars::build(seed, &config.bars).to_html());
            Ok(())
        }
    }
}

fn run_render(
    page_path: PathBuf,
    out: PathBuf,
    config_path: Option<PathBuf>,
    dpr: Option<f64>,
    trigger: Trigger,
) -> Result<()> {
    let config = RenderConfig::load(config_path.as_deref()).context("loading configuration")?;
    let mut page = Page::load(&page_path)
        .with_context(|| format!("loading page {}", page_path.display()))?;

    let event = match trigger {
        Trigger::Load => {
            if let Some(ratio) = dpr {
                page.density_ratio = ratio;
            }
            PlatformEvent::Load
        }
        Trigger::Resize => PlatformEvent::Resize(Viewport {
            density_ratio: dpr,
            ..Viewport::default()
        }),
    };

    println!("🎨 Decochart Renderer");
    println!("=====================");
    println!("📄 Page: {} ({} elements)", page_path.display(), page.elements.len());

    let exporter = DirectoryExporter::new(&out)
        .with_context(|| format!("creating output directory {}", out.display()))?;
    let mut adapter = PageAdapter::new(page, config, exporter);
    let rendered = adapter.handle(&event)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Role", "Target", "Seed", "Output"]);
    for surface in &rendered {
        let output = match (surface.pixels(), surface.bars()) {
            (Some(buffer), _) => format!("{}x{} px", buffer.width(), buffer.height()),
            (None, Some(group)) => format!("{} bars {:?}", group.bars.len(), group.heights()),
            (None, None) => String::new(),
        };
        table.add_row(vec![
            surface.role.to_string(),
            surface.target.clone(),
            format!("{}", surface.seed),
            output,
        ]);
    }
    println!("{table}");

    let written = adapter.exporter().written().len();
    println!("\n✅ {} file(s) written to {}", written, out.display());
    Ok(())
}
