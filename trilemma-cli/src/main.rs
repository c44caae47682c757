//! CLI and server for the speed/quality/cost trade-off triangle.
//!
//! Provides:
//! - Layout summaries and SVG rendering from the command line
//! - One-shot trade-off analysis through a Gemini-backed text generator
//! - HTTP + WebSocket server for frontend connections

mod gemini;
mod markdown;
mod render;
mod server;

use std::{fmt::Write as _, io::IsTerminal, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{bail, Context as _};
use clap::{Args, Parser, Subcommand};
use log::info;
use owo_colors::OwoColorize;

use trilemma_core::{deg::Deg, AnalysisState, GeometryParameters, Layout, Shell, CENTROID};

use gemini::{GeminiClient, GeneratorConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use render::{render_svg, RenderConfig};
use server::{run_server, ServerConfig};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TRILEMMA_BUILD_SHA"), ")");

#[derive(Parser)]
#[command(name = "trilemma")]
#[command(version = VERSION)]
#[command(about = "Fast, good, cheap: pick two", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print circle placement and intersection status
    Layout {
        #[command(flatten)]
        geometry: GeometryArgs,

        /// Emit JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Render the layout as SVG
    Render {
        #[command(flatten)]
        geometry: GeometryArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Explain the trade-offs for a scenario
    Analyze {
        /// Scenario to analyze, e.g. "Building a startup MVP"
        #[arg(short, long)]
        context: String,

        /// Print the markdown as returned, without terminal formatting
        #[arg(long)]
        raw: bool,

        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// Start HTTP + WebSocket server for frontend connections
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        #[command(flatten)]
        generator: GeneratorArgs,
    },
}

#[derive(Args)]
struct GeometryArgs {
    /// Circle radius
    #[arg(short, long, default_value = "130", allow_negative_numbers = true)]
    radius: f64,

    /// Distance between circle centers
    #[arg(short, long, default_value = "230", allow_negative_numbers = true)]
    separation: f64,

    /// Rotation in degrees
    #[arg(short = 't', long, default_value = "0", allow_negative_numbers = true)]
    rotation: f64,
}

impl GeometryArgs {
    fn layout(&self) -> anyhow::Result<Layout> {
        let params = GeometryParameters::new(self.radius, self.separation, self.rotation);
        Ok(Layout::new(params, CENTROID)?)
    }
}

#[derive(Args)]
struct GeneratorArgs {
    /// Gemini API key (falls back to $API_KEY)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

impl GeneratorArgs {
    fn client(self) -> anyhow::Result<GeminiClient> {
        let api_key = self.api_key.or_else(|| std::env::var("API_KEY").ok()).filter(|k| !k.is_empty());
        if api_key.is_none() {
            log::warn!("no API key configured; analysis requests will fail");
        }
        let config = GeneratorConfig {
            api_key,
            model: self.model,
            base_url: self.base_url,
            timeout: Duration::from_secs(self.timeout),
        };
        Ok(GeminiClient::new(config)?)
    }
}

/// Human-readable layout report
fn summary(layout: &Layout) -> Result<String, std::fmt::Error> {
    let params = &layout.params;
    let mut out = String::new();
    writeln!(
        out,
        "radius {}  separation {}  rotation {}",
        params.radius, params.separation, params.display_rotation().deg_str(),
    )?;
    for (c, angle) in layout.circles.iter().zip(layout.center_angles()) {
        let center = c.center();
        writeln!(
            out,
            "  {} {:<8} ({:.1}, {:.1}) at {:>7}  {}",
            c.label, c.constraint.caption(), center.x, center.y, angle.deg_str(), c.description,
        )?;
        writeln!(out, "      {}", c.summary)?;
    }
    for label in &layout.labels {
        writeln!(
            out,
            "  {:<12} ({:.1}, {:.1})  {}{}",
            label.text, label.position.x, label.position.y, label.description,
            if label.overlaps { "" } else { " (no overlap)" },
        )?;
    }
    writeln!(out, "{}", layout.state.badge())?;
    writeln!(
        out,
        "ratio {:.2} (void above {:.2}); gap {:+.1}",
        params.ratio(), params.void_threshold() / params.radius, layout.gap(),
    )?;
    writeln!(out, "Gap appears when separation > {}", params.gap_hint())?;
    Ok(out)
}

async fn analyze(context: String, raw: bool, generator: GeneratorArgs) -> anyhow::Result<()> {
    let client = generator.client()?;
    let mut shell = Shell::new();
    shell.set_context(context);
    if !shell.analysis().can_submit() {
        bail!("context is empty");
    }

    eprintln!("{}", "Analyzing...".dimmed());
    match shell.analyze(&client).await {
        AnalysisState::Success { text } => {
            if raw {
                println!("{}", text);
            } else {
                print!("{}", markdown::to_terminal(text, std::io::stdout().is_terminal()));
            }
            Ok(())
        }
        AnalysisState::Error { message } => bail!("{}", message),
        state => bail!("analysis did not finish: {}", state.status()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout { geometry, json } => {
            let layout = geometry.layout()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&layout)?);
            } else {
                print!("{}", summary(&layout)?);
            }
        }
        Commands::Render { geometry, output } => {
            let svg = render_svg(&geometry.layout()?, &RenderConfig::default())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
                    info!("wrote {}", path.display());
                }
                None => print!("{}", svg),
            }
        }
        Commands::Analyze { context, raw, generator } => analyze(context, raw, generator).await?,
        Commands::Serve { port, generator } => {
            let config = ServerConfig {
                generator: Arc::new(generator.client()?),
                render: RenderConfig::default(),
            };
            run_server(port, config).await?;
        }
    }
    Ok(())
}
