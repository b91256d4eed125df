//! Passing network CLI
//!
//! Builds one team's passing network for one match and writes it as SVG
//! (and optionally JSON) into the output directory.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Parser;
use passnet_core::analysis::{BallHalf, Context};
use passnet_core::{
    build_network, render_svg, BuildOptions, NetworkOutput, PlotConfig, PlotType, Source,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "passnet", version)]
#[command(about = "Build a football passing network from eventing or tracking data")]
struct Cli {
    /// Match ID
    #[arg(short = 'm', long = "match-id")]
    match_id: String,

    /// Selected team in the match ("Home"/"Away" for tracking data)
    #[arg(short = 't', long = "team-name")]
    team_name: String,

    /// Data source: eventing | tracking
    #[arg(short = 's', long)]
    source: Source,

    /// Type of plot: basic | pass_value | tracking
    #[arg(short = 'k', long = "plot-type")]
    plot_type: PlotType,

    /// Filter on the location of the ball: own_half | opponent_half
    #[arg(short = 'b', long = "ball-location")]
    half: Option<BallHalf>,

    /// Whether the team is attacking or defending
    #[arg(short = 'c', long)]
    context: Option<Context>,

    /// Root of the input data tree
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory the plot is written to
    #[arg(long, default_value = "plots")]
    out_dir: PathBuf,

    /// JSON file overriding plot settings
    #[arg(long)]
    plot_config: Option<PathBuf>,

    /// Also write the network tables as JSON
    #[arg(long)]
    json: bool,

    /// Debug-level logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn build_options(&self) -> BuildOptions {
        let mut opts = BuildOptions::new(
            self.match_id.as_str(),
            self.team_name.as_str(),
            self.source,
            self.plot_type,
        );
        opts.context = self.context;
        opts.half = self.half;
        opts.data_dir = self.data_dir.clone();
        opts.out_dir = self.out_dir.clone();
        opts
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Write the SVG and, when asked, the JSON tables. Returns the SVG path.
fn write_outputs(
    output: &NetworkOutput,
    config: &PlotConfig,
    out_dir: &Path,
    json: bool,
) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let svg_path = out_dir.join(format!("{}.svg", output.plot_name));
    std::fs::write(&svg_path, render_svg(output, config))
        .with_context(|| format!("Failed to write plot: {}", svg_path.display()))?;
    debug!(path = %svg_path.display(), "plot written");

    if json {
        let json_path = out_dir.join(format!("{}.json", output.plot_name));
        let body = serde_json::to_string_pretty(output)?;
        std::fs::write(&json_path, body)
            .with_context(|| format!("Failed to write tables: {}", json_path.display()))?;
        debug!(path = %json_path.display(), "tables written");
    }
    Ok(svg_path)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = PlotConfig::load_or_default(cli.plot_config.as_deref()).with_context(|| {
        format!(
            "Failed to load plot config: {}",
            cli.plot_config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    let opts = cli.build_options();
    let output = build_network(&opts)
        .with_context(|| format!("Failed to build network for match {}", opts.match_id))?;

    let svg_path = write_outputs(&output, &config, &opts.out_dir, cli.json)?;
    info!(
        path = %svg_path.display(),
        passes = output.diagnostics.passes,
        dropped_windows = output.diagnostics.dropped_windows,
        "network built"
    );

    println!("{} done!", output.plot_name);
    Ok(())
}
