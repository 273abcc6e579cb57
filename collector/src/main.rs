//! @ai:module:intent CLI for collecting and plotting simulator statistics
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use simstats_collect::{
    config::{CollectConfig, PlotMode},
    pipeline::{run_collection, CollectOutcome},
    report::{format_skipped, format_table, load_csv, PlotSummary, ReportGenerator},
    runs::{ArtifactLocator, RunDiscovery, RunDiscoveryTrait},
};
use simstats_parser::NameSource;
use std::path::PathBuf;

/// Loaded from the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "simstats.toml";

#[derive(Parser)]
#[command(name = "simstats-collect")]
#[command(about = "Extract, tabulate and plot simulator statistics from multiple runs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect stats from runs, write the CSV and plot each stat
    Collect(CollectArgs),

    /// List runs under the base directory that have a stats file
    Discover {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory containing one subfolder per run
        #[arg(long)]
        base_dir: Option<PathBuf>,

        /// Only list runs whose name matches this regular expression
        #[arg(long)]
        run_pattern: Option<String>,
    },

    /// Plot stats from a previously written CSV
    Plot {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// CSV written by `collect`
        #[arg(long, default_value = "collected_stats.csv")]
        csv: PathBuf,

        /// Stats to plot (default: every column)
        #[arg(long, num_args = 1..)]
        stats: Vec<String>,

        /// Save plots as PNGs instead of displaying them
        #[arg(long)]
        save_plots: bool,

        /// Directory under which to save PNGs
        #[arg(long)]
        plots_dir: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("run_source").required(true).args(["runs", "runs_file", "discover"])))]
#[command(group(ArgGroup::new("stat_source").required(true).args(["stats", "stats_file"])))]
struct CollectArgs {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing one subfolder per run (default: m5out)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Run names (subfolder names under base-dir)
    #[arg(long, num_args = 1..)]
    runs: Vec<String>,

    /// Text file with one run name per line
    #[arg(long, value_name = "FILE")]
    runs_file: Option<PathBuf>,

    /// Use every run under base-dir that has a stats file
    #[arg(long)]
    discover: bool,

    /// With --discover, keep only runs matching this regular expression
    #[arg(long, requires = "discover")]
    run_pattern: Option<String>,

    /// Stat names to extract (exactly as in the stats file)
    #[arg(long, num_args = 1..)]
    stats: Vec<String>,

    /// Text file with one stat name per line
    #[arg(long, value_name = "FILE")]
    stats_file: Option<PathBuf>,

    /// Save plots as PNGs instead of displaying them
    #[arg(long)]
    save_plots: bool,

    /// Do not plot at all
    #[arg(long, conflicts_with = "save_plots")]
    no_plots: bool,

    /// Directory under which to save PNGs (default: plots)
    #[arg(long)]
    plots_dir: Option<PathBuf>,

    /// Path to write the collected statistics CSV (default: collected_stats.csv)
    #[arg(long)]
    output_csv: Option<PathBuf>,

    /// Also write the collected statistics as JSON
    #[arg(long)]
    output_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("simstats_collect=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Collect(args) => collect(args),
        Commands::Discover {
            config,
            base_dir,
            run_pattern,
        } => discover(config, base_dir, run_pattern),
        Commands::Plot {
            config,
            csv,
            stats,
            save_plots,
            plots_dir,
        } => plot_from_csv(config, csv, stats, save_plots, plots_dir),
        Commands::Init { output } => init_config(output),
    }
}

/// @ai:intent Collect stats from every run, export them and plot each stat
/// @ai:effects fs:read, fs:write, io
fn collect(args: CollectArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config.clone())?;
    apply_overrides(&mut config, &args);

    let locator = config.locator();

    let runs = if args.discover {
        discover_runs(&locator, args.run_pattern.as_deref())?
    } else {
        name_source(args.runs, args.runs_file).resolve()?
    };
    let metrics = name_source(args.stats, args.stats_file).resolve()?;

    tracing::info!(
        "Collecting {} stats from {} runs under {}",
        metrics.len(),
        runs.len(),
        locator.base_dir().display()
    );

    let outcome = run_collection(&config, &runs, &metrics, |table| {
        println!();
        println!("Collected statistics:");
        println!();
        print!("{}", format_table(table));

        let skipped = format_skipped(table);
        if !skipped.is_empty() {
            println!();
            print!("{}", skipped);
        }
        println!();
    })?;

    match outcome {
        CollectOutcome::NoData => println!("No data collected; exiting."),
        CollectOutcome::Completed { plots, .. } => print_plot_summary(&plots),
    }

    Ok(())
}

/// @ai:intent Print runs found under the base directory, one per line
/// @ai:effects fs:read, io
fn discover(
    config_path: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    run_pattern: Option<String>,
) -> Result<()> {
    let mut config = load_or_default_config(config_path)?;
    if let Some(base_dir) = base_dir {
        config.paths.base_dir = base_dir;
    }

    for run in discover_runs(&config.locator(), run_pattern.as_deref())? {
        println!("{}", run);
    }

    Ok(())
}

/// @ai:intent Re-plot stats from an exported CSV without re-parsing runs
/// @ai:effects fs:read, fs:write, io
fn plot_from_csv(
    config_path: Option<PathBuf>,
    csv: PathBuf,
    stats: Vec<String>,
    save_plots: bool,
    plots_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_or_default_config(config_path)?;
    if save_plots {
        config.plot.mode = PlotMode::Save;
    } else if config.plot.mode == PlotMode::Off {
        config.plot.mode = PlotMode::Display;
    }
    if let Some(plots_dir) = plots_dir {
        config.paths.plots_dir = plots_dir;
    }

    let table = load_csv(&csv)?;
    if table.is_empty() {
        println!("No data in {}; exiting.", csv.display());
        return Ok(());
    }

    let metrics = if stats.is_empty() {
        table.metrics().to_vec()
    } else {
        stats
    };

    let summary = ReportGenerator::new(&config).plot(&table, &metrics, &config)?;
    print_plot_summary(&summary);

    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = CollectConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<CollectConfig> {
    match path {
        Some(p) => CollectConfig::load(&p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);

            if default_path.exists() {
                CollectConfig::load(&default_path)
            } else {
                Ok(CollectConfig::default())
            }
        }
    }
}

/// @ai:intent Apply command-line flags on top of file configuration
/// @ai:effects pure
fn apply_overrides(config: &mut CollectConfig, args: &CollectArgs) {
    if let Some(base_dir) = &args.base_dir {
        config.paths.base_dir = base_dir.clone();
    }
    if let Some(output_csv) = &args.output_csv {
        config.paths.output_csv = output_csv.clone();
    }
    if let Some(output_json) = &args.output_json {
        config.paths.output_json = Some(output_json.clone());
    }
    if let Some(plots_dir) = &args.plots_dir {
        config.paths.plots_dir = plots_dir.clone();
    }

    if args.no_plots {
        config.plot.mode = PlotMode::Off;
    } else if args.save_plots {
        config.plot.mode = PlotMode::Save;
    }
}

/// @ai:intent Choose between a list file and literal names
/// @ai:effects pure
fn name_source(literal: Vec<String>, file: Option<PathBuf>) -> NameSource {
    match file {
        Some(path) => NameSource::File(path),
        None => NameSource::Literal(literal),
    }
}

/// @ai:intent Discover runs, optionally filtered by a name pattern
/// @ai:effects fs:read
fn discover_runs(locator: &ArtifactLocator, pattern: Option<&str>) -> Result<Vec<String>> {
    let discovery = match pattern {
        Some(pattern) => RunDiscovery::with_pattern(pattern)?,
        None => RunDiscovery::new(),
    };

    Ok(discovery.discover(locator))
}

/// @ai:intent Print which plots were written or skipped
/// @ai:effects io
fn print_plot_summary(summary: &PlotSummary) {
    for path in &summary.rendered {
        println!("Saved plot to '{}'", path.display());
    }

    for metric in &summary.skipped {
        println!("[note] stat '{}' has no data, no plot", metric);
    }
}
