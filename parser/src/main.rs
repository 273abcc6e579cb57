//! @ai:module:intent CLI entry point for the statistics parser
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on parser, names, output

use clap::{Parser, Subcommand, ValueEnum};
use simstats_parser::{output, parser, MetricFilter, NameSource, OutputFormat};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "simstats")]
#[command(author, version, about = "Extract counters from simulator statistics dumps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract selected statistics from one stats file
    Extract {
        /// Path to the statistics file
        path: PathBuf,

        /// Statistic names to extract (exactly as in the stats file)
        #[arg(long, num_args = 1.., required_unless_present = "stats_file", conflicts_with = "stats_file")]
        stats: Vec<String>,

        /// Text file with one statistic name per line
        #[arg(long, value_name = "FILE")]
        stats_file: Option<PathBuf>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Print every statistic in the first section of a stats file
    Dump {
        /// Path to the statistics file
        path: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            path,
            stats,
            stats_file,
            format,
        } => {
            let source = match stats_file {
                Some(file) => NameSource::File(file),
                None => NameSource::Literal(stats),
            };

            let names = match source.resolve() {
                Ok(names) => names,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(2);
                }
            };

            print_record(path, &MetricFilter::only(names), format)
        }

        Commands::Dump { path, format } => print_record(path, &MetricFilter::All, format),
    }
}

/// @ai:intent Parse one file and print the resulting record
/// @ai:effects fs:read, io
fn print_record(path: PathBuf, filter: &MetricFilter, format: Format) -> ExitCode {
    match parser::parse_stats_file(&path, filter) {
        Ok(record) => match output::format_record(&path, &record, format.into()) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
