//! Subfigure CLI - Layout checker for document builds
//!
//! Commands: expand, validate, compile
//! Outputs JSON to stdout
//! Returns 2 on layout failure, 1 on any other error

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use subfigure_core::logging::StderrLogger;
use subfigure_core::{expand, LayoutPipeline, LayoutRequest, LayoutRole, PipelineError};

#[derive(Parser)]
#[command(name = "subfigure-cli", version)]
#[command(about = "Subfigure CLI - expand and validate grid layouts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log detail on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a layout token without validating it
    Expand {
        /// Number of items in the figure
        #[arg(short, long)]
        items: usize,

        /// Column count or explicit rows (e.g. "AA|BC")
        #[arg(short, long, default_value = "1")]
        layout: String,
    },

    /// Expand and validate one layout token
    Validate {
        /// Number of items in the figure
        #[arg(short, long)]
        items: usize,

        /// Column count or explicit rows (e.g. "AA|BC")
        #[arg(short, long, default_value = "1")]
        layout: String,

        /// Role named in error messages
        #[arg(long, value_enum, default_value = "layout")]
        role: RoleArg,
    },

    /// Compile a full request (default and small-viewport layouts)
    Compile {
        /// JSON payload (LayoutRequest)
        #[arg(short, long, conflicts_with_all = ["payload_file", "items"])]
        payload: Option<String>,

        /// File containing a JSON LayoutRequest
        #[arg(long, conflicts_with = "items")]
        payload_file: Option<PathBuf>,

        /// Number of items in the figure
        #[arg(short, long)]
        items: Option<usize>,

        /// Default layout token
        #[arg(short, long)]
        layout: Option<String>,

        /// Small-viewport layout token
        #[arg(long)]
        layout_sm: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Layout,
    LayoutSm,
}

impl From<RoleArg> for LayoutRole {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Layout => LayoutRole::Layout,
            RoleArg::LayoutSm => LayoutRole::LayoutSm,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = StderrLogger::new(StderrLogger::level_for_verbosity(cli.verbose)).init() {
        eprintln!("failed to install logger: {}", e);
    }

    let pipeline = LayoutPipeline::new();

    match cli.command {
        Commands::Expand { items, layout } => match expand(&layout, items) {
            Ok(grid) => print_json(&grid, ExitCode::SUCCESS),
            Err(e) => print_json(
                &serde_json::json!({ "error": e.to_string() }),
                ExitCode::from(2),
            ),
        },

        Commands::Validate { items, layout, role } => {
            match pipeline.validate_layout(role.into(), &layout, items) {
                Ok(compiled) => {
                    let output = serde_json::json!({
                        "valid": true,
                        "role": compiled.role,
                        "grid": compiled.grid,
                        "placements": compiled.placements,
                    });
                    print_json(&output, ExitCode::SUCCESS)
                }
                Err(e) => report_failure(&e),
            }
        }

        Commands::Compile {
            payload,
            payload_file,
            items,
            layout,
            layout_sm,
        } => {
            let request = match (payload, payload_file, items) {
                (Some(payload), _, _) => LayoutRequest::from_json(&payload),
                (None, Some(path), _) => LayoutRequest::from_path(&path),
                (None, None, Some(items)) => Ok(LayoutRequest {
                    item_count: items,
                    layout,
                    layout_sm,
                }),
                (None, None, None) => {
                    eprintln!("compile needs --payload, --payload-file or --items");
                    return ExitCode::FAILURE;
                }
            };

            let request = match request {
                Ok(r) => r,
                Err(e) => return report_failure(&e),
            };

            match pipeline.compile(&request) {
                Ok(layouts) => print_json(&layouts, ExitCode::SUCCESS),
                Err(e) => report_failure(&e),
            }
        }
    }
}

fn report_failure(e: &PipelineError) -> ExitCode {
    let (role, code) = match e.layout_error() {
        Some((role, _)) => (Some(role), ExitCode::from(2)),
        None => (None, ExitCode::FAILURE),
    };
    let output = serde_json::json!({
        "valid": false,
        "role": role,
        "error": e.to_string(),
    });
    print_json(&output, code)
}

fn print_json<T: Serialize>(value: &T, code: ExitCode) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            code
        }
        Err(e) => {
            eprintln!("failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}
