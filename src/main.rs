//! # codemap-site CLI (`cmsite`)
//!
//! The `cmsite` binary renders the code-mapping product's vector storage
//! manifest and drives the landing page's interaction model headlessly.
//!
//! ## Usage
//!
//! ```bash
//! cmsite --config ./config/cmsite.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cmsite synth` | Render the resource manifest (stdout or `--output`) |
//! | `cmsite validate` | Check names, dependencies, and creation order |
//! | `cmsite outputs` | Print the stack's exported outputs |
//! | `cmsite page bindings` | List the event-handler registration table |
//! | `cmsite page simulate` | Replay a JSON event trace and print effects |
//! | `cmsite page run` | Drive the carousel timer live until Ctrl-C |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use codemap_site::{bindings, config, dom, live, outputs, report, simulate, synth, validate};

/// codemap-site — infrastructure synthesis and landing-page interaction
/// tooling for the EHR code mapper.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/cmsite.example.toml` for a full example. Page commands
/// fall back to built-in defaults when the config file is absent.
#[derive(Parser)]
#[command(
    name = "cmsite",
    about = "codemap-site — vector storage manifest synthesis and landing-page interaction tooling",
    version,
    long_about = "codemap-site declares the code mapper's vector storage (a vector bucket and a \
    vector search index) as a typed resource graph rendered to a CloudFormation-style manifest, \
    and models the marketing page's interactions as a headless, replayable event engine."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/cmsite.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Render the resource manifest.
    ///
    /// Builds the stack's resource graph, renders it as a CloudFormation
    /// JSON template, and writes it to stdout or `--output`. An existing
    /// output file with a matching content digest is left untouched.
    Synth {
        /// Write the manifest to this path instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit non-zero if the output file is stale or missing, without
        /// writing anything. Requires `--output`.
        #[arg(long)]
        check: bool,
    },

    /// Validate the stack declaration.
    ///
    /// Checks resource naming rules and the dependency graph, then prints
    /// the resources in creation order.
    Validate,

    /// Print the stack's exported outputs.
    ///
    /// Shows the bucket name and index identifier as consuming stacks will
    /// import them.
    Outputs {
        /// Output format: `table` or `json`.
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Inspect and drive the landing-page interaction engine.
    Page {
        #[command(subcommand)]
        action: PageAction,
    },
}

/// Page engine subcommands.
#[derive(Subcommand)]
enum PageAction {
    /// List the event-handler registration table.
    ///
    /// Shows every (event, selector, behavior) binding and how many
    /// elements its selector matched. Bindings with no matches are
    /// recorded as skipped, mirroring the page's guard clauses.
    Bindings {
        /// Read the page description from this trace file instead of the
        /// built-in landing page model.
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Replay a JSON event trace through the page engine.
    ///
    /// Dispatches every event in order and prints the effects each one
    /// produced. The final state summary goes to stderr.
    Simulate {
        /// Path to the trace file (page description + events).
        #[arg(long)]
        trace: PathBuf,

        /// Output format: `human`, `json`, or `off`. Defaults to human on
        /// a TTY and json otherwise.
        #[arg(long)]
        format: Option<String>,
    },

    /// Drive the carousel timer against the built-in landing page model.
    ///
    /// Fires the load pass once, then advances the carousel at the
    /// configured interval until the tick count is reached or Ctrl-C.
    Run {
        /// Stop after this many ticks instead of running until Ctrl-C.
        #[arg(long)]
        ticks: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Synth { output, check } => {
            let cfg = config::load_config(&cli.config)?;
            synth::run_synth(&cfg, output.as_deref(), check)?;
        }
        Commands::Validate => {
            let cfg = config::load_config(&cli.config)?;
            validate::run_validate(&cfg)?;
        }
        Commands::Outputs { format } => {
            let cfg = config::load_config(&cli.config)?;
            outputs::run_outputs(&cfg, &format)?;
        }
        Commands::Page { action } => {
            // Page commands work without a config file; thresholds fall
            // back to the page's built-in defaults.
            let page_cfg = config::load_config(&cli.config)
                .map(|cfg| cfg.page)
                .unwrap_or_default();

            match action {
                PageAction::Bindings { trace } => {
                    let doc = match trace {
                        Some(path) => simulate::load_trace(&path)?.page,
                        None => dom::PageDoc::sample(),
                    };
                    bindings::run_bindings(doc, page_cfg)?;
                }
                PageAction::Simulate { trace, format } => {
                    let mode = report::ReportMode::resolve(format.as_deref())?;
                    simulate::run_simulate(&page_cfg, &trace, mode)?;
                }
                PageAction::Run { ticks } => {
                    live::run_live(&page_cfg, ticks).await?;
                }
            }
        }
    }

    Ok(())
}
