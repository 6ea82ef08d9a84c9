//! email-dfa binary.
//!
//! # Usage
//!
//! ```bash
//! # Validate addresses
//! email-dfa check ada@example.org not-an-address --trace
//!
//! # One DOT frame per step, rasterize with `dot -Tpng`
//! email-dfa frames ada@example.org --out-dir frames/
//!
//! # The whole automaton
//! email-dfa diagram | dot -Tpng -o automaton.png
//!
//! # Record a trace and check it later
//! email-dfa record ada@example.org --out ada.ndjson
//! email-dfa replay ada@example.org --trace ada.ndjson
//! ```

use clap::{Parser, Subcommand};
use email_dfa::{
    render_automaton, replay_file, simulate, write_frames, Error, Rejection, RenderConfig, Run,
    TraceEmitter,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Email address automaton
#[derive(Parser, Debug)]
#[command(name = "email-dfa")]
#[command(about = "Validate email addresses with a finite automaton and trace its states")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate addresses and print the verdict for each
    Check {
        /// Addresses to validate
        #[arg(required = true)]
        addresses: Vec<String>,

        /// Print the visited states
        #[arg(long)]
        trace: bool,

        /// Print one JSON object per address
        #[arg(long)]
        json: bool,
    },

    /// Write one DOT frame per trace step
    Frames {
        address: String,

        /// Directory for step_<n>.dot files
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Draw every state, not only visited ones
        #[arg(long)]
        all_states: bool,
    },

    /// Print the whole automaton as DOT
    Diagram {
        /// Include transitions into the error state
        #[arg(long)]
        error_edges: bool,
    },

    /// Record the trace of an address as NDJSON
    Record {
        address: String,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Check a recorded trace against a fresh run
    Replay {
        address: String,

        /// NDJSON trace file
        #[arg(short, long)]
        trace: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match execute(args.command) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command) -> Result<ExitCode, Error> {
    match command {
        Command::Check {
            addresses,
            trace,
            json,
        } => {
            let mut runs = Vec::with_capacity(addresses.len());
            for address in &addresses {
                let (address, run) = check_address(address);
                if json {
                    println!("{}", serde_json::to_string(&json_line(address, &run))?);
                } else {
                    print_verdict(address, &run, trace);
                }
                runs.push(run);
            }
            Ok(check_exit_code(&runs))
        }

        Command::Frames {
            address,
            out_dir,
            all_states,
        } => {
            let address = address.trim();
            let config = RenderConfig::builder()
                .all_states(all_states)
                .title(address)
                .build()?;
            let run = simulate(address);
            let paths = write_frames(&run.trace, &out_dir, &config)?;
            println!("Wrote {} frames to {}", paths.len(), out_dir.display());
            if let Some(last) = paths.last() {
                println!("Final frame: {}", last.display());
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Diagram { error_edges } => {
            let config = RenderConfig::builder().error_edges(error_edges).build()?;
            print!("{}", render_automaton(&config));
            Ok(ExitCode::SUCCESS)
        }

        Command::Record { address, out } => {
            let address = address.trim();
            let run = simulate(address);
            let mut emitter = TraceEmitter::new(&out)?;
            emitter.emit_run(address, &run)?;
            let count = emitter.finish()?;
            println!("Recorded {count} steps to {}", out.display());
            Ok(ExitCode::SUCCESS)
        }

        Command::Replay { address, trace } => {
            replay_file(address.trim(), &trace)?;
            println!("Trace {} matches", trace.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_verdict(address: &str, run: &Run, with_trace: bool) {
    match run.rejection() {
        None => println!("{address}: valid"),
        Some(rejection) => println!("{address}: invalid ({})", describe(rejection)),
    }
    if with_trace {
        println!("  {}", run.trace.labels().join(" -> "));
    }
}

/// Trim `address` and run the automaton over it.
fn check_address(address: &str) -> (&str, Run) {
    let address = address.trim();
    (address, simulate(address))
}

/// Failure when any run was rejected.
fn check_exit_code(runs: &[Run]) -> ExitCode {
    if runs.iter().all(Run::is_accepted) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn json_line(address: &str, run: &Run) -> serde_json::Value {
    serde_json::json!({
        "address": address,
        "accepted": run.is_accepted(),
        "verdict": run.verdict,
        "trace": run.trace,
    })
}

fn describe(rejection: Rejection) -> String {
    match rejection {
        Rejection::EmptyInput => "empty input".to_string(),
        Rejection::UnexpectedChar { index, ch } => {
            format!("unexpected {ch:?} at position {}", index + 1)
        }
        Rejection::UnexpectedEnd { state } => format!("input ends in state {state}"),
    }
}
