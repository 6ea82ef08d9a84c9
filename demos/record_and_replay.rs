//! Example: record a run as NDJSON and replay it.
//!
//! Run with: cargo run --example record_and_replay -- first.last@example.org

use email_dfa::*;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "first.last@example.org".to_string());
    let trace_path = Path::new("target/record_and_replay.ndjson");

    let run = simulate(&input);
    match run.rejection() {
        None => println!("{input}: valid"),
        Some(rejection) => println!("{input}: invalid ({rejection:?})"),
    }
    println!("  {}", run.trace.labels().join(" -> "));

    println!("Recording trace to {}...", trace_path.display());
    let mut emitter = TraceEmitter::new(trace_path)?;
    emitter.emit_run(&input, &run)?;
    let steps = emitter.finish()?;

    println!("Replaying {steps} steps against a fresh run...");
    match replay_file(&input, trace_path) {
        Ok(()) => println!("✓ Recorded trace matches the automaton."),
        Err(e) => {
            println!("✗ Replay failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
