//! CLI entrypoint for the tinylibc conformance harness.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use tinylibc_harness::capture::capture_family;
use tinylibc_harness::{ConformanceReport, FixtureSet, TestRunner, VerificationSummary};

/// Conformance tooling for tinylibc.
#[derive(Debug, Parser)]
#[command(name = "tinylibc-harness")]
#[command(about = "Conformance testing harness for tinylibc")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Capture host C library behavior as fixture files.
    Capture {
        /// Output directory for fixture JSON files.
        #[arg(long)]
        output: PathBuf,
        /// Function family to capture ("string", "sort" or "all").
        #[arg(long, default_value = "all")]
        family: String,
    },
    /// Verify tinylibc against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown). JSON and JSONL land next to it.
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn timestamp() -> String {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => format!("unix:{}", elapsed.as_secs()),
        Err(_) => String::from("unix:0"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Capture { output, family } => {
            eprintln!("Capturing {family} fixtures to {}", output.display());
            let sets = capture_family(&family)?;
            std::fs::create_dir_all(&output)?;
            for set in sets {
                let path = output.join(format!("{}_fixtures.json", set.family));
                std::fs::write(&path, set.to_json()?)?;
                eprintln!("Wrote {} cases to {}", set.cases.len(), path.display());
            }
        }
        Command::Verify { fixture, report } => {
            eprintln!("Verifying against fixtures in {}", fixture.display());
            let (fixture_sets, skipped) = FixtureSet::load_dir(&fixture)?;
            for (path, err) in &skipped {
                eprintln!("Skipping {}: {err}", path.display());
            }
            if fixture_sets.is_empty() {
                return Err(format!("No fixture JSON files found in {}", fixture.display()).into());
            }

            let runner = TestRunner::new("fixture-verify");
            let mut results = Vec::new();
            for set in &fixture_sets {
                eprintln!("Running {} ({} cases, {})", set.family, set.cases.len(), set.source);
                results.extend(runner.run(set));
            }

            let report_doc = ConformanceReport {
                title: String::from("tinylibc Conformance Report"),
                timestamp: timestamp(),
                summary: VerificationSummary::from_results(results),
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );
            for failure in report_doc.summary.failures() {
                eprintln!("FAIL {}", failure.trace_id);
            }

            if let Some(report_path) = report {
                eprintln!("Writing report to {}", report_path.display());
                std::fs::write(&report_path, report_doc.to_markdown())?;
                std::fs::write(report_path.with_extension("json"), report_doc.to_json())?;
                std::fs::write(report_path.with_extension("jsonl"), report_doc.to_jsonl())?;
            }

            if !report_doc.summary.all_passed() {
                return Err("Conformance verification failed".into());
            }
        }
    }

    Ok(())
}
