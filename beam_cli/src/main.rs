//! # Camber CLI Application
//!
//! Terminal front end for the beam analysis engine. Loads a `.cmb`
//! project when a path is given (with a read-only lock check), otherwise
//! runs the built-in demo beam with a few quick stdin overrides. Prints
//! the analysis report, the reaction and key-point tables, the peak
//! moment, and finally the full result bundle as pretty JSON.

use std::io::{self, BufRead, Write};
use std::path::Path;

use beam_core::analysis::AnalysisResults;
use beam_core::file_io::load_project_with_lock_check;
use beam_core::model::{BeamConfig, Load, Support, SupportKind};
use beam_core::project::{BeamProject, ModelProposal};
use beam_core::units::UnitSystem;

const BANNER: &str = "═══════════════════════════════════════════════════";

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("Camber CLI - Beam Analysis");
    println!("==========================");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let mut project = match args.get(1) {
        Some(path_arg) => load_from_file(Path::new(path_arg)),
        None => demo_project(),
    };

    let units = project.units;

    match project.run_analysis() {
        Ok(results) => print_results(results, units),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    }
}

/// Load a saved project, reporting who holds the lock if anyone does.
/// The CLI never writes the file back, so a foreign lock only downgrades
/// the run to an advisory note.
fn load_from_file(path: &Path) -> BeamProject {
    match load_project_with_lock_check(path) {
        Ok((project, lock)) => {
            println!("Loaded {}", path.display());
            let meta = &project.metadata;
            if !meta.job_id.is_empty() {
                println!(
                    "Job {} | Engineer: {} | Client: {}",
                    meta.job_id, meta.engineer, meta.client
                );
            }
            if let Some(info) = lock {
                println!(
                    "Note: locked by {} on {} since {} (running read-only)",
                    info.user_id, info.machine, info.locked_at
                );
            }
            println!();
            project
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    }
}

/// Build the demo project, letting the user nudge the headline numbers.
/// Empty or invalid input keeps the bracketed default.
fn demo_project() -> BeamProject {
    let mut project = BeamProject::default();
    let units = project.units;

    println!("No project file given. Running the demo beam (press Enter to keep defaults).");
    println!();

    let length = prompt_f64(&format!("Beam length ({}) [10.0]: ", units.length), 10.0);
    let point = prompt_f64(
        &format!("Midspan point load ({}, negative = down) [-20.0]: ", units.force),
        -20.0,
    );
    let udl = prompt_f64(
        &format!(
            "UDL over the first 40% of the span ({}) [-2.0]: ",
            units.distributed_label()
        ),
        -2.0,
    );
    println!();

    // Same shape as the built-in demo, rebuilt around the chosen span.
    // The proposal carries no section, so the demo E/I is kept.
    project.apply_proposal(ModelProposal {
        beam: Some(BeamConfig::new(length)),
        supports: Some(vec![
            Support::new(0.0, SupportKind::Pinned).with_label("S1"),
            Support::new(length, SupportKind::Roller).with_label("S2"),
        ]),
        loads: Some(vec![
            Load::point(point, length / 2.0).with_label("L1"),
            Load::udl(udl, 0.0, 0.4 * length).with_label("L2"),
        ]),
        use_fem: None,
    });

    project
}

fn print_results(results: &AnalysisResults, units: UnitSystem) {
    let moment = units.moment_label();

    println!("{}", BANNER);
    println!("  BEAM ANALYSIS RESULTS");
    println!("{}", BANNER);
    println!();
    println!("{}", results.report_text());
    println!();

    println!("REACTIONS:");
    println!(
        "  {:<10} {:>10} {:>12} {:>12}",
        "Support",
        format!("x [{}]", units.length),
        format!("Ry [{}]", units.force),
        format!("M [{}]", moment),
    );
    for r in &results.reactions {
        println!(
            "  {:<10} {:>10.2} {:>12.3} {:>12.3}",
            r.display_ref(),
            r.x,
            r.ry,
            r.m
        );
    }
    println!();

    println!("KEY POINTS:");
    println!(
        "  {:>8} {:>10} {:>10} {:>10} {:>10}  {}",
        format!("x [{}]", units.length),
        "V left",
        "V right",
        "M left",
        "M right",
        "At"
    );
    for kp in &results.key_points {
        println!(
            "  {:>8.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3}  {}",
            kp.x, kp.shear_left, kp.shear_right, kp.moment_left, kp.moment_right, kp.description
        );
    }
    println!();

    if let Some(peak) = &results.peak_moment {
        println!(
            "Peak |M| = {:.3} {} at x = {:.3} {}",
            peak.value, moment, peak.x, units.length
        );
        println!();
    }

    let balanced = results
        .checks
        .as_ref()
        .map(|c| c.is_balanced())
        .unwrap_or(false);
    println!("{}", BANNER);
    println!(
        "  EQUILIBRIUM: {} {}",
        if balanced {
            "BALANCED"
        } else {
            "RESIDUALS EXCEED TOLERANCE"
        },
        status_icon(balanced)
    );
    println!("{}", BANNER);

    println!();
    println!("JSON Output (for LLM/API use):");
    if let Ok(json) = serde_json::to_string_pretty(results) {
        println!("{}", json);
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[WARN]"
    }
}
