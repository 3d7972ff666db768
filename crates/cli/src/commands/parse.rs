use std::path::Path;
use std::process;

use ottomap_core::{
    parse_report, Movement, Report, ReportFileName, Step, StepOutcome, Unit, UnitKind,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::read_input;
use crate::config::Config;
use crate::OutputFormat;

/// Where the report came from, so output can be traced back to its input.
#[derive(Serialize)]
struct InputInfo {
    path: String,
    sha256: String,
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    input: InputInfo,
    report: &'a Report,
}

pub(crate) fn cmd_parse(file: &Path, config: &Config, output: OutputFormat, quiet: bool) {
    let input = read_input(file, output, quiet);
    let sha256 = sha256_hex(&input);

    let report = match parse_report(&input, &config.parse) {
        Ok(r) => r,
        Err(e) => {
            match output {
                OutputFormat::Json => {
                    let err_json = serde_json::to_string_pretty(&e.to_json_value())
                        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", e));
                    eprintln!("{}", err_json);
                }
                OutputFormat::Text => {
                    if !quiet {
                        eprintln!("{}: {}", file.display(), e);
                    }
                }
            }
            process::exit(1);
        }
    };

    check_file_name(file, &report);

    let info = InputInfo {
        path: file.display().to_string(),
        sha256,
    };
    match output {
        OutputFormat::Json => {
            let out = ParseOutput {
                input: info,
                report: &report,
            };
            let json = serde_json::to_string_pretty(&out)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => print_summary(&info, &report),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Warn when a `YYYY-MM.CCCC.report.txt` name disagrees with the turn line.
fn check_file_name(file: &Path, report: &Report) {
    match ReportFileName::from_path(file) {
        Ok(name) if name.turn != report.turn => {
            warn!(
                file = %file.display(),
                file_turn = %name.turn,
                report_turn = %report.turn,
                "file name turn differs from report turn"
            );
        }
        Ok(_) => {}
        Err(e) => debug!("{}", e),
    }
}

// ──────────────────────────────────────────────
// Text summary
// ──────────────────────────────────────────────

fn print_summary(info: &InputInfo, report: &Report) {
    println!("Turn Report");
    println!("===========");
    println!();
    println!("  File:    {}", info.path);
    println!("  SHA-256: {}", info.sha256);
    println!("  Turn:    {} (#{})", report.turn, report.turn.id());
    println!("  Units:   {}", report.units.len());
    if let Some(error) = &report.error {
        println!("  Warning: {}", error);
    }
    for unit in &report.units {
        println!();
        print_unit(unit);
    }
}

fn print_unit(unit: &Unit) {
    match &unit.name {
        Some(name) => println!("{} {} ({})", kind_label(unit.kind), unit.id, name),
        None => println!("{} {}", kind_label(unit.kind), unit.id),
    }
    println!("  Hex: {} (previous {})", unit.current_hex, unit.previous_hex);

    if let Some(moves) = &unit.moves {
        match &moves.movement {
            Some(Movement::Follows(id)) => println!("  Follows {}", id),
            Some(Movement::GoesTo(hex)) => println!("  Goes to {}", hex),
            Some(Movement::Marches(steps)) => {
                println!("  March:");
                print_steps(steps);
            }
            None => {}
        }
        for patrol in &moves.patrols {
            println!("  Scout {}:", patrol.scout);
            print_steps(&patrol.steps);
        }
    }

    if let Some(status) = &unit.status {
        match &status.hex_name {
            Some(name) => println!(
                "  Status: {} {}, {}",
                status.coordinates, status.terrain, name
            ),
            None => println!("  Status: {} {}", status.coordinates, status.terrain),
        }
    }

    for error in unit.all_errors() {
        println!("  ! {}", error);
    }
}

fn print_steps(steps: &[Step]) {
    for step in steps {
        let direction = step
            .direction
            .map(|d| format!(" {}", d))
            .unwrap_or_default();
        let terrain = step
            .terrain
            .map(|t| format!(" {}", t))
            .unwrap_or_default();
        println!(
            "    {}{} {} -> {}{}",
            outcome_label(step.outcome),
            direction,
            step.from,
            step.to,
            terrain
        );
        for excess in &step.excess_input {
            println!("      ? {}", excess);
        }
    }
}

fn kind_label(kind: UnitKind) -> &'static str {
    match kind {
        UnitKind::Tribe => "Tribe",
        UnitKind::Courier => "Courier",
        UnitKind::Element => "Element",
        UnitKind::Fleet => "Fleet",
        UnitKind::Garrison => "Garrison",
    }
}

fn outcome_label(outcome: StepOutcome) -> &'static str {
    match outcome {
        StepOutcome::Moved => "moved",
        StepOutcome::Blocked => "blocked",
        StepOutcome::Stayed => "stayed",
    }
}
