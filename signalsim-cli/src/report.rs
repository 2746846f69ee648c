//! Terminal report
use itertools::Itertools;

use signalsim_config::prelude::{Finding, Session, Severity, StepStatus, WorkflowObserver};

/// Traces every evaluation of the session
pub struct Tracker;

impl WorkflowObserver for Tracker {
    fn notify(&mut self, findings: &[Finding], steps: &[StepStatus], progress: u8) {
        let blocked = steps.iter().filter(|s| !s.is_unblocked).map(|s| s.step).join(", ");
        debug!(
            "evaluation: {} finding(s), progress {}%, blocked: [{}]",
            findings.len(),
            progress,
            blocked
        );
    }
}

/// Prints the current state of the session.
/// In quiet mode, only blocking findings are reported.
pub fn print(session: &Session, quiet: bool) {
    let findings = session
        .findings()
        .iter()
        .filter(|f| !quiet || f.severity == Severity::Error)
        .collect::<Vec<_>>();

    if quiet {
        for finding in findings {
            println!("{}", finding);
        }
        return;
    }

    let registry = session.registry();
    println!("Ephemeris");
    for file in registry.files() {
        println!(
            "  {} (v{}, {} record(s)): {}",
            file.path().display(),
            file.version(),
            file.records(),
            file.window()
        );
    }
    for rejected in registry.rejected() {
        println!("  {} ({}): rejected", rejected.path.display(), rejected.kind);
    }
    println!("  validity: {}", registry.consolidated_window());
    println!(
        "  constellations: {}",
        registry.supported_constellations().iter().join(", ")
    );

    println!("Steps");
    for status in session.steps() {
        println!("  {}", status);
    }

    if !findings.is_empty() {
        println!("Findings");
        for finding in findings {
            println!("  {}", finding);
        }
    }

    match session.next_required_step() {
        Some(step) => println!("Progress: {}% (next: {})", session.progress(), step),
        None => println!("Progress: {}%", session.progress()),
    }
    println!("{}", session.summary());
}
