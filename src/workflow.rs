//! Workflow state, derived from validation findings.
//!
//! Nothing here is stored: every query is answered
//! from the findings of the latest evaluation.
use strum::IntoEnumIterator;

use crate::{
    config::ConfigurationDocument,
    validation::{Finding, Severity},
};

/// Workflow steps are the configuration sections, in order
pub use crate::validation::Section as Step;

/// Derived status of one step
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StepStatus {
    pub step: Step,
    /// Most critical finding of this step, None when clean
    pub severity: Option<Severity>,
    /// False when an error blocks this step
    pub is_unblocked: bool,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let state = match self.severity {
            None => "ok".to_string(),
            Some(severity) => severity.to_string(),
        };
        let lock = if self.is_unblocked { "" } else { " (blocked)" };
        write!(f, "{:<10} {}{}", self.step.to_string(), state, lock)
    }
}

/// Receives the outcome of every evaluation.
/// This is the only path from the core to a user interface.
pub trait WorkflowObserver {
    fn notify(&mut self, findings: &[Finding], steps: &[StepStatus], progress: u8);
}

fn findings_of(step: Step, findings: &[Finding]) -> impl Iterator<Item = &Finding> + '_ {
    findings.iter().filter(move |f| f.section == step)
}

/// Status of one step
pub fn status(step: Step, findings: &[Finding]) -> StepStatus {
    let severity = findings_of(step, findings).map(|f| f.severity).max();
    StepStatus {
        step,
        severity,
        is_unblocked: severity != Some(Severity::Error),
    }
}

/// Status of every step, in order
pub fn steps(findings: &[Finding]) -> Vec<StepStatus> {
    Step::iter().map(|step| status(step, findings)).collect()
}

/// A step is complete when it has neither error nor missing information.
/// Some steps also require the document to be filled in.
pub fn is_step_complete(step: Step, doc: &ConfigurationDocument, findings: &[Finding]) -> bool {
    let clean = findings_of(step, findings)
        .all(|f| f.severity != Severity::Error && f.severity != Severity::Incomplete);
    let filled = match step {
        Step::Time => doc.time().start().is_some(),
        Step::Trajectory => doc.trajectory().is_complete(),
        Step::Signal => !doc.signals().is_empty(),
        _ => true,
    };
    clean && filled
}

/// Share of complete steps, in percent
pub fn progress_percentage(doc: &ConfigurationDocument, findings: &[Finding]) -> u8 {
    let total = Step::iter().count();
    let complete = Step::iter()
        .filter(|step| is_step_complete(*step, doc, findings))
        .count();
    (complete * 100 / total) as u8
}

/// True when every step preceding `step` is unblocked.
/// Warnings and infos never block.
pub fn can_proceed_to(step: Step, findings: &[Finding]) -> bool {
    Step::iter()
        .take_while(|s| *s < step)
        .all(|s| status(s, findings).is_unblocked)
}

/// First step that still requires attention
pub fn next_required_step(doc: &ConfigurationDocument, findings: &[Finding]) -> Option<Step> {
    Step::iter().find(|step| !is_step_complete(*step, doc, findings))
}

/// True when every step is complete
pub fn is_complete(doc: &ConfigurationDocument, findings: &[Finding]) -> bool {
    progress_percentage(doc, findings) == 100
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::validation::Rule;

    fn finding(rule: Rule) -> Finding {
        Finding {
            rule,
            section: rule.section(),
            severity: rule.severity(),
            message: String::new(),
            suggestion: None,
        }
    }

    #[test]
    fn step_status() {
        let findings = vec![finding(Rule::B1), finding(Rule::S1), finding(Rule::S2)];
        let basic = status(Step::Basic, &findings);
        assert_eq!(basic.severity, Some(Severity::Info));
        assert!(basic.is_unblocked);

        let signal = status(Step::Signal, &findings);
        assert_eq!(signal.severity, Some(Severity::Error));
        assert!(!signal.is_unblocked);

        let output = status(Step::Output, &findings);
        assert_eq!(output.severity, None);
        assert_eq!(output.to_string(), "Output     ok");

        assert!(can_proceed_to(Step::Signal, &findings));
        assert!(!can_proceed_to(Step::Power, &findings));
        assert!(can_proceed_to(Step::Basic, &[]));
        assert_eq!(steps(&findings).len(), 7);
    }

    #[test]
    fn progress() {
        let doc = ConfigurationDocument::default();
        // default document: no start time and no signal
        assert_eq!(progress_percentage(&doc, &[]), (5u32 * 100 / 7) as u8);
        assert_eq!(next_required_step(&doc, &[]), Some(Step::Time));

        let findings = vec![finding(Rule::E1), finding(Rule::P1)];
        assert_eq!(progress_percentage(&doc, &findings), (4u32 * 100 / 7) as u8);
        assert_eq!(next_required_step(&doc, &findings), Some(Step::Ephemeris));
        assert!(!is_complete(&doc, &findings));
        assert!(is_step_complete(Step::Power, &doc, &findings));
    }
}
