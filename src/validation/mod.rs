//! Validation engine.
//!
//! [evaluate] reconciles a [ConfigurationDocument] against the
//! [EphemerisRegistry] and returns the complete set of [Finding]s,
//! sorted by [Section]. The engine has no state: findings are always
//! recomputed from scratch and the document is never modified.
use strum::{Display, EnumIter};

#[cfg(feature = "log")]
use log::debug;

use crate::{config::ConfigurationDocument, registry::EphemerisRegistry};

mod action;
mod rules;
mod settings;

pub use action::SuggestedAction;
pub use settings::ValidationSettings;

/// Finding severity, from the least to the most critical
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Severity {
    /// Advisory
    #[strum(serialize = "info")]
    Info,
    /// Advisory, something looks suspicious
    #[strum(serialize = "warning")]
    Warning,
    /// Something is missing, the section cannot be considered complete
    #[strum(serialize = "incomplete")]
    Incomplete,
    /// Blocking
    #[strum(serialize = "error")]
    Error,
}

/// Configuration sections, in rendering order
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum Section {
    Basic,
    Ephemeris,
    Time,
    Trajectory,
    Signal,
    Power,
    Output,
}

/// Validation rules
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum Rule {
    /// No description
    B1,
    /// No ephemeris file loaded
    E1,
    /// Rejected ephemeris files
    E2,
    /// Start time not defined
    T0,
    /// Start time outside of the consolidated window
    T1,
    /// Consolidated window is partial
    T2,
    /// Simulation ends after the consolidated window
    T3,
    /// Dynamic trajectory without segment
    R1,
    /// Segment with non positive duration
    R2,
    /// No signal selected
    S1,
    /// Selected constellation without ephemeris
    S2,
    /// Implausible initial C/N0
    P1,
    /// Noise floor above ceiling
    P2,
    /// Empty output file name
    O1,
    /// Non positive sampling frequency
    O2,
    /// Output file name without extension
    O3,
}

impl Rule {
    /// [Section] this rule applies to
    pub fn section(&self) -> Section {
        match self {
            Self::B1 => Section::Basic,
            Self::E1 | Self::E2 => Section::Ephemeris,
            Self::T0 | Self::T1 | Self::T2 | Self::T3 => Section::Time,
            Self::R1 | Self::R2 => Section::Trajectory,
            Self::S1 | Self::S2 => Section::Signal,
            Self::P1 | Self::P2 => Section::Power,
            Self::O1 | Self::O2 | Self::O3 => Section::Output,
        }
    }
    /// [Severity] of the findings this rule emits
    pub fn severity(&self) -> Severity {
        match self {
            Self::B1 | Self::O3 => Severity::Info,
            Self::E2 | Self::T2 | Self::T3 | Self::S2 | Self::P1 | Self::P2 => Severity::Warning,
            Self::E1 | Self::T0 => Severity::Incomplete,
            Self::T1 | Self::R1 | Self::R2 | Self::S1 | Self::O1 | Self::O2 => Severity::Error,
        }
    }
}

/// Validation finding
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// Rule that emitted this finding
    pub rule: Rule,
    pub section: Section,
    pub severity: Severity,
    /// Human readable message
    pub message: String,
    /// Optional remediation
    pub suggestion: Option<SuggestedAction>,
}

impl Finding {
    pub(crate) fn new(rule: Rule, message: String) -> Self {
        Self {
            rule,
            section: rule.section(),
            severity: rule.severity(),
            message,
            suggestion: None,
        }
    }
    pub(crate) fn with_suggestion(mut self, action: SuggestedAction) -> Self {
        self.suggestion = Some(action);
        self
    }
    /// True if this finding blocks progression
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
    /// True if this finding comes with an automatic remediation
    pub fn is_fixable(&self) -> bool {
        self.suggestion.map(|a| a.is_automatic()).unwrap_or(false)
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.rule, self.section, self.severity, self.message
        )?;
        if let Some(action) = &self.suggestion {
            write!(f, " - {}", action)?;
        }
        Ok(())
    }
}

/// Aggregated view of a finding set
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub errors: usize,
    pub incompletes: usize,
    pub warnings: usize,
    pub infos: usize,
    /// Findings with an automatic remediation
    pub fixable: usize,
}

impl Summary {
    pub fn new(findings: &[Finding]) -> Self {
        let mut s = Self::default();
        for finding in findings {
            match finding.severity {
                Severity::Error => s.errors += 1,
                Severity::Incomplete => s.incompletes += 1,
                Severity::Warning => s.warnings += 1,
                Severity::Info => s.infos += 1,
            }
            if finding.is_fixable() {
                s.fixable += 1;
            }
        }
        s
    }
    /// True when nothing blocks the configuration
    pub fn is_ready(&self) -> bool {
        self.errors == 0
    }
    /// Total number of findings
    pub fn total(&self) -> usize {
        self.errors + self.incompletes + self.warnings + self.infos
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} error(s), {} incomplete, {} warning(s), {} info ({} fixable)",
            self.errors, self.incompletes, self.warnings, self.infos, self.fixable
        )
    }
}

/// Evaluates every rule and returns the findings sorted by [Section],
/// rules keeping their table order within a section.
/// Identical inputs always produce identical outputs.
pub fn evaluate(
    doc: &ConfigurationDocument,
    registry: &EphemerisRegistry,
    settings: &ValidationSettings,
) -> Vec<Finding> {
    let ctx = rules::Context::new(doc, registry, settings);
    let mut findings = Vec::new();

    rules::basic(&ctx, &mut findings);
    rules::ephemeris(&ctx, &mut findings);
    rules::time(&ctx, &mut findings);
    rules::trajectory(&ctx, &mut findings);
    rules::signal(&ctx, &mut findings);
    rules::power(&ctx, &mut findings);
    rules::output(&ctx, &mut findings);

    // stable: rule order is preserved within a section
    findings.sort_by_key(|f| f.section);

    #[cfg(feature = "log")]
    debug!("evaluation: {}", Summary::new(&findings));

    findings
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;
    #[test]
    fn severity_order() {
        assert!(Severity::Error > Severity::Incomplete);
        assert!(Severity::Incomplete > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(Severity::Incomplete.to_string(), "incomplete");
    }
    #[test]
    fn rules_follow_section_order() {
        let sections = Rule::iter().map(|r| r.section()).collect::<Vec<_>>();
        let mut sorted = sections.clone();
        sorted.sort();
        assert_eq!(sections, sorted);
        assert_eq!(Section::iter().count(), 7);
    }
    #[test]
    fn summary() {
        let findings = vec![
            Finding::new(Rule::S1, "no signal".to_string())
                .with_suggestion(SuggestedAction::EnableDefaultSignal),
            Finding::new(Rule::E1, "no ephemeris".to_string())
                .with_suggestion(SuggestedAction::LoadEphemeris),
            Finding::new(Rule::B1, "no description".to_string()),
        ];
        let summary = Summary::new(&findings);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.incompletes, 1);
        assert_eq!(summary.infos, 1);
        assert_eq!(summary.fixable, 1);
        assert_eq!(summary.total(), 3);
        assert!(!summary.is_ready());
        assert_eq!(
            findings[0].to_string(),
            "[S1] Signal (error): no signal - enable L1CA"
        );
    }
}
