//! Rule set, one function per section.
//! Each function appends its findings in rule order.
use std::{collections::BTreeSet, path::Path};

use gnss::prelude::Constellation;
use itertools::Itertools;

use super::{Finding, Rule, SuggestedAction, ValidationSettings};
use crate::{
    config::{ConfigurationDocument, TrajectoryMode, DEFAULT_INITIAL_CN0, DEFAULT_NOISE_FLOOR},
    registry::{ConsolidatedWindow, EphemerisRegistry},
};

pub(crate) struct Context<'a> {
    doc: &'a ConfigurationDocument,
    registry: &'a EphemerisRegistry,
    settings: &'a ValidationSettings,
    window: ConsolidatedWindow,
    constellations: BTreeSet<Constellation>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        doc: &'a ConfigurationDocument,
        registry: &'a EphemerisRegistry,
        settings: &'a ValidationSettings,
    ) -> Self {
        Self {
            doc,
            registry,
            settings,
            window: registry.consolidated_window(),
            constellations: registry.supported_constellations(),
        }
    }
}

pub(crate) fn basic(ctx: &Context, findings: &mut Vec<Finding>) {
    if ctx.doc.basic().description().trim().is_empty() {
        findings.push(
            Finding::new(Rule::B1, "no project description provided".to_string())
                .with_suggestion(SuggestedAction::AddDescription),
        );
    }
}

pub(crate) fn ephemeris(ctx: &Context, findings: &mut Vec<Finding>) {
    if ctx.registry.is_empty() {
        findings.push(
            Finding::new(Rule::E1, "no ephemeris file loaded".to_string())
                .with_suggestion(SuggestedAction::LoadEphemeris),
        );
    }
    let rejected = ctx.registry.rejected();
    if !rejected.is_empty() {
        let names = rejected
            .iter()
            .map(|r| {
                r.path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| r.path.display().to_string())
            })
            .join(", ");
        findings.push(
            Finding::new(
                Rule::E2,
                format!("{} file(s) could not be used: {}", rejected.len(), names),
            )
            .with_suggestion(SuggestedAction::ReviewRejectedFiles),
        );
    }
}

/* Time rules need at least one loaded file */
pub(crate) fn time(ctx: &Context, findings: &mut Vec<Finding>) {
    let window = match ctx.window.window() {
        Some(window) => window,
        None => return,
    };
    let time = ctx.doc.time();
    let start = match time.start() {
        Some(start) => start,
        None => {
            findings.push(
                Finding::new(Rule::T0, "simulation start time not configured".to_string())
                    .with_suggestion(SuggestedAction::SetStartTime),
            );
            if ctx.window.is_partial() {
                findings.push(partial_window(&ctx.window));
            }
            return;
        },
    };

    if !window.contains(start) {
        let offset = if start < window.start {
            window.start - start
        } else {
            start - window.end
        };
        findings.push(
            Finding::new(
                Rule::T1,
                format!(
                    "simulation start is {:.1} hours outside of ephemeris validity ({})",
                    offset.to_seconds() / 3600.0,
                    window
                ),
            )
            .with_suggestion(SuggestedAction::MoveStartIntoWindow(window.middle())),
        );
    }

    if ctx.window.is_partial() {
        findings.push(partial_window(&ctx.window));
    }

    if let Some(end) = time.end() {
        if end > window.end {
            let remaining = (window.end - start).to_seconds().floor();
            let finding = Finding::new(
                Rule::T3,
                format!("simulation ends {} after ephemeris validity", end - window.end),
            );
            // nothing left to shorten when the start is past the window
            findings.push(if remaining > 0.0 {
                finding.with_suggestion(SuggestedAction::ShortenDuration(remaining))
            } else {
                finding
            });
        }
    }
}

fn partial_window(window: &ConsolidatedWindow) -> Finding {
    Finding::new(
        Rule::T2,
        format!(
            "loaded files do not share a common validity period, spanning {}",
            window
        ),
    )
}

pub(crate) fn trajectory(ctx: &Context, findings: &mut Vec<Finding>) {
    let trajectory = ctx.doc.trajectory();
    if trajectory.mode() == TrajectoryMode::Dynamic && trajectory.segments().is_empty() {
        findings.push(
            Finding::new(Rule::R1, "dynamic trajectory without any segment".to_string())
                .with_suggestion(SuggestedAction::AddTrajectorySegment),
        );
    }
    for (index, segment) in trajectory.segments().iter().enumerate() {
        let duration = segment.duration();
        if !duration.is_finite() || duration <= 0.0 {
            findings.push(
                Finding::new(
                    Rule::R2,
                    format!(
                        "trajectory segment #{} has invalid duration: {} s",
                        index + 1,
                        duration
                    ),
                )
                .with_suggestion(SuggestedAction::FixSegmentDuration(index)),
            );
        }
    }
}

pub(crate) fn signal(ctx: &Context, findings: &mut Vec<Finding>) {
    let signals = ctx.doc.signals();
    if signals.is_empty() {
        findings.push(
            Finding::new(Rule::S1, "no signal enabled for simulation".to_string())
                .with_suggestion(SuggestedAction::EnableDefaultSignal),
        );
    }
    if ctx.registry.is_empty() {
        return;
    }
    for c in signals.constellations() {
        if !ctx.constellations.contains(&c) {
            findings.push(
                Finding::new(
                    Rule::S2,
                    format!("{} signals selected but no {} ephemeris loaded", c, c),
                )
                .with_suggestion(SuggestedAction::DeselectConstellation(c)),
            );
        }
    }
}

pub(crate) fn power(ctx: &Context, findings: &mut Vec<Finding>) {
    let power = ctx.doc.power();
    let range = ctx.settings.cn0_range();
    let cn0 = power.initial_cn0();
    if !range.contains(&cn0) {
        let fallback = if range.contains(&DEFAULT_INITIAL_CN0) {
            DEFAULT_INITIAL_CN0
        } else {
            (range.start() + range.end()) / 2.0
        };
        findings.push(
            Finding::new(
                Rule::P1,
                format!(
                    "initial C/N0 of {} dB-Hz is outside of the plausible range [{}, {}] dB-Hz",
                    cn0,
                    range.start(),
                    range.end()
                ),
            )
            .with_suggestion(SuggestedAction::ResetInitialCn0(fallback)),
        );
    }
    let noise = power.noise_floor();
    if noise > ctx.settings.max_noise_floor {
        findings.push(
            Finding::new(
                Rule::P2,
                format!("noise floor is quite high: {} dBm/Hz", noise),
            )
            .with_suggestion(SuggestedAction::ResetNoiseFloor(DEFAULT_NOISE_FLOOR)),
        );
    }
}

pub(crate) fn output(ctx: &Context, findings: &mut Vec<Finding>) {
    let output = ctx.doc.output();
    let name = output.name().trim();
    if name.is_empty() {
        findings.push(
            Finding::new(Rule::O1, "output file name not configured".to_string())
                .with_suggestion(SuggestedAction::SetDefaultOutputName),
        );
    }
    let sample_frequency = output.sample_frequency();
    if !sample_frequency.is_finite() || sample_frequency <= 0.0 {
        findings.push(
            Finding::new(
                Rule::O2,
                format!("invalid sampling frequency: {} MHz", sample_frequency),
            )
            .with_suggestion(SuggestedAction::SetDefaultSampleFrequency),
        );
    }
    if !name.is_empty() && Path::new(name).extension().is_none() {
        findings.push(
            Finding::new(Rule::O3, "output file has no extension".to_string())
                .with_suggestion(SuggestedAction::AddOutputExtension),
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{MotionType, Segment};
    #[test]
    fn empty_document() {
        let doc = ConfigurationDocument::default();
        let registry = EphemerisRegistry::default();
        let settings = ValidationSettings::default();
        let ctx = Context::new(&doc, &registry, &settings);

        let mut findings = Vec::new();
        time(&ctx, &mut findings);
        assert!(findings.is_empty(), "time rules need ephemeris");

        signal(&ctx, &mut findings);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::S1);
    }
    #[test]
    fn segment_durations() {
        let mut doc = ConfigurationDocument::default();
        let trajectory = doc.trajectory_mut();
        trajectory.set_mode(TrajectoryMode::Dynamic);
        trajectory.push_segment(Segment::new(MotionType::Const, 10.0).unwrap());
        trajectory.push_segment(Segment::new(MotionType::Jerk, 10.0).unwrap());
        trajectory.segments[1].duration = -5.0;

        let registry = EphemerisRegistry::default();
        let settings = ValidationSettings::default();
        let ctx = Context::new(&doc, &registry, &settings);

        let mut findings = Vec::new();
        super::trajectory(&ctx, &mut findings);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::R2);
        assert_eq!(
            findings[0].suggestion,
            Some(SuggestedAction::FixSegmentDuration(1))
        );
    }
    #[test]
    fn output_names() {
        let mut doc = ConfigurationDocument::default();
        let registry = EphemerisRegistry::default();
        let settings = ValidationSettings::default();

        for (name, expected) in [
            ("output.bin", vec![]),
            ("  ", vec![Rule::O1]),
            ("capture", vec![Rule::O3]),
        ] {
            doc.output_mut().set_name(name);
            let ctx = Context::new(&doc, &registry, &settings);
            let mut findings = Vec::new();
            output(&ctx, &mut findings);
            let rules = findings.iter().map(|f| f.rule).collect::<Vec<_>>();
            assert_eq!(rules, expected, "\"{}\"", name);
        }
    }
    #[test]
    fn cn0_fallback() {
        let mut doc = ConfigurationDocument::default();
        doc.power_mut().set_initial_cn0(10.0).unwrap();
        let registry = EphemerisRegistry::default();
        let settings = ValidationSettings::default().with_cn0_range(50.0, 60.0);
        let ctx = Context::new(&doc, &registry, &settings);

        let mut findings = Vec::new();
        power(&ctx, &mut findings);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].suggestion,
            Some(SuggestedAction::ResetInitialCn0(55.0))
        );
    }
}
