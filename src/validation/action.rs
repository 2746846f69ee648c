use gnss::prelude::Constellation;
use hifitime::Epoch;

use crate::{
    config::{ConfigurationDocument, MotionType, Segment, Signal},
    error::InvalidValueError,
};

/// Remediation attached to a [super::Finding]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SuggestedAction {
    /// Load at least one navigation file
    LoadEphemeris,
    /// Fix or remove the rejected navigation files
    ReviewRejectedFiles,
    /// Describe the scenario
    AddDescription,
    /// Define the simulation start
    SetStartTime,
    /// Start the simulation at given instant
    MoveStartIntoWindow(Epoch),
    /// Shorten the simulation to given duration (s)
    ShortenDuration(f64),
    /// Append a constant velocity segment spanning the simulation
    AddTrajectorySegment,
    /// Redefine the duration of given segment
    FixSegmentDuration(usize),
    /// Select GPS L1 C/A
    EnableDefaultSignal,
    /// Deselect all signals of a constellation
    DeselectConstellation(Constellation),
    /// Redefine the initial C/N0 (dB-Hz)
    ResetInitialCn0(f64),
    /// Redefine the noise floor (dBm/Hz)
    ResetNoiseFloor(f64),
    /// Use the default output name of the current format
    SetDefaultOutputName,
    /// Restore the default sampling frequency
    SetDefaultSampleFrequency,
    /// Append the extension of the current format
    AddOutputExtension,
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::LoadEphemeris => f.write_str("load RINEX navigation files"),
            Self::ReviewRejectedFiles => f.write_str("fix or remove the rejected files"),
            Self::AddDescription => f.write_str("add a description to identify this configuration"),
            Self::SetStartTime => f.write_str("define the simulation start time"),
            Self::MoveStartIntoWindow(t) => write!(f, "start the simulation at {}", t),
            Self::ShortenDuration(s) => write!(f, "shorten the simulation to {} s", s),
            Self::AddTrajectorySegment => f.write_str("add a trajectory segment"),
            Self::FixSegmentDuration(i) => {
                write!(f, "set a positive duration to segment #{}", i + 1)
            },
            Self::EnableDefaultSignal => write!(f, "enable {}", Signal::L1CA),
            Self::DeselectConstellation(c) => write!(f, "deselect {} signals", c),
            Self::ResetInitialCn0(v) => write!(f, "set the initial C/N0 to {} dB-Hz", v),
            Self::ResetNoiseFloor(v) => write!(f, "set the noise floor to {} dBm/Hz", v),
            Self::SetDefaultOutputName => f.write_str("use the default output file name"),
            Self::SetDefaultSampleFrequency => f.write_str("restore the default sampling frequency"),
            Self::AddOutputExtension => f.write_str("add a file extension to the output file"),
        }
    }
}

impl SuggestedAction {
    /// True if this action can be applied without user input
    pub fn is_applicable(&self) -> bool {
        !matches!(
            self,
            Self::LoadEphemeris
                | Self::ReviewRejectedFiles
                | Self::AddDescription
                | Self::SetStartTime
                | Self::FixSegmentDuration(_)
        )
    }

    /// True if this action may be applied by an automatic fix.
    /// Deselecting a constellation discards user choices, so it is never automatic.
    pub fn is_automatic(&self) -> bool {
        self.is_applicable() && !matches!(self, Self::DeselectConstellation(_))
    }

    /// Applies this action through the document setters.
    /// Returns false when the action requires user input
    /// and the document was left untouched.
    pub fn apply(&self, doc: &mut ConfigurationDocument) -> Result<bool, InvalidValueError> {
        match *self {
            Self::LoadEphemeris
            | Self::ReviewRejectedFiles
            | Self::AddDescription
            | Self::SetStartTime
            | Self::FixSegmentDuration(_) => return Ok(false),
            Self::MoveStartIntoWindow(t) => doc.time_mut().set_start(t),
            Self::ShortenDuration(seconds) => doc.time_mut().set_duration(seconds)?,
            Self::AddTrajectorySegment => {
                let segment = Segment::new(MotionType::Const, doc.time().duration_seconds())?;
                doc.trajectory_mut().push_segment(segment);
            },
            Self::EnableDefaultSignal => doc.signals_mut().select(Signal::L1CA),
            Self::DeselectConstellation(c) => doc.signals_mut().deselect_constellation(c),
            Self::ResetInitialCn0(cn0) => doc.power_mut().set_initial_cn0(cn0)?,
            Self::ResetNoiseFloor(noise) => doc.power_mut().set_noise_floor(noise)?,
            Self::SetDefaultOutputName => {
                let name = doc.output().default_name();
                doc.output_mut().set_name(&name);
            },
            Self::SetDefaultSampleFrequency => doc
                .output_mut()
                .set_sample_frequency(crate::config::DEFAULT_SAMPLE_FREQUENCY)?,
            Self::AddOutputExtension => {
                let output = doc.output();
                let name = format!("{}.{}", output.name(), output.format().extension());
                doc.output_mut().set_name(&name);
            },
        }
        Ok(true)
    }
}
