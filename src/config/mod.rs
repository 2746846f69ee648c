//! Simulation configuration document.
//!
//! The document is a tree of sections. Each section is mutated through its own
//! setters, which only enforce structural constraints: a partially filled
//! document is always legal. Cross section consistency is the business of
//! [crate::validation].
use std::path::Path;

use gnss::prelude::Constellation;
use strum::{Display, EnumString};

use crate::error::{Error, InvalidValueError, SchemaError};

mod masking;
mod output;
mod power;
mod schema;
mod signal;
mod template;
mod time;
mod trajectory;

pub use masking::{Masking, DEFAULT_ELEVATION_MASK};
pub use output::{
    OutputFormat, OutputKind, OutputSettings, DEFAULT_CENTER_FREQUENCY, DEFAULT_SAMPLE_FREQUENCY,
};
pub use power::{Power, DEFAULT_INITIAL_CN0, DEFAULT_NOISE_FLOOR};
pub use signal::{Signal, SignalSelection};
pub use template::Template;
pub use time::{TimeConfig, TimeType};
pub use trajectory::{MotionType, Position, Segment, Trajectory, TrajectoryMode, Velocity};

/// Constellations the signal generator can simulate
pub const SIMULATED_CONSTELLATIONS: [Constellation; 6] = [
    Constellation::GPS,
    Constellation::BeiDou,
    Constellation::Galileo,
    Constellation::Glonass,
    Constellation::QZSS,
    Constellation::IRNSS,
];

/// System name, as used by the generator document
pub(crate) fn system_name(c: Constellation) -> Option<&'static str> {
    match c {
        Constellation::GPS => Some("GPS"),
        Constellation::BeiDou => Some("BDS"),
        Constellation::Galileo => Some("Galileo"),
        Constellation::Glonass => Some("GLONASS"),
        Constellation::QZSS => Some("QZSS"),
        Constellation::IRNSS => Some("IRNSS"),
        _ => None,
    }
}

/// Parses a generator document system name
pub(crate) fn system_from_name(name: &str) -> Option<Constellation> {
    SIMULATED_CONSTELLATIONS
        .iter()
        .copied()
        .find(|c| system_name(*c) == Some(name))
}

pub(crate) fn check_finite(field: &str, value: f64) -> Result<(), InvalidValueError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidValueError::new(field, "must be a finite number"))
    }
}

pub(crate) fn check_positive(field: &str, value: f64) -> Result<(), InvalidValueError> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(InvalidValueError::new(field, "must be strictly positive"))
    }
}

pub(crate) fn check_simulated(field: &str, c: Constellation) -> Result<(), InvalidValueError> {
    if SIMULATED_CONSTELLATIONS.contains(&c) {
        Ok(())
    } else {
        Err(InvalidValueError::new(field, "constellation is not simulated"))
    }
}

/// General information
#[derive(Debug, Clone, PartialEq)]
pub struct BasicInfo {
    pub(crate) version: f64,
    pub(crate) description: String,
    pub(crate) comment: String,
}

impl Default for BasicInfo {
    fn default() -> Self {
        Self {
            version: 1.0,
            description: String::new(),
            comment: String::new(),
        }
    }
}

impl BasicInfo {
    pub fn version(&self) -> f64 {
        self.version
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn comment(&self) -> &str {
        &self.comment
    }
    pub fn set_version(&mut self, version: f64) -> Result<(), InvalidValueError> {
        check_positive("basic.version", version)?;
        self.version = version;
        Ok(())
    }
    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }
    pub fn set_comment(&mut self, comment: &str) {
        self.comment = comment.to_string();
    }
}

/// Ephemeris source format
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Display, EnumString)]
pub enum EphemerisKind {
    #[default]
    RINEX,
    YUMA,
    XML,
}

/// Ephemeris source referenced by the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemerisSource {
    pub kind: EphemerisKind,
    /// File name or path
    pub name: String,
}

impl EphemerisSource {
    /// Builds a RINEX [EphemerisSource] from a file path
    pub fn rinex<P: AsRef<Path>>(path: P) -> Self {
        Self {
            kind: EphemerisKind::RINEX,
            name: path.as_ref().display().to_string(),
        }
    }
}

/// Ordered list of [EphemerisSource]s, names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EphemerisSources(pub(crate) Vec<EphemerisSource>);

impl EphemerisSources {
    /// Adds a source, replacing any source with identical name
    pub fn add(&mut self, source: EphemerisSource) {
        match self.0.iter_mut().find(|s| s.name == source.name) {
            Some(prev) => *prev = source,
            None => self.0.push(source),
        }
    }
    /// Removes the source with given name, returns true if it existed
    pub fn remove(&mut self, name: &str) -> bool {
        let len = self.0.len();
        self.0.retain(|s| s.name != name);
        len != self.0.len()
    }
    pub fn clear(&mut self) {
        self.0.clear();
    }
    pub fn iter(&self) -> impl Iterator<Item = &EphemerisSource> + '_ {
        self.0.iter()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationDocument {
    pub(crate) basic: BasicInfo,
    pub(crate) ephemeris: EphemerisSources,
    pub(crate) time: TimeConfig,
    pub(crate) trajectory: Trajectory,
    pub(crate) signals: SignalSelection,
    pub(crate) power: Power,
    pub(crate) masking: Masking,
    pub(crate) output: OutputSettings,
}

impl ConfigurationDocument {
    pub fn basic(&self) -> &BasicInfo {
        &self.basic
    }
    pub fn basic_mut(&mut self) -> &mut BasicInfo {
        &mut self.basic
    }
    pub fn ephemeris(&self) -> &EphemerisSources {
        &self.ephemeris
    }
    pub fn ephemeris_mut(&mut self) -> &mut EphemerisSources {
        &mut self.ephemeris
    }
    pub fn time(&self) -> &TimeConfig {
        &self.time
    }
    pub fn time_mut(&mut self) -> &mut TimeConfig {
        &mut self.time
    }
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }
    pub fn trajectory_mut(&mut self) -> &mut Trajectory {
        &mut self.trajectory
    }
    pub fn signals(&self) -> &SignalSelection {
        &self.signals
    }
    pub fn signals_mut(&mut self) -> &mut SignalSelection {
        &mut self.signals
    }
    pub fn power(&self) -> &Power {
        &self.power
    }
    pub fn power_mut(&mut self) -> &mut Power {
        &mut self.power
    }
    pub fn masking(&self) -> &Masking {
        &self.masking
    }
    pub fn masking_mut(&mut self) -> &mut Masking {
        &mut self.masking
    }
    pub fn output(&self) -> &OutputSettings {
        &self.output
    }
    pub fn output_mut(&mut self) -> &mut OutputSettings {
        &mut self.output
    }

    /// True when the document may be handed to the generator as is:
    /// start time defined, at least one signal selected and, for dynamic
    /// trajectories, a non empty sequence of positive segments.
    pub fn is_complete(&self) -> bool {
        self.time.start().is_some() && !self.signals.is_empty() && self.trajectory.is_complete()
    }

    /// Serializes to the generator JSON document
    pub fn to_json(&self) -> Result<serde_json::Value, SchemaError> {
        schema::to_json(self)
    }

    /// Serializes to a pretty JSON string
    pub fn to_json_string(&self) -> Result<String, SchemaError> {
        let value = self.to_json()?;
        serde_json::to_string_pretty(&value)
            .map_err(|e| SchemaError::new("document", &e.to_string()))
    }

    /// Builds a document from the generator JSON document
    pub fn from_json(value: &serde_json::Value) -> Result<Self, SchemaError> {
        schema::from_json(value)
    }

    /// Builds a document from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| SchemaError::new("document", &e.to_string()))?;
        Self::from_json(&value)
    }

    /// Writes the JSON document to a local file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let content = self.to_json_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Loads a document from a local JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&content)?)
    }
}
