use strum::{Display, EnumIter, EnumString};

use super::check_finite;
use crate::error::InvalidValueError;

/// Default sampling frequency (MHz)
pub const DEFAULT_SAMPLE_FREQUENCY: f64 = 20.0;

/// Default center frequency (MHz): GPS L1
pub const DEFAULT_CENTER_FREQUENCY: f64 = 1575.42;

/// Kind of product the generator should produce
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum OutputKind {
    /// Baseband IQ samples
    #[default]
    #[strum(serialize = "IFdata")]
    IfData,
    /// Receiver positions
    #[strum(serialize = "position")]
    Position,
    /// Raw observations
    #[strum(serialize = "observation")]
    Observation,
}

/// Output file format
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum OutputFormat {
    /// 8 bit IQ samples
    #[default]
    IQ8,
    /// 4 bit IQ samples
    IQ4,
    RINEX3,
    KML,
    NMEA0183,
    ECEF,
    LLA,
}

impl OutputFormat {
    /// True if this format may describe given kind of product
    pub fn is_compatible(&self, kind: OutputKind) -> bool {
        match self {
            Self::IQ8 | Self::IQ4 => kind == OutputKind::IfData,
            Self::RINEX3 => kind == OutputKind::Observation,
            Self::KML | Self::NMEA0183 | Self::ECEF | Self::LLA => kind == OutputKind::Position,
        }
    }
    /// Usual file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::IQ8 | Self::IQ4 => "bin",
            Self::RINEX3 => "obs",
            Self::KML => "kml",
            Self::NMEA0183 => "nmea",
            Self::ECEF | Self::LLA => "txt",
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    pub(crate) name: String,
    pub(crate) kind: OutputKind,
    pub(crate) format: OutputFormat,
    pub(crate) sample_frequency: f64,
    pub(crate) center_frequency: f64,
    pub(crate) interval: f64,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            name: "output.bin".to_string(),
            kind: OutputKind::default(),
            format: OutputFormat::default(),
            sample_frequency: DEFAULT_SAMPLE_FREQUENCY,
            center_frequency: DEFAULT_CENTER_FREQUENCY,
            interval: 1.0,
        }
    }
}

impl OutputSettings {
    /// Output file name
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> OutputKind {
        self.kind
    }
    pub fn format(&self) -> OutputFormat {
        self.format
    }
    /// Sampling frequency, in MHz
    pub fn sample_frequency(&self) -> f64 {
        self.sample_frequency
    }
    /// Center frequency, in MHz
    pub fn center_frequency(&self) -> f64 {
        self.center_frequency
    }
    /// Position / observation output interval, in seconds
    pub fn interval(&self) -> f64 {
        self.interval
    }
    /// Default file name for the current format
    pub fn default_name(&self) -> String {
        format!("output.{}", self.format.extension())
    }
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
    /// Defines kind and format at once, they must be compatible.
    pub fn set_format(&mut self, kind: OutputKind, format: OutputFormat) -> Result<(), InvalidValueError> {
        if !format.is_compatible(kind) {
            return Err(InvalidValueError::new(
                "output.format",
                &format!("{} is not a valid {} format", format, kind),
            ));
        }
        self.kind = kind;
        self.format = format;
        Ok(())
    }
    /// Sampling frequency, in MHz. Its plausibility is left to the validation engine.
    pub fn set_sample_frequency(&mut self, mhz: f64) -> Result<(), InvalidValueError> {
        check_finite("output.sampleFreq", mhz)?;
        self.sample_frequency = mhz;
        Ok(())
    }
    pub fn set_center_frequency(&mut self, mhz: f64) -> Result<(), InvalidValueError> {
        check_finite("output.centerFreq", mhz)?;
        self.center_frequency = mhz;
        Ok(())
    }
    pub fn set_interval(&mut self, seconds: f64) -> Result<(), InvalidValueError> {
        super::check_positive("output.interval", seconds)?;
        self.interval = seconds;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;
    #[test]
    fn format_compatibility() {
        for format in OutputFormat::iter() {
            let compatible = OutputKind::iter()
                .filter(|kind| format.is_compatible(*kind))
                .count();
            assert_eq!(compatible, 1, "{} should match a single kind", format);
        }

        let mut output = OutputSettings::default();
        output
            .set_format(OutputKind::Position, OutputFormat::KML)
            .unwrap();
        assert_eq!(output.default_name(), "output.kml");

        let e = output
            .set_format(OutputKind::IfData, OutputFormat::RINEX3)
            .unwrap_err();
        assert_eq!(e.field, "output.format");
        assert_eq!(output.format(), OutputFormat::KML);
        assert_eq!(output.kind(), OutputKind::Position);
    }
    #[test]
    fn names() {
        assert_eq!(OutputKind::IfData.to_string(), "IFdata");
        assert_eq!(OutputKind::from_str("observation"), Ok(OutputKind::Observation));
        assert_eq!(OutputFormat::from_str("NMEA0183"), Ok(OutputFormat::NMEA0183));
        assert!(OutputKind::from_str("IFDATA").is_err());
    }
    #[test]
    fn frequencies() {
        let mut output = OutputSettings::default();
        assert_eq!(output.sample_frequency(), DEFAULT_SAMPLE_FREQUENCY);
        output.set_sample_frequency(0.0).unwrap();
        assert_eq!(output.sample_frequency(), 0.0);
        assert!(output.set_sample_frequency(f64::NAN).is_err());
        output.set_center_frequency(1561.098).unwrap();
        assert!(output.set_interval(0.0).is_err());
        output.set_interval(0.1).unwrap();
        assert_eq!(output.interval(), 0.1);
    }
}
