use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Plausibility bounds used by the validation engine.
/// They are passed in by the caller, usually deserialized
/// from the application preferences.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Lowest plausible C/N0 (dB-Hz)
    pub min_cn0: f64,
    /// Highest plausible C/N0 (dB-Hz)
    pub max_cn0: f64,
    /// Noise floor ceiling (dBm/Hz)
    pub max_noise_floor: f64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            min_cn0: 20.0,
            max_cn0: 60.0,
            max_noise_floor: -100.0,
        }
    }
}

impl ValidationSettings {
    /// Copies and redefines the plausible C/N0 range
    pub fn with_cn0_range(&self, min: f64, max: f64) -> Self {
        let mut s = *self;
        s.min_cn0 = min.min(max);
        s.max_cn0 = max.max(min);
        s
    }
    /// Copies and redefines the noise floor ceiling
    pub fn with_max_noise_floor(&self, max: f64) -> Self {
        let mut s = *self;
        s.max_noise_floor = max;
        s
    }
    /// Plausible C/N0 range
    pub fn cn0_range(&self) -> RangeInclusive<f64> {
        self.min_cn0..=self.max_cn0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn partial_deserialization() {
        let settings: ValidationSettings = serde_json::from_str(r#"{"max_cn0": 55.0}"#).unwrap();
        assert_eq!(settings.min_cn0, 20.0);
        assert_eq!(settings.max_cn0, 55.0);
        assert_eq!(settings.max_noise_floor, -100.0);

        let settings: ValidationSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ValidationSettings::default());
    }
    #[test]
    fn builders() {
        let settings = ValidationSettings::default()
            .with_cn0_range(50.0, 30.0)
            .with_max_noise_floor(-120.0);
        assert_eq!(settings.cn0_range(), 30.0..=50.0);
        assert_eq!(settings.max_noise_floor, -120.0);
    }
}
