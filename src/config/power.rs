use std::collections::BTreeMap;

use gnss::prelude::SV;

use super::{check_finite, check_simulated};
use crate::error::InvalidValueError;

/// Default noise floor (dBm/Hz)
pub const DEFAULT_NOISE_FLOOR: f64 = -174.0;

/// Default initial C/N0 (dB-Hz)
pub const DEFAULT_INITIAL_CN0: f64 = 45.0;

/// Signal power settings
#[derive(Debug, Clone, PartialEq)]
pub struct Power {
    pub(crate) noise_floor: f64,
    pub(crate) initial_cn0: f64,
    pub(crate) elevation_adjust: bool,
    pub(crate) overrides: BTreeMap<SV, f64>,
}

impl Default for Power {
    fn default() -> Self {
        Self {
            noise_floor: DEFAULT_NOISE_FLOOR,
            initial_cn0: DEFAULT_INITIAL_CN0,
            elevation_adjust: false,
            overrides: BTreeMap::new(),
        }
    }
}

impl Power {
    /// Noise floor, in dBm/Hz
    pub fn noise_floor(&self) -> f64 {
        self.noise_floor
    }
    /// C/N0 applied to all satellites, in dB-Hz
    pub fn initial_cn0(&self) -> f64 {
        self.initial_cn0
    }
    /// True when power is adjusted with satellite elevation
    pub fn elevation_adjust(&self) -> bool {
        self.elevation_adjust
    }
    /// Per satellite C/N0 overrides
    pub fn overrides(&self) -> impl Iterator<Item = (SV, f64)> + '_ {
        self.overrides.iter().map(|(sv, cn0)| (*sv, *cn0))
    }
    /// C/N0 of given satellite, override included
    pub fn cn0(&self, sv: SV) -> f64 {
        self.overrides.get(&sv).copied().unwrap_or(self.initial_cn0)
    }
    pub fn set_noise_floor(&mut self, noise_floor: f64) -> Result<(), InvalidValueError> {
        check_finite("power.noiseFloor", noise_floor)?;
        self.noise_floor = noise_floor;
        Ok(())
    }
    pub fn set_initial_cn0(&mut self, cn0: f64) -> Result<(), InvalidValueError> {
        check_finite("power.initPower.value", cn0)?;
        self.initial_cn0 = cn0;
        Ok(())
    }
    pub fn set_elevation_adjust(&mut self, adjust: bool) {
        self.elevation_adjust = adjust;
    }
    /// Defines a C/N0 override for one satellite
    pub fn set_override(&mut self, sv: SV, cn0: f64) -> Result<(), InvalidValueError> {
        check_simulated("power.signalPower.system", sv.constellation)?;
        check_finite("power.signalPower.powerValue", cn0)?;
        self.overrides.insert(sv, cn0);
        Ok(())
    }
    /// Drops the override of one satellite, returns it if it existed
    pub fn remove_override(&mut self, sv: SV) -> Option<f64> {
        self.overrides.remove(&sv)
    }
    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gnss::prelude::Constellation;
    #[test]
    fn overrides() {
        let mut power = Power::default();
        let g01 = SV::new(Constellation::GPS, 1);
        let e05 = SV::new(Constellation::Galileo, 5);

        assert_eq!(power.cn0(g01), DEFAULT_INITIAL_CN0);
        power.set_override(g01, 38.5).unwrap();
        assert_eq!(power.cn0(g01), 38.5);
        assert_eq!(power.cn0(e05), DEFAULT_INITIAL_CN0);

        let e = power
            .set_override(SV::new(Constellation::SBAS, 20), 40.0)
            .unwrap_err();
        assert_eq!(e.field, "power.signalPower.system");
        assert!(power.set_override(e05, f64::NAN).is_err());

        assert_eq!(power.overrides().count(), 1);
        assert_eq!(power.remove_override(g01), Some(38.5));
        assert_eq!(power.remove_override(g01), None);
    }
    #[test]
    fn setters() {
        let mut power = Power::default();
        power.set_noise_floor(-170.0).unwrap();
        power.set_initial_cn0(50.0).unwrap();
        power.set_elevation_adjust(true);
        assert_eq!(power.noise_floor(), -170.0);
        assert_eq!(power.initial_cn0(), 50.0);
        assert!(power.elevation_adjust());
        assert!(power.set_noise_floor(f64::NEG_INFINITY).is_err());
        assert_eq!(power.noise_floor(), -170.0);
    }
}
