use std::collections::BTreeSet;

use gnss::prelude::SV;

use super::{check_finite, check_simulated};
use crate::error::InvalidValueError;

/// Default elevation mask (degrees)
pub const DEFAULT_ELEVATION_MASK: f64 = 5.0;

/// Satellite masking
#[derive(Debug, Clone, PartialEq)]
pub struct Masking {
    pub(crate) elevation_mask: f64,
    pub(crate) masked: BTreeSet<SV>,
}

impl Default for Masking {
    fn default() -> Self {
        Self {
            elevation_mask: DEFAULT_ELEVATION_MASK,
            masked: BTreeSet::new(),
        }
    }
}

impl Masking {
    /// Elevation mask, in degrees
    pub fn elevation_mask(&self) -> f64 {
        self.elevation_mask
    }
    /// Manually masked satellites
    pub fn masked(&self) -> impl Iterator<Item = SV> + '_ {
        self.masked.iter().copied()
    }
    pub fn is_masked(&self, sv: SV) -> bool {
        self.masked.contains(&sv)
    }
    pub fn set_elevation_mask(&mut self, degrees: f64) -> Result<(), InvalidValueError> {
        check_finite("masking.elevationMask", degrees)?;
        if !(0.0..=90.0).contains(&degrees) {
            return Err(InvalidValueError::new(
                "masking.elevationMask",
                "must lie within [0, 90] degrees",
            ));
        }
        self.elevation_mask = degrees;
        Ok(())
    }
    /// Excludes a satellite from the simulation
    pub fn mask(&mut self, sv: SV) -> Result<(), InvalidValueError> {
        check_simulated("masking.maskOut.system", sv.constellation)?;
        self.masked.insert(sv);
        Ok(())
    }
    /// Restores a satellite, returns true if it was masked
    pub fn unmask(&mut self, sv: SV) -> bool {
        self.masked.remove(&sv)
    }
    pub fn clear(&mut self) {
        self.masked.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gnss::prelude::Constellation;
    #[test]
    fn elevation_mask() {
        let mut masking = Masking::default();
        assert_eq!(masking.elevation_mask(), 5.0);
        masking.set_elevation_mask(0.0).unwrap();
        masking.set_elevation_mask(90.0).unwrap();
        for invalid in [-0.1, 90.5, f64::NAN] {
            assert!(masking.set_elevation_mask(invalid).is_err());
        }
        assert_eq!(masking.elevation_mask(), 90.0);
    }
    #[test]
    fn masked_satellites() {
        let mut masking = Masking::default();
        let c06 = SV::new(Constellation::BeiDou, 6);
        masking.mask(c06).unwrap();
        masking.mask(c06).unwrap();
        assert_eq!(masking.masked().count(), 1);
        assert!(masking.is_masked(c06));
        assert!(masking.mask(SV::new(Constellation::SBAS, 23)).is_err());
        assert!(masking.unmask(c06));
        assert!(!masking.unmask(c06));
    }
}
