//! Navigation file format revision
use thiserror::Error;

/// Latest format revision supported to this day
pub const SUPPORTED_VERSION: Version = Version { major: 4, minor: 0 };

/// Version is used to describe RINEX standards revisions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Version major number
    pub major: u8,
    /// Version minor number
    pub minor: u8,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParsingError {
    #[error("non supported version \"{0}\"")]
    NotSupported(String),
    #[error("failed to parse version")]
    ParseIntError(#[from] std::num::ParseIntError),
}

impl Default for Version {
    /// Builds a default `Version` object
    fn default() -> Self {
        SUPPORTED_VERSION
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

impl From<Version> for (u8, u8) {
    fn from(v: Version) -> (u8, u8) {
        (v.major, v.minor)
    }
}

impl std::str::FromStr for Version {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('.') {
            Some((major, minor)) => Ok(Self {
                major: major.trim().parse::<u8>()?,
                minor: minor.trim().parse::<u8>()?,
            }),
            None => Ok(Self {
                major: s.parse::<u8>()?,
                minor: 0,
            }),
        }
    }
}

impl Version {
    /// Builds a new `Version` object
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
    /// Returns true if this revision is supported.
    /// Minor revisions of the latest major are all accepted,
    /// they do not modify the navigation record layout.
    pub fn is_supported(&self) -> bool {
        self.major > 0 && self.major <= SUPPORTED_VERSION.major
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    #[test]
    fn version() {
        let version = Version::default();
        assert_eq!(version.major, SUPPORTED_VERSION.major);
        assert_eq!(version.minor, SUPPORTED_VERSION.minor);

        let version = Version::from_str("1");
        assert!(version.is_ok());
        let version = version.unwrap();
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 0);

        let version = Version::from_str("  2.11 ").unwrap();
        assert_eq!(version, Version::new(2, 11));

        let version = Version::from_str("3.04").unwrap();
        assert_eq!(version, Version::new(3, 4));
        assert_eq!(version.to_string(), "3.04");

        assert!(Version::from_str("a.b").is_err());
        assert!(Version::from_str("").is_err());
    }
    #[test]
    fn supported_revisions() {
        assert!(Version::new(2, 10).is_supported());
        assert!(Version::new(3, 5).is_supported());
        assert!(Version::new(4, 2).is_supported());
        assert!(!Version::new(5, 0).is_supported());
        assert!(!Version::new(0, 9).is_supported());
    }
    #[test]
    fn ordering() {
        assert!(Version::new(3, 4) > Version::new(2, 11));
        assert!(Version::new(4, 0) > Version::new(3, 5));
        let (major, minor): (u8, u8) = Version::new(3, 2).into();
        assert_eq!((major, minor), (3, 2));
    }
}
