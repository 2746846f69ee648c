//! Navigation file header
use std::str::FromStr;

use gnss::prelude::Constellation;

use super::{field, ParsingError};
use crate::version::Version;

#[cfg(feature = "log")]
use log::debug;

/// Header label column
const LABEL_COLUMN: usize = 60;

/// Navigation file header. Only the fields that describe
/// the file content are retained.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Format revision
    pub version: Version,
    /// Constellation declared by the file.
    /// [Constellation::Mixed] for multi constellation files.
    pub constellation: Constellation,
    /// Name of the program that produced this file
    pub program: Option<String>,
    /// Leap seconds (UTC - TAI offset) declared by the producer
    pub leap_seconds: Option<u32>,
}

impl Header {
    /// Parses the header section, returns the [Header] and
    /// the number of lines it occupied (END OF HEADER included).
    pub(crate) fn parse(content: &str) -> Result<(Self, usize), ParsingError> {
        let mut version_type: Option<(Version, Constellation)> = None;
        let mut program = Option::<String>::None;
        let mut leap_seconds = Option::<u32>::None;

        for (index, line) in content.lines().enumerate() {
            let label = field(line, LABEL_COLUMN, line.len()).trim();

            if label.is_empty() {
                continue;
            }

            if label.eq("COMMENT") {
                continue;
            }

            if label.contains("END OF HEADER") {
                let (version, constellation) =
                    version_type.ok_or(ParsingError::MissingVersionType)?;
                return Ok((
                    Self {
                        version,
                        constellation,
                        program,
                        leap_seconds,
                    },
                    index + 1,
                ));
            }

            if label.contains("RINEX VERSION / TYPE") {
                version_type = Some(Self::parse_version_type(line)?);
                continue;
            }

            if version_type.is_none() {
                // any other header line prior "RINEX VERSION / TYPE"
                return Err(ParsingError::MissingVersionType);
            }

            if label.contains("PGM / RUN BY / DATE") {
                let pgm = field(line, 0, 20).trim();
                if !pgm.is_empty() {
                    program = Some(pgm.to_string());
                }
            } else if label.contains("LEAP SECONDS") {
                leap_seconds = field(line, 0, 6).trim().parse::<u32>().ok();
            }
        }

        Err(ParsingError::MissingEndOfHeader)
    }

    /*
     * Identifies format revision and file type.
     * Only navigation files are accepted.
     */
    fn parse_version_type(line: &str) -> Result<(Version, Constellation), ParsingError> {
        let version = Version::from_str(field(line, 0, 9))?;
        if !version.is_supported() {
            return Err(ParsingError::Version(
                crate::version::ParsingError::NotSupported(version.to_string()),
            ));
        }

        let type_str = field(line, 20, 40).trim();
        let constell_str = field(line, 40, 60).trim();

        #[cfg(feature = "log")]
        debug!("rinex v{} type \"{}\" (\"{}\")", version, type_str, constell_str);

        let constellation = match type_str.chars().next() {
            Some('N') => {
                if type_str.contains("GPS NAV DATA") || constell_str.is_empty() {
                    // old GPS NAVIGATION DATA
                    Constellation::GPS
                } else {
                    // Modern NAVIGATION DATA: single letter code
                    Constellation::from_str(field(constell_str, 0, 1))?
                }
            },
            Some('G') if version.major < 3 => Constellation::Glonass,
            Some('H') if version.major < 3 => Constellation::SBAS,
            _ => return Err(ParsingError::NonNavigationFile(type_str.to_string())),
        };

        Ok((version, constellation))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn v2_gps_header() {
        let content =
"     2.11           N: GPS NAV DATA                         RINEX VERSION / TYPE
CCRINEXN V1.6.0 UX  CDDIS               01-JAN-24 00:15     PGM / RUN BY / DATE
                                                            COMMENT
    18                                                      LEAP SECONDS
                                                            END OF HEADER
 1 24  1  1  2  0  0.0";
        let (header, lines) = Header::parse(content).unwrap();
        assert_eq!(lines, 5);
        assert_eq!(header.version, Version::new(2, 11));
        assert_eq!(header.constellation, Constellation::GPS);
        assert_eq!(header.program, Some("CCRINEXN V1.6.0 UX".to_string()));
        assert_eq!(header.leap_seconds, Some(18));
    }
    #[test]
    fn v2_glonass_header() {
        let content =
"     2.01           G: GLONASS NAV DATA                     RINEX VERSION / TYPE
                                                            END OF HEADER";
        let (header, _) = Header::parse(content).unwrap();
        assert_eq!(header.constellation, Constellation::Glonass);
        assert_eq!(header.program, None);
        assert_eq!(header.leap_seconds, None);
    }
    #[test]
    fn v3_mixed_header() {
        let content =
"     3.04           N: GNSS NAV DATA    M: MIXED            RINEX VERSION / TYPE
                                                            END OF HEADER";
        let (header, _) = Header::parse(content).unwrap();
        assert_eq!(header.version, Version::new(3, 4));
        assert_eq!(header.constellation, Constellation::Mixed);

        let content =
"     3.05           N: GNSS NAV DATA    E: GALILEO          RINEX VERSION / TYPE
                                                            END OF HEADER";
        let (header, _) = Header::parse(content).unwrap();
        assert_eq!(header.constellation, Constellation::Galileo);
    }
    #[test]
    fn non_navigation_header() {
        let content =
"     3.04           OBSERVATION DATA    M: MIXED            RINEX VERSION / TYPE
                                                            END OF HEADER";
        match Header::parse(content) {
            Err(ParsingError::NonNavigationFile(t)) => assert_eq!(t, "OBSERVATION DATA"),
            other => panic!("unexpected result {:?}", other),
        }
    }
    #[test]
    fn invalid_headers() {
        let content =
"     3.04           N: GNSS NAV DATA    M: MIXED            RINEX VERSION / TYPE
";
        assert!(matches!(
            Header::parse(content),
            Err(ParsingError::MissingEndOfHeader)
        ));

        let content =
"CCRINEXN V1.6.0 UX  CDDIS               01-JAN-24 00:15     PGM / RUN BY / DATE
                                                            END OF HEADER";
        assert!(matches!(
            Header::parse(content),
            Err(ParsingError::MissingVersionType)
        ));

        let content =
"     5.00           N: GNSS NAV DATA    M: MIXED            RINEX VERSION / TYPE
                                                            END OF HEADER";
        assert!(matches!(Header::parse(content), Err(ParsingError::Version(_))));
    }
}
