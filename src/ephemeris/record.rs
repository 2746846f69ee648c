//! Ephemeris records: only the satellite and its time of clock are retained.
use std::str::FromStr;

use gnss::prelude::{Constellation, SV};
use hifitime::{Epoch, TimeScale, Unit};

use super::{field, Header, ParsingError};
use crate::{
    epoch::{parse_in_timescale, parse_utc as parse_utc_epoch},
    version::Version,
    window::TimeWindow,
};

/// An ephemeris is considered valid from this many hours prior its time of clock
pub const VALIDITY_BEFORE_TOC: f64 = 2.0;

/// An ephemeris is considered valid up to this many hours after its time of clock
pub const VALIDITY_AFTER_TOC: f64 = 4.0;

/// Ephemeris record
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Record {
    /// Satellite described by this record
    pub sv: SV,
    /// Time of clock, expressed in UTC
    pub toc: Epoch,
}

/// Returns true if given content matches the beginning of a
/// V2 or V3 navigation record
pub(crate) fn is_new_record(line: &str, v: Version) -> bool {
    if v.major < 3 {
        // old RINEX
        if line.len() < 22 {
            return false; // not enough bytes
                          // to describe a PRN and an Epoch
        }

        let prn = field(line, 0, 2);
        if prn.trim().parse::<u8>().is_err() {
            return false;
        }

        let datestr = field(line, 3, 22);
        parse_utc_epoch(datestr).is_ok()
    } else {
        if line.len() < 23 {
            return false; // not enough bytes
                          // to describe an SV and an Epoch
        }

        if parse_sv(field(line, 0, 3)).is_none() {
            return false;
        }

        let datestr = field(line, 4, 23);
        parse_utc_epoch(datestr).is_ok()
    }
}

/*
 * SV identification, protected against empty or non ASCII content
 */
fn parse_sv(content: &str) -> Option<SV> {
    let content = content.trim();
    let first = content.chars().next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    SV::from_str(content).ok()
}

/*
 * Time of clock is expressed in the system time of the satellite
 */
fn parse_toc(content: &str, constellation: Constellation) -> Result<Epoch, ParsingError> {
    let ts = constellation.timescale().unwrap_or(TimeScale::GPST);
    let toc = parse_in_timescale(content, ts)?;
    Ok(toc.to_time_scale(TimeScale::UTC))
}

impl Record {
    /// Validity interval of this record
    pub fn validity(&self) -> TimeWindow {
        TimeWindow {
            start: self.toc - VALIDITY_BEFORE_TOC * Unit::Hour,
            end: self.toc + VALIDITY_AFTER_TOC * Unit::Hour,
        }
    }

    /// Iterates over all ephemeris records contained in the body of a file
    /// described by [Header].
    pub fn iter<'a, I: Iterator<Item = &'a str>>(header: &Header, lines: I) -> Records<I> {
        Records {
            lines,
            version: header.version,
            constellation: header.constellation,
            eph_frame: false,
        }
    }

    /*
     * V2: satellite system is defined by the header, PRN only
     */
    fn parse_v2(line: &str, constellation: Constellation) -> Result<Self, ParsingError> {
        let prn = field(line, 0, 2)
            .trim()
            .parse::<u8>()
            .map_err(|_| ParsingError::InvalidRecord(line.to_string()))?;
        let sv = SV::new(constellation, prn);
        let toc = parse_toc(field(line, 3, 22), constellation)?;
        Ok(Self { sv, toc })
    }

    /*
     * V3 and V4 data line: satellite system is defined per record
     */
    fn parse_v3(line: &str) -> Result<Self, ParsingError> {
        let sv = parse_sv(field(line, 0, 3))
            .ok_or_else(|| ParsingError::InvalidRecord(line.to_string()))?;
        let toc = parse_toc(field(line, 4, 23), sv.constellation)?;
        Ok(Self { sv, toc })
    }
}

/// Iterator over ephemeris [Record]s
pub struct Records<I> {
    lines: I,
    version: Version,
    constellation: Constellation,
    // V4: previous frame announced an ephemeris
    eph_frame: bool,
}

impl<'a, I: Iterator<Item = &'a str>> Iterator for Records<I> {
    type Item = Result<Record, ParsingError>;
    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if self.version.major > 3 {
                // V4: frames are announced by '>'
                // only EPH frames carry an ephemeris, STO/EOP/ION are ignored
                if line.starts_with('>') {
                    self.eph_frame = line
                        .trim_start_matches('>')
                        .split_ascii_whitespace()
                        .next()
                        .map(|frame| frame.eq("EPH"))
                        .unwrap_or(false);
                    continue;
                }
                if self.eph_frame {
                    self.eph_frame = false;
                    return Some(Record::parse_v3(line));
                }
            } else if is_new_record(line, self.version) {
                if self.version.major < 3 {
                    return Some(Record::parse_v2(line, self.constellation));
                } else {
                    return Some(Record::parse_v3(line));
                }
            }
        }
        None
    }
}
