//! Navigation (ephemeris) file model.
//!
//! Only the information needed to qualify a navigation file is extracted:
//! the validity window claimed by its ephemeris records and the satellites
//! (hence constellations) they describe. Orbital parameters are not decoded.
use std::{
    collections::BTreeSet,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use gnss::prelude::{Constellation, SV};
use hifitime::Epoch;
use thiserror::Error;

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

#[cfg(feature = "log")]
use log::debug;

mod header;
mod record;

pub use header::Header;
pub use record::{Record, Records, VALIDITY_AFTER_TOC, VALIDITY_BEFORE_TOC};

use crate::{version::Version, window::TimeWindow};

/// Errors that may rise while parsing a navigation file
#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("i/o error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("gzip decompression failed: {0}")]
    Decompression(String),
    #[error("missing \"RINEX VERSION / TYPE\" header")]
    MissingVersionType,
    #[error("missing \"END OF HEADER\"")]
    MissingEndOfHeader,
    #[error("version error: {0}")]
    Version(#[from] crate::version::ParsingError),
    #[error("not a navigation file (\"{0}\")")]
    NonNavigationFile(String),
    #[error("constellation error: {0}")]
    Constellation(#[from] gnss::constellation::ParsingError),
    #[error("epoch error: {0}")]
    Epoch(#[from] crate::epoch::ParsingError),
    #[error("invalid ephemeris record \"{0}\"")]
    InvalidRecord(String),
    #[error("no ephemeris record")]
    NoEphemeris,
}

/// Classification of a parsing failure, so callers can pick
/// the appropriate remediation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// File could not be read at all
    IoFailure,
    /// Readable content, unrecognized structure
    UnsupportedFormat,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::IoFailure => f.write_str("I/O failure"),
            Self::UnsupportedFormat => f.write_str("unsupported format"),
        }
    }
}

impl ParsingError {
    /// Returns the [FailureKind] of this error
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::IoError(_) => FailureKind::IoFailure,
            _ => FailureKind::UnsupportedFormat,
        }
    }
    /// Returns the [ParseStatus] a file failing with this error ends up in
    pub fn status(&self) -> ParseStatus {
        self.kind().into()
    }
}

/// Outcome of a parsing attempt
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParseStatus {
    Parsed,
    Unreadable,
    UnsupportedFormat,
}

impl From<FailureKind> for ParseStatus {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::IoFailure => Self::Unreadable,
            FailureKind::UnsupportedFormat => Self::UnsupportedFormat,
        }
    }
}

/// Returns `line[start..end]`, clamped to the line length.
/// Returns an empty string on invalid (non ASCII) boundaries.
pub(crate) fn field(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}

/// Parsed navigation file. Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisFile {
    path: PathBuf,
    /// File [Header]
    pub header: Header,
    window: TimeWindow,
    satellites: BTreeSet<SV>,
    records: usize,
}

impl EphemerisFile {
    /// Parses given navigation file. Files terminated by `.gz`
    /// are decompressed on the fly, when built with the `flate2` feature.
    /// ```
    /// use signalsim_config::prelude::*;
    /// let path = env!("CARGO_MANIFEST_DIR").to_owned()
    ///     + "/test_resources/NAV/V3/MIXD0010.24P";
    /// let file = EphemerisFile::parse(&path)
    ///     .unwrap();
    /// assert_eq!(file.status(), ParseStatus::Parsed);
    /// assert!(file.constellations().contains(&Constellation::GPS));
    /// ```
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let path = path.as_ref();
        let bytes = Self::read_bytes(path)?;
        // non UTF-8 content is a format problem, not an I/O one
        let content = String::from_utf8_lossy(&bytes);
        Self::from_content(path, &content)
    }

    /// Parses navigation content that was already loaded in memory.
    pub fn from_content<P: AsRef<Path>>(path: P, content: &str) -> Result<Self, ParsingError> {
        let path = path.as_ref();
        let (header, header_lines) = Header::parse(content)?;

        let mut window = Option::<TimeWindow>::None;
        let mut satellites = BTreeSet::<SV>::new();
        let mut records = 0_usize;

        let body = content.lines().skip(header_lines);
        for record in Record::iter(&header, body) {
            let record = record?;
            let validity = record.validity();
            window = Some(match window {
                Some(w) => w.hull(&validity),
                None => validity,
            });
            satellites.insert(record.sv);
            records += 1;
        }

        let window = window.ok_or(ParsingError::NoEphemeris)?;

        #[cfg(feature = "log")]
        debug!(
            "{}: {} ephemeris record(s), valid {}",
            path.display(),
            records,
            window
        );

        Ok(Self {
            path: path.to_path_buf(),
            header,
            window,
            satellites,
            records,
        })
    }

    fn read_bytes(path: &Path) -> Result<Vec<u8>, ParsingError> {
        let mut fd = File::open(path)?;
        let mut bytes = Vec::new();
        fd.read_to_end(&mut bytes)?;

        #[cfg(feature = "flate2")]
        {
            let is_gzip = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("gz"))
                .unwrap_or(false);
            if is_gzip {
                let mut decoder = GzDecoder::new(&bytes[..]);
                let mut inflated = Vec::new();
                decoder
                    .read_to_end(&mut inflated)
                    .map_err(|e| ParsingError::Decompression(e.to_string()))?;
                return Ok(inflated);
            }
        }

        Ok(bytes)
    }

    /// File path, which is also its identity
    pub fn path(&self) -> &Path {
        &self.path
    }
    /// Always [ParseStatus::Parsed]: failures never produce an [EphemerisFile]
    pub fn status(&self) -> ParseStatus {
        ParseStatus::Parsed
    }
    /// Format revision
    pub fn version(&self) -> Version {
        self.header.version
    }
    /// Validity window, expressed in UTC
    pub fn window(&self) -> TimeWindow {
        self.window
    }
    /// Earliest valid instant (UTC)
    pub fn start(&self) -> Epoch {
        self.window.start
    }
    /// Latest valid instant (UTC)
    pub fn end(&self) -> Epoch {
        self.window.end
    }
    /// Satellites described by this file
    pub fn satellites(&self) -> impl Iterator<Item = SV> + '_ {
        self.satellites.iter().copied()
    }
    /// Constellations described by this file
    pub fn constellations(&self) -> BTreeSet<Constellation> {
        self.satellites.iter().map(|sv| sv.constellation).collect()
    }
    /// Number of ephemeris records
    pub fn records(&self) -> usize {
        self.records
    }
    /// Producer program, if declared
    pub fn program(&self) -> Option<&str> {
        self.header.program.as_deref()
    }
    /// Leap seconds, if declared
    pub fn leap_seconds(&self) -> Option<u32> {
        self.header.leap_seconds
    }
}
