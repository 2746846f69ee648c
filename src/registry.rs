//! Ephemeris registry: aggregates navigation files and exposes
//! the consolidated validity window and constellations.
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use gnss::prelude::Constellation;
use thiserror::Error;

#[cfg(feature = "log")]
use log::{info, warn};

use crate::{
    ephemeris::{EphemerisFile, FailureKind, ParseStatus, ParsingError},
    window::TimeWindow,
};

/// A file that could not contribute to the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {reason}", .path.display())]
pub struct RejectedFile {
    /// File path
    pub path: PathBuf,
    /// Failure classification
    pub kind: FailureKind,
    /// Human readable reason
    pub reason: String,
}

impl RejectedFile {
    fn new(path: &Path, error: &ParsingError) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: error.kind(),
            reason: error.to_string(),
        }
    }
    /// [ParseStatus] of this file
    pub fn status(&self) -> ParseStatus {
        self.kind.into()
    }
}

/// Consolidated validity window
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConsolidatedWindow {
    /// No file loaded
    Undefined,
    /// Every loaded file covers this window
    Valid(TimeWindow),
    /// No single instant is covered by every loaded file.
    /// The window spans from the earliest to the latest valid instant.
    Partial(TimeWindow),
}

impl ConsolidatedWindow {
    /// Returns the window, whether it is strict or partial
    pub fn window(&self) -> Option<TimeWindow> {
        match self {
            Self::Undefined => None,
            Self::Valid(w) | Self::Partial(w) => Some(*w),
        }
    }
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }
}

impl std::fmt::Display for ConsolidatedWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Valid(w) => write!(f, "{}", w),
            Self::Partial(w) => write!(f, "{} (partial)", w),
        }
    }
}

/// [EphemerisRegistry] owns the loaded [EphemerisFile]s, in insertion order,
/// and the files that were rejected. A path lives in one list at most.
/// Consolidated views are always computed from the current file set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EphemerisRegistry {
    files: Vec<EphemerisFile>,
    rejected: Vec<RejectedFile>,
}

impl EphemerisRegistry {
    /// Parses and inserts a navigation file.
    /// A path that is already known is parsed again and replaced in place.
    /// Failures are retained in the rejected list.
    pub fn add<P: AsRef<Path>>(&mut self, path: P) -> Result<&EphemerisFile, RejectedFile> {
        let path = path.as_ref();
        match EphemerisFile::parse(path) {
            Ok(file) => Ok(self.insert(file)),
            Err(e) => {
                let rejected = RejectedFile::new(path, &e);

                #[cfg(feature = "log")]
                warn!("rejected ephemeris {}", rejected);

                self.files.retain(|f| f.path() != path);
                match self.rejected.iter_mut().find(|r| r.path == path) {
                    Some(prev) => *prev = rejected.clone(),
                    None => self.rejected.push(rejected.clone()),
                }
                Err(rejected)
            },
        }
    }

    /// Inserts an already parsed [EphemerisFile], replacing
    /// any previous entry with identical path.
    pub fn insert(&mut self, file: EphemerisFile) -> &EphemerisFile {
        #[cfg(feature = "log")]
        info!(
            "ephemeris {} ({} records) valid {}",
            file.path().display(),
            file.records(),
            file.window()
        );

        self.rejected.retain(|r| r.path != file.path());

        let index = match self.files.iter().position(|f| f.path() == file.path()) {
            Some(index) => {
                self.files[index] = file;
                index
            },
            None => {
                self.files.push(file);
                self.files.len() - 1
            },
        };
        &self.files[index]
    }

    /// Removes a file, whether it was loaded or rejected.
    /// Returns true if something was removed.
    pub fn remove<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        let (files, rejected) = (self.files.len(), self.rejected.len());
        self.files.retain(|f| f.path() != path);
        self.rejected.retain(|r| r.path != path);

        let removed = files != self.files.len() || rejected != self.rejected.len();

        #[cfg(feature = "log")]
        if removed {
            info!("removed ephemeris {}", path.display());
        }

        removed
    }

    /// Drops all files
    pub fn clear(&mut self) {
        self.files.clear();
        self.rejected.clear();
    }

    /// Consolidated validity window: intersection of all loaded files
    /// when they share a common instant, [ConsolidatedWindow::Partial] otherwise.
    pub fn consolidated_window(&self) -> ConsolidatedWindow {
        let mut windows = self.files.iter().map(|f| f.window());

        let first = match windows.next() {
            Some(w) => w,
            None => return ConsolidatedWindow::Undefined,
        };

        let (intersection, hull) = windows.fold((Some(first), first), |(inter, hull), w| {
            (inter.and_then(|inter| inter.intersection(&w)), hull.hull(&w))
        });

        match intersection {
            Some(w) => ConsolidatedWindow::Valid(w),
            None => ConsolidatedWindow::Partial(hull),
        }
    }

    /// Union of constellations over all loaded files
    pub fn supported_constellations(&self) -> BTreeSet<Constellation> {
        self.files
            .iter()
            .flat_map(|f| f.constellations().into_iter())
            .collect()
    }

    /// Status of a given path, None if unknown
    pub fn status<P: AsRef<Path>>(&self, path: P) -> Option<ParseStatus> {
        let path = path.as_ref();
        if let Some(file) = self.get(path) {
            Some(file.status())
        } else {
            self.rejected
                .iter()
                .find(|r| r.path == path)
                .map(|r| r.status())
        }
    }

    /// Loaded file with given path
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<&EphemerisFile> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path() == path)
    }

    /// Loaded files, in insertion order
    pub fn files(&self) -> impl Iterator<Item = &EphemerisFile> + '_ {
        self.files.iter()
    }

    /// Rejected files, with their reason
    pub fn rejected(&self) -> &[RejectedFile] {
        &self.rejected
    }

    /// Number of loaded files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no file is loaded
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
