//! Validity windows
use hifitime::{Duration, Epoch};

/// Closed time interval `[start, end]`, over which
/// ephemeris data may be used.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// First valid instant
    pub start: Epoch,
    /// Last valid instant
    pub end: Epoch,
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

impl TimeWindow {
    /// Builds a new [TimeWindow], returns None when `end` precedes `start`.
    pub fn new(start: Epoch, end: Epoch) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }
    /// Returns true if `t` lies within this window, bounds included.
    pub fn contains(&self, t: Epoch) -> bool {
        t >= self.start && t <= self.end
    }
    /// Window length
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
    /// Middle of this window
    pub fn middle(&self) -> Epoch {
        self.start + self.duration() * 0.5
    }
    /// Common part of both windows, None when they do not overlap.
    pub fn intersection(&self, rhs: &Self) -> Option<Self> {
        Self::new(self.start.max(rhs.start), self.end.min(rhs.end))
    }
    /// Smallest window enclosing both windows.
    pub fn hull(&self, rhs: &Self) -> Self {
        Self {
            start: self.start.min(rhs.start),
            end: self.end.max(rhs.end),
        }
    }
}
