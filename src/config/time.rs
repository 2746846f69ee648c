use hifitime::{Duration, Epoch, TimeScale, Unit};
use strum::{Display, EnumIter, EnumString};

use super::check_positive;
use crate::error::InvalidValueError;

/// Default simulation duration (seconds)
const DEFAULT_DURATION: f64 = 60.0;

/// Time system used to express the start time in the generator document.
/// It has no impact on the instant itself, which is always stored in UTC.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum TimeType {
    /// Calendar date and time
    #[default]
    UTC,
    /// GPS week and time of week
    GPS,
    /// BeiDou week and time of week
    BDS,
    /// Galileo week and time of week
    Galileo,
    /// Year, day of year and second of day
    GLONASS,
}

impl TimeType {
    /// [TimeScale] of week based representations, None for calendar based ones
    pub fn timescale(&self) -> Option<TimeScale> {
        match self {
            Self::GPS => Some(TimeScale::GPST),
            Self::BDS => Some(TimeScale::BDT),
            Self::Galileo => Some(TimeScale::GST),
            Self::UTC | Self::GLONASS => None,
        }
    }
}

/// Simulation time frame
#[derive(Debug, Clone, PartialEq)]
pub struct TimeConfig {
    pub(crate) kind: TimeType,
    pub(crate) start: Option<Epoch>,
    pub(crate) duration: f64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            kind: TimeType::default(),
            start: None,
            duration: DEFAULT_DURATION,
        }
    }
}

impl TimeConfig {
    /// Time system used in the generator document
    pub fn kind(&self) -> TimeType {
        self.kind
    }
    /// Simulation start, in UTC
    pub fn start(&self) -> Option<Epoch> {
        self.start
    }
    /// Simulation duration, in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.duration
    }
    /// Simulation duration
    pub fn duration(&self) -> Duration {
        self.duration * Unit::Second
    }
    /// Simulation end, in UTC
    pub fn end(&self) -> Option<Epoch> {
        self.start.map(|t| t + self.duration())
    }
    pub fn set_kind(&mut self, kind: TimeType) {
        self.kind = kind;
    }
    /// Defines the simulation start. Any [TimeScale] is accepted.
    pub fn set_start(&mut self, start: Epoch) {
        self.start = Some(start.to_time_scale(TimeScale::UTC));
    }
    pub fn clear_start(&mut self) {
        self.start = None;
    }
    /// Defines the simulation duration, in seconds
    pub fn set_duration(&mut self, seconds: f64) -> Result<(), InvalidValueError> {
        check_positive("time.duration", seconds)?;
        self.duration = seconds;
        Ok(())
    }
}

/// Nanoseconds in one day
const DAY_NANOS: u64 = 86_400_000_000_000;

/// Exact nanoseconds of a second of day. Sub nanosecond digits are rounded.
pub(crate) fn second_of_day_nanos(second: f64) -> Option<u64> {
    if (0.0..86_400.0).contains(&second) {
        Some(((second * 1.0E9).round() as u64).min(DAY_NANOS - 1))
    } else {
        None
    }
}

/// GLONASS style decomposition: (year, day of year starting at 1, second of day).
/// Calendar based, so leap seconds never shift the day boundaries.
pub(crate) fn to_year_day_second(t: Epoch) -> (i32, u16, f64) {
    let (year, month, day, hh, mm, ss, ns) = t.to_gregorian_utc();
    let midnight = Epoch::from_gregorian_utc_at_midnight(year, month, day);
    let elapsed = midnight - Epoch::from_gregorian_utc_at_midnight(year, 1, 1);
    let day_of_year = (elapsed.to_seconds() / 86_400.0).round() as u16 + 1;
    let seconds = u64::from(hh) * 3600 + u64::from(mm) * 60 + u64::from(ss);
    let nanos = seconds * 1_000_000_000 + u64::from(ns);
    (year, day_of_year, nanos as f64 / 1.0E9)
}

/// Inverse of [to_year_day_second]. None when the year cannot be represented,
/// the day does not exist within that year or the second of day is out of range.
pub(crate) fn from_year_day_second(year: i32, day: u16, second: f64) -> Option<Epoch> {
    let nanos = second_of_day_nanos(second)?;
    if day == 0 {
        return None;
    }
    let new_year = Epoch::maybe_from_gregorian_utc(year, 1, 1, 0, 0, 0, 0).ok()?;
    // midday is never affected by a leap second
    let midday = new_year + f64::from(day - 1) * Unit::Day + 12.0 * Unit::Hour;
    let (y, m, d, _, _, _, _) = midday.to_gregorian_utc();
    if y != year {
        return None;
    }
    let midnight = Epoch::maybe_from_gregorian_utc(y, m, d, 0, 0, 0, 0).ok()?;
    Some(midnight + Duration::from_total_nanoseconds(i128::from(nanos)))
}
