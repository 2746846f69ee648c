//! Navigation record epochs: `yy mm dd hh mm ss.s` (V2)
//! or `yyyy mm dd hh mm ss` (V3, V4).
use hifitime::{Epoch, TimeScale};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    #[error("expecting \"yyyy mm dd hh mm ss.s\" format")]
    FormatError,
    #[error("invalid calendar date")]
    InvalidDate,
    #[error("failed to parse {0} from \"{1}\"")]
    Field(&'static str, String),
}

const FIELDS: [&str; 5] = ["year", "month", "day", "hours", "minutes"];

/* whole seconds and nanoseconds, fractional digits beyond the nanosecond are dropped */
fn parse_seconds(item: &str) -> Result<(u8, u32), ParsingError> {
    let invalid = || ParsingError::Field("seconds", item.to_string());
    let (secs, frac) = item.split_once('.').unwrap_or((item, ""));
    let secs = secs.parse::<u8>().map_err(|_| invalid())?;
    if frac.is_empty() {
        return Ok((secs, 0));
    }
    let digits = frac.get(..frac.len().min(9)).ok_or_else(invalid)?;
    let nanos = digits.parse::<u32>().map_err(|_| invalid())?;
    Ok((secs, nanos * 10_u32.pow(9 - digits.len() as u32)))
}

/// Parses a record epoch, interpreted as a datetime within specified [TimeScale].
pub(crate) fn parse_in_timescale(content: &str, ts: TimeScale) -> Result<Epoch, ParsingError> {
    let items = content.split_ascii_whitespace().collect::<Vec<_>>();
    if items.len() != 6 {
        return Err(ParsingError::FormatError);
    }

    let mut fields = [0_u16; 5];
    for (index, name) in FIELDS.into_iter().enumerate() {
        fields[index] = items[index]
            .parse::<u16>()
            .map_err(|_| ParsingError::Field(name, items[index].to_string()))?;
    }
    let (ss, ns) = parse_seconds(items[5])?;

    let year = match fields[0] {
        y if y < 80 => 2000 + y,
        y if y < 100 => 1900 + y,
        y => y,
    };
    let [m, d, hh, mm] = [fields[1], fields[2], fields[3], fields[4]]
        .map(|v| u8::try_from(v).unwrap_or(u8::MAX));

    Epoch::maybe_from_gregorian(i32::from(year), m, d, hh, mm, ss, ns, ts)
        .map_err(|_| ParsingError::InvalidDate)
}

pub(crate) fn parse_utc(s: &str) -> Result<Epoch, ParsingError> {
    parse_in_timescale(s, TimeScale::UTC)
}
