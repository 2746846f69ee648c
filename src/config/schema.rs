//! JSON contract of the signal generator.
//!
//! Each section goes through a plain transfer structure, literals are kept
//! as strings so an unknown literal is reported with its qualified field name.
use std::str::FromStr;

use gnss::prelude::{Constellation, SV};
use hifitime::{Epoch, TimeScale};
use itertools::Itertools;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    system_from_name, system_name,
    time::{from_year_day_second, second_of_day_nanos, to_year_day_second},
    BasicInfo, ConfigurationDocument, EphemerisSource, EphemerisSources, Masking, MotionType,
    OutputSettings, Position, Power, Segment, Signal, SignalSelection, TimeConfig, TimeType,
    Trajectory, TrajectoryMode, Velocity,
};
use crate::error::SchemaError;

const SECTIONS: [&str; 7] = [
    "basic",
    "time",
    "trajectory",
    "signals",
    "power",
    "masking",
    "output",
];

fn parse_literal<T: FromStr>(field: &str, literal: &str) -> Result<T, SchemaError> {
    T::from_str(literal)
        .map_err(|_| SchemaError::new(field, &format!("unknown value \"{}\"", literal)))
}

fn parse_system(field: &str, name: &str) -> Result<Constellation, SchemaError> {
    system_from_name(name)
        .ok_or_else(|| SchemaError::new(field, &format!("unknown system \"{}\"", name)))
}

fn emit_system(field: &str, c: Constellation) -> Result<String, SchemaError> {
    system_name(c)
        .map(|s| s.to_string())
        .ok_or_else(|| SchemaError::new(field, &format!("{} is not simulated", c)))
}

fn section<T: DeserializeOwned>(doc: &Map<String, Value>, name: &str) -> Result<T, SchemaError> {
    let value = doc
        .get(name)
        .ok_or_else(|| SchemaError::new(name, "missing section"))?;
    T::deserialize(value).map_err(|e| SchemaError::new(name, &e.to_string()))
}

fn to_value<T: Serialize>(name: &str, dto: &T) -> Result<Value, SchemaError> {
    serde_json::to_value(dto).map_err(|e| SchemaError::new(name, &e.to_string()))
}

#[derive(Debug, Serialize, Deserialize)]
struct BasicDto {
    #[serde(default = "default_version")]
    version: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    comment: String,
}

fn default_version() -> f64 {
    1.0
}

impl BasicDto {
    fn from_basic(basic: &BasicInfo) -> Self {
        Self {
            version: basic.version,
            description: basic.description.clone(),
            comment: basic.comment.clone(),
        }
    }
    fn into_basic(self) -> Result<BasicInfo, SchemaError> {
        let mut basic = BasicInfo::default();
        basic.set_version(self.version)?;
        basic.set_description(&self.description);
        basic.set_comment(&self.comment);
        Ok(basic)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct EphemerisDto {
    #[serde(rename = "type")]
    kind: String,
    name: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeDto {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    day: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hour: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    minute: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    second: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    leap_year: Option<i32>,
    duration: f64,
}

/// Duration of one week (s)
const WEEK_SECONDS: f64 = 604_800.0;

/// Last accepted week number, about two centuries past each system origin
const MAX_WEEK: u32 = 9_999;

/* (whole seconds, nanoseconds) of a positive fractional second */
fn split_second(second: f64) -> (u8, u32) {
    let whole = second.floor();
    let nanos = ((second - whole) * 1.0E9).round().min(999_999_999.0);
    (whole as u8, nanos as u32)
}

impl TimeDto {
    fn from_time(time: &TimeConfig) -> Self {
        let mut dto = Self {
            kind: time.kind.to_string(),
            duration: time.duration,
            ..Default::default()
        };
        let start = match time.start {
            Some(start) => start,
            None => return dto,
        };
        match time.kind.timescale() {
            Some(ts) => {
                let (week, nanos) = start.to_time_scale(ts).to_time_of_week();
                dto.week = Some(week);
                dto.second = Some(nanos as f64 / 1.0E9);
            },
            None if time.kind == TimeType::GLONASS => {
                let (year, day, second) = to_year_day_second(start);
                dto.leap_year = Some(year);
                dto.day = Some(day);
                dto.second = Some(second);
            },
            None => {
                let (y, m, d, hh, mm, ss, ns) = start.to_gregorian_utc();
                dto.year = Some(y);
                dto.month = Some(m);
                dto.day = Some(u16::from(d));
                dto.hour = Some(hh);
                dto.minute = Some(mm);
                dto.second = Some(f64::from(ss) + f64::from(ns) / 1.0E9);
            },
        }
        dto
    }

    /* Start instant, None when no field describes it */
    fn start(&self, kind: TimeType) -> Result<Option<Epoch>, SchemaError> {
        let missing = |field: &str| SchemaError::new(&format!("time.{}", field), "missing field");
        let negative = |field: &str| SchemaError::new(&format!("time.{}", field), "must be positive");

        match kind.timescale() {
            Some(ts) => {
                if self.week.is_none() && self.second.is_none() {
                    return Ok(None);
                }
                let week = self.week.ok_or_else(|| missing("week"))?;
                let second = self.second.ok_or_else(|| missing("second"))?;
                if second < 0.0 {
                    return Err(negative("second"));
                }
                if second >= WEEK_SECONDS {
                    return Err(SchemaError::new("time.second", "time of week out of range"));
                }
                if week > MAX_WEEK {
                    return Err(SchemaError::new("time.week", "week number out of range"));
                }
                let nanos = (second * 1.0E9).round() as u64;
                Ok(Some(
                    Epoch::from_time_of_week(week, nanos, ts).to_time_scale(TimeScale::UTC),
                ))
            },
            None if kind == TimeType::GLONASS => {
                if self.leap_year.is_none() && self.day.is_none() && self.second.is_none() {
                    return Ok(None);
                }
                let year = self.leap_year.ok_or_else(|| missing("leapYear"))?;
                let day = self.day.ok_or_else(|| missing("day"))?;
                let second = self.second.ok_or_else(|| missing("second"))?;
                if day == 0 || day > 366 {
                    return Err(SchemaError::new("time.day", "day of year out of range"));
                }
                if second_of_day_nanos(second).is_none() {
                    return Err(SchemaError::new("time.second", "second of day out of range"));
                }
                let start = from_year_day_second(year, day, second).ok_or_else(|| {
                    SchemaError::new("time.leapYear", "no such day within this year")
                })?;
                Ok(Some(start))
            },
            None => {
                let fields = [
                    self.year.is_some(),
                    self.month.is_some(),
                    self.day.is_some(),
                    self.hour.is_some(),
                    self.minute.is_some(),
                    self.second.is_some(),
                ];
                if !fields.iter().any(|f| *f) {
                    return Ok(None);
                }
                let year = self.year.ok_or_else(|| missing("year"))?;
                let month = self.month.ok_or_else(|| missing("month"))?;
                let day = self.day.ok_or_else(|| missing("day"))?;
                let hour = self.hour.ok_or_else(|| missing("hour"))?;
                let minute = self.minute.ok_or_else(|| missing("minute"))?;
                let second = self.second.ok_or_else(|| missing("second"))?;
                if !(0.0..61.0).contains(&second) {
                    return Err(SchemaError::new("time.second", "out of range"));
                }
                let day = u8::try_from(day)
                    .map_err(|_| SchemaError::new("time.day", "day of month out of range"))?;
                let (ss, ns) = split_second(second);
                let start = Epoch::maybe_from_gregorian(
                    year,
                    month,
                    day,
                    hour,
                    minute,
                    ss,
                    ns,
                    TimeScale::UTC,
                )
                .map_err(|_| SchemaError::new("time", "invalid calendar date"))?;
                Ok(Some(start))
            },
        }
    }

    fn into_time(self) -> Result<TimeConfig, SchemaError> {
        let kind = parse_literal::<TimeType>("time.type", &self.kind)?;
        let mut time = TimeConfig::default();
        time.set_kind(kind);
        time.set_duration(self.duration)?;
        if let Some(start) = self.start(kind)? {
            time.set_start(start);
        }
        Ok(time)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PositionDto {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    z: Option<f64>,
}

impl PositionDto {
    fn from_position(position: &Position) -> Self {
        match *position {
            Position::Lla {
                latitude,
                longitude,
                altitude,
            } => Self {
                kind: "LLA".to_string(),
                format: Some("d".to_string()),
                longitude: Some(longitude),
                latitude: Some(latitude),
                altitude: Some(altitude),
                ..Default::default()
            },
            Position::Ecef { x, y, z } => Self {
                kind: "ECEF".to_string(),
                x: Some(x),
                y: Some(y),
                z: Some(z),
                ..Default::default()
            },
        }
    }
    fn into_position(self) -> Result<Position, SchemaError> {
        let coordinate = |value: Option<f64>, name: &str| {
            value.ok_or_else(|| {
                SchemaError::new(&format!("trajectory.initPosition.{}", name), "missing field")
            })
        };
        match self.kind.as_str() {
            "LLA" => {
                if let Some(format) = self.format.as_deref() {
                    if format != "d" {
                        return Err(SchemaError::new(
                            "trajectory.initPosition.format",
                            &format!("unsupported format \"{}\"", format),
                        ));
                    }
                }
                Ok(Position::Lla {
                    latitude: coordinate(self.latitude, "latitude")?,
                    longitude: coordinate(self.longitude, "longitude")?,
                    altitude: coordinate(self.altitude, "altitude")?,
                })
            },
            "ECEF" => Ok(Position::Ecef {
                x: coordinate(self.x, "x")?,
                y: coordinate(self.y, "y")?,
                z: coordinate(self.z, "z")?,
            }),
            other => Err(SchemaError::new(
                "trajectory.initPosition.type",
                &format!("unknown value \"{}\"", other),
            )),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VelocityDto {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    course: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    east: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    north: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    up: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    z: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    angle_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    east_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    north_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    up_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    z_unit: Option<String>,
}

/* Scaling to m/s of a speed unit, None is m/s */
fn speed_scaling(field: &str, unit: Option<&str>) -> Result<f64, SchemaError> {
    match unit {
        None | Some("mps") | Some("m/s") => Ok(1.0),
        Some("kph") | Some("km/h") => Ok(1.0 / 3.6),
        Some(other) => Err(SchemaError::new(
            field,
            &format!("unsupported unit \"{}\"", other),
        )),
    }
}

impl VelocityDto {
    fn from_velocity(velocity: &Velocity) -> Self {
        let mps = || Some("mps".to_string());
        match *velocity {
            Velocity::Scu { speed, course, up } => Self {
                kind: "SCU".to_string(),
                speed: Some(speed),
                course: Some(course),
                up: Some(up),
                speed_unit: mps(),
                angle_unit: Some("degree".to_string()),
                ..Default::default()
            },
            Velocity::Enu { east, north, up } => Self {
                kind: "ENU".to_string(),
                east: Some(east),
                north: Some(north),
                up: Some(up),
                east_unit: mps(),
                north_unit: mps(),
                up_unit: mps(),
                ..Default::default()
            },
            Velocity::Ecef { x, y, z } => Self {
                kind: "ECEF".to_string(),
                x: Some(x),
                y: Some(y),
                z: Some(z),
                x_unit: mps(),
                y_unit: mps(),
                z_unit: mps(),
                ..Default::default()
            },
        }
    }

    fn into_velocity(self) -> Result<Velocity, SchemaError> {
        let component = |value: Option<f64>, name: &str, unit: Option<&str>| {
            let field = format!("trajectory.initVelocity.{}", name);
            let value = value.ok_or_else(|| SchemaError::new(&field, "missing field"))?;
            let scaling = speed_scaling(&format!("{}Unit", field), unit)?;
            Ok::<f64, SchemaError>(value * scaling)
        };
        match self.kind.as_str() {
            "SCU" => {
                match self.angle_unit.as_deref() {
                    None | Some("degree") | Some("deg") => {},
                    Some(other) => {
                        return Err(SchemaError::new(
                            "trajectory.initVelocity.angleUnit",
                            &format!("unsupported unit \"{}\"", other),
                        ))
                    },
                }
                let unit = self.speed_unit.as_deref();
                let course = self.course.ok_or_else(|| {
                    SchemaError::new("trajectory.initVelocity.course", "missing field")
                })?;
                Ok(Velocity::Scu {
                    speed: component(self.speed, "speed", unit)?,
                    course,
                    up: component(self.up, "up", unit)?,
                })
            },
            "ENU" => Ok(Velocity::Enu {
                east: component(self.east, "east", self.east_unit.as_deref())?,
                north: component(self.north, "north", self.north_unit.as_deref())?,
                up: component(self.up, "up", self.up_unit.as_deref())?,
            }),
            "ECEF" => Ok(Velocity::Ecef {
                x: component(self.x, "x", self.x_unit.as_deref())?,
                y: component(self.y, "y", self.y_unit.as_deref())?,
                z: component(self.z, "z", self.z_unit.as_deref())?,
            }),
            other => Err(SchemaError::new(
                "trajectory.initVelocity.type",
                &format!("unknown value \"{}\"", other),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SegmentDto {
    #[serde(rename = "type")]
    kind: String,
    time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    acceleration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    radius: Option<f64>,
}

impl SegmentDto {
    fn from_segment(segment: &Segment) -> Self {
        Self {
            kind: segment.kind.to_string(),
            time: segment.duration,
            acceleration: segment.acceleration,
            speed: segment.speed,
            rate: segment.rate,
            angle: segment.angle,
            radius: segment.radius,
        }
    }
    /* Durations are not checked here: invalid ones are reported on evaluation */
    fn into_segment(self) -> Result<Segment, SchemaError> {
        Ok(Segment {
            kind: parse_literal::<MotionType>("trajectory.trajectoryList.type", &self.kind)?,
            duration: self.time,
            acceleration: self.acceleration,
            speed: self.speed,
            rate: self.rate,
            angle: self.angle,
            radius: self.radius,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrajectoryDto {
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
    init_position: PositionDto,
    init_velocity: VelocityDto,
    #[serde(default)]
    trajectory_list: Vec<SegmentDto>,
}

impl TrajectoryDto {
    fn from_trajectory(trajectory: &Trajectory) -> Self {
        Self {
            name: trajectory.name.clone(),
            mode: Some(trajectory.mode.to_string()),
            init_position: PositionDto::from_position(&trajectory.position),
            init_velocity: VelocityDto::from_velocity(&trajectory.velocity),
            trajectory_list: trajectory
                .segments
                .iter()
                .map(SegmentDto::from_segment)
                .collect(),
        }
    }
    fn into_trajectory(self) -> Result<Trajectory, SchemaError> {
        let segments = self
            .trajectory_list
            .into_iter()
            .map(SegmentDto::into_segment)
            .collect::<Result<Vec<_>, _>>()?;

        // documents without explicit mode are dynamic as soon as they describe a motion
        let mode = match self.mode.as_deref() {
            Some(mode) => parse_literal::<TrajectoryMode>("trajectory.mode", mode)?,
            None if segments.is_empty() => TrajectoryMode::Static,
            None => TrajectoryMode::Dynamic,
        };

        let mut trajectory = Trajectory::default();
        trajectory.set_name(&self.name);
        trajectory.set_mode(mode);
        trajectory.set_position(self.init_position.into_position()?)?;
        trajectory.set_velocity(self.init_velocity.into_velocity()?)?;
        trajectory.segments = segments;
        Ok(trajectory)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SystemSelectDto {
    system: String,
    signal: String,
    #[serde(default = "default_enable")]
    enable: bool,
}

fn default_enable() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignalsDto {
    #[serde(default)]
    system_select: Vec<SystemSelectDto>,
}

impl SignalsDto {
    fn from_selection(selection: &SignalSelection) -> Result<Self, SchemaError> {
        let mut system_select = Vec::new();
        for signal in <Signal as strum::IntoEnumIterator>::iter() {
            system_select.push(SystemSelectDto {
                system: emit_system("signals.systemSelect.system", signal.constellation())?,
                signal: signal.to_string(),
                enable: selection.is_selected(signal),
            });
        }
        Ok(Self { system_select })
    }
    fn into_selection(self) -> Result<SignalSelection, SchemaError> {
        let mut selection = SignalSelection::default();
        for entry in self.system_select {
            let system = parse_system("signals.systemSelect.system", &entry.system)?;
            let signal = parse_literal::<Signal>("signals.systemSelect.signal", &entry.signal)?;
            if signal.constellation() != system {
                return Err(SchemaError::new(
                    "signals.systemSelect.signal",
                    &format!("{} is not a {} signal", signal, entry.system),
                ));
            }
            selection.set(signal, entry.enable);
        }
        Ok(selection)
    }
}

/// Satellite identifiers: a single PRN or a list
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum SvidDto {
    Single(u8),
    List(Vec<u8>),
}

impl SvidDto {
    fn prns(self) -> Vec<u8> {
        match self {
            Self::Single(prn) => vec![prn],
            Self::List(prns) => prns,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct InitPowerDto {
    #[serde(default = "default_power_unit")]
    unit: String,
    value: f64,
}

fn default_power_unit() -> String {
    "dBHz".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct PowerValueDto {
    #[serde(default)]
    time: f64,
    #[serde(default = "default_power_unit")]
    unit: String,
    value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignalPowerDto {
    system: String,
    svid: SvidDto,
    power_value: Vec<PowerValueDto>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PowerDto {
    noise_floor: f64,
    init_power: InitPowerDto,
    #[serde(default)]
    elevation_adjust: bool,
    #[serde(default)]
    signal_power: Vec<SignalPowerDto>,
}

fn check_power_unit(field: &str, unit: &str) -> Result<(), SchemaError> {
    if unit == "dBHz" {
        Ok(())
    } else {
        Err(SchemaError::new(
            field,
            &format!("unsupported unit \"{}\"", unit),
        ))
    }
}

impl PowerDto {
    fn from_power(power: &Power) -> Result<Self, SchemaError> {
        let mut signal_power = Vec::new();
        // satellites sharing system and power are grouped, PRNs ascending
        for ((c, cn0), group) in &power
            .overrides
            .iter()
            .sorted_by_key(|(sv, _)| (sv.constellation, sv.prn))
            .chunk_by(|(sv, cn0)| (sv.constellation, cn0.to_bits()))
        {
            signal_power.push(SignalPowerDto {
                system: emit_system("power.signalPower.system", c)?,
                svid: SvidDto::List(group.map(|(sv, _)| sv.prn).collect()),
                power_value: vec![PowerValueDto {
                    time: 0.0,
                    unit: default_power_unit(),
                    value: f64::from_bits(cn0),
                }],
            });
        }
        Ok(Self {
            noise_floor: power.noise_floor,
            init_power: InitPowerDto {
                unit: default_power_unit(),
                value: power.initial_cn0,
            },
            elevation_adjust: power.elevation_adjust,
            signal_power,
        })
    }
    fn into_power(self) -> Result<Power, SchemaError> {
        check_power_unit("power.initPower.unit", &self.init_power.unit)?;
        let mut power = Power::default();
        power.set_noise_floor(self.noise_floor)?;
        power.set_initial_cn0(self.init_power.value)?;
        power.set_elevation_adjust(self.elevation_adjust);

        for entry in self.signal_power {
            let system = parse_system("power.signalPower.system", &entry.system)?;
            let value = match entry.power_value.as_slice() {
                [single] => {
                    check_power_unit("power.signalPower.powerValue.unit", &single.unit)?;
                    single.value
                },
                [] => {
                    return Err(SchemaError::new(
                        "power.signalPower.powerValue",
                        "missing power value",
                    ))
                },
                _ => {
                    return Err(SchemaError::new(
                        "power.signalPower.powerValue",
                        "time varying power profiles are not supported",
                    ))
                },
            };
            for prn in entry.svid.prns() {
                power.set_override(SV::new(system, prn), value)?;
            }
        }
        Ok(power)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MaskOutDto {
    system: String,
    svid: SvidDto,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MaskingDto {
    elevation_mask: f64,
    #[serde(default)]
    mask_out: Vec<MaskOutDto>,
}

impl MaskingDto {
    fn from_masking(masking: &Masking) -> Result<Self, SchemaError> {
        let mut mask_out = Vec::new();
        for (c, group) in &masking
            .masked
            .iter()
            .sorted_by_key(|sv| (sv.constellation, sv.prn))
            .chunk_by(|sv| sv.constellation)
        {
            mask_out.push(MaskOutDto {
                system: emit_system("masking.maskOut.system", c)?,
                svid: SvidDto::List(group.map(|sv| sv.prn).collect()),
            });
        }
        Ok(Self {
            elevation_mask: masking.elevation_mask,
            mask_out,
        })
    }
    fn into_masking(self) -> Result<Masking, SchemaError> {
        let mut masking = Masking::default();
        masking.set_elevation_mask(self.elevation_mask)?;
        for entry in self.mask_out {
            let system = parse_system("masking.maskOut.system", &entry.system)?;
            for prn in entry.svid.prns() {
                masking.mask(SV::new(system, prn))?;
            }
        }
        Ok(masking)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutputDto {
    #[serde(rename = "type")]
    kind: String,
    format: String,
    name: String,
    #[serde(default = "default_sample_frequency")]
    sample_freq: f64,
    #[serde(default = "default_center_frequency")]
    center_freq: f64,
    #[serde(default = "default_interval")]
    interval: f64,
}

fn default_sample_frequency() -> f64 {
    super::output::DEFAULT_SAMPLE_FREQUENCY
}

fn default_center_frequency() -> f64 {
    super::output::DEFAULT_CENTER_FREQUENCY
}

fn default_interval() -> f64 {
    1.0
}

impl OutputDto {
    fn from_output(output: &OutputSettings) -> Self {
        Self {
            kind: output.kind.to_string(),
            format: output.format.to_string(),
            name: output.name.clone(),
            sample_freq: output.sample_frequency,
            center_freq: output.center_frequency,
            interval: output.interval,
        }
    }
    /* Sample frequency is only checked on evaluation */
    fn into_output(self) -> Result<OutputSettings, SchemaError> {
        let mut output = OutputSettings::default();
        output.set_format(
            parse_literal("output.type", &self.kind)?,
            parse_literal("output.format", &self.format)?,
        )?;
        output.set_name(&self.name);
        output.set_sample_frequency(self.sample_freq)?;
        output.set_center_frequency(self.center_freq)?;
        output.set_interval(self.interval)?;
        Ok(output)
    }
}

/// Serializes the document to the generator contract
pub(crate) fn to_json(doc: &ConfigurationDocument) -> Result<Value, SchemaError> {
    let mut map = Map::new();
    map.insert(
        "basic".to_string(),
        to_value("basic", &BasicDto::from_basic(&doc.basic))?,
    );
    if !doc.ephemeris.is_empty() {
        let sources = doc
            .ephemeris
            .iter()
            .map(|s| EphemerisDto {
                kind: s.kind.to_string(),
                name: s.name.clone(),
            })
            .collect::<Vec<_>>();
        map.insert("ephemeris".to_string(), to_value("ephemeris", &sources)?);
    }
    map.insert(
        "time".to_string(),
        to_value("time", &TimeDto::from_time(&doc.time))?,
    );
    map.insert(
        "trajectory".to_string(),
        to_value("trajectory", &TrajectoryDto::from_trajectory(&doc.trajectory))?,
    );
    map.insert(
        "signals".to_string(),
        to_value("signals", &SignalsDto::from_selection(&doc.signals)?)?,
    );
    map.insert(
        "power".to_string(),
        to_value("power", &PowerDto::from_power(&doc.power)?)?,
    );
    map.insert(
        "masking".to_string(),
        to_value("masking", &MaskingDto::from_masking(&doc.masking)?)?,
    );
    map.insert(
        "output".to_string(),
        to_value("output", &OutputDto::from_output(&doc.output))?,
    );
    Ok(Value::Object(map))
}

/// Builds a document from the generator contract.
/// Every section must be present, unknown fields are tolerated.
pub(crate) fn from_json(value: &Value) -> Result<ConfigurationDocument, SchemaError> {
    let doc = value
        .as_object()
        .ok_or_else(|| SchemaError::new("document", "expected a JSON object"))?;

    if let Some(missing) = SECTIONS.iter().find(|name| !doc.contains_key(**name)) {
        return Err(SchemaError::new(missing, "missing section"));
    }

    let mut ephemeris = EphemerisSources::default();
    if doc.contains_key("ephemeris") {
        for entry in section::<Vec<EphemerisDto>>(doc, "ephemeris")? {
            ephemeris.add(EphemerisSource {
                kind: parse_literal("ephemeris.type", &entry.kind)?,
                name: entry.name,
            });
        }
    }

    Ok(ConfigurationDocument {
        basic: section::<BasicDto>(doc, "basic")?.into_basic()?,
        ephemeris,
        time: section::<TimeDto>(doc, "time")?.into_time()?,
        trajectory: section::<TrajectoryDto>(doc, "trajectory")?.into_trajectory()?,
        signals: section::<SignalsDto>(doc, "signals")?.into_selection()?,
        power: section::<PowerDto>(doc, "power")?.into_power()?,
        masking: section::<MaskingDto>(doc, "masking")?.into_masking()?,
        output: section::<OutputDto>(doc, "output")?.into_output()?,
    })
}
