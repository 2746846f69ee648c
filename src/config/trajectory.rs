use strum::{Display, EnumIter, EnumString};

use super::{check_finite, check_positive};
use crate::error::InvalidValueError;

/// Receiver motion mode
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Display, EnumString)]
pub enum TrajectoryMode {
    /// Receiver stays at its initial position
    #[default]
    Static,
    /// Receiver follows the segment sequence
    Dynamic,
}

/// Segment motion type
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum MotionType {
    /// Constant velocity
    #[default]
    Const,
    /// Constant acceleration
    ConstAcc,
    /// Vertical acceleration
    VerticalAcc,
    Jerk,
    HorizontalTurn,
}

/// Initial position
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Position {
    /// Geodetic coordinates: decimal degrees, altitude in meters
    Lla {
        latitude: f64,
        longitude: f64,
        altitude: f64,
    },
    /// ECEF coordinates, in meters
    Ecef { x: f64, y: f64, z: f64 },
}

impl Default for Position {
    fn default() -> Self {
        Self::Lla {
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
        }
    }
}

impl Position {
    fn validate(&self) -> Result<(), InvalidValueError> {
        match *self {
            Self::Lla {
                latitude,
                longitude,
                altitude,
            } => {
                check_finite("trajectory.initPosition.latitude", latitude)?;
                check_finite("trajectory.initPosition.longitude", longitude)?;
                check_finite("trajectory.initPosition.altitude", altitude)?;
                if !(-90.0..=90.0).contains(&latitude) {
                    return Err(InvalidValueError::new(
                        "trajectory.initPosition.latitude",
                        "must lie within [-90, 90] degrees",
                    ));
                }
                if !(-180.0..=180.0).contains(&longitude) {
                    return Err(InvalidValueError::new(
                        "trajectory.initPosition.longitude",
                        "must lie within [-180, 180] degrees",
                    ));
                }
                Ok(())
            },
            Self::Ecef { x, y, z } => {
                check_finite("trajectory.initPosition.x", x)?;
                check_finite("trajectory.initPosition.y", y)?;
                check_finite("trajectory.initPosition.z", z)
            },
        }
    }
}

/// Initial velocity, in m/s (and degrees for the course)
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Velocity {
    /// Speed, course and up (vertical speed)
    Scu { speed: f64, course: f64, up: f64 },
    /// East, north, up
    Enu { east: f64, north: f64, up: f64 },
    /// ECEF velocity
    Ecef { x: f64, y: f64, z: f64 },
}

impl Default for Velocity {
    fn default() -> Self {
        Self::Scu {
            speed: 0.0,
            course: 0.0,
            up: 0.0,
        }
    }
}

impl Velocity {
    fn validate(&self) -> Result<(), InvalidValueError> {
        let (a, b, c) = match *self {
            Self::Scu { speed, course, up } => (speed, course, up),
            Self::Enu { east, north, up } => (east, north, up),
            Self::Ecef { x, y, z } => (x, y, z),
        };
        for value in [a, b, c] {
            check_finite("trajectory.initVelocity", value)?;
        }
        Ok(())
    }
}

/// Trajectory segment
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
    pub(crate) kind: MotionType,
    pub(crate) duration: f64,
    pub(crate) acceleration: Option<f64>,
    pub(crate) speed: Option<f64>,
    pub(crate) rate: Option<f64>,
    pub(crate) angle: Option<f64>,
    pub(crate) radius: Option<f64>,
}

impl Segment {
    /// Builds a new [Segment], duration in seconds must be positive.
    pub fn new(kind: MotionType, duration: f64) -> Result<Self, InvalidValueError> {
        check_positive("trajectory.segment.time", duration)?;
        Ok(Self {
            kind,
            duration,
            acceleration: None,
            speed: None,
            rate: None,
            angle: None,
            radius: None,
        })
    }
    /// Copies and defines the acceleration (m/s²)
    pub fn with_acceleration(&self, acceleration: f64) -> Self {
        let mut s = *self;
        s.acceleration = Some(acceleration).filter(|v| v.is_finite());
        s
    }
    /// Copies and defines the target speed (m/s)
    pub fn with_speed(&self, speed: f64) -> Self {
        let mut s = *self;
        s.speed = Some(speed).filter(|v| v.is_finite());
        s
    }
    /// Copies and defines the turn rate (deg/s)
    pub fn with_rate(&self, rate: f64) -> Self {
        let mut s = *self;
        s.rate = Some(rate).filter(|v| v.is_finite());
        s
    }
    /// Copies and defines the turn angle (deg)
    pub fn with_angle(&self, angle: f64) -> Self {
        let mut s = *self;
        s.angle = Some(angle).filter(|v| v.is_finite());
        s
    }
    /// Copies and defines the turn radius (m)
    pub fn with_radius(&self, radius: f64) -> Self {
        let mut s = *self;
        s.radius = Some(radius).filter(|v| v.is_finite());
        s
    }
    pub fn kind(&self) -> MotionType {
        self.kind
    }
    /// Duration, in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }
    pub fn acceleration(&self) -> Option<f64> {
        self.acceleration
    }
    pub fn speed(&self) -> Option<f64> {
        self.speed
    }
    pub fn rate(&self) -> Option<f64> {
        self.rate
    }
    pub fn angle(&self) -> Option<f64> {
        self.angle
    }
    pub fn radius(&self) -> Option<f64> {
        self.radius
    }
}

/// Receiver trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub(crate) name: String,
    pub(crate) mode: TrajectoryMode,
    pub(crate) position: Position,
    pub(crate) velocity: Velocity,
    pub(crate) segments: Vec<Segment>,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self {
            name: "Default Trajectory".to_string(),
            mode: TrajectoryMode::default(),
            position: Position::default(),
            velocity: Velocity::default(),
            segments: Vec::new(),
        }
    }
}

impl Trajectory {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn mode(&self) -> TrajectoryMode {
        self.mode
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }
    /// Segments, in order of execution
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
    /// Total duration of the segment sequence, in seconds
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }
    /// Static trajectories are always complete, dynamic trajectories
    /// need at least one segment, all of them with positive durations.
    pub fn is_complete(&self) -> bool {
        match self.mode {
            TrajectoryMode::Static => true,
            TrajectoryMode::Dynamic => {
                !self.segments.is_empty() && self.segments.iter().all(|s| s.duration > 0.0)
            },
        }
    }
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
    pub fn set_mode(&mut self, mode: TrajectoryMode) {
        self.mode = mode;
    }
    pub fn set_position(&mut self, position: Position) -> Result<(), InvalidValueError> {
        position.validate()?;
        self.position = position;
        Ok(())
    }
    pub fn set_velocity(&mut self, velocity: Velocity) -> Result<(), InvalidValueError> {
        velocity.validate()?;
        self.velocity = velocity;
        Ok(())
    }
    /// Appends a segment
    pub fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }
    /// Inserts a segment at given position
    pub fn insert_segment(&mut self, index: usize, segment: Segment) -> Result<(), InvalidValueError> {
        if index > self.segments.len() {
            return Err(InvalidValueError::new(
                "trajectory.trajectoryList",
                "index out of bounds",
            ));
        }
        self.segments.insert(index, segment);
        Ok(())
    }
    /// Removes a segment, returns it if it existed
    pub fn remove_segment(&mut self, index: usize) -> Option<Segment> {
        if index < self.segments.len() {
            Some(self.segments.remove(index))
        } else {
            None
        }
    }
    /// Redefines the duration of an existing segment
    pub fn set_segment_duration(&mut self, index: usize, duration: f64) -> Result<(), InvalidValueError> {
        check_positive("trajectory.segment.time", duration)?;
        let segment = self.segments.get_mut(index).ok_or_else(|| {
            InvalidValueError::new("trajectory.trajectoryList", "index out of bounds")
        })?;
        segment.duration = duration;
        Ok(())
    }
    pub fn clear_segments(&mut self) {
        self.segments.clear();
    }
}
