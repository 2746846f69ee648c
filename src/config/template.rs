use std::collections::BTreeSet;

use strum::{Display, EnumIter, EnumString};

use super::{
    BasicInfo, ConfigurationDocument, Masking, MotionType, OutputSettings, Position, Power,
    Segment, Signal, SignalSelection, TimeConfig, Trajectory, TrajectoryMode, Velocity,
};

/// Duration of the cruise segment and of the simulation, for moving templates (s)
const CRUISE_DURATION: f64 = 600.0;

/// Built-in scenario templates
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Template {
    #[strum(to_string = "Urban Navigation", serialize = "urban")]
    Urban,
    #[strum(to_string = "Rural Open Sky", serialize = "rural")]
    Rural,
    #[strum(to_string = "Aviation", serialize = "aviation")]
    Aviation,
    #[strum(to_string = "Maritime", serialize = "maritime")]
    Maritime,
    #[strum(to_string = "Testing", serialize = "testing")]
    Testing,
}

struct Scenario {
    description: &'static str,
    comment: &'static str,
    receiver: &'static str,
    position: (f64, f64, f64),
    speed: f64,
    course: f64,
    elevation_mask: f64,
    noise_floor: f64,
    elevation_adjust: bool,
    signals: &'static [Signal],
}

impl Template {
    fn scenario(&self) -> Scenario {
        match self {
            Self::Urban => Scenario {
                description: "Urban Navigation Scenario",
                comment: "Multi-constellation configuration for urban navigation with typical signal conditions",
                receiver: "Urban Vehicle",
                position: (37.7749, -122.4194, 50.0),
                speed: 15.0,
                course: 45.0,
                elevation_mask: 10.0,
                noise_floor: -170.0,
                elevation_adjust: false,
                signals: &[
                    Signal::L1CA,
                    Signal::L5,
                    Signal::E1,
                    Signal::E5a,
                    Signal::B1C,
                    Signal::B2a,
                ],
            },
            Self::Rural => Scenario {
                description: "Rural Open Sky Scenario",
                comment: "High-precision configuration for rural/open sky environments",
                receiver: "Rural Vehicle",
                position: (40.7128, -74.0060, 100.0),
                speed: 25.0,
                course: 0.0,
                elevation_mask: 5.0,
                noise_floor: -174.0,
                elevation_adjust: false,
                signals: &[
                    Signal::L1CA,
                    Signal::L5,
                    Signal::E1,
                    Signal::E5a,
                    Signal::B1C,
                    Signal::B2a,
                    Signal::G1,
                ],
            },
            Self::Aviation => Scenario {
                description: "Aviation Scenario",
                comment: "High-altitude aviation configuration",
                receiver: "Aircraft",
                position: (51.47, -0.4543, 10_000.0),
                speed: 250.0,
                course: 90.0,
                elevation_mask: 0.0,
                noise_floor: -174.0,
                elevation_adjust: true,
                signals: &[
                    Signal::L1CA,
                    Signal::L1C,
                    Signal::L5,
                    Signal::E1,
                    Signal::E5a,
                ],
            },
            Self::Maritime => Scenario {
                description: "Maritime Navigation Scenario",
                comment: "Marine navigation configuration with moderate dynamics",
                receiver: "Vessel",
                position: (35.6762, 139.6503, 0.0),
                speed: 10.0,
                course: 180.0,
                elevation_mask: 5.0,
                noise_floor: -172.0,
                elevation_adjust: false,
                signals: &[
                    Signal::L1CA,
                    Signal::L2C,
                    Signal::G1,
                    Signal::B1I,
                    Signal::E1,
                ],
            },
            Self::Testing => Scenario {
                description: "Testing and Validation Scenario",
                comment: "Minimal configuration for testing and validation purposes",
                receiver: "Test Scenario",
                position: (0.0, 0.0, 0.0),
                speed: 0.0,
                course: 0.0,
                elevation_mask: 5.0,
                noise_floor: -174.0,
                elevation_adjust: false,
                signals: &[Signal::L1CA],
            },
        }
    }

    /// Short description of the scenario
    pub fn description(&self) -> &'static str {
        self.scenario().description
    }

    /// Builds the [ConfigurationDocument] of this scenario.
    /// Start time and ephemeris are left to the caller.
    pub fn document(&self) -> ConfigurationDocument {
        let scenario = self.scenario();
        let (latitude, longitude, altitude) = scenario.position;

        // moving receivers cruise for the whole simulation
        let (mode, segments, duration) = if scenario.speed > 0.0 {
            let cruise = Segment {
                kind: MotionType::Const,
                duration: CRUISE_DURATION,
                acceleration: None,
                speed: None,
                rate: None,
                angle: None,
                radius: None,
            };
            (TrajectoryMode::Dynamic, vec![cruise], CRUISE_DURATION)
        } else {
            (TrajectoryMode::Static, Vec::new(), TimeConfig::default().duration)
        };

        ConfigurationDocument {
            basic: BasicInfo {
                description: scenario.description.to_string(),
                comment: scenario.comment.to_string(),
                ..Default::default()
            },
            time: TimeConfig {
                duration,
                ..Default::default()
            },
            trajectory: Trajectory {
                name: scenario.receiver.to_string(),
                mode,
                position: Position::Lla {
                    latitude,
                    longitude,
                    altitude,
                },
                velocity: Velocity::Scu {
                    speed: scenario.speed,
                    course: scenario.course,
                    up: 0.0,
                },
                segments,
            },
            signals: SignalSelection {
                selected: scenario.signals.iter().copied().collect::<BTreeSet<_>>(),
            },
            power: Power {
                noise_floor: scenario.noise_floor,
                elevation_adjust: scenario.elevation_adjust,
                ..Default::default()
            },
            masking: Masking {
                elevation_mask: scenario.elevation_mask,
                ..Default::default()
            },
            output: OutputSettings::default(),
            ..Default::default()
        }
    }
}
