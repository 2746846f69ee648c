#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

pub mod config;
pub mod ephemeris;
pub mod registry;
pub mod session;
pub mod validation;
pub mod version;
pub mod window;
pub mod workflow;

mod epoch;
mod error;

pub use error::{Error, InvalidValueError, SchemaError};

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        config::{
            BasicInfo, ConfigurationDocument, EphemerisKind, EphemerisSource, EphemerisSources,
            Masking, MotionType, OutputFormat, OutputKind, OutputSettings, Position, Power,
            Segment, Signal, SignalSelection, Template, TimeConfig, TimeType, Trajectory,
            TrajectoryMode, Velocity,
        },
        ephemeris::{EphemerisFile, FailureKind, ParseStatus, ParsingError},
        error::{Error, InvalidValueError, SchemaError},
        registry::{ConsolidatedWindow, EphemerisRegistry, RejectedFile},
        session::Session,
        validation::{
            evaluate, Finding, Rule, Section, Severity, SuggestedAction, Summary,
            ValidationSettings,
        },
        version::Version,
        window::TimeWindow,
        workflow::{Step, StepStatus, WorkflowObserver},
    };

    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
}
