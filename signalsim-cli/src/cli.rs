use std::{fs::read_to_string, path::PathBuf, str::FromStr};

use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};
use hifitime::Epoch;
use itertools::Itertools;
use strum::IntoEnumIterator;

use signalsim_config::prelude::{Template, ValidationSettings};

use crate::Error;

pub struct Cli {
    /// Arguments passed by user
    pub matches: ArgMatches,
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: Self::command().get_matches(),
        }
    }

    fn command() -> Command {
        let templates = Template::iter()
            .map(|t| {
                let name = t.to_string().to_lowercase();
                let alias = name.split(' ').next().unwrap_or_default().to_string();
                format!("- {}: {}", alias, t.description())
            })
            .join("\n");
        Command::new("signalsim-cli")
                    .version(env!("CARGO_PKG_VERSION"))
                    .about("GNSS signal simulator configuration checker")
                    .long_about("signalsim-cli loads a signal generator configuration
and the navigation files it relies on, then reports
every inconsistency, section by section.")
                    .arg_required_else_help(true)
                    .color(ColorChoice::Always)
                    .next_help_heading("Configuration")
                    .arg(Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .required_unless_present("template")
                        .conflicts_with("template")
                        .help("Load a JSON configuration document. Relative ephemeris sources are resolved against its directory."))
                    .arg(Arg::new("template")
                        .short('t')
                        .long("template")
                        .value_name("NAME")
                        .required_unless_present("config")
                        .help("Start from a built-in template. See --help for more information.")
                        .long_help(format!("Start from a built-in template, rather than a document.
Templates never define the start time, you may use --start.
Available templates:
{}", templates)))
                    .arg(Arg::new("nav")
                        .short('n')
                        .long("nav")
                        .value_name("FILE")
                        .action(ArgAction::Append)
                        .help("Load a navigation (ephemeris) RINEX file. Use as many as you need.
Gzip compressed files (.gz) are supported."))
                    .next_help_heading("Edition")
                    .arg(Arg::new("start")
                        .long("start")
                        .value_name("DATETIME")
                        .help("Define the simulation start, for example \"2024-01-01T12:00:00 UTC\"."))
                    .arg(Arg::new("duration")
                        .long("duration")
                        .value_name("SECONDS")
                        .value_parser(value_parser!(f64))
                        .help("Define the simulation duration, in seconds."))
                    .arg(Arg::new("fix")
                        .long("fix")
                        .action(ArgAction::SetTrue)
                        .help("Apply every automatic remediation before reporting."))
                    .arg(Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the resulting configuration document."))
                    .next_help_heading("Validation")
                    .arg(Arg::new("settings")
                        .short('s')
                        .long("settings")
                        .value_name("FILE")
                        .help("Custom plausibility bounds, as JSON. See --help for more information.")
                        .long_help("Custom plausibility bounds, as JSON, for example:
{
    \"min_cn0\": 30.0,
    \"max_cn0\": 55.0,
    \"max_noise_floor\": -110.0
}
Omitted fields keep their default value."))
                    .arg(Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .action(ArgAction::SetTrue)
                        .help("Only report blocking findings."))
    }

    /// Configuration document to load
    pub fn config(&self) -> Option<&PathBuf> {
        self.matches.get_one::<PathBuf>("config")
    }

    /// Template to start from. Unknown templates are reported and ignored.
    pub fn template(&self) -> Option<Template> {
        let name = self.matches.get_one::<String>("template")?;
        match Template::from_str(name) {
            Ok(template) => Some(template),
            Err(_) => {
                error!("unknown template \"{}\"", name);
                None
            },
        }
    }

    /// Navigation files passed with -n
    pub fn nav_files(&self) -> Vec<&String> {
        if let Some(fp) = self.matches.get_many::<String>("nav") {
            fp.collect()
        } else {
            Vec::new()
        }
    }

    /// Simulation start, if defined by user
    pub fn start(&self) -> Result<Option<Epoch>, Error> {
        let datetime = match self.matches.get_one::<String>("start") {
            Some(datetime) => datetime,
            None => return Ok(None),
        };
        let t = Epoch::from_str(datetime).map_err(|e| {
            error!("invalid start time \"{}\": {}", datetime, e);
            Error::InvalidStart(datetime.to_string())
        })?;
        Ok(Some(t))
    }

    /// Simulation duration (s), if defined by user
    pub fn duration(&self) -> Option<f64> {
        self.matches.get_one::<f64>("duration").copied()
    }

    /// True when --fix is active
    pub fn fix(&self) -> bool {
        self.matches.get_flag("fix")
    }

    /// Output document, if requested
    pub fn output(&self) -> Option<&PathBuf> {
        self.matches.get_one::<PathBuf>("output")
    }

    /// True when -q (quiet) option is active
    pub fn quiet(&self) -> bool {
        self.matches.get_flag("quiet")
    }

    /// Plausibility bounds. Falls back to defaults when
    /// the custom settings cannot be interpreted.
    pub fn settings(&self) -> ValidationSettings {
        let fp = match self.matches.get_one::<String>("settings") {
            Some(fp) => fp,
            None => return ValidationSettings::default(),
        };
        let content = match read_to_string(fp) {
            Ok(content) => content,
            Err(e) => {
                error!("failed to read settings \"{}\": {}", fp, e);
                return ValidationSettings::default();
            },
        };
        match serde_json::from_str::<ValidationSettings>(&content) {
            Ok(settings) => {
                info!("using custom settings: {:?}", settings);
                settings
            },
            Err(e) => {
                error!("failed to parse settings: {}", e);
                ValidationSettings::default()
            },
        }
    }
}
