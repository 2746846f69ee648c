//! Command line tool to qualify signal simulator configurations
//! against navigation (ephemeris) RINEX files.
//! Refer to README for command line arguments.

mod cli; // command line interface
mod report;

use cli::Cli;
use report::Tracker;

use signalsim_config::prelude::Session;

use env_logger::{Builder, Target};

#[macro_use]
extern crate log;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error")]
    StdioError(#[from] std::io::Error),
    #[error("configuration error")]
    ConfigError(#[from] signalsim_config::Error),
    #[error("invalid document")]
    SchemaError(#[from] signalsim_config::SchemaError),
    #[error("invalid value")]
    InvalidValue(#[from] signalsim_config::InvalidValueError),
    #[error("unknown template")]
    UnknownTemplate,
    #[error("invalid start time \"{0}\"")]
    InvalidStart(String),
    #[error("{0} blocking finding(s)")]
    Blocking(usize),
}

/*
 * Loads navigation files passed by User.
 * Rejected files are reported, they do not interrupt the session.
 */
fn load_navigation(cli: &Cli, session: &mut Session) {
    for fp in cli.nav_files() {
        match session.add_ephemeris(fp) {
            Ok(_) => info!("loaded \"{}\"", fp),
            Err(rejected) => warn!("{}", rejected),
        }
    }
}

/*
 * Applies edits passed by User
 */
fn apply_edits(cli: &Cli, session: &mut Session) -> Result<(), Error> {
    let (start, duration) = (cli.start()?, cli.duration());
    if start.is_none() && duration.is_none() {
        return Ok(());
    }
    session.edit(|doc| {
        if let Some(t) = start {
            doc.time_mut().set_start(t);
        }
        if let Some(seconds) = duration {
            doc.time_mut().set_duration(seconds)?;
        }
        Ok(())
    })?;
    Ok(())
}

pub fn main() -> Result<(), Error> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();
    cli.start()?;

    let mut session = Session::new(cli.settings());
    session.subscribe(Box::new(Tracker));

    match cli.config() {
        Some(path) => {
            session.load(path)?;
            info!("loaded configuration \"{}\"", path.display());
        },
        None => {
            let template = cli.template().ok_or(Error::UnknownTemplate)?;
            session.load_template(template);
            info!("using template \"{}\"", template);
        },
    }

    load_navigation(&cli, &mut session);
    apply_edits(&cli, &mut session)?;

    if cli.fix() {
        let applied = session.auto_fix()?;
        info!("{} automatic remediation(s) applied", applied);
    }

    report::print(&session, cli.quiet());

    if let Some(path) = cli.output() {
        session.save(path)?;
        info!("configuration written to \"{}\"", path.display());
    }

    let summary = session.summary();
    if summary.is_ready() {
        Ok(())
    } else {
        Err(Error::Blocking(summary.errors))
    }
}
