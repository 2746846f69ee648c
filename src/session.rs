//! Configuration session: one document, one ephemeris registry.
//!
//! Every mutation goes through the [Session], which re-evaluates the
//! complete rule set and notifies the registered [WorkflowObserver]s.
use std::path::{Path, PathBuf};

#[cfg(feature = "log")]
use log::{debug, info};

use crate::{
    config::{ConfigurationDocument, EphemerisKind, EphemerisSource, EphemerisSources, Template},
    ephemeris::EphemerisFile,
    error::{Error, InvalidValueError, SchemaError},
    registry::{EphemerisRegistry, RejectedFile},
    validation::{evaluate, Finding, SuggestedAction, Summary, ValidationSettings},
    workflow::{self, Step, StepStatus, WorkflowObserver},
};

/// Configuration session
pub struct Session {
    document: ConfigurationDocument,
    registry: EphemerisRegistry,
    settings: ValidationSettings,
    /// Directory relative source names are resolved against
    base: PathBuf,
    findings: Vec<Finding>,
    observers: Vec<Box<dyn WorkflowObserver>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ValidationSettings::default())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("document", &self.document)
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .field("findings", &self.findings)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Session {
    /// Creates a session around a default document
    pub fn new(settings: ValidationSettings) -> Self {
        let mut s = Self {
            document: ConfigurationDocument::default(),
            registry: EphemerisRegistry::default(),
            settings,
            base: PathBuf::new(),
            findings: Vec::new(),
            observers: Vec::new(),
        };
        s.refresh();
        s
    }

    pub fn document(&self) -> &ConfigurationDocument {
        &self.document
    }
    pub fn registry(&self) -> &EphemerisRegistry {
        &self.registry
    }
    pub fn settings(&self) -> &ValidationSettings {
        &self.settings
    }
    /// Findings of the latest evaluation
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }
    pub fn summary(&self) -> Summary {
        Summary::new(&self.findings)
    }
    /// Status of every workflow step
    pub fn steps(&self) -> Vec<StepStatus> {
        workflow::steps(&self.findings)
    }
    /// Completion, in percent
    pub fn progress(&self) -> u8 {
        workflow::progress_percentage(&self.document, &self.findings)
    }
    pub fn can_proceed_to(&self, step: Step) -> bool {
        workflow::can_proceed_to(step, &self.findings)
    }
    pub fn next_required_step(&self) -> Option<Step> {
        workflow::next_required_step(&self.document, &self.findings)
    }
    pub fn is_complete(&self) -> bool {
        workflow::is_complete(&self.document, &self.findings)
    }

    /// Registers an observer, immediately notified with the current state
    pub fn subscribe(&mut self, mut observer: Box<dyn WorkflowObserver>) {
        observer.notify(&self.findings, &self.steps(), self.progress());
        self.observers.push(observer);
    }

    /// Redefines the plausibility bounds
    pub fn set_settings(&mut self, settings: ValidationSettings) {
        self.settings = settings;
        self.refresh();
    }

    /// Re-evaluates the rule set and notifies the observers
    pub fn refresh(&mut self) {
        self.findings = evaluate(&self.document, &self.registry, &self.settings);
        let steps = self.steps();
        let progress = self.progress();

        #[cfg(feature = "log")]
        debug!("{} - progress {}%", self.summary(), progress);

        for observer in self.observers.iter_mut() {
            observer.notify(&self.findings, &steps, progress);
        }
    }

    /* Source name of a path, relative to the base directory when possible */
    fn source_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.base)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /* Path a source name refers to */
    fn resolve(&self, name: &str) -> PathBuf {
        self.base.join(name)
    }

    /// Loads a navigation file, and references it in the document
    /// when it could be parsed. A rejected file is dereferenced.
    pub fn add_ephemeris<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RejectedFile> {
        let path = path.as_ref();
        let name = self.source_name(path);
        let outcome = self.registry.add(path).map(|_| ());
        match &outcome {
            Ok(_) => self.document.ephemeris.add(EphemerisSource::rinex(&name)),
            Err(_) => {
                self.document.ephemeris.remove(&name);
            },
        }
        self.refresh();
        outcome
    }

    /// Inserts an already parsed navigation file
    pub fn insert_ephemeris(&mut self, file: EphemerisFile) {
        let name = self.source_name(file.path());
        self.registry.insert(file);
        self.document.ephemeris.add(EphemerisSource::rinex(&name));
        self.refresh();
    }

    /// Unloads a navigation file and dereferences it.
    /// Returns true if the file was known.
    pub fn remove_ephemeris<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        let removed = self.registry.remove(path);
        let names = self
            .document
            .ephemeris
            .iter()
            .filter(|s| s.name == path.display().to_string() || self.resolve(&s.name) == path)
            .map(|s| s.name.clone())
            .collect::<Vec<_>>();
        for name in names.iter() {
            self.document.ephemeris.remove(name);
        }
        self.refresh();
        removed || !names.is_empty()
    }

    /// Edits the document. The edit applies to a copy, which only
    /// replaces the document when the whole edit succeeded.
    pub fn edit<F>(&mut self, edit: F) -> Result<(), InvalidValueError>
    where
        F: FnOnce(&mut ConfigurationDocument) -> Result<(), InvalidValueError>,
    {
        let mut document = self.document.clone();
        edit(&mut document)?;
        self.document = document;
        self.refresh();
        Ok(())
    }

    /* Replaces the document and reloads its RINEX sources */
    fn replace_document(&mut self, document: ConfigurationDocument, base: PathBuf) {
        self.document = document;
        self.base = base;
        self.registry.clear();

        let paths = self
            .document
            .ephemeris
            .iter()
            .filter(|s| s.kind == EphemerisKind::RINEX)
            .map(|s| self.resolve(&s.name))
            .collect::<Vec<_>>();

        for path in paths {
            // rejections are retained by the registry and reported on evaluation
            let _ = self.registry.add(&path);
        }

        #[cfg(feature = "log")]
        info!(
            "document loaded: {} ephemeris file(s), {} rejected",
            self.registry.len(),
            self.registry.rejected().len()
        );

        self.refresh();
    }

    /// Loads a JSON document. Relative ephemeris sources are
    /// resolved against the working directory. On failure,
    /// the current document is left untouched.
    pub fn load_json(&mut self, content: &str) -> Result<(), SchemaError> {
        let document = ConfigurationDocument::from_json_str(content)?;
        self.replace_document(document, PathBuf::new());
        Ok(())
    }

    /// Loads a JSON document file. Relative ephemeris sources are
    /// resolved against the directory of the document.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let document = ConfigurationDocument::load(path)?;
        let base = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();
        self.replace_document(document, base);
        Ok(())
    }

    /// Writes the current document
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        self.document.save(path)
    }

    /// Replaces the document with a built-in template.
    /// Loaded navigation files remain referenced.
    pub fn load_template(&mut self, template: Template) {
        let mut document = template.document();
        document.ephemeris = EphemerisSources(
            self.registry
                .files()
                .map(|f| EphemerisSource::rinex(self.source_name(f.path())))
                .collect(),
        );
        self.document = document;
        self.refresh();
    }

    /// Applies one suggested action. Returns false when the
    /// action requires user input.
    pub fn apply(&mut self, action: SuggestedAction) -> Result<bool, InvalidValueError> {
        let mut applied = false;
        self.edit(|doc| {
            applied = action.apply(doc)?;
            Ok(())
        })?;
        Ok(applied)
    }

    /// Applies every automatic remediation of the current findings,
    /// returns the number of actions applied.
    pub fn auto_fix(&mut self) -> Result<usize, InvalidValueError> {
        let mut actions = Vec::<SuggestedAction>::new();
        for action in self.findings.iter().filter_map(|f| f.suggestion) {
            if action.is_automatic() && !actions.contains(&action) {
                actions.push(action);
            }
        }
        let mut applied = 0;
        self.edit(|doc| {
            for action in actions.iter() {
                if action.apply(doc)? {
                    applied += 1;
                }
            }
            Ok(())
        })?;
        Ok(applied)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        config::{Signal, TrajectoryMode},
        validation::Rule,
    };
    use std::{cell::RefCell, rc::Rc};

    #[derive(Default)]
    struct Recorder {
        calls: usize,
        progress: u8,
    }

    struct Probe(Rc<RefCell<Recorder>>);

    impl WorkflowObserver for Probe {
        fn notify(&mut self, _: &[Finding], steps: &[StepStatus], progress: u8) {
            assert_eq!(steps.len(), 7);
            let mut r = self.0.borrow_mut();
            r.calls += 1;
            r.progress = progress;
        }
    }

    #[test]
    fn observers() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut session = Session::default();
        session.subscribe(Box::new(Probe(recorder.clone())));
        assert_eq!(recorder.borrow().calls, 1);

        session
            .edit(|doc| {
                doc.signals_mut().select(Signal::E1);
                Ok(())
            })
            .unwrap();
        assert_eq!(recorder.borrow().calls, 2);
        assert_eq!(recorder.borrow().progress, session.progress());
    }

    #[test]
    fn failed_edit_leaves_document_untouched() {
        let mut session = Session::default();
        let before = session.document().clone();
        let e = session
            .edit(|doc| {
                doc.basic_mut().set_description("half done");
                doc.time_mut().set_duration(-1.0)
            })
            .unwrap_err();
        assert_eq!(e.field, "time.duration");
        assert_eq!(session.document(), &before);

        assert!(session.load_json("{ not json").is_err());
        assert_eq!(session.document(), &before);
    }

    #[test]
    fn auto_fix() {
        let mut session = Session::default();
        session
            .edit(|doc| {
                doc.trajectory_mut().set_mode(TrajectoryMode::Dynamic);
                doc.output_mut().set_name("capture");
                Ok(())
            })
            .unwrap();

        let rules = session.findings().iter().map(|f| f.rule).collect::<Vec<_>>();
        assert_eq!(
            rules,
            vec![Rule::B1, Rule::E1, Rule::R1, Rule::S1, Rule::O3]
        );

        assert_eq!(session.auto_fix().unwrap(), 3);
        let rules = session.findings().iter().map(|f| f.rule).collect::<Vec<_>>();
        assert_eq!(rules, vec![Rule::B1, Rule::E1]);
        assert_eq!(session.document().output().name(), "capture.bin");

        assert!(!session.apply(SuggestedAction::LoadEphemeris).unwrap());
    }

    #[test]
    fn templates() {
        let mut session = Session::default();
        session.load_template(Template::Maritime);
        assert_eq!(
            session.document().basic().description(),
            "Maritime Navigation Scenario"
        );
        assert!(session.document().ephemeris().is_empty());
        assert!(!session.is_complete());
        assert_eq!(session.next_required_step(), Some(Step::Ephemeris));
    }
}
