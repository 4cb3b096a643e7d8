//! Running every setup step against a project.

use std::path::PathBuf;

use bon::Builder;
use color_eyre::eyre::{Context, Result};
use tracing::instrument;

use crate::{
    config::{self, ConfigFile, Decision, Descriptor, Profile},
    format::{self, Formatted},
    project::{Precondition, Project},
    scripts,
    settings::{self, Written},
};

/// Process state the run depends on, passed in rather than read ambiently.
#[derive(Debug, Clone, Builder)]
pub struct Environment {
    /// The project directory to set up.
    #[builder(into)]
    pub root: PathBuf,
}

/// Which steps to run and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct Options {
    /// The rule set the config file extends.
    #[builder(default)]
    pub profile: Profile,

    /// The config file syntax to write.
    #[builder(default = ConfigFile::Json)]
    pub config_file: ConfigFile,

    /// Write editor settings. Only takes effect with `include_vscode`.
    #[builder(default = true)]
    pub vscode: bool,

    /// Write editor settings. Only takes effect with `vscode`.
    #[builder(default = true)]
    pub include_vscode: bool,

    /// Write the Biome config file.
    #[builder(default = true)]
    pub include_biome_config: bool,

    /// Add Biome scripts to the manifest.
    #[builder(default = true)]
    pub include_scripts: bool,

    /// Format the written files with the project's Biome binary.
    #[builder(default = true)]
    pub format: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Options {
    /// Editor settings are written only when both toggles allow it; neither
    /// overrides the other.
    pub fn writes_editor_settings(&self) -> bool {
        self.vscode && self.include_vscode
    }
}

/// Something the run did that the user should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A config file was written.
    ConfigCreated(ConfigFile),

    /// A config file was written while one in the other syntax exists.
    ConfigShadowed {
        created: ConfigFile,
        existing: ConfigFile,
    },

    /// The config file was not written because one in the other syntax exists.
    ConfigSkipped {
        requested: ConfigFile,
        existing: ConfigFile,
    },

    /// Editor settings were written.
    Settings(Written),

    /// Scripts were added to the manifest.
    ScriptsAdded(PathBuf),

    /// The formatter ran, or didn't.
    Formatted(Formatted),
}

/// Everything a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Events in the order they happened.
    pub events: Vec<Event>,

    /// Files written, in the order they were written.
    pub written: Vec<PathBuf>,
}

impl Report {
    fn note(&mut self, event: Event) {
        tracing::debug!(?event, "setup event");
        self.events.push(event);
    }

    fn wrote(&mut self, event: Event, path: PathBuf) {
        self.note(event);
        self.written.push(path);
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Every enabled step ran.
    Completed(Report),

    /// A config file in the requested syntax already exists, so the project
    /// counts as set up and nothing was written.
    AlreadyConfigured(ConfigFile),

    /// The project can't be set up. Nothing was written.
    Unmet(Precondition),
}

impl Outcome {
    /// The process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Completed(_) | Self::AlreadyConfigured(_) => 0,
            Self::Unmet(_) => 1,
        }
    }
}

/// Set up the project described by `env`.
///
/// Steps run in a fixed order: inspect the project, write the config file,
/// merge editor settings, add scripts, then format what was written. Each step
/// after inspection is governed by its own toggle in `options`.
#[instrument]
pub fn run(env: &Environment, options: &Options) -> Result<Outcome> {
    let mut project = match Project::inspect(&env.root).context("inspect project")? {
        Ok(project) => project,
        Err(unmet) => {
            tracing::debug!(?unmet, "project is not ready");
            return Ok(Outcome::Unmet(unmet));
        }
    };
    let mut report = Report::default();

    if options.include_biome_config {
        let decision = Decision::plan(options.config_file, project.existing);
        tracing::debug!(?decision, "planned config file");
        match decision {
            Decision::AlreadyConfigured(file) => return Ok(Outcome::AlreadyConfigured(file)),
            Decision::SkipFor { target, existing } => report.note(Event::ConfigSkipped {
                requested: target,
                existing,
            }),
            Decision::WriteDespite { target, existing } => report.note(Event::ConfigShadowed {
                created: target,
                existing,
            }),
            Decision::Write(_) => {}
        }

        if let Some(file) = decision.writes() {
            let descriptor = Descriptor::builder().extends(options.profile).build();
            let path = config::write(&project.root, file, &descriptor)
                .context("write config file")?;
            report.wrote(Event::ConfigCreated(file), path);
        }
    }

    if options.writes_editor_settings() {
        let written = settings::write(&project.root).context("write editor settings")?;
        let path = match &written {
            Written::Created(path) | Written::Updated(path) => path.clone(),
        };
        report.wrote(Event::Settings(written), path);
    }

    if options.include_scripts {
        let path = project.manifest_path();
        scripts::write(&path, &mut project.manifest).context("add scripts")?;
        report.wrote(Event::ScriptsAdded(path.clone()), path);
    }

    if options.format {
        let formatted = format::run(&project.root, &report.written);
        report.note(Event::Formatted(formatted));
    }

    Ok(Outcome::Completed(report))
}
