//! Inspecting the target project before anything is written.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};
use derive_more::{Display, Error};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::config::ConfigFile;

/// The package the scaffolded configuration extends.
pub const REQUIRED_DEPENDENCY: &str = "@qodestack/biome-config";

/// The name of the package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Reasons a project can't be set up.
///
/// These aren't errors in the program sense: they describe the user's project,
/// and the CLI reports them and exits with status 1.
#[derive(Debug, Display, Error)]
pub enum Precondition {
    /// There's no manifest in the target directory.
    #[display("no package.json found at {path:?}")]
    MissingManifest { path: PathBuf },

    /// The manifest exists but couldn't be read.
    #[display("read {path:?}")]
    UnreadableManifest { path: PathBuf, source: io::Error },

    /// The manifest isn't a JSON object.
    #[display("parse {path:?}")]
    InvalidManifest {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Neither dependency map declares the required package.
    #[display("@qodestack/biome-config is not listed in dependencies or devDependencies")]
    MissingDependency,
}

/// The parsed `package.json` of the target project.
///
/// We keep the manifest as a JSON object rather than a typed struct so that
/// keys we don't know about survive a rewrite. With the `preserve_order`
/// feature of `serde_json` they also keep their position.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
    /// The package name, if declared.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// The package version, if declared.
    pub fn version(&self) -> Option<&str> {
        self.0.get("version").and_then(Value::as_str)
    }

    /// The `dependencies` map, if present and an object.
    pub fn dependencies(&self) -> Option<&Map<String, Value>> {
        self.0.get("dependencies").and_then(Value::as_object)
    }

    /// The `devDependencies` map, if present and an object.
    pub fn dev_dependencies(&self) -> Option<&Map<String, Value>> {
        self.0.get("devDependencies").and_then(Value::as_object)
    }

    /// Whether either dependency map declares `name`.
    ///
    /// Package managers always write a version range here, but hand-edited
    /// manifests sometimes hold an empty string or `false` to park an entry;
    /// those don't count.
    pub fn declares(&self, name: &str) -> bool {
        [self.dependencies(), self.dev_dependencies()]
            .into_iter()
            .flatten()
            .filter_map(|deps| deps.get(name))
            .any(is_truthy)
    }

    /// The `scripts` map, if present and an object.
    pub fn scripts(&self) -> Option<&Map<String, Value>> {
        self.0.get("scripts").and_then(Value::as_object)
    }

    /// Replace the `scripts` map.
    ///
    /// An existing `scripts` key keeps its position in the manifest.
    pub fn set_scripts(&mut self, scripts: Map<String, Value>) {
        self.0.insert(String::from("scripts"), Value::Object(scripts));
    }

    /// Render the manifest the way npm does: two-space indent and a trailing
    /// newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.0)
            .map(|json| json + "\n")
            .context("serialize manifest")
    }
}

impl From<Map<String, Value>> for Manifest {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl AsRef<Map<String, Value>> for Manifest {
    fn as_ref(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// A project that passed inspection.
#[derive(Debug, Clone)]
pub struct Project {
    /// The project root.
    pub root: PathBuf,

    /// The parsed manifest.
    pub manifest: Manifest,

    /// Which Biome config files are already on disk.
    pub existing: Existing,
}

impl Project {
    /// Inspect the project at `root`.
    ///
    /// The outer `Result` carries unexpected failures; the inner one tells
    /// whether the project is ready to be set up.
    #[instrument]
    pub fn inspect(root: &Path) -> Result<Result<Self, Precondition>> {
        let manifest = match read_manifest(root) {
            Ok(manifest) => manifest,
            Err(unmet) => return Ok(Err(unmet)),
        };
        tracing::debug!(name = ?manifest.name(), version = ?manifest.version(), "read manifest");

        if !manifest.declares(REQUIRED_DEPENDENCY) {
            return Ok(Err(Precondition::MissingDependency));
        }

        let existing = Existing::detect(root).context("detect existing config files")?;
        tracing::debug!(?existing, "detected config files");

        Ok(Ok(Self {
            root: root.to_path_buf(),
            manifest,
            existing,
        }))
    }

    /// The path to the project's manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }
}

/// Which Biome config files exist in a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Existing {
    /// `biome.json` exists.
    pub json: bool,

    /// `biome.jsonc` exists.
    pub jsonc: bool,
}

impl Existing {
    /// Look for both config files under `root`.
    pub fn detect(root: &Path) -> Result<Self> {
        let exists = |file: ConfigFile| {
            let path = root.join(file.file_name());
            path.try_exists()
                .with_context(|| format!("check for {path:?}"))
        };
        Ok(Self {
            json: exists(ConfigFile::Json)?,
            jsonc: exists(ConfigFile::Jsonc)?,
        })
    }

    /// Whether `file` is present.
    pub fn contains(self, file: ConfigFile) -> bool {
        match file {
            ConfigFile::Json => self.json,
            ConfigFile::Jsonc => self.jsonc,
        }
    }
}

fn read_manifest(root: &Path) -> Result<Manifest, Precondition> {
    let path = root.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Precondition::MissingManifest { path });
        }
        Err(source) => return Err(Precondition::UnreadableManifest { path, source }),
    };

    serde_json::from_str::<Map<String, Value>>(&content)
        .map(Manifest)
        .map_err(|source| Precondition::InvalidManifest { path, source })
}

/// JavaScript truthiness, which is what decides whether a dependency entry
/// counts as declared.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
