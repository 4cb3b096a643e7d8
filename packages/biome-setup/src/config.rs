//! Writing the project's Biome config file.

use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use color_eyre::eyre::{Context, Result};
use derive_more::Display;
use serde::Serialize;
use tracing::instrument;

use crate::project::{Existing, REQUIRED_DEPENDENCY};

/// The schema the generated config declares.
pub const SCHEMA_URL: &str = "https://biomejs.dev/schemas/2.0.0/schema.json";

/// Files Biome should process in the target project.
pub const INCLUDES: [&str; 4] = ["**", "!node_modules/**", "!dist/**", "!*.lock"];

/// The two syntaxes Biome accepts for its config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ConfigFile {
    /// Strict JSON: `biome.json`.
    #[display("biome.json")]
    Json,

    /// JSON with comments: `biome.jsonc`.
    #[display("biome.jsonc")]
    Jsonc,
}

impl ConfigFile {
    /// The file name on disk.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "biome.json",
            Self::Jsonc => "biome.jsonc",
        }
    }

    /// The other syntax.
    pub fn other(self) -> Self {
        match self {
            Self::Json => Self::Jsonc,
            Self::Jsonc => Self::Json,
        }
    }
}

/// The published rule set the generated config extends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Profile {
    /// Rules for React projects.
    #[default]
    React,

    /// Framework-agnostic rules.
    Vanilla,
}

impl Profile {
    /// The identifier used in the config's `extends` list.
    pub fn identifier(self) -> String {
        match self {
            Self::React => format!("{REQUIRED_DEPENDENCY}/react"),
            Self::Vanilla => String::from(REQUIRED_DEPENDENCY),
        }
    }
}

/// The contents of a generated `biome.json`/`biome.jsonc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Builder)]
pub struct Descriptor {
    /// The JSON schema reference for editor completion.
    #[serde(rename = "$schema")]
    #[builder(into, default = SCHEMA_URL)]
    pub schema: String,

    /// Configs this one extends.
    #[builder(with = |profile: Profile| vec![profile.identifier()])]
    pub extends: Vec<String>,

    /// Which files Biome processes.
    #[builder(default)]
    pub files: Files,
}

/// The `files` section of a generated config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Files {
    /// Globs of files to include; `!` negates.
    pub includes: Vec<String>,
}

impl Default for Files {
    fn default() -> Self {
        Self {
            includes: INCLUDES.into_iter().map(String::from).collect(),
        }
    }
}

impl Descriptor {
    /// Render the descriptor as pretty JSON with a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map(|json| json + "\n")
            .context("serialize config")
    }
}

/// What to do about the config file, given what's already on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing is in the way: write the requested file.
    Write(ConfigFile),

    /// The other syntax exists but we write the requested file anyway.
    ///
    /// Biome prefers `biome.json` when both exist, so the user needs to know
    /// the new `biome.jsonc` is shadowed.
    WriteDespite { target: ConfigFile, existing: ConfigFile },

    /// The other syntax exists and takes precedence; leave it alone.
    SkipFor { target: ConfigFile, existing: ConfigFile },

    /// The requested file already exists; the project is already set up.
    AlreadyConfigured(ConfigFile),
}

impl Decision {
    /// Decide what to do for `target` given the files that `existing` reports.
    ///
    /// Only asking for `biome.jsonc` overrides an existing file of the other
    /// syntax; an existing `biome.jsonc` blocks writing `biome.json`.
    pub fn plan(target: ConfigFile, existing: Existing) -> Self {
        let other = target.other();
        match (existing.contains(target), existing.contains(other), target) {
            (true, _, _) => Self::AlreadyConfigured(target),
            (false, false, _) => Self::Write(target),
            (false, true, ConfigFile::Jsonc) => Self::WriteDespite {
                target,
                existing: other,
            },
            (false, true, ConfigFile::Json) => Self::SkipFor {
                target,
                existing: other,
            },
        }
    }

    /// The file this decision writes, if any.
    pub fn writes(self) -> Option<ConfigFile> {
        match self {
            Self::Write(file) | Self::WriteDespite { target: file, .. } => Some(file),
            Self::SkipFor { .. } | Self::AlreadyConfigured(_) => None,
        }
    }
}

/// Write `descriptor` to `file` in `root`, returning the path written.
#[instrument(skip(descriptor))]
pub fn write(root: &Path, file: ConfigFile, descriptor: &Descriptor) -> Result<PathBuf> {
    let path = root.join(file.file_name());
    let content = descriptor.to_pretty_json()?;
    fs::write(&path, content).with_context(|| format!("write {path:?}"))?;
    tracing::debug!(?path, ?descriptor, "wrote config file");
    Ok(path)
}
