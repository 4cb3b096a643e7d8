//! Merging Biome's recommended settings into `.vscode/settings.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};
use serde_json::{Map, Value, json};
use tracing::instrument;

use crate::jsonc;

/// The editor settings directory, relative to the project root.
pub const SETTINGS_DIR: &str = ".vscode";

/// The editor settings file inside [`SETTINGS_DIR`].
pub const SETTINGS_FILE: &str = "settings.json";

/// The settings key whose nested object is merged rather than replaced.
pub const CODE_ACTIONS_ON_SAVE: &str = "editor.codeActionsOnSave";

/// Settings that hand formatting and linting over to Biome.
pub fn recommended() -> Map<String, Value> {
    [
        ("prettier.enable", json!(false)),
        ("eslint.enable", json!(false)),
        ("biome.enabled", json!(true)),
        ("editor.defaultFormatter", json!("biomejs.biome")),
        ("editor.formatOnSave", json!(true)),
    ]
    .into_iter()
    .map(|(key, value)| (String::from(key), value))
    .collect()
}

/// Code actions Biome should run on save.
pub fn recommended_code_actions() -> Map<String, Value> {
    Map::from_iter([
        (String::from("source.fixAll.biome"), json!("explicit")),
        (String::from("source.organizeImports.biome"), json!("explicit")),
    ])
}

/// Merge the recommended settings over `existing`.
///
/// Keys from `existing` come first and keep their order; recommended keys
/// overwrite them. The code actions map is merged key-wise instead: existing
/// actions survive alongside the recommended ones.
pub fn merge(mut existing: Map<String, Value>) -> Map<String, Value> {
    let mut code_actions = match existing.get(CODE_ACTIONS_ON_SAVE) {
        Some(Value::Object(actions)) => actions.clone(),
        _ => Map::new(),
    };
    code_actions.extend(recommended_code_actions());

    existing.extend(recommended());
    existing.insert(String::from(CODE_ACTIONS_ON_SAVE), Value::Object(code_actions));
    existing
}

/// Whether the settings file was new or already there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    /// There were no usable settings before.
    Created(PathBuf),

    /// Existing settings were merged and rewritten.
    Updated(PathBuf),
}

/// Write merged editor settings into the project at `root`.
///
/// Creates the settings directory if needed. An existing settings file that
/// can't be read or parsed is treated as empty: the user gets working Biome
/// settings either way, and their editor would have ignored a broken file.
#[instrument]
pub fn write(root: &Path) -> Result<Written> {
    let dir = root.join(SETTINGS_DIR);
    fs::create_dir_all(&dir).with_context(|| format!("create {dir:?}"))?;

    let path = dir.join(SETTINGS_FILE);
    let existing = read_existing(&path);
    tracing::debug!(?path, ?existing, "read existing settings");

    let settings = merge(existing.clone().unwrap_or_default());
    let content = serde_json::to_string_pretty(&settings)
        .map(|json| json + "\n")
        .context("serialize settings")?;
    fs::write(&path, content).with_context(|| format!("write {path:?}"))?;
    tracing::debug!(?settings, ?path, "wrote merged settings file");

    Ok(match existing {
        Some(_) => Written::Updated(path),
        None => Written::Created(path),
    })
}

/// Read an existing settings file, if there is a usable one.
fn read_existing(path: &Path) -> Option<Map<String, Value>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(error) => {
            tracing::warn!(?error, ?path, "read settings file");
            return None;
        }
    };

    match jsonc::parse(&content) {
        Ok(Value::Object(settings)) => Some(settings),
        Ok(other) => {
            tracing::warn!(?other, ?path, "settings file is not an object");
            None
        }
        Err(error) => {
            tracing::warn!(?error, ?path, "parse settings file");
            None
        }
    }
}
