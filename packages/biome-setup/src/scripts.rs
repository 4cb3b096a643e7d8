//! Adding Biome scripts to `package.json`.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde_json::Value;
use tracing::instrument;

use crate::project::Manifest;

/// Scripts added to the manifest, in the order they're written.
pub const SCRIPTS: [(&str, &str); 6] = [
    ("check", "biome check"),
    ("check:fix", "biome check --write ."),
    ("lint", "biome lint"),
    ("lint:fix", "biome lint --write ."),
    ("format", "biome format"),
    ("format:fix", "biome format --write ."),
];

/// Overlay [`SCRIPTS`] on the manifest's existing scripts.
///
/// Scripts with other names are kept; a script that shares a name with one of
/// ours is replaced.
pub fn inject(manifest: &mut Manifest) {
    let mut scripts = manifest.scripts().cloned().unwrap_or_default();
    for (name, command) in SCRIPTS {
        if let Some(previous) = scripts.insert(String::from(name), Value::from(command)) {
            tracing::debug!(name, ?previous, "replaced script");
        }
    }
    manifest.set_scripts(scripts);
}

/// Inject the scripts and write the manifest back to `path`.
#[instrument(skip(manifest))]
pub fn write(path: &Path, manifest: &mut Manifest) -> Result<()> {
    inject(manifest);
    let content = manifest.to_pretty_json()?;
    fs::write(path, content).with_context(|| format!("write {path:?}"))?;
    tracing::debug!(?path, scripts = ?manifest.scripts(), "wrote manifest");
    Ok(())
}
