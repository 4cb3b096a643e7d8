//! Formatting written files with the project's own Biome binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use derive_more::Display;
use itertools::Itertools;
use tracing::instrument;

/// The Biome binary installed by the project's package manager.
pub fn biome_binary(root: &Path) -> PathBuf {
    let bin = root.join("node_modules").join(".bin");
    if cfg!(windows) {
        bin.join("biome.cmd")
    } else {
        bin.join("biome")
    }
}

/// What happened when formatting.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Formatted {
    /// Biome formatted the files.
    #[display("formatted {}", _0.iter().map(|p| p.display()).join(", "))]
    Done(Vec<PathBuf>),

    /// There was nothing to format.
    #[display("nothing to format")]
    NothingWritten,

    /// The project doesn't have Biome installed locally.
    #[display("{} not found", _0.display())]
    MissingBinary(PathBuf),

    /// Biome couldn't be run or reported a failure.
    #[display("biome format failed: {_0}")]
    Failed(String),
}

/// Run `biome format --write` over `files` inside `root`.
///
/// Never fails the run: the files are valid as written, formatting only makes
/// them match the project's style.
#[instrument]
pub fn run(root: &Path, files: &[PathBuf]) -> Formatted {
    if files.is_empty() {
        return Formatted::NothingWritten;
    }

    let binary = biome_binary(root);
    if !binary.is_file() {
        tracing::debug!(?binary, "biome binary not installed");
        return Formatted::MissingBinary(binary);
    }

    let relative = files
        .iter()
        .map(|file| file.strip_prefix(root).unwrap_or(file.as_path()))
        .collect_vec();
    tracing::debug!(?binary, ?relative, "run biome format");

    let output = Command::new(&binary)
        .args(["format", "--write"])
        .args(&relative)
        .current_dir(root)
        .stdin(Stdio::null())
        .output();

    match output {
        Ok(output) if output.status.success() => Formatted::Done(files.to_vec()),
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(status = ?output.status, %stderr, "biome format failed");
            match stderr.trim() {
                "" => Formatted::Failed(output.status.to_string()),
                stderr => Formatted::Failed(format!("{}: {stderr}", output.status)),
            }
        }
        Err(error) => {
            tracing::warn!(?error, ?binary, "spawn biome");
            Formatted::Failed(error.to_string())
        }
    }
}
