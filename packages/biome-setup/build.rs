//! Build script for biome-setup that generates version information.
//!
//! The version is `git describe --always --tags --dirty=-dirty` when the crate
//! is built from a git checkout, and the crate version otherwise.

use std::env;
use std::iter;
use std::process::Command;

fn main() {
    let version = git_describe().unwrap_or_else(|error| {
        println!("cargo:warning=using crate version: {error}");
        env::var("CARGO_PKG_VERSION").unwrap_or_default()
    });
    println!("cargo:rustc-env=BIOME_SETUP_VERSION={version}");
}

fn git_describe() -> Result<String, String> {
    run("git", &["describe", "--always", "--tags", "--dirty=-dirty"])
}

fn run(prog: &str, argv: &[&str]) -> Result<String, String> {
    let invocation = iter::once(prog)
        .chain(argv.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");

    let output = Command::new(prog)
        .args(argv)
        .output()
        .map_err(|e| format!("failed to execute `{invocation}`: {e}"))?;
    if !output.status.success() {
        return Err(format!("`{invocation}` exited with non-zero status"));
    }

    let output = String::from_utf8(output.stdout)
        .map_err(|e| format!("could not parse output of `{invocation}` as UTF-8: {e}"))?;
    match output.trim_end() {
        "" => Err(format!("`{invocation}` printed nothing")),
        version => Ok(version.to_string()),
    }
}
