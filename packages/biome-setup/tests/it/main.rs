//! Integration tests for biome-setup.
//!
//! Each test builds a throwaway project in a temporary directory, runs the
//! setup against it (in-process, or through the compiled binary for the CLI
//! tests), and inspects the files left behind.

mod vscode;

use std::fs;
use std::path::{Path, PathBuf};

use bon::bon;
use biome_setup::setup::{self, Environment, Options, Outcome};
use serde_json::{Value, json};
use tempfile::TempDir;
use xshell::{Shell, cmd};

/// The dependency entry most tests declare.
pub fn dev_dependency() -> Value {
    json!({ "@qodestack/biome-config": "^1.0.0" })
}

/// A scratch JavaScript project.
pub struct TestProject {
    dir: TempDir,
}

#[bon]
impl TestProject {
    /// Create a project. By default it has a manifest with empty dependency
    /// maps and an empty `scripts` object, and nothing else.
    #[builder]
    pub fn new(
        #[builder(default = json!({}))] dependencies: Value,
        #[builder(default = json!({}))] dev_dependencies: Value,
        #[builder(default = json!({}))] scripts: Value,
        #[builder(default)] no_scripts_field: bool,
        #[builder(default)] no_manifest: bool,
        #[builder(default)] malformed_manifest: bool,
        #[builder(default)] has_biome_json: bool,
        #[builder(default)] has_biome_jsonc: bool,
        vscode_settings: Option<Value>,
        #[builder(into)] vscode_settings_raw: Option<String>,
        #[builder(default)] vscode_dir_only: bool,
        #[builder(into)] biome_stub: Option<String>,
    ) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let root = dir.path();

        if malformed_manifest {
            fs::write(root.join("package.json"), "{invalid json").expect("write manifest");
        } else if !no_manifest {
            let mut manifest = json!({
                "name": "test-project",
                "version": "1.0.0",
                "dependencies": dependencies,
                "devDependencies": dev_dependencies,
            });
            if !no_scripts_field {
                manifest["scripts"] = scripts;
            }
            let content = serde_json::to_string_pretty(&manifest).expect("serialize manifest");
            fs::write(root.join("package.json"), content).expect("write manifest");
        }

        if has_biome_json {
            fs::write(root.join("biome.json"), "{}").expect("write biome.json");
        }
        if has_biome_jsonc {
            fs::write(root.join("biome.jsonc"), "{}").expect("write biome.jsonc");
        }

        if vscode_settings.is_some() || vscode_settings_raw.is_some() || vscode_dir_only {
            let vscode = root.join(".vscode");
            fs::create_dir_all(&vscode).expect("create .vscode");
            let raw = vscode_settings_raw.or_else(|| {
                vscode_settings.map(|settings| {
                    serde_json::to_string_pretty(&settings).expect("serialize settings")
                })
            });
            if let Some(raw) = raw {
                fs::write(vscode.join("settings.json"), raw).expect("write settings");
            }
        }

        if let Some(script) = biome_stub {
            install_stub(root, &script);
        }

        Self { dir }
    }
}

impl TestProject {
    /// The project root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run the setup in-process.
    pub fn run(&self, options: Options) -> Outcome {
        let env = Environment::builder().root(self.path()).build();
        setup::run(&env, &options).expect("run setup")
    }

    /// Run the compiled binary in the project and return
    /// (exit_code, stdout, stderr).
    pub fn run_cli(&self, args: &[&str]) -> (i32, String, String) {
        let sh = Shell::new().expect("create shell");
        sh.change_dir(self.path());
        let bin = PathBuf::from(env!("CARGO_BIN_EXE_biome-setup"));
        let output = cmd!(sh, "{bin} {args...}")
            .ignore_status()
            .quiet()
            .output()
            .expect("run biome-setup");

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        (exit_code, stdout, stderr)
    }

    /// Whether `path` exists inside the project.
    pub fn exists(&self, path: &str) -> bool {
        self.path().join(path).exists()
    }

    /// Read `path` inside the project.
    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.path().join(path)).expect("read project file")
    }

    /// Read and parse `path` inside the project as JSON.
    pub fn read_json(&self, path: &str) -> Value {
        serde_json::from_str(&self.read(path)).expect("parse project file")
    }

    /// Every file in the project, relative to the root, sorted.
    pub fn files(&self) -> Vec<String> {
        fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
            for entry in fs::read_dir(dir).expect("read dir").flatten() {
                let path = entry.path();
                if path.is_dir() {
                    walk(root, &path, out);
                } else if let Ok(relative) = path.strip_prefix(root) {
                    out.push(relative.display().to_string());
                }
            }
        }

        let mut files = Vec::new();
        walk(self.path(), self.path(), &mut files);
        files.sort();
        files
    }
}

/// Install an executable `node_modules/.bin/biome` running `script`.
#[cfg(unix)]
fn install_stub(root: &Path, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let bin = root.join("node_modules").join(".bin");
    fs::create_dir_all(&bin).expect("create node_modules/.bin");
    let path = bin.join("biome");
    fs::write(&path, format!("#!/bin/sh\n{script}\n")).expect("write biome stub");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod biome stub");
}

#[cfg(not(unix))]
fn install_stub(_root: &Path, _script: &str) {
    panic!("biome stubs are shell scripts and need a unix host");
}
