//! Set up Biome in a JavaScript project.

use std::env;
use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use biome_setup::{
    config::{ConfigFile, Profile},
    format::Formatted,
    project::REQUIRED_DEPENDENCY,
    setup::{self, Environment, Event, Options, Outcome, Report},
    settings::Written,
};
use clap::Args;
use color_eyre::eyre::{Context, Result};
use color_print::{ceprintln, cprintln};
use tap::{Pipe, Tap};
use tracing::instrument;

/// Every toggle has a `--no-` form; when both are given the last one wins.
/// camelCase aliases are accepted for the flags of the npm CLI.
#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Directory of the project to set up.
    #[arg(short = 'C', long, default_value = ".")]
    pub dir: PathBuf,

    /// Extend the framework-agnostic rule set instead of the React one.
    #[arg(long, overrides_with_all = ["vanilla", "no_vanilla"])]
    pub vanilla: bool,

    #[arg(long, overrides_with_all = ["vanilla", "no_vanilla"], hide = true)]
    pub no_vanilla: bool,

    /// Write `biome.jsonc` instead of `biome.json`.
    #[arg(long, overrides_with_all = ["jsonc", "no_jsonc"])]
    pub jsonc: bool,

    #[arg(long, overrides_with_all = ["jsonc", "no_jsonc"], hide = true)]
    pub no_jsonc: bool,

    #[arg(long, overrides_with_all = ["vscode", "no_vscode"], hide = true)]
    pub vscode: bool,

    /// Don't write `.vscode/settings.json`.
    #[arg(long, overrides_with_all = ["vscode", "no_vscode"])]
    pub no_vscode: bool,

    #[arg(
        long = "include-vscode",
        alias = "includeVscode",
        overrides_with_all = ["include_vscode", "no_include_vscode"],
        hide = true
    )]
    pub include_vscode: bool,

    /// Don't write `.vscode/settings.json`.
    #[arg(
        long = "no-include-vscode",
        alias = "no-includeVscode",
        overrides_with_all = ["include_vscode", "no_include_vscode"]
    )]
    pub no_include_vscode: bool,

    #[arg(
        long = "include-biome-config",
        alias = "includeBiomeConfig",
        overrides_with_all = ["include_biome_config", "no_include_biome_config"],
        hide = true
    )]
    pub include_biome_config: bool,

    /// Don't write a Biome config file.
    #[arg(
        long = "no-include-biome-config",
        alias = "no-includeBiomeConfig",
        overrides_with_all = ["include_biome_config", "no_include_biome_config"]
    )]
    pub no_include_biome_config: bool,

    #[arg(
        long = "include-scripts",
        alias = "includeScripts",
        overrides_with_all = ["include_scripts", "no_include_scripts"],
        hide = true
    )]
    pub include_scripts: bool,

    /// Don't add Biome scripts to `package.json`.
    #[arg(
        long = "no-include-scripts",
        alias = "no-includeScripts",
        overrides_with_all = ["include_scripts", "no_include_scripts"]
    )]
    pub no_include_scripts: bool,

    #[arg(long, overrides_with_all = ["format", "no_format"], hide = true)]
    pub format: bool,

    /// Don't run the project's Biome binary over the written files.
    #[arg(long, overrides_with_all = ["format", "no_format"])]
    pub no_format: bool,
}

impl Config {
    /// Resolve the flag pairs into setup options.
    pub fn options(&self) -> Options {
        Options::builder()
            .profile(if self.vanilla {
                Profile::Vanilla
            } else {
                Profile::React
            })
            .config_file(if self.jsonc {
                ConfigFile::Jsonc
            } else {
                ConfigFile::Json
            })
            .vscode(!self.no_vscode)
            .include_vscode(!self.no_include_vscode)
            .include_biome_config(!self.no_include_biome_config)
            .include_scripts(!self.no_include_scripts)
            .format(!self.no_format)
            .build()
    }
}

#[instrument]
pub fn main(config: Config) -> Result<ExitCode> {
    let env = env::current_dir()
        .context("get current directory")?
        .join(&config.dir)
        .pipe(|root| Environment::builder().root(root).build());
    let options = config
        .options()
        .tap(|options| tracing::debug!(?env, ?options, "resolved options"));

    let outcome = setup::run(&env, &options)?;
    match &outcome {
        Outcome::Unmet(unmet) => {
            ceprintln!("Please first install <bold>{}</bold>", REQUIRED_DEPENDENCY);
            match unmet.source() {
                Some(source) => ceprintln!("<dim>{}: {}</dim>", unmet, source),
                None => ceprintln!("<dim>{}</dim>", unmet),
            }
        }
        Outcome::AlreadyConfigured(file) => {
            print_title();
            cprintln!("- <yellow>Skipping {} - file already exists</yellow>", file);
            println!();
        }
        Outcome::Completed(report) => {
            print_title();
            print_report(&env.root, report);
            println!();
            cprintln!("<bright-green>Biome setup complete!</bright-green>");
            println!("\"Reload Window\" in VS Code for Biome to take effect.");
            println!();
        }
    }

    Ok(ExitCode::from(outcome.exit_code()))
}

fn print_title() {
    cprintln!(
        "<bold><magenta>Biome Setup</magenta></bold> <dim>for {}</dim>",
        REQUIRED_DEPENDENCY
    );
    println!();
}

fn print_report(root: &Path, report: &Report) {
    let relative = |path: &Path| {
        path.strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string()
    };

    for event in &report.events {
        match event {
            Event::ConfigCreated(file) => cprintln!("- created <cyan>{}</cyan>", file),
            Event::ConfigShadowed { created, existing } => cprintln!(
                "- <yellow>Warning: {} already exists and takes precedence over {}</yellow>",
                existing,
                created
            ),
            Event::ConfigSkipped { requested, existing } => cprintln!(
                "- <yellow>Skipping {} - {} already exists</yellow>",
                requested,
                existing
            ),
            Event::Settings(Written::Created(path)) => {
                cprintln!("- created <cyan>{}</cyan>", relative(path));
            }
            Event::Settings(Written::Updated(path)) => {
                cprintln!("- updated <cyan>{}</cyan>", relative(path));
            }
            Event::ScriptsAdded(path) => {
                cprintln!("- updated <cyan>{}</cyan> scripts", relative(path));
            }
            Event::Formatted(Formatted::Done(files)) => {
                cprintln!("- formatted {} files with biome", files.len());
            }
            Event::Formatted(Formatted::MissingBinary(binary)) => {
                cprintln!("<dim>- skipped formatting: {} not found</dim>", relative(binary));
            }
            Event::Formatted(Formatted::NothingWritten) => {}
            Event::Formatted(failed @ Formatted::Failed(_)) => {
                cprintln!("- <yellow>Warning: {}</yellow>", failed);
            }
        }
    }
}
