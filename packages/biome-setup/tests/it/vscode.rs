//! VS Code Settings

use biome_setup::setup::Options;
use indoc::indoc;
use pretty_assertions::assert_eq as pretty_assert_eq;
use serde_json::json;
use simple_test_case::test_case;

use crate::{TestProject, dev_dependency};

#[test]
fn test_creates_settings_by_default() {
    let project = TestProject::builder()
        .dev_dependencies(dev_dependency())
        .build();
    project.run(Options::default());

    let settings = project.read_json(".vscode/settings.json");
    pretty_assert_eq!(settings["biome.enabled"], json!(true));
    pretty_assert_eq!(settings["editor.formatOnSave"], json!(true));
    pretty_assert_eq!(settings["editor.defaultFormatter"], json!("biomejs.biome"));
    pretty_assert_eq!(settings["prettier.enable"], json!(false));
    pretty_assert_eq!(settings["eslint.enable"], json!(false));
    pretty_assert_eq!(
        settings["editor.codeActionsOnSave"],
        json!({
            "source.fixAll.biome": "explicit",
            "source.organizeImports.biome": "explicit",
        })
    );
}

#[test]
fn test_merges_existing_settings() {
    let project = TestProject::builder()
        .dev_dependencies(dev_dependency())
        .vscode_settings(json!({
            "customSetting": true,
            "editor.codeActionsOnSave": { "source.existingAction": "explicit" },
        }))
        .build();
    project.run(Options::default());

    let settings = project.read_json(".vscode/settings.json");
    pretty_assert_eq!(settings["customSetting"], json!(true));
    pretty_assert_eq!(settings["biome.enabled"], json!(true));
    pretty_assert_eq!(
        settings["editor.codeActionsOnSave"],
        json!({
            "source.existingAction": "explicit",
            "source.fixAll.biome": "explicit",
            "source.organizeImports.biome": "explicit",
        })
    );
}

#[test]
fn test_merges_settings_with_comments() {
    let project = TestProject::builder()
        .dev_dependencies(dev_dependency())
        .vscode_settings_raw(indoc! {r#"
            {
              // Workspace font.
              "editor.fontSize": 14,
              /* Formatting */
              "editor.formatOnSave": false,
            }
        "#})
        .build();
    project.run(Options::default());

    let settings = project.read_json(".vscode/settings.json");
    pretty_assert_eq!(settings["editor.fontSize"], json!(14));
    pretty_assert_eq!(settings["editor.formatOnSave"], json!(true));
}

#[test]
fn test_replaces_malformed_settings() {
    let project = TestProject::builder()
        .dev_dependencies(dev_dependency())
        .vscode_settings_raw("{ this is not json")
        .build();
    project.run(Options::default());

    let settings = project.read_json(".vscode/settings.json");
    pretty_assert_eq!(settings["biome.enabled"], json!(true));
}

#[test]
fn test_existing_folder_without_settings() {
    let project = TestProject::builder()
        .dev_dependencies(dev_dependency())
        .vscode_dir_only(true)
        .build();
    project.run(Options::default());

    pretty_assert_eq!(
        project.read_json(".vscode/settings.json")["biome.enabled"],
        json!(true)
    );
}

#[test_case(true, true, true; "both toggles on")]
#[test_case(false, true, false; "vscode off")]
#[test_case(true, false, false; "include vscode off")]
#[test_case(false, false, false; "both toggles off")]
#[test]
fn test_settings_need_both_toggles(vscode: bool, include_vscode: bool, expected: bool) {
    let project = TestProject::builder()
        .dev_dependencies(dev_dependency())
        .build();
    project.run(
        Options::builder()
            .vscode(vscode)
            .include_vscode(include_vscode)
            .build(),
    );

    pretty_assert_eq!(project.exists(".vscode/settings.json"), expected);
    pretty_assert_eq!(project.exists(".vscode"), expected);
}
