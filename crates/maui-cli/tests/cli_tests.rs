//! Drives the `maui` binary against throwaway workspaces.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PACKAGE_JSON: &str = "{\n  \"name\": \"acme\",\n  \"private\": true\n}\n";
const SHOP_PROJECT: &str = "{\n  \"name\": \"shop\",\n  \"root\": \"apps/shop\",\n  \"projectType\": \"application\"\n}\n";
const INDEX_HTML: &str = "<!doctype html>\n<html lang=\"en\">\n<body>\n  <acme-root></acme-root>\n</body>\n</html>\n";

#[allow(deprecated)]
fn maui(workspace: &Path) -> Command {
    let mut cmd = Command::cargo_bin("maui").unwrap();
    cmd.current_dir(workspace)
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .env("MAUI_OUTPUT__NO_COLOR", "true");
    cmd
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("apps/shop/src")).unwrap();
    fs::write(root.join("package.json"), PACKAGE_JSON).unwrap();
    fs::write(root.join("apps/shop/project.json"), SHOP_PROJECT).unwrap();
    fs::write(root.join("apps/shop/src/index.html"), INDEX_HTML).unwrap();
    dir
}

// ── meta ──────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    maui(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("library"))
        .stdout(predicate::str::contains("tailwind"))
        .stdout(predicate::str::contains("components"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    maui(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_theme_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    maui(dir.path())
        .args(["library", "--theme", "purple"])
        .assert()
        .code(2);
}

// ── library ───────────────────────────────────────────────────────────────────

#[test]
fn library_dry_run_writes_nothing() {
    let ws = workspace();
    maui(ws.path())
        .args(["library", "--project", "shop", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE maui/project.json"))
        .stdout(predicate::str::contains("UPDATE package.json"))
        .stdout(predicate::str::contains("CREATE apps/shop/tailwind.config.js"))
        .stdout(predicate::str::contains("npm install"))
        .stdout(predicate::str::contains(
            "npx nx generate @spartan-ng/cli:ui --name=all --directory=maui/src/lib/spartanui",
        ))
        .stdout(predicate::str::contains("Dry run"));

    assert!(!ws.path().join("maui").exists());
    assert_eq!(
        fs::read_to_string(ws.path().join("package.json")).unwrap(),
        PACKAGE_JSON
    );
}

#[test]
fn library_writes_files_when_steps_are_skipped() {
    let ws = workspace();
    maui(ws.path())
        .args([
            "library",
            "--name",
            "ui-kit",
            "--project",
            "shop",
            "--theme",
            "green",
            "--color-mode",
            "dark",
            "--skip-install",
            "--skip-components",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Library 'ui-kit' is ready"));

    let root = ws.path();
    assert!(root.join("ui-kit/project.json").is_file());
    assert!(root.join("ui-kit/src/lib/ui-kit.module.ts").is_file());

    let manifest = fs::read_to_string(root.join("package.json")).unwrap();
    assert!(manifest.contains("@spartan-ng/ui-core"));
    assert!(manifest.contains("tailwindcss"));

    let html = fs::read_to_string(root.join("apps/shop/src/index.html")).unwrap();
    assert!(html.contains("theme-green"));
    assert!(html.contains("text-foreground dark"));

    let styles = fs::read_to_string(root.join("apps/shop/src/styles.css")).unwrap();
    assert!(styles.contains("/* maui:theme theme-green */"));
}

#[test]
fn library_json_output() {
    let ws = workspace();
    let assert = maui(ws.path())
        .args(["--output-format", "json", "library", "--dry-run", "--skip-install"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["dryRun"], true);
    assert!(
        json["changes"]
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c["path"] == "maui/project.json" && c["kind"] == "create")
    );
    assert_eq!(json["pendingActions"].as_array().unwrap().len(), 1);
}

#[test]
fn invalid_library_name_exits_with_user_error() {
    let ws = workspace();
    maui(ws.path())
        .args(["library", "--name", "My Lib", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn missing_manifest_is_a_configuration_error() {
    let ws = workspace();
    fs::remove_file(ws.path().join("package.json")).unwrap();
    maui(ws.path())
        .args(["library", "--dry-run"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("package.json"));
}

#[test]
fn missing_workspace_directory_fails() {
    let ws = workspace();
    maui(ws.path())
        .args(["library", "--workspace", "does-not-exist"])
        .assert()
        .code(1);
}

// ── tailwind ──────────────────────────────────────────────────────────────────

#[test]
fn tailwind_for_unknown_project_is_reported_not_fatal() {
    let ws = workspace();
    maui(ws.path())
        .args(["tailwind", "--project", "ghost", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped for 'ghost'"));
}

#[test]
fn tailwind_respects_skip_flags() {
    let ws = workspace();
    maui(ws.path())
        .args([
            "tailwind",
            "-p",
            "shop",
            "--skip-styles-update",
            "--skip-install",
        ])
        .assert()
        .success();

    assert!(ws.path().join("apps/shop/tailwind.config.js").is_file());
    assert!(!ws.path().join("apps/shop/src/styles.css").exists());
    assert_eq!(
        fs::read_to_string(ws.path().join("apps/shop/src/index.html")).unwrap(),
        INDEX_HTML
    );
}

// ── components / projects / config ────────────────────────────────────────────

#[test]
fn components_dry_run_prints_command() {
    let ws = workspace();
    maui(ws.path())
        .args(["components", "--name", "dialog", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "npx nx generate @spartan-ng/cli:ui --name=dialog --directory=maui/src/lib/spartanui",
        ));
}

#[test]
fn projects_lists_registered_projects() {
    let ws = workspace();
    maui(ws.path())
        .args(["projects", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::diff("shop\n"));
}

#[test]
fn config_file_and_environment_are_applied() {
    let ws = workspace();
    fs::write(
        ws.path().join(".maui.toml"),
        "[generator]\nlibrary_name = \"from-file\"\n\n[theme]\ncolor = \"theme-red\"\n",
    )
    .unwrap();

    maui(ws.path())
        .args(["config", "get", "theme.color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme-red"));

    maui(ws.path())
        .args(["config", "get", "generator.library_name"])
        .env("MAUI_GENERATOR__LIBRARY_NAME", "from-env")
        .assert()
        .success()
        .stdout(predicate::str::contains("from-env"));
}

#[test]
fn unknown_config_key_exits_with_configuration_error() {
    let ws = workspace();
    maui(ws.path())
        .args(["config", "get", "nope.key"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn quiet_suppresses_output() {
    let ws = workspace();
    maui(ws.path())
        .args(["-q", "library", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
