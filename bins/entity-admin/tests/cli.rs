//! End-to-end runs of the `entity-admin` binary against the demo backend

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn admin() -> Command {
    let mut cmd = Command::cargo_bin("entity-admin").unwrap();
    cmd.env_remove("ENTITY_ADMIN_API_URL")
        .env_remove("ENTITY_ADMIN_TOKEN")
        .env_remove("ENTITY_ADMIN_TIMEOUT_SECS")
        .env_remove("RUST_LOG");
    cmd
}

fn offline() -> Command {
    let mut cmd = admin();
    cmd.arg("--offline");
    cmd
}

/// Config file keeping the state file inside `dir`
fn config_in(dir: &TempDir) -> String {
    let state = dir.path().join("state.json");
    let config = dir.path().join("entity-admin.toml");
    fs::write(
        &config,
        format!("[state]\npath = {:?}\n", state.to_string_lossy()),
    )
    .unwrap();
    config.to_string_lossy().into_owned()
}

#[test]
fn resources_lists_every_path() {
    admin()
        .arg("resources")
        .assert()
        .success()
        .stdout(predicate::str::contains("/entity-branches"))
        .stdout(predicate::str::contains("/branch-hours"))
        .stdout(predicate::str::contains("/entity-status"));
}

#[test]
fn list_resolves_foreign_keys() {
    offline()
        .args(["list", "branch-hours"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Branch 1 - Av. 24 de Julho, 410"))
        .stdout(predicate::str::contains("CAV"))
        .stdout(predicate::str::contains("3 branch hours"));

    offline()
        .args(["list", "locations"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maputo Cidade"));
}

#[test]
fn get_as_json() {
    offline()
        .args(["--format", "json", "get", "users", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"email\": \"admin@cav.co.mz\""));
}

#[test]
fn missing_record_is_generic_failure() {
    offline()
        .args(["get", "locations", "99"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Failed to load location"))
        .stderr(predicate::str::contains("404").not());
}

#[test]
fn create_validates_before_sending() {
    offline()
        .args(["create", "entity-types", "--data", r#"{"name": "  ", "is_active": true}"#])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to save entity type"))
        .stderr(predicate::str::contains("name:"));

    offline()
        .args(["create", "entity-types", "--data", r#"{"name": "Foundation", "is_active": true}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created entity type 3: Foundation"));
}

#[test]
fn create_rejects_malformed_body() {
    offline()
        .args(["create", "locations", "--data", r#"{"name": "Lichinga"}"#])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid location data"));
}

#[test]
fn update_applies_patch() {
    offline()
        .args(["update", "branches", "2", "--data", r#"{"address": "Rua Major Serpa Pinto 7"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated branch 2: Branch 2 - Rua Major Serpa Pinto 7"));
}

#[test]
fn delete_asks_for_confirmation() {
    offline()
        .args(["delete", "locations", "4"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    offline()
        .args(["delete", "locations", "4", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted location 4"));
}

#[test]
fn unknown_resource_is_usage_error() {
    admin()
        .args(["list", "invoices"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown resource: invoices"));
}

#[test]
fn active_section_persists() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    admin()
        .args(["--config", &config, "section"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Create Location"));

    admin()
        .args(["--config", &config, "section", "users-manage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to Manage Users"));

    admin()
        .args(["--config", &config, "--format", "json", "sections"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id": "users-manage""#))
        .stdout(predicate::function(|out: &str| {
            let entries: serde_json::Value = serde_json::from_str(out).unwrap();
            let active: Vec<_> = entries
                .as_array()
                .unwrap()
                .iter()
                .filter(|e| e["active"] == true)
                .map(|e| e["id"].as_str().unwrap().to_string())
                .collect();
            active == ["users-manage"]
        }));

    admin()
        .args(["--config", &config, "section", "reports"])
        .assert()
        .failure();
}

#[test]
fn unknown_persisted_section_falls_back() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    fs::write(dir.path().join("state.json"), r#"{"activeSection": "dashboard"}"#).unwrap();

    admin()
        .args(["--config", &config, "section"])
        .assert()
        .success()
        .stdout(predicate::str::contains("locations-create"));
}

#[test]
fn missing_config_file_is_config_error() {
    admin()
        .args(["--config", "/nonexistent/entity-admin.toml", "resources"])
        .assert()
        .code(3);
}
