mod common;

use common::TestHome;
use predicates::prelude::*;
use std::fs;

#[test]
fn set_then_get_persists_to_home() {
    let home = TestHome::new();

    let out = home.stdout(&["config", "set", "api-url", "https://api.example.org"]);
    assert!(out.contains("New api-url has been set"));
    home.stdout(&["config", "set", "api-key", "secret-key"]);

    assert_eq!(home.stdout(&["config", "get", "api-url"]), "https://api.example.org\n");
    assert_eq!(home.stdout(&["config", "get", "api-key"]), "secret-key\n");

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(home.config_path()).unwrap()).unwrap();
    assert_eq!(saved["api_url"], "https://api.example.org");
    assert_eq!(saved["api_key"], "secret-key");
}

#[test]
fn list_without_file_shows_environment_defaults() {
    let home = TestHome::new();
    home.cmd()
        .args(["config", "list"])
        .env("API_URL", "http://catalog.test")
        .assert()
        .success()
        .stdout("api_url: http://catalog.test\napi_key: \n");
    assert!(!home.config_path().exists());
}

#[test]
fn list_falls_back_to_localhost() {
    let home = TestHome::new();
    assert_eq!(
        home.stdout(&["config", "list"]),
        "api_url: http://localhost:8080\napi_key: \n"
    );
}

#[test]
fn unknown_key_is_rejected() {
    let home = TestHome::new();
    home.cmd()
        .args(["config", "get", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid key: bogus"));
    home.cmd()
        .args(["config", "set", "bogus", "v"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid key: bogus"));
    assert!(!home.config_path().exists());
}

#[test]
fn malformed_api_url_is_rejected() {
    let home = TestHome::new();
    home.cmd()
        .args(["config", "set", "api-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid api url"));
    assert!(!home.config_path().exists());
}

#[test]
fn overrides_are_refused_by_config_commands() {
    let home = TestHome::new();
    home.cmd()
        .args(["config", "set", "api-key", "stored", "--api-key", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only apply to images and keys"));
    home.cmd()
        .args(["--api-url", "http://x", "config", "list"])
        .assert()
        .failure();
    assert!(!home.config_path().exists());
}

#[test]
fn path_points_into_home() {
    let home = TestHome::new();
    let out = home.stdout(&["config", "path"]);
    assert!(out.trim_end().ends_with("config.json"), "{out}");
    assert!(out.contains(".naturedopes-cli"), "{out}");
}

#[test]
fn corrupt_config_file_is_reported() {
    let home = TestHome::new();
    fs::create_dir_all(home.config_path().parent().unwrap()).unwrap();
    fs::write(home.config_path(), "not json").unwrap();
    home.cmd()
        .args(["config", "get", "api-url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not decode config file"));
}
