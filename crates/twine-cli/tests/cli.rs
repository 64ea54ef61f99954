use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_describes_the_client() {
    Command::cargo_bin("twine-cli")
        .expect("binary built")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Twine payload API CLI"));
}

#[test]
fn missing_site_fails_before_any_request() {
    Command::cargo_bin("twine-cli")
        .expect("binary built")
        .env_remove("TWINE_SITE_URL")
        .args(["payloads", "get", "some-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("MissingSite"));
}

#[test]
fn mismatched_inline_json_fails_client_side() {
    Command::cargo_bin("twine-cli")
        .expect("binary built")
        .args([
            "--site",
            "http://127.0.0.1:9",
            "payloads",
            "create",
            "--json",
            r#"{"list_1": ["a"], "list_2": []}"#,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("same length"));
}
