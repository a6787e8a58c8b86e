#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;

fn adservice() -> Command {
    let mut cmd = Command::cargo_bin("adservice").unwrap();
    cmd.env_remove("AD_SERVICE_PORT")
        .env_remove("FEATURE_FLAG_SERVICE_ADDR")
        .env_remove("FEATURE_FLAG_TIMEOUT_MS")
        .env_remove("AD_SERVICE_FLAG_ERROR_POLICY");
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout should be JSON")
}

// ---------------------------------------------------------------------------
// adservice catalog
// ---------------------------------------------------------------------------

#[test]
fn catalog_lists_categories_as_table() {
    adservice()
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("CATEGORY"))
        .stdout(predicate::str::contains("/product/L9ECAV7KIM"))
        .stdout(predicate::str::contains("books").not());
}

#[test]
fn catalog_json_keeps_declaration_order() {
    let json = json_output(adservice().args(["catalog", "--json"]));
    let names: Vec<&str> = json["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["binoculars", "telescopes", "accessories", "assembly", "travel"]
    );
    assert_eq!(json["categories"][2]["ads"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// adservice select
// ---------------------------------------------------------------------------

#[test]
fn select_targeted_key() {
    let json = json_output(adservice().args(["select", "binoculars", "--json"]));
    assert_eq!(json["requestType"], "TARGETED");
    assert_eq!(json["responseType"], "TARGETED");
    assert_eq!(json["ads"][0]["redirectUrl"], "/product/2ZYFJ3GM2N");
}

#[test]
fn select_unknown_key_falls_back_to_random() {
    let json = json_output(adservice().args(["select", "books", "--seed", "7", "--json"]));
    assert_eq!(json["requestType"], "TARGETED");
    assert_eq!(json["responseType"], "RANDOM");
    assert_eq!(json["ads"].as_array().unwrap().len(), 2);
}

#[test]
fn select_without_keys_is_not_targeted() {
    adservice()
        .arg("select")
        .assert()
        .success()
        .stdout(predicate::str::contains("request: NOT_TARGETED  response: RANDOM"));
}

// ---------------------------------------------------------------------------
// adservice serve — configuration errors
// ---------------------------------------------------------------------------

#[test]
fn serve_without_port_fails() {
    adservice()
        .arg("serve")
        .env("FEATURE_FLAG_SERVICE_ADDR", "localhost:50053")
        .assert()
        .failure()
        .stderr(predicate::str::contains("AD_SERVICE_PORT"));
}

#[test]
fn serve_without_flag_address_fails() {
    adservice()
        .args(["serve", "--port", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FEATURE_FLAG_SERVICE_ADDR"));
}

#[test]
fn default_command_is_serve() {
    adservice()
        .assert()
        .failure()
        .stderr(predicate::str::contains("AD_SERVICE_PORT"));
}

#[test]
fn serve_rejects_unknown_flag_policy() {
    adservice()
        .args([
            "serve",
            "--port",
            "0",
            "--flag-service-addr",
            "localhost:50053",
            "--flag-error-policy",
            "sometimes",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown policy 'sometimes'"));
}

#[test]
fn serve_reads_zero_timeout_from_environment_and_rejects_it() {
    adservice()
        .arg("serve")
        .env("AD_SERVICE_PORT", "0")
        .env("FEATURE_FLAG_SERVICE_ADDR", "localhost:50053")
        .env("FEATURE_FLAG_TIMEOUT_MS", "0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FEATURE_FLAG_TIMEOUT_MS"))
        .stderr(predicate::str::contains("greater than zero"));
}
