use assert_cmd::{cargo, prelude::*};
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn setup_temp_home() -> TempDir {
    TempDir::new().expect("failed to create temp home")
}

/// Binary isolated from the user's config, storing data under the temp dir
fn base_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("savings"));
    cmd.env("HOME", home.path());
    cmd.env("SAVINGS_CONFIG", home.path().join("config.toml"));
    cmd.env_remove("SAVINGS_DATA_DIR");
    cmd.arg("--no-color");
    cmd.arg("--data-dir").arg(home.path().join("data"));
    cmd
}

#[test]
fn summary_empty_ledger_no_color_when_piped() {
    let home = setup_temp_home();

    base_cmd(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("No platforms to display"))
        .stdout(predicate::str::contains("\u{001b}[").not());

    assert!(
        !home.path().join("data").join("platforms.json").exists(),
        "read-only commands should not create the store"
    );
}

#[test]
fn vault_scenario_end_to_end() {
    let home = setup_temp_home();

    base_cmd(&home)
        .args(["add", "Vault", "--balance", "100.00", "--rate", "5.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Platform 'Vault' added"));

    base_cmd(&home)
        .args(["deposit", "Vault", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New balance: $150.00"));

    base_cmd(&home)
        .args(["withdraw", "Vault", "200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds balance"));

    base_cmd(&home)
        .args(["interest", "Vault"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied $7.50 interest"))
        .stdout(predicate::str::contains("$157.50"));

    base_cmd(&home)
        .args(["history", "Vault"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deposit"))
        .stdout(predicate::str::contains("Interest"))
        .stdout(predicate::str::contains("Withdrawal").not());

    let doc = std::fs::read_to_string(home.path().join("data").join("platforms.json"))
        .expect("store should exist after mutations");
    let json: serde_json::Value = serde_json::from_str(&doc).unwrap();
    assert_eq!(json[0]["name"], "Vault");
    assert_eq!(json[0]["balance"].as_f64(), Some(157.5));
    assert_eq!(json[0]["history"].as_array().map(Vec::len), Some(2));
}

#[test]
fn duplicate_platform_is_rejected() {
    let home = setup_temp_home();

    base_cmd(&home).args(["add", "Vault"]).assert().success();
    base_cmd(&home)
        .args(["add", "Vault"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn summary_json_reports_total() {
    let home = setup_temp_home();

    base_cmd(&home)
        .args(["add", "A", "--balance", "10"])
        .assert()
        .success();
    base_cmd(&home)
        .args(["add", "B", "--balance", "5.25"])
        .assert()
        .success();

    let output = base_cmd(&home)
        .args(["summary", "--json"])
        .output()
        .expect("failed to run summary");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_balance"], "15.25");
    assert_eq!(json["platforms"].as_array().map(Vec::len), Some(2));
}

#[test]
fn corrupt_store_starts_empty() {
    let home = setup_temp_home();
    let data = home.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("platforms.json"), "not json").unwrap();

    base_cmd(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("No platforms to display"));
}

#[test]
fn data_dir_from_environment() {
    let home = setup_temp_home();
    let env_dir = home.path().join("from-env");

    let mut cmd = Command::new(cargo::cargo_bin!("savings"));
    cmd.env("HOME", home.path())
        .env("SAVINGS_CONFIG", home.path().join("config.toml"))
        .env("SAVINGS_DATA_DIR", &env_dir)
        .args(["--no-color", "add", "Vault"]);
    cmd.assert().success();

    assert!(env_dir.join("platforms.json").exists());
}

#[test]
fn currency_symbol_from_config_file() {
    let home = setup_temp_home();
    std::fs::write(home.path().join("config.toml"), "currency_symbol = \"€\"\n").unwrap();

    base_cmd(&home)
        .args(["add", "Vault", "--balance", "1234.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€1,234.50"));
}

#[test]
fn deposit_reports_the_rounded_amount() {
    let home = setup_temp_home();

    base_cmd(&home).args(["add", "Vault"]).assert().success();

    let output = base_cmd(&home)
        .args(["deposit", "Vault", "10.005", "--json"])
        .output()
        .expect("failed to run deposit");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["amount"], "10.00");
    assert_eq!(json["balance"], "10.00");

    base_cmd(&home)
        .args(["withdraw", "Vault", "2.345"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Withdrew $2.34 from Vault"));
}

#[test]
fn undecodable_store_starts_empty() {
    let home = setup_temp_home();
    let data = home.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("platforms.json"), b"[\xff\xfe garbage").unwrap();

    base_cmd(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("No platforms to display"));
}
