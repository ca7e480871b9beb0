//! Acceptance test: runs the application as a subprocess and asserts its
//! output for given argument combinations matches what is expected.
//!
//! Every test points the CLI at its own config file so the user's
//! `~/.tessera` is never touched.

#![forbid(unsafe_code)]

use abscissa_core::testing::prelude::*;
use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Executes your application binary via `cargo run`.
pub static RUNNER: Lazy<CmdRunner> = Lazy::new(CmdRunner::default);

const JUNO: &str = "tests/fixtures/juno.json";
const INCOMPATIBLE: &str = "tests/fixtures/incompatible.json";
const REQUEST: &str = "tests/fixtures/request.json";

/// Creates a fresh config file and store location for one test.
fn test_config(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tessera-acceptance-{}", name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    let config = dir.join("config.toml");
    let store = dir.join("chains.toml");
    fs::write(
        &config,
        format!(
            "default_chain = \"cosmoshub-4\"\nstore_path = \"{}\"\n",
            store.display()
        ),
    )
    .unwrap();

    config
}

fn store_path(config: &Path) -> PathBuf {
    config.with_file_name("chains.toml")
}

#[test]
fn validate_prints_normalized_chain() {
    let config = test_config("validate");
    let mut runner = RUNNER.clone();
    let mut cmd = runner
        .args(&["-c", config.to_str().unwrap(), "chains", "validate", JUNO])
        .capture_stdout()
        .run();

    cmd.stdout().expect_line("{");
    cmd.stdout()
        .expect_line("    \"rpc\": \"https://rpc.juno.example\",");
    cmd.stdout()
        .expect_line("    \"rest\": \"https://lcd.juno.example\",");
    cmd.stdout().expect_line("    \"chainId\": \"juno-1\",");
    cmd.wait().unwrap().expect_success();

    // validating never writes the store
    assert!(!store_path(&config).exists());
}

#[test]
fn validate_rejects_incompatible_features() {
    let config = test_config("incompatible");
    let mut runner = RUNNER.clone();
    runner
        .args(&["-c", config.to_str().unwrap(), "chains", "validate", INCOMPATIBLE])
        .status()
        .expect_code(1);
}

#[test]
fn suggest_then_show_and_delete() {
    let config = test_config("suggest");
    let config_arg = config.to_str().unwrap();

    let mut runner = RUNNER.clone();
    runner
        .args(&[
            "-c",
            config_arg,
            "chains",
            "suggest",
            JUNO,
            "--origin",
            "https://app.junoswap.example/pools",
        ])
        .status()
        .expect_success();

    let stored = fs::read_to_string(store_path(&config)).unwrap();
    assert!(stored.contains("juno-1"));
    assert!(stored.contains("https://app.junoswap.example"));
    assert!(stored.contains("cw20:juno1neta:uneta"));

    let mut runner = RUNNER.clone();
    let mut cmd = runner
        .args(&["-c", config_arg, "chains", "show", "juno-1"])
        .capture_stdout()
        .run();
    cmd.stdout().expect_line("{");
    cmd.stdout()
        .expect_line("    \"rpc\": \"https://rpc.juno.example\",");
    cmd.wait().unwrap().expect_success();

    let mut runner = RUNNER.clone();
    runner
        .args(&["-c", config_arg, "chains", "delete", "juno-1"])
        .status()
        .expect_success();

    let mut runner = RUNNER.clone();
    runner
        .args(&["-c", config_arg, "chains", "show", "juno-1"])
        .status()
        .expect_code(1);
}

#[test]
fn embedded_chains_cannot_be_deleted() {
    let config = test_config("delete-embedded");
    let mut runner = RUNNER.clone();
    runner
        .args(&["-c", config.to_str().unwrap(), "chains", "delete", "cosmoshub-4"])
        .status()
        .expect_code(1);
}

#[test]
fn set_default_updates_config_file() {
    let config = test_config("set-default");
    let config_arg = config.to_str().unwrap();

    let mut runner = RUNNER.clone();
    runner
        .args(&["-c", config_arg, "chains", "set-default", "osmosis-1"])
        .status()
        .expect_success();
    let content = fs::read_to_string(&config).unwrap();
    assert!(content.contains("default_chain = \"osmosis-1\""));

    let mut runner = RUNNER.clone();
    let mut cmd = runner
        .args(&["-c", config_arg, "chains", "show-default"])
        .capture_stdout()
        .run();
    cmd.stdout().expect_line("{");
    cmd.stdout()
        .expect_line("    \"rpc\": \"https://rpc-osmosis.keplr.app\",");
    cmd.wait().unwrap().expect_success();

    let mut runner = RUNNER.clone();
    runner
        .args(&["-c", config_arg, "chains", "set-default", "unknown-1"])
        .status()
        .expect_code(1);
}

#[test]
fn quote_lists_every_tier() {
    let config = test_config("quote");
    let mut runner = RUNNER.clone();
    let mut cmd = runner
        .args(&[
            "-c",
            config.to_str().unwrap(),
            "fee",
            "quote",
            "cosmoshub-4",
            "--gas",
            "200000",
        ])
        .capture_stdout()
        .run();

    cmd.stdout().expect_line("low: 2000uatom");
    cmd.stdout().expect_line("average: 5000uatom");
    cmd.stdout().expect_line("high: 8000uatom");
    cmd.wait().unwrap().expect_success();
}

#[test]
fn quote_single_tier() {
    let config = test_config("quote-tier");
    let mut runner = RUNNER.clone();
    let mut cmd = runner
        .args(&[
            "-c",
            config.to_str().unwrap(),
            "fee",
            "quote",
            "cosmoshub-4",
            "--gas",
            "120000",
            "--tier",
            "high",
        ])
        .capture_stdout()
        .run();

    cmd.stdout().expect_line("high: 4800uatom");
    cmd.wait().unwrap().expect_success();
}

#[test]
fn review_rejects_invalid_gas() {
    let config = test_config("review-invalid");
    let mut runner = RUNNER.clone();
    runner
        .args(&[
            "-c",
            config.to_str().unwrap(),
            "fee",
            "review",
            REQUEST,
            "--gas",
            "0",
        ])
        .status()
        .expect_code(1);
}

#[test]
fn review_approves_request() {
    let config = test_config("review");
    let mut runner = RUNNER.clone();
    let mut cmd = runner
        .args(&[
            "-c",
            config.to_str().unwrap(),
            "fee",
            "review",
            REQUEST,
            "--tier",
            "low",
            "--memo",
            "edited",
        ])
        .capture_stdout()
        .run();

    cmd.stdout().expect_line("{");
    cmd.stdout().expect_line("    \"gas\": 200000,");
    cmd.stdout().expect_line("    \"fee\": [");
    cmd.stdout().expect_line("        {");
    cmd.stdout().expect_line("            \"denom\": \"uatom\",");
    cmd.stdout().expect_line("            \"amount\": 2000");
    cmd.stdout().expect_line("        }");
    cmd.stdout().expect_line("    ],");
    cmd.stdout().expect_line("    \"memo\": \"edited\"");
    cmd.stdout().expect_line("}");
    cmd.wait().unwrap().expect_success();
}
