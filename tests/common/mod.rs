#![allow(deprecated)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use chatterbox::config::Config;
use chatterbox::storage::SledStore;

#[allow(dead_code)]
pub fn create_temp_storage() -> (SledStore, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("session.db");
    let storage = SledStore::open(db_path).expect("failed to open sled storage with path");
    (storage, tmp)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Configuration with no artificial delays
#[allow(dead_code)]
pub fn instant_config() -> Config {
    let mut config = Config::default();
    config.session.auth_delay_ms = 0;
    config.responder.min_delay_ms = 0;
    config.responder.max_delay_ms = 0;
    config
}

/// Binary invocation isolated to `dir`: no config file, private session
/// database, no delays and no colors
#[allow(dead_code)]
pub fn chatterbox_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("chatterbox").expect("binary should build");
    cmd.env("NO_COLOR", "1")
        .env_remove("CHATTERBOX_STORAGE_PATH")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.join("missing-config.yaml"))
        .arg("--storage-path")
        .arg(dir.join("session.db"))
        .arg("--instant");
    cmd
}
