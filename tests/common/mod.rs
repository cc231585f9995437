#![allow(dead_code)]

use boletas::domain::employee::NewEmployee;
use boletas::domain::money::Money;
use boletas::settings::Settings;
use rust_decimal_macros::dec;
use std::path::{Path, PathBuf};

pub fn settings(root: &Path) -> Settings {
    Settings::new(root.join("config"), root.join("output"))
}

pub fn new_employee(name: &str, ci: &str) -> NewEmployee {
    NewEmployee {
        full_name: name.to_string(),
        ci: ci.to_string(),
        job_title: "Técnico".to_string(),
        hire_date: "01/06/2021".to_string(),
        salary: Money::new(dec!(3600)),
    }
}

/// Writes a request body next to the test data and returns its path.
pub fn write_body(root: &Path, name: &str, body: &serde_json::Value) -> PathBuf {
    let path = root.join(name);
    std::fs::write(&path, serde_json::to_vec(body).unwrap()).unwrap();
    path
}

/// Parses the single JSON envelope a CLI run prints on stdout.
pub fn envelope(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stdout should be one JSON envelope")
}
