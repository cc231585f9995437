use clap::Args;
use std::path::PathBuf;

const CONFIG_FILE: &str = "settings.json";
const EMPLOYEES_FILE: &str = "empleados.json";

/// Where persisted state and generated documents live.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding the company configuration and the employee registry
    #[arg(long, env = "BOLETAS_DATA_DIR", default_value = "config", global = true)]
    pub data_dir: PathBuf,

    /// Directory generated documents are written to
    #[arg(long, env = "BOLETAS_OUTPUT_DIR", default_value = "output", global = true)]
    pub output_dir: PathBuf,
}

impl Settings {
    pub fn new<D: Into<PathBuf>, O: Into<PathBuf>>(data_dir: D, output_dir: O) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    pub fn employees_file(&self) -> PathBuf {
        self.data_dir.join(EMPLOYEES_FILE)
    }
}
