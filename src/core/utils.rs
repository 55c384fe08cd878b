use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const HOME_ENV: &str = "FEE_LEDGER_HOME";
const DEFAULT_DIR_NAME: &str = ".fee_ledger";
const DATA_DIR: &str = "data";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Resolves well-known locations under the application home directory.
pub struct PathResolver;

impl PathResolver {
    /// Application home: `$FEE_LEDGER_HOME`, else `~/.fee_ledger`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn data_dir_in(base: &Path) -> PathBuf {
        base.join(DATA_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR).join(CONFIG_FILE)
    }
}
