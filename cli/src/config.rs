use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("noteleaf.db"),
        }
    }
}

pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        fs::write(path, toml).expect("Failed to write default config");
        return config;
    }

    let content = fs::read_to_string(path).expect("Failed to read config file");
    toml::from_str(&content).expect("Failed to parse config file")
}
