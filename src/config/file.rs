use crate::table::{DEFAULT_READ_CAPACITY_UNITS, DEFAULT_WRITE_CAPACITY_UNITS};

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    table_name: Option<String>,
    read_capacity_units: Option<i64>,
    write_capacity_units: Option<i64>,
}

impl ConfigFile {
    pub fn new<P: AsRef<Path>>(path: Option<P>) -> Self {
        path.map(read_config).unwrap_or_default()
    }

    pub fn table_name(&self) -> Option<String> {
        self.table_name.clone()
    }

    pub fn read_capacity_units(&self) -> i64 {
        self.read_capacity_units
            .unwrap_or(DEFAULT_READ_CAPACITY_UNITS)
    }

    pub fn write_capacity_units(&self) -> i64 {
        self.write_capacity_units
            .unwrap_or(DEFAULT_WRITE_CAPACITY_UNITS)
    }
}

fn read_config<P: AsRef<Path>>(path: P) -> ConfigFile {
    _read_config(path).unwrap_or_else(|err| {
        warn!("{err}");
        warn!("Skip reading config file.");
        ConfigFile::default()
    })
}

fn _read_config<P: AsRef<Path>>(path: P) -> Result<ConfigFile, String> {
    let content = fs::read_to_string(&path)
        .map_err(|err| format!("Failed to read: {}. {err}", path.as_ref().to_string_lossy()))?;
    serde_yaml::from_str(&content)
        .map_err(|err| format!("Failed to deserialize config file: {err}"))
}
