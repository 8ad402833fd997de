use crate::{ENV_CONFIG_PATH, ENV_DYNAMODB_ENDPOINT_URL, ENV_PORT, ENV_TABLE_NAME};

use std::env;

mod file;

use file::ConfigFile;

const DEFAULT_TABLE_NAME: &str = "Students";

#[derive(Debug)]
pub struct Config {
    endpoint_url: Option<String>,
    port: u16,
    table_name: String,
    read_capacity_units: i64,
    write_capacity_units: i64,
}

impl Config {
    pub fn new() -> Self {
        let endpoint_url = env::var(ENV_DYNAMODB_ENDPOINT_URL).ok();
        let port = env::var(ENV_PORT)
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let conf_path = env::var(ENV_CONFIG_PATH).ok();
        let file = ConfigFile::new(conf_path);

        let table_name = env::var(ENV_TABLE_NAME)
            .ok()
            .or_else(|| file.table_name())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_owned());

        Self {
            endpoint_url,
            port,
            table_name,
            read_capacity_units: file.read_capacity_units(),
            write_capacity_units: file.write_capacity_units(),
        }
    }

    pub fn endpoint_url(&self) -> Option<String> {
        self.endpoint_url.clone()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn table_name(&self) -> String {
        self.table_name.clone()
    }

    pub fn read_capacity_units(&self) -> i64 {
        self.read_capacity_units
    }

    pub fn write_capacity_units(&self) -> i64 {
        self.write_capacity_units
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}
