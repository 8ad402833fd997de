mod client;
mod config;
mod error;
mod registry;
mod table;
mod types;
pub mod web;

pub use client::{Client, DynamodbClient};
pub use config::Config;
pub use error::Error;
pub use registry::StudentRegistry;
pub use table::TableLifecycle;
pub use types::{NewStudent, Student, StudentPatch, TableInfo, TableStatus};

pub const ENV_DYNAMODB_ENDPOINT_URL: &str = "DYNAMODB_ENDPOINT_URL";
pub const ENV_PORT: &str = "PORT";
pub const ENV_TABLE_NAME: &str = "STUDENTS_TABLE";
pub const ENV_CONFIG_PATH: &str = "CONFIG_PATH";
