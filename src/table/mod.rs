use crate::client::Client;
use crate::error::Error;
use crate::types::TableInfo;

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

pub(crate) const DEFAULT_READ_CAPACITY_UNITS: i64 = 5;
pub(crate) const DEFAULT_WRITE_CAPACITY_UNITS: i64 = 5;

const POLL_INTERVAL: Duration = Duration::from_secs(1);
const MAX_POLL_ATTEMPTS: usize = 20;

/// Lazily provisions the backing table. Safe to call repeatedly and from
/// concurrent callers: a create that loses the race is folded into success
/// and only the polling loop decides readiness.
#[derive(Clone)]
pub struct TableLifecycle {
    client: Arc<dyn Client>,
    table: String,
    read_capacity_units: i64,
    write_capacity_units: i64,
    poll_interval: Duration,
    max_poll_attempts: usize,
}

impl TableLifecycle {
    pub fn new(client: Arc<dyn Client>, table: &str) -> Self {
        Self {
            client,
            table: table.into(),
            read_capacity_units: DEFAULT_READ_CAPACITY_UNITS,
            write_capacity_units: DEFAULT_WRITE_CAPACITY_UNITS,
            poll_interval: POLL_INTERVAL,
            max_poll_attempts: MAX_POLL_ATTEMPTS,
        }
    }

    pub fn capacity(mut self, read_capacity_units: i64, write_capacity_units: i64) -> Self {
        self.read_capacity_units = read_capacity_units;
        self.write_capacity_units = write_capacity_units;
        self
    }

    pub fn polling(mut self, interval: Duration, max_attempts: usize) -> Self {
        self.poll_interval = interval;
        self.max_poll_attempts = max_attempts;
        self
    }

    pub fn table(&self) -> &str {
        self.table.as_str()
    }

    pub(crate) fn client(&self) -> Arc<dyn Client> {
        Arc::clone(&self.client)
    }

    pub async fn ensure_exists(&self) -> Result<(), Error> {
        let described = self
            .client
            .describe_table(&self.table)
            .await
            .map_err(Error::EnsureTable)?;

        match described.table {
            Some(table) if table.status.is_active() => return Ok(()),
            Some(_) => {}
            None => {
                self.client
                    .create_table(&self.table, self.read_capacity_units, self.write_capacity_units)
                    .await
                    .map_err(Error::EnsureTable)?;

                info!("Created table `{}`", self.table);
            }
        }

        self.wait_until_active().await
    }

    async fn wait_until_active(&self) -> Result<(), Error> {
        for attempt in 1..=self.max_poll_attempts {
            sleep(self.poll_interval).await;

            match self.client.describe_table(&self.table).await {
                Ok(output) => {
                    let active = output
                        .table
                        .map(|table| table.status.is_active())
                        .unwrap_or_default();

                    if active {
                        info!("Table `{}` is active", self.table);
                        return Ok(());
                    }
                }
                Err(err) => {
                    // A failing describe counts as "not ready yet".
                    warn!("Describe attempt {attempt} for `{}` failed: {err}", self.table);
                }
            }
        }

        Err(Error::TableTimeout {
            table: self.table.clone(),
            attempts: self.max_poll_attempts,
        })
    }

    pub async fn describe(&self) -> Result<Option<TableInfo>, Error> {
        self.client
            .describe_table(&self.table)
            .await
            .map(|output| output.table)
            .map_err(Error::DescribeTable)
    }

    pub async fn list_all(&self) -> Result<Vec<String>, Error> {
        self.client
            .list_tables()
            .await
            .map(|output| output.table_names)
            .map_err(Error::ListTables)
    }
}
