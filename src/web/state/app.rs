use crate::client::DynamodbClient;
use crate::config::Config;
use crate::registry::StudentRegistry;
use crate::table::TableLifecycle;

use std::sync::Arc;

pub struct AppState {
    registry: StudentRegistry,
}

impl AppState {
    pub async fn new(config: &Config) -> Self {
        let client = DynamodbClient::builder()
            .await
            .endpoint_url(config.endpoint_url())
            .build();

        let lifecycle = TableLifecycle::new(Arc::new(client), &config.table_name())
            .capacity(config.read_capacity_units(), config.write_capacity_units());

        Self {
            registry: StudentRegistry::new(lifecycle),
        }
    }

    pub fn registry(&self) -> &StudentRegistry {
        &self.registry
    }

    pub fn lifecycle(&self) -> &TableLifecycle {
        self.registry.lifecycle()
    }

    #[cfg(test)]
    pub(crate) fn with_registry(registry: StudentRegistry) -> Self {
        Self { registry }
    }
}
