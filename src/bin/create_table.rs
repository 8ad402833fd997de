use student_registry::{Config, DynamodbClient, TableLifecycle};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::new();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = Config::new();
    let client = DynamodbClient::builder()
        .await
        .endpoint_url(config.endpoint_url())
        .build();

    let lifecycle = TableLifecycle::new(Arc::new(client), &config.table_name())
        .capacity(config.read_capacity_units(), config.write_capacity_units());

    if let Err(err) = lifecycle.ensure_exists().await {
        error!("{:#?}", err);
        return;
    }

    match lifecycle.describe().await {
        Ok(table) => info!("{:#?}", table),
        Err(err) => error!("{:#?}", err),
    }
}
