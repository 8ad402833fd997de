use student_registry::{Config, DynamodbClient, NewStudent, StudentRegistry, TableLifecycle};
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
    let registry = StudentRegistry::new(lifecycle);

    for new_student in samples() {
        match registry.create(new_student).await {
            Ok(student) => info!("Created student `{}` ({})", student.full_name, student.id),
            Err(err) => error!("{:#?}", err),
        }
    }
}

fn samples() -> Vec<NewStudent> {
    vec![
        NewStudent {
            full_name: "Sato Hanako".into(),
            address: "1-2-3 Shibuya, Tokyo".into(),
            email: "hanako@example.com".into(),
            phone_number: "090-1234-5678".into(),
        },
        NewStudent {
            full_name: "Tanaka Taro".into(),
            address: "4-5-6 Naka-ku, Yokohama".into(),
            email: "taro@example.com".into(),
            phone_number: "080-2345-6789".into(),
        },
        NewStudent {
            full_name: "Suzuki Yui".into(),
            address: "7-8-9 Kita-ku, Osaka".into(),
            email: "yui@example.com".into(),
            phone_number: "070-3456-7890".into(),
        },
    ]
}
