use aws_sdk_dynamodb::{primitives, types};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    pub name: String,
    pub status: TableStatus,
    pub item_count: i64,
    pub size_bytes: i64,
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TableStatus {
    Creating,
    Updating,
    Deleting,
    Active,
    Unknown,
}

impl TableStatus {
    pub fn is_active(self) -> bool {
        matches!(self, TableStatus::Active)
    }
}

impl From<types::TableStatus> for TableStatus {
    fn from(value: types::TableStatus) -> TableStatus {
        match value {
            types::TableStatus::Creating => TableStatus::Creating,
            types::TableStatus::Updating => TableStatus::Updating,
            types::TableStatus::Deleting => TableStatus::Deleting,
            types::TableStatus::Active => TableStatus::Active,
            _ => TableStatus::Unknown,
        }
    }
}

impl From<types::TableDescription> for TableInfo {
    fn from(value: types::TableDescription) -> TableInfo {
        let (read_capacity_units, write_capacity_units) = value
            .provisioned_throughput
            .map(|throughput| {
                (
                    throughput.read_capacity_units.unwrap_or_default(),
                    throughput.write_capacity_units.unwrap_or_default(),
                )
            })
            .unwrap_or_default();

        TableInfo {
            name: value.table_name.unwrap_or_default(),
            status: value
                .table_status
                .map(TableStatus::from)
                .unwrap_or(TableStatus::Unknown),
            item_count: value.item_count.unwrap_or_default(),
            size_bytes: value.table_size_bytes.unwrap_or_default(),
            read_capacity_units,
            write_capacity_units,
            created_at: value.creation_date_time.and_then(into_chrono),
        }
    }
}

fn into_chrono(datetime: primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(datetime.secs(), datetime.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_transforms_a_table_description() {
        let description = types::TableDescription::builder()
            .table_name("Students")
            .table_status(types::TableStatus::Active)
            .item_count(3)
            .table_size_bytes(512)
            .provisioned_throughput(
                types::ProvisionedThroughputDescription::builder()
                    .read_capacity_units(5)
                    .write_capacity_units(5)
                    .build(),
            )
            .creation_date_time(primitives::DateTime::from_secs(1_700_000_000))
            .build();

        let info = TableInfo::from(description);

        assert_eq!(info.name, "Students");
        assert_eq!(info.status, TableStatus::Active);
        assert!(info.status.is_active());
        assert_eq!(info.item_count, 3);
        assert_eq!(info.size_bytes, 512);
        assert_eq!(info.read_capacity_units, 5);
        assert_eq!(info.write_capacity_units, 5);
        assert_eq!(
            info.created_at,
            DateTime::from_timestamp(1_700_000_000, 0),
        );
    }

    #[test]
    fn it_falls_back_to_the_unknown_status() {
        let description = types::TableDescription::builder()
            .table_name("Students")
            .build();

        let info = TableInfo::from(description);

        assert_eq!(info.status, TableStatus::Unknown);
        assert!(!info.status.is_active());
        assert_eq!(info.created_at, None);
    }
}
