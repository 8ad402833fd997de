mod dynamodb;
#[cfg(test)]
mod mock;

use crate::types::{Student, StudentPatch, TableInfo};

use anyhow::Result;
use axum::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct GetItemOutput {
    pub student: Option<Student>,
}

#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub students: Vec<Student>,
}

#[derive(Debug, Clone)]
pub struct UpdateItemOutput {
    pub student: Option<Student>,
}

#[derive(Debug, Clone)]
pub struct DescribeTableOutput {
    pub table: Option<TableInfo>,
}

#[derive(Debug, Clone)]
pub struct ListTablesOutput {
    pub table_names: Vec<String>,
}

#[async_trait]
pub trait Client: Send + Sync {
    async fn put_item(&self, table: &str, student: Student) -> Result<()>;
    async fn get_item(&self, table: &str, id: &str) -> Result<GetItemOutput>;
    async fn update_item(
        &self,
        table: &str,
        id: &str,
        patch: StudentPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateItemOutput>;
    async fn delete_item(&self, table: &str, id: &str) -> Result<()>;
    async fn scan(&self, table: &str) -> Result<ScanOutput>;
    async fn describe_table(&self, table: &str) -> Result<DescribeTableOutput>;
    async fn create_table(
        &self,
        table: &str,
        read_capacity_units: i64,
        write_capacity_units: i64,
    ) -> Result<()>;
    async fn list_tables(&self) -> Result<ListTablesOutput>;
}

pub use dynamodb::{DynamodbClient, DynamodbClientBuilder};
#[cfg(test)]
pub use mock::MockClient;
