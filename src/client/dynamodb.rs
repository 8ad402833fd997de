use super::{
    Client, DescribeTableOutput, GetItemOutput, ListTablesOutput, ScanOutput, UpdateItemOutput,
};
use crate::types::{Student, StudentPatch, TableInfo, ATTR_ID};

use anyhow::Result;
use aws_sdk_dynamodb::{
    config::Builder as ConfigBuilder,
    error::SdkError,
    operation::{
        create_table::CreateTableError, describe_table::DescribeTableError,
        update_item::UpdateItemError,
    },
    types::{
        AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
        ReturnValue, ScalarAttributeType, Tag,
    },
    Client as DbClient,
};
use axum::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

const TAG_KEY_APP: &str = "app";
const TAG_VALUE_APP: &str = "student-registry";

#[derive(Debug, Clone)]
pub struct DynamodbClient {
    db_client: DbClient,
}

#[derive(Debug)]
pub struct DynamodbClientBuilder {
    db_builder: ConfigBuilder,
}

impl DynamodbClientBuilder {
    pub async fn new() -> Self {
        let config = aws_config::load_from_env().await;

        Self {
            db_builder: ConfigBuilder::from(&config),
        }
    }

    pub fn endpoint_url(self, url: Option<String>) -> Self {
        match url {
            Some(url) => Self {
                db_builder: self.db_builder.endpoint_url(&url),
            },
            None => self,
        }
    }

    pub fn build(self) -> DynamodbClient {
        DynamodbClient {
            db_client: DbClient::from_conf(self.db_builder.build()),
        }
    }
}

impl DynamodbClient {
    pub async fn builder() -> DynamodbClientBuilder {
        DynamodbClientBuilder::new().await
    }
}

#[async_trait]
impl Client for DynamodbClient {
    async fn put_item(&self, table: &str, student: Student) -> Result<()> {
        self.db_client
            .put_item()
            .table_name(table)
            .set_item(Some(student.into_item()))
            .send()
            .await
            .map(|_| ())
            .map_err(anyhow::Error::from)
    }

    async fn get_item(&self, table: &str, id: &str) -> Result<GetItemOutput> {
        self.db_client
            .get_item()
            .table_name(table)
            .key(ATTR_ID, AttributeValue::S(id.to_owned()))
            .send()
            .await
            .map_err(anyhow::Error::from)
            .and_then(|output| {
                let student = output.item.map(Student::try_from).transpose()?;
                Ok(GetItemOutput { student })
            })
    }

    async fn update_item(
        &self,
        table: &str,
        id: &str,
        patch: StudentPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateItemOutput> {
        let (expression, names, values) = patch.update_expression(updated_at);

        let sent = self
            .db_client
            .update_item()
            .table_name(table)
            .key(ATTR_ID, AttributeValue::S(id.to_owned()))
            .update_expression(expression)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .condition_expression(format!("attribute_exists({ATTR_ID})"))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match sent {
            Ok(output) => {
                let student = output.attributes.map(Student::try_from).transpose()?;
                Ok(UpdateItemOutput { student })
            }
            Err(err) => from_update_item_err(err),
        }
    }

    async fn delete_item(&self, table: &str, id: &str) -> Result<()> {
        self.db_client
            .delete_item()
            .table_name(table)
            .key(ATTR_ID, AttributeValue::S(id.to_owned()))
            .send()
            .await
            .map(|_| ())
            .map_err(anyhow::Error::from)
    }

    async fn scan(&self, table: &str) -> Result<ScanOutput> {
        let mut students: Vec<Student> = vec![];
        let mut exclusive_start_key = None;

        loop {
            let output = self
                .db_client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(anyhow::Error::from)?;

            for item in output.items.unwrap_or_default() {
                students.push(Student::try_from(item)?);
            }

            exclusive_start_key = output.last_evaluated_key;
            if exclusive_start_key.is_none() {
                break;
            }
        }

        Ok(ScanOutput { students })
    }

    async fn describe_table(&self, table: &str) -> Result<DescribeTableOutput> {
        let sent = self
            .db_client
            .describe_table()
            .table_name(table)
            .send()
            .await;

        match sent {
            Ok(output) => Ok(DescribeTableOutput {
                table: output.table.map(TableInfo::from),
            }),
            Err(err) => from_describe_table_err(err),
        }
    }

    async fn create_table(
        &self,
        table: &str,
        read_capacity_units: i64,
        write_capacity_units: i64,
    ) -> Result<()> {
        let attribute = AttributeDefinition::builder()
            .attribute_name(ATTR_ID)
            .attribute_type(ScalarAttributeType::S)
            .build()?;

        let key_schema = KeySchemaElement::builder()
            .attribute_name(ATTR_ID)
            .key_type(KeyType::Hash)
            .build()?;

        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(read_capacity_units)
            .write_capacity_units(write_capacity_units)
            .build()?;

        let tag = Tag::builder().key(TAG_KEY_APP).value(TAG_VALUE_APP).build()?;

        let sent = self
            .db_client
            .create_table()
            .table_name(table)
            .attribute_definitions(attribute)
            .key_schema(key_schema)
            .provisioned_throughput(throughput)
            .tags(tag)
            .send()
            .await;

        match sent {
            Ok(_) => Ok(()),
            Err(err) => from_create_table_err(err),
        }
    }

    async fn list_tables(&self) -> Result<ListTablesOutput> {
        let mut table_names: Vec<String> = vec![];
        let mut exclusive_start_table_name: Option<String> = None;

        loop {
            let output = self
                .db_client
                .list_tables()
                .set_exclusive_start_table_name(exclusive_start_table_name)
                .send()
                .await
                .map_err(anyhow::Error::from)?;

            table_names.extend(output.table_names.unwrap_or_default());

            exclusive_start_table_name = output.last_evaluated_table_name;
            if exclusive_start_table_name.is_none() {
                break;
            }
        }

        Ok(ListTablesOutput { table_names })
    }
}

fn from_describe_table_err(err: SdkError<DescribeTableError>) -> Result<DescribeTableOutput> {
    use DescribeTableError::*;

    match err {
        SdkError::ServiceError(e) => {
            let e = e.into_err();
            match e {
                // An absent table is a sentinel, not a failure.
                ResourceNotFoundException(_) => Ok(DescribeTableOutput { table: None }),
                _ => Err(anyhow::Error::from(e)),
            }
        }
        _ => Err(anyhow::Error::from(err)),
    }
}

fn from_create_table_err(err: SdkError<CreateTableError>) -> Result<()> {
    use CreateTableError::*;

    match err {
        SdkError::ServiceError(e) => {
            let e = e.into_err();
            match e {
                // Another caller won the create race. The table is on its way
                // to active and the polling loop decides readiness.
                ResourceInUseException(_) => {
                    warn!("CreateTable raced an existing table: {e}");
                    Ok(())
                }
                _ => Err(anyhow::Error::from(e)),
            }
        }
        _ => Err(anyhow::Error::from(err)),
    }
}

fn from_update_item_err(err: SdkError<UpdateItemError>) -> Result<UpdateItemOutput> {
    use UpdateItemError::*;

    match err {
        SdkError::ServiceError(e) => {
            let e = e.into_err();
            match e {
                // The id does not exist. Surface the absent sentinel instead
                // of creating a half-empty record.
                ConditionalCheckFailedException(_) => Ok(UpdateItemOutput { student: None }),
                _ => Err(anyhow::Error::from(e)),
            }
        }
        _ => Err(anyhow::Error::from(err)),
    }
}
