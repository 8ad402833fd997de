use super::{
    Client, DescribeTableOutput, GetItemOutput, ListTablesOutput, ScanOutput, UpdateItemOutput,
};
use crate::types::{Student, StudentPatch, TableInfo, TableStatus};

use anyhow::{anyhow, Result};
use axum::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the DynamoDB-backed client. Tables activate after a
/// configurable number of describe calls so the provisioning poll can be
/// driven without a store.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    tables: HashMap<String, MockTable>,
    activation_delay: usize,
    create_calls: usize,
    describe_calls: usize,
    fail_describe_at: Option<usize>,
    fail_next_data: Option<String>,
}

#[derive(Debug, Default)]
struct MockTable {
    students: HashMap<String, Student>,
    activates_after: usize,
    read_capacity_units: i64,
    write_capacity_units: i64,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active_table(table: &str) -> Self {
        let client = Self::new();

        client.state.lock().unwrap().tables.insert(
            table.to_owned(),
            MockTable {
                read_capacity_units: 5,
                write_capacity_units: 5,
                ..MockTable::default()
            },
        );

        client
    }

    /// Newly created tables stay in the creating state for this many
    /// describe calls.
    pub fn set_activation_delay(&self, describes: usize) {
        self.state.lock().unwrap().activation_delay = describes;
    }

    pub fn fail_describe_at(&self, call: usize) {
        self.state.lock().unwrap().fail_describe_at = Some(call);
    }

    /// The next data command (put/get/update/delete/scan) fails once.
    pub fn fail_next_data(&self, message: &str) {
        self.state.lock().unwrap().fail_next_data = Some(message.to_owned());
    }

    pub fn insert(&self, table: &str, student: Student) {
        let mut state = self.state.lock().unwrap();

        state
            .tables
            .get_mut(table)
            .expect("the table should exist")
            .students
            .insert(student.id.clone(), student);
    }

    pub fn student(&self, table: &str, id: &str) -> Option<Student> {
        let state = self.state.lock().unwrap();
        state
            .tables
            .get(table)
            .and_then(|t| t.students.get(id).cloned())
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub fn describe_calls(&self) -> usize {
        self.state.lock().unwrap().describe_calls
    }
}

impl MockState {
    fn take_data_failure(&mut self) -> Result<()> {
        match self.fail_next_data.take() {
            Some(message) => Err(anyhow!(message)),
            None => Ok(()),
        }
    }

    fn table_mut(&mut self, table: &str) -> Result<&mut MockTable> {
        self.tables
            .get_mut(table)
            .ok_or(anyhow!("table `{table}` does not exist"))
    }
}

#[async_trait]
impl Client for MockClient {
    async fn put_item(&self, table: &str, student: Student) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.take_data_failure()?;

        state
            .table_mut(table)?
            .students
            .insert(student.id.clone(), student);

        Ok(())
    }

    async fn get_item(&self, table: &str, id: &str) -> Result<GetItemOutput> {
        let mut state = self.state.lock().unwrap();
        state.take_data_failure()?;

        let student = state.table_mut(table)?.students.get(id).cloned();
        Ok(GetItemOutput { student })
    }

    async fn update_item(
        &self,
        table: &str,
        id: &str,
        patch: StudentPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateItemOutput> {
        let mut state = self.state.lock().unwrap();
        state.take_data_failure()?;

        let student = match state.table_mut(table)?.students.get_mut(id) {
            Some(student) => {
                patch.apply_to(student);
                student.updated_at = updated_at;
                Some(student.clone())
            }
            None => None,
        };

        Ok(UpdateItemOutput { student })
    }

    async fn delete_item(&self, table: &str, id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.take_data_failure()?;

        state.table_mut(table)?.students.remove(id);
        Ok(())
    }

    async fn scan(&self, table: &str) -> Result<ScanOutput> {
        let mut state = self.state.lock().unwrap();
        state.take_data_failure()?;

        let students = state.table_mut(table)?.students.values().cloned().collect();
        Ok(ScanOutput { students })
    }

    async fn describe_table(&self, table: &str) -> Result<DescribeTableOutput> {
        let mut state = self.state.lock().unwrap();
        state.describe_calls += 1;

        if state.fail_describe_at == Some(state.describe_calls) {
            return Err(anyhow!("injected describe failure"));
        }

        let table_name = table.to_owned();
        let table = match state.tables.get_mut(table) {
            Some(table) => table,
            None => return Ok(DescribeTableOutput { table: None }),
        };

        let status = if table.activates_after == 0 {
            TableStatus::Active
        } else {
            table.activates_after -= 1;
            TableStatus::Creating
        };

        Ok(DescribeTableOutput {
            table: Some(TableInfo {
                name: table_name,
                status,
                item_count: table.students.len() as i64,
                size_bytes: 0,
                read_capacity_units: table.read_capacity_units,
                write_capacity_units: table.write_capacity_units,
                created_at: None,
            }),
        })
    }

    async fn create_table(
        &self,
        table: &str,
        read_capacity_units: i64,
        write_capacity_units: i64,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;

        // A table that already exists is not an error, the same way the real
        // client folds ResourceInUseException into success.
        if state.tables.contains_key(table) {
            return Ok(());
        }

        let activates_after = state.activation_delay;
        state.tables.insert(
            table.to_owned(),
            MockTable {
                students: HashMap::new(),
                activates_after,
                read_capacity_units,
                write_capacity_units,
            },
        );

        Ok(())
    }

    async fn list_tables(&self) -> Result<ListTablesOutput> {
        let state = self.state.lock().unwrap();

        let mut table_names: Vec<String> = state.tables.keys().cloned().collect();
        table_names.sort();

        Ok(ListTablesOutput { table_names })
    }
}
