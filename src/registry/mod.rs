use crate::client::Client;
use crate::error::Error;
use crate::table::TableLifecycle;
use crate::types::{NewStudent, Student, StudentPatch};

use chrono::Utc;
use std::sync::Arc;
use ulid::Ulid;

/// Record access over student records. Every operation lazily ensures the
/// backing table before touching it.
#[derive(Clone)]
pub struct StudentRegistry {
    client: Arc<dyn Client>,
    lifecycle: TableLifecycle,
    table: String,
}

impl StudentRegistry {
    pub fn new(lifecycle: TableLifecycle) -> Self {
        Self {
            client: lifecycle.client(),
            table: lifecycle.table().to_owned(),
            lifecycle,
        }
    }

    pub fn lifecycle(&self) -> &TableLifecycle {
        &self.lifecycle
    }

    pub async fn create(&self, new_student: NewStudent) -> Result<Student, Error> {
        self.lifecycle.ensure_exists().await?;

        let now = Utc::now();
        let student = Student {
            id: Ulid::new().to_string(),
            full_name: new_student.full_name,
            address: new_student.address,
            email: new_student.email,
            phone_number: new_student.phone_number,
            created_at: now,
            updated_at: now,
        };

        self.client
            .put_item(&self.table, student.clone())
            .await
            .map_err(Error::CreateStudent)?;

        Ok(student)
    }

    pub async fn get_all(&self) -> Result<Vec<Student>, Error> {
        self.lifecycle.ensure_exists().await?;

        self.client
            .scan(&self.table)
            .await
            .map(|output| output.students)
            .map_err(Error::FetchStudents)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Student>, Error> {
        self.lifecycle.ensure_exists().await?;

        self.client
            .get_item(&self.table, id)
            .await
            .map(|output| output.student)
            .map_err(Error::FetchStudent)
    }

    /// Applies only the supplied fields and refreshes `updatedAt`. An unknown
    /// id yields `None` instead of creating a half-empty record.
    pub async fn update(&self, id: &str, patch: StudentPatch) -> Result<Option<Student>, Error> {
        self.lifecycle.ensure_exists().await?;

        self.client
            .update_item(&self.table, id, patch, Utc::now())
            .await
            .map(|output| output.student)
            .map_err(Error::UpdateStudent)
    }

    /// Unconditional delete. Succeeds and echoes the id even when the id does
    /// not exist.
    pub async fn delete(&self, id: &str) -> Result<String, Error> {
        self.lifecycle.ensure_exists().await?;

        self.client
            .delete_item(&self.table, id)
            .await
            .map_err(Error::DeleteStudent)?;

        Ok(id.to_owned())
    }

    /// Full scan with a substring filter over the name, email and phone
    /// number fields. The needle is lowercased while the stored fields are
    /// not, so matching is case-sensitive against a lowercased needle. An
    /// empty or whitespace query behaves like `get_all`.
    pub async fn search(&self, query: &str) -> Result<Vec<Student>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return self.get_all().await;
        }

        let needle = query.to_lowercase();
        let mut students = self.scan_for_search().await?;
        students.retain(|student| student.matches(&needle));

        Ok(students)
    }

    pub async fn search_by_address(&self, substring: &str) -> Result<Vec<Student>, Error> {
        let needle = substring.to_lowercase();
        let mut students = self.scan_for_search().await?;
        students.retain(|student| student.address.contains(&needle));

        Ok(students)
    }

    pub async fn search_by_email_domain(&self, substring: &str) -> Result<Vec<Student>, Error> {
        let needle = substring.to_lowercase();
        let mut students = self.scan_for_search().await?;
        students.retain(|student| student.email.contains(&needle));

        Ok(students)
    }

    async fn scan_for_search(&self) -> Result<Vec<Student>, Error> {
        self.lifecycle.ensure_exists().await?;

        self.client
            .scan(&self.table)
            .await
            .map(|output| output.students)
            .map_err(Error::SearchStudents)
    }
}
