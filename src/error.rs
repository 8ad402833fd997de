#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to ensure the student table exists")]
    EnsureTable(#[source] anyhow::Error),
    #[error("Timed out waiting for table `{table}` to become active after {attempts} attempts")]
    TableTimeout { table: String, attempts: usize },
    #[error("Failed to describe the student table")]
    DescribeTable(#[source] anyhow::Error),
    #[error("Failed to list tables")]
    ListTables(#[source] anyhow::Error),
    #[error("Failed to create student")]
    CreateStudent(#[source] anyhow::Error),
    #[error("Failed to fetch students")]
    FetchStudents(#[source] anyhow::Error),
    #[error("Failed to fetch student")]
    FetchStudent(#[source] anyhow::Error),
    #[error("Failed to update student")]
    UpdateStudent(#[source] anyhow::Error),
    #[error("Failed to delete student")]
    DeleteStudent(#[source] anyhow::Error),
    #[error("Failed to search students")]
    SearchStudents(#[source] anyhow::Error),
}
