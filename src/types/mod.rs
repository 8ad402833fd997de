mod student;
mod table_info;

pub use student::{NewStudent, Student, StudentPatch};
pub use table_info::{TableInfo, TableStatus};

pub(crate) use student::ATTR_ID;
