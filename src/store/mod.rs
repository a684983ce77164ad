use crate::model::employee::{Employee, NewEmployee};
use async_trait::async_trait;
use derive_more::Display;

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub use mysql::MySqlEmployeeStore;

pub const EMPLOYEES_TABLE: &str = "employees";

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "{}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}

/// Data-access handle for the employee table, shared with handlers as
/// `web::Data<dyn EmployeeStore>`.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Every stored record, in whatever order storage returns them.
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError>;

    /// Writes the whole batch in one transaction and returns the number of
    /// rows inserted. Nothing is kept if any row fails.
    async fn insert_batch(&self, records: &[NewEmployee]) -> Result<u64, StoreError>;
}
