use super::{EMPLOYEES_TABLE, EmployeeStore, StoreError};
use crate::model::employee::{Employee, NewEmployee};
use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use tracing::debug;

/// MySQL caps a statement at 65535 placeholders; six per row.
const INSERT_CHUNK_ROWS: usize = 1000;

#[derive(Clone)]
pub struct MySqlEmployeeStore {
    pool: MySqlPool,
}

impl MySqlEmployeeStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for MySqlEmployeeStore {
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        // email is utf8mb4_bin; the cast keeps it decodable as a string
        let sql = format!(
            "SELECT id, first_name, last_name, sex, CAST(email AS CHAR) AS email, date_of_birth, job_title FROM {}",
            EMPLOYEES_TABLE
        );
        debug!(sql = %sql, "Fetching employees");

        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(employees)
    }

    async fn insert_batch(&self, records: &[NewEmployee]) -> Result<u64, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        // dropping `tx` without commit rolls the whole batch back
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for chunk in records.chunks(INSERT_CHUNK_ROWS) {
            let mut builder: QueryBuilder<MySql> = QueryBuilder::new(format!(
                "INSERT INTO {} (first_name, last_name, sex, email, date_of_birth, job_title) ",
                EMPLOYEES_TABLE
            ));
            builder.push_values(chunk, |mut row, emp| {
                row.push_bind(&emp.first_name)
                    .push_bind(&emp.last_name)
                    .push_bind(&emp.sex)
                    .push_bind(&emp.email)
                    .push_bind(emp.date_of_birth)
                    .push_bind(&emp.job_title);
            });

            let result = builder.build().execute(&mut *tx).await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        debug!(inserted, "Employee batch committed");

        Ok(inserted)
    }
}
