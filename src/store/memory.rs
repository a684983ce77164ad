use super::{EmployeeStore, StoreError};
use crate::model::employee::{Employee, NewEmployee};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// Same uniqueness and all-or-nothing rules as the MySQL table, kept in memory.
#[derive(Default)]
pub struct InMemoryEmployeeStore {
    rows: Mutex<Vec<Employee>>,
    fail_reads: bool,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose reads always fail, for exercising the 500 path.
    pub fn failing_reads() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_reads: true,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn insert_batch(&self, records: &[NewEmployee]) -> Result<u64, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let mut emails: HashSet<&str> = rows.iter().map(|r| r.email.as_str()).collect();

        for rec in records {
            if !emails.insert(rec.email.as_str()) {
                return Err(StoreError::Database(sqlx::Error::Protocol(format!(
                    "Duplicate entry '{}' for key 'employees.uq_employees_email'",
                    rec.email
                ))));
            }
        }

        let next_id = rows.last().map(|r| r.id).unwrap_or(0) + 1;
        let staged: Vec<Employee> = records
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, rec)| Employee {
                id: next_id + i as u64,
                first_name: rec.first_name,
                last_name: rec.last_name,
                sex: rec.sex,
                email: rec.email,
                date_of_birth: rec.date_of_birth,
                job_title: rec.job_title,
            })
            .collect();
        rows.extend(staged);

        Ok(records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candidate(email: &str) -> NewEmployee {
        NewEmployee {
            first_name: "Jane".into(),
            last_name: String::new(),
            sex: None,
            email: email.into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 3, 15).unwrap(),
            job_title: String::new(),
        }
    }

    #[actix_web::test]
    async fn duplicate_email_rejects_whole_batch() {
        let store = InMemoryEmployeeStore::new();
        store.insert_batch(&[candidate("a@x.com")]).await.unwrap();

        let err = store
            .insert_batch(&[candidate("b@x.com"), candidate("a@x.com")])
            .await
            .unwrap_err();

        assert!(err.to_string().contains("a@x.com"));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn emails_differing_only_in_case_are_distinct() {
        let store = InMemoryEmployeeStore::new();
        let inserted = store
            .insert_batch(&[candidate("jane@x.com"), candidate("JANE@X.COM")])
            .await
            .unwrap();

        assert_eq!(inserted, 2);
    }

    #[actix_web::test]
    async fn ids_are_assigned_in_order() {
        let store = InMemoryEmployeeStore::new();
        store
            .insert_batch(&[candidate("a@x.com"), candidate("b@x.com")])
            .await
            .unwrap();

        let ids: Vec<u64> = store.list_all().await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
