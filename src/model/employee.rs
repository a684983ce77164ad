use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "first_name": "Jane",
        "last_name": "Doe",
        "sex": "F",
        "email": "jane@x.com",
        "date_of_birth": "1990-03-15",
        "job_title": "Engineer"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Jane")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    #[schema(example = "F", nullable = true)]
    pub sex: Option<String>,

    #[schema(example = "jane@x.com")]
    pub email: String,

    #[schema(
        example = "1990-03-15",
        value_type = String,
        format = "date"
    )]
    pub date_of_birth: NaiveDate,

    #[schema(example = "Engineer")]
    pub job_title: String,
}

/// A validated row waiting to be written. `id` is assigned by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub sex: Option<String>,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub job_title: String,
}
