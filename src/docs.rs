use crate::api::employee::{UploadCsvForm, UploadResponse};
use crate::ingest::{SkipReason, SkippedRow};
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Records API",
        version = "0.1.0",
        description = r#"
## Employee Records

Lists stored employees and bulk-loads new ones from a CSV upload.

### Upload format
- Comma-separated, header row required
- Columns: `First Name`, `Last Name`, `Sex`, `Email`, `Date of birth`, `Job Title`
- `Date of birth` as `dd/mm/yyyy`
- Rows with a bad date, no first name or no email are skipped and listed in the response
- A batch is inserted in one transaction; a duplicate email rejects the whole file
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::upload_csv
    ),
    components(
        schemas(
            Employee,
            UploadCsvForm,
            UploadResponse,
            SkippedRow,
            SkipReason
        )
    ),
    tags(
        (name = "Employee", description = "Employee record APIs"),
    )
)]
pub struct ApiDoc;
