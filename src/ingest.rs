use crate::model::employee::NewEmployee;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};
use utoipa::ToSchema;

pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const SEX: &str = "Sex";
pub const EMAIL: &str = "Email";
pub const DATE_OF_BIRTH: &str = "Date of birth";
pub const JOB_TITLE: &str = "Job Title";

pub const REQUIRED_COLUMNS: [&str; 6] = [FIRST_NAME, LAST_NAME, SEX, EMAIL, DATE_OF_BIRTH, JOB_TITLE];

const DATE_OF_BIRTH_FORMAT: &str = "%d/%m/%Y";

/// chrono's `%Y` takes signs, short years and padding; the cell must not.
static DATE_OF_BIRTH_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$").expect("valid date pattern"));

/// Cell values read as "no value", on top of the empty string.
const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Display)]
pub enum IngestError {
    #[display(fmt = "CSV is missing required columns: {}", "_0.join(\", \")")]
    MissingColumns(Vec<String>),
    #[display(fmt = "Unable to read CSV: {}", _0)]
    Unreadable(csv::Error),
    #[display(fmt = "Unable to open staged upload: {}", _0)]
    Io(std::io::Error),
}

impl std::error::Error for IngestError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InvalidDateOfBirth,
    MissingFirstName,
    MissingEmail,
    MalformedRow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SkippedRow {
    /// 1-based data row, the header not counted.
    #[schema(example = 3)]
    pub row: u64,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub struct IngestReport {
    pub records: Vec<NewEmployee>,
    pub skipped: Vec<SkippedRow>,
}

/// Positions of the required columns in the header row.
struct ColumnIndex {
    first_name: usize,
    last_name: usize,
    sex: usize,
    email: usize,
    date_of_birth: usize,
    job_title: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, IngestError> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns(missing));
        }

        let at = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            first_name: at(FIRST_NAME),
            last_name: at(LAST_NAME),
            sex: at(SEX),
            email: at(EMAIL),
            date_of_birth: at(DATE_OF_BIRTH),
            job_title: at(JOB_TITLE),
        })
    }
}

pub fn parse_employees_file(path: &Path) -> Result<IngestReport, IngestError> {
    let file = std::fs::File::open(path).map_err(IngestError::Io)?;
    parse_employees(file)
}

/// Reads a comma-separated upload with a header row into candidate records.
///
/// Fails only when the header lacks a required column. Rows with a bad date of
/// birth, no first name, no email, or a malformed record are skipped and
/// reported in [`IngestReport::skipped`].
pub fn parse_employees<R: Read>(input: R) -> Result<IngestReport, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers().map_err(IngestError::Unreadable)?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut report = IngestReport::default();

    for (i, result) in reader.records().enumerate() {
        let row = i as u64 + 1;

        let outcome = match result {
            Ok(record) => build_employee(&record, &columns),
            Err(e) => {
                debug!(row, error = %e, "Unreadable CSV record");
                Err(SkipReason::MalformedRow)
            }
        };

        match outcome {
            Ok(employee) => report.records.push(employee),
            Err(reason) => {
                warn!(row, reason = ?reason, "Skipping row");
                report.skipped.push(SkippedRow { row, reason });
            }
        }
    }

    debug!(
        accepted = report.records.len(),
        skipped = report.skipped.len(),
        "CSV parsed"
    );

    Ok(report)
}

fn build_employee(record: &StringRecord, columns: &ColumnIndex) -> Result<NewEmployee, SkipReason> {
    let date_of_birth = cell(record, columns.date_of_birth)
        .filter(|raw| DATE_OF_BIRTH_SHAPE.is_match(raw))
        .and_then(|raw| NaiveDate::parse_from_str(raw, DATE_OF_BIRTH_FORMAT).ok())
        .ok_or(SkipReason::InvalidDateOfBirth)?;

    let first_name = cell(record, columns.first_name).ok_or(SkipReason::MissingFirstName)?;
    let email = cell(record, columns.email).ok_or(SkipReason::MissingEmail)?;

    Ok(NewEmployee {
        first_name: first_name.to_string(),
        last_name: cell(record, columns.last_name).unwrap_or_default().to_string(),
        sex: cell(record, columns.sex).map(str::to_string),
        email: email.to_string(),
        date_of_birth,
        job_title: cell(record, columns.job_title).unwrap_or_default().to_string(),
    })
}

/// `None` for short rows, empty cells and null tokens.
fn cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record
        .get(idx)
        .filter(|v| !v.is_empty() && !NULL_TOKENS.contains(v))
}
