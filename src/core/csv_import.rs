use crate::domain::model::{non_empty, FacultyPayload};
use crate::domain::ports::DirectoryApi;
use crate::utils::error::{HubError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

pub const TEMPLATE_FILE_NAME: &str = "faculty_import_template.csv";

pub const TEMPLATE: &str = "\
name,title,department,office_location,email,linkedin_url,google_scholar_url,headline
Dr. John Doe,Professor,Computer Science,Building A Room 305,john.doe@university.edu,https://linkedin.com/in/johndoe,https://scholar.google.com/citations?user=ABC123,AI and Machine Learning Researcher
Dr. Jane Smith,Associate Professor,Electrical Engineering,Building B Room 201,jane.smith@university.edu,https://linkedin.com/in/janesmith,https://scholar.google.com/citations?user=XYZ456,Power Systems and Renewable Energy Expert
";

/// Number of data rows shown in an import preview.
pub const PREVIEW_ROWS: usize = 5;

const TOO_SHORT: &str = "CSV file must have at least a header row and one data row";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Title,
    Department,
    OfficeLocation,
    Email,
    LinkedinUrl,
    GoogleScholarUrl,
    Headline,
    ProfilePictureUrl,
}

impl Column {
    fn from_header(header: &str) -> Option<Self> {
        match header.trim().to_lowercase().as_str() {
            "name" => Some(Column::Name),
            "title" => Some(Column::Title),
            "department" => Some(Column::Department),
            "office_location" | "office" => Some(Column::OfficeLocation),
            "email" => Some(Column::Email),
            "linkedin_url" | "linkedin" => Some(Column::LinkedinUrl),
            "google_scholar_url" | "scholar_url" | "scholar" => Some(Column::GoogleScholarUrl),
            "headline" => Some(Column::Headline),
            "profile_picture_url" | "picture_url" | "photo_url" => {
                Some(Column::ProfilePictureUrl)
            }
            _ => None,
        }
    }

    fn assign(self, payload: &mut FacultyPayload, value: &str) {
        match self {
            Column::Name => payload.name = value.to_string(),
            Column::Title => payload.title = non_empty(value),
            Column::Department => payload.department = non_empty(value),
            Column::OfficeLocation => payload.office_location = non_empty(value),
            Column::Email => payload.email = non_empty(value),
            Column::LinkedinUrl => payload.linkedin_url = non_empty(value),
            Column::GoogleScholarUrl => payload.google_scholar_url = non_empty(value),
            Column::Headline => payload.headline = non_empty(value),
            Column::ProfilePictureUrl => payload.profile_picture_url = non_empty(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl CsvPreview {
    pub fn remaining_rows(&self) -> usize {
        self.total_rows.saturating_sub(self.rows.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFailure {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub successful: usize,
    pub failures: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// 讀出表頭與所有非空白資料列；少於一列資料即視為錯誤
///
/// Fields are split on commas only: quotes are kept as literal text, so a
/// stray `"` never swallows the lines that follow it.
fn read_table(text: &str) -> Result<(StringRecord, Vec<StringRecord>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    // 第一個非空白列才是表頭
    let mut headers: Option<StringRecord> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        match headers {
            None => headers = Some(record),
            Some(_) => rows.push(record),
        }
    }

    match headers {
        Some(headers) if !rows.is_empty() => Ok((headers, rows)),
        _ => Err(HubError::CsvImportError {
            message: TOO_SHORT.to_string(),
        }),
    }
}

pub fn preview_csv(text: &str) -> Result<CsvPreview> {
    let (headers, rows) = read_table(text)?;

    Ok(CsvPreview {
        headers: headers.iter().map(str::to_string).collect(),
        total_rows: rows.len(),
        rows: rows
            .iter()
            .take(PREVIEW_ROWS)
            .map(|row| row.iter().map(str::to_string).collect())
            .collect(),
    })
}

/// Map CSV rows onto faculty payloads through the fixed column mapping.
///
/// Unknown columns are ignored and a later column overrides an earlier one
/// mapped to the same field. Rows without a name are dropped.
pub fn parse_faculty_csv(text: &str) -> Result<Vec<FacultyPayload>> {
    let (headers, rows) = read_table(text)?;
    let columns: Vec<Option<Column>> = headers.iter().map(Column::from_header).collect();

    let unknown: Vec<&str> = headers
        .iter()
        .zip(&columns)
        .filter(|(_, column)| column.is_none())
        .map(|(header, _)| header)
        .collect();
    if !unknown.is_empty() {
        tracing::debug!("Ignoring unknown CSV columns: {:?}", unknown);
    }

    let mut faculty = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let mut payload = FacultyPayload::default();
        for (position, column) in columns.iter().enumerate() {
            if let Some(column) = column {
                column.assign(&mut payload, row.get(position).unwrap_or(""));
            }
        }

        if payload.name.is_empty() {
            tracing::debug!("Skipping CSV row {} without a name", index + 2);
            continue;
        }
        faculty.push(payload);
    }

    Ok(faculty)
}

/// Create every record in order, one request at a time. A failed row is
/// logged and counted; it never aborts the rest of the import.
pub async fn import_faculty<A: DirectoryApi + ?Sized>(
    api: &A,
    records: &[FacultyPayload],
) -> ImportReport {
    let mut report = ImportReport::default();

    for record in records {
        match api.create_faculty(record).await {
            Ok(created) => {
                tracing::info!("✅ Imported {} (id {})", created.name, created.id);
                report.successful += 1;
            }
            Err(e) => {
                tracing::error!("❌ Failed to create faculty {}: {}", record.name, e);
                report.failures.push(ImportFailure {
                    name: record.name.clone(),
                    error: e.user_friendly_message(),
                });
            }
        }
    }

    report
}
