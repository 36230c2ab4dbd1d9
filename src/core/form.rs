use crate::domain::model::{
    non_empty, Certification, ExperienceItem, Faculty, FacultyPayload, Project, ScrapedData,
};
use crate::utils::error::{HubError, Result};
use crate::utils::validation::{self, Validate};

pub const DESIGNATION_OPTIONS: [&str; 10] = [
    "Assistant Professor",
    "Associate Professor",
    "Professor",
    "Head of Department",
    "Lab Attendant",
    "Research Scholar",
    "Visiting Professor",
    "Emeritus Professor",
    "Lecturer",
    "Senior Lecturer",
];

pub const DEPARTMENT_OPTIONS: [&str; 13] = [
    "Computer Science",
    "Mechanical Engineering",
    "Civil Engineering",
    "Electrical Engineering",
    "Electronics and Communication",
    "Information Technology",
    "Chemical Engineering",
    "Biotechnology",
    "Mathematics",
    "Physics",
    "Chemistry",
    "Management Studies",
    "Humanities",
];

/// The plain text inputs of the faculty form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub designation: String,
    pub department: String,
    pub office_location: String,
    pub email: String,
    pub linkedin_url: String,
    pub google_scholar_url: String,
}

/// Field edits; `Some("")` clears a field, `None` leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct FormChanges {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub office_location: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub google_scholar_url: Option<String>,
}

/// Manually entered profile details.
#[derive(Debug, Clone, Default)]
pub struct ManualEntry {
    pub profile_picture_url: Option<String>,
    pub headline: Option<String>,
    pub experience: Vec<ExperienceItem>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    /// Empty experience, projects and certifications before appending.
    pub clear_lists: bool,
}

impl ManualEntry {
    pub fn is_empty(&self) -> bool {
        self.profile_picture_url.is_none()
            && self.headline.is_none()
            && self.experience.is_empty()
            && self.projects.is_empty()
            && self.certifications.is_empty()
            && !self.clear_lists
    }
}

/// Add/edit form state. `details` holds the scraped or manually entered
/// profile block and is merged over the fields when the payload is built.
#[derive(Debug, Clone, Default)]
pub struct FacultyForm {
    id: Option<i64>,
    pub fields: FormFields,
    pub details: Option<ScrapedData>,
}

impl FacultyForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 編輯時以現有資料預先填入
    pub fn edit(faculty: &Faculty) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        Self {
            id: Some(faculty.id),
            fields: FormFields {
                name: faculty.name.clone(),
                designation: text(&faculty.title),
                department: text(&faculty.department),
                office_location: text(&faculty.office_location),
                email: text(&faculty.email),
                linkedin_url: text(&faculty.linkedin_url),
                google_scholar_url: text(&faculty.google_scholar_url),
            },
            details: Some(ScrapedData::from(faculty)),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn apply(&mut self, changes: &FormChanges) {
        let fields = &mut self.fields;
        let targets = [
            (&changes.name, &mut fields.name),
            (&changes.designation, &mut fields.designation),
            (&changes.department, &mut fields.department),
            (&changes.office_location, &mut fields.office_location),
            (&changes.email, &mut fields.email),
            (&changes.linkedin_url, &mut fields.linkedin_url),
            (&changes.google_scholar_url, &mut fields.google_scholar_url),
        ];

        for (change, field) in targets {
            if let Some(value) = change {
                *field = value.trim().to_string();
            }
        }
    }

    /// URLs to send to the scrape endpoint; at least one must be filled in.
    pub fn scrape_urls(&self) -> Result<(Option<&str>, Option<&str>)> {
        let linkedin = Some(self.fields.linkedin_url.trim()).filter(|s| !s.is_empty());
        let scholar = Some(self.fields.google_scholar_url.trim()).filter(|s| !s.is_empty());

        if linkedin.is_none() && scholar.is_none() {
            return Err(HubError::ValidationError {
                message: "Scraping needs a LinkedIn URL or a Google Scholar URL".to_string(),
            });
        }
        Ok((linkedin, scholar))
    }

    /// 爬取結果整個取代目前的細節區塊
    pub fn apply_scrape(&mut self, scraped: ScrapedData) {
        self.details = Some(scraped);
    }

    pub fn apply_manual(&mut self, manual: ManualEntry) {
        if manual.is_empty() {
            return;
        }

        let details = self.details.get_or_insert_with(ScrapedData::default);

        if manual.clear_lists {
            details.experience.clear();
            details.projects.clear();
            details.certifications.clear();
        }
        if let Some(url) = manual.profile_picture_url {
            details.profile_picture_url = non_empty(url);
        }
        if let Some(headline) = manual.headline {
            details.headline = non_empty(headline);
        }
        details.experience.extend(manual.experience);
        details.projects.extend(manual.projects);
        details.certifications.extend(manual.certifications);
    }

    /// Designation/department values outside the known option lists.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let designation = self.fields.designation.as_str();
        if !designation.is_empty() && !DESIGNATION_OPTIONS.contains(&designation) {
            warnings.push(format!("'{}' is not one of the standard designations", designation));
        }
        let department = self.fields.department.as_str();
        if !department.is_empty() && !DEPARTMENT_OPTIONS.contains(&department) {
            warnings.push(format!("'{}' is not one of the standard departments", department));
        }
        warnings
    }

    pub fn payload(&self) -> FacultyPayload {
        let fields = &self.fields;
        let mut payload = FacultyPayload {
            name: fields.name.trim().to_string(),
            title: non_empty(fields.designation.as_str()),
            department: non_empty(fields.department.as_str()),
            office_location: non_empty(fields.office_location.as_str()),
            email: non_empty(fields.email.as_str()),
            linkedin_url: non_empty(fields.linkedin_url.as_str()),
            google_scholar_url: non_empty(fields.google_scholar_url.as_str()),
            ..Default::default()
        };

        if let Some(details) = &self.details {
            payload.profile_picture_url = details.profile_picture_url.clone().and_then(non_empty);
            payload.headline = details.headline.clone().and_then(non_empty);
            payload.experience = details.experience.clone();
            payload.certifications = details.certifications.clone();
            payload.projects = details.projects.clone();
            payload.publications = details.publications.clone();
        }

        payload
    }
}

impl Validate for FacultyForm {
    fn validate(&self) -> Result<()> {
        self.check_fields().map_err(|e| match e {
            HubError::InvalidConfigValueError { field, reason, .. } => HubError::ValidationError {
                message: format!("{}: {}", field, reason),
            },
            other => other,
        })
    }
}

impl FacultyForm {
    fn check_fields(&self) -> Result<()> {
        let fields = &self.fields;
        validation::validate_non_empty_string("name", &fields.name)?;

        if !fields.email.trim().is_empty() {
            validation::validate_email("email", fields.email.trim())?;
        }
        if !fields.linkedin_url.trim().is_empty() {
            validation::validate_url("linkedin_url", fields.linkedin_url.trim())?;
        }
        if !fields.google_scholar_url.trim().is_empty() {
            validation::validate_url("google_scholar_url", fields.google_scholar_url.trim())?;
        }
        if let Some(url) = self.details.as_ref().and_then(|d| d.profile_picture_url.as_deref()) {
            if !url.trim().is_empty() {
                validation::validate_url("profile_picture_url", url.trim())?;
            }
        }
        Ok(())
    }
}
