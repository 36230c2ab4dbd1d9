use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// `null` 與缺少欄位都當成空列表
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub position: String,
    pub company: String,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub citation: Option<String>,
}

/// A faculty record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: i64,
    pub name: String,
    #[serde(default, alias = "designation")]
    pub title: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub office_location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub google_scholar_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub experience: Vec<ExperienceItem>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Body of `POST /admin/faculty` and `PUT /admin/faculty/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyPayload {
    pub name: String,
    #[serde(default, alias = "designation", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_scholar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub experience: Vec<ExperienceItem>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub publications: Vec<Publication>,
}

/// Result of `POST /admin/scrape`, also the editable detail block of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedData {
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub experience: Vec<ExperienceItem>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub publications: Vec<Publication>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl From<&Faculty> for ScrapedData {
    fn from(faculty: &Faculty) -> Self {
        Self {
            profile_picture_url: faculty.profile_picture_url.clone(),
            headline: faculty.headline.clone(),
            experience: faculty.experience.clone(),
            certifications: faculty.certifications.clone(),
            projects: faculty.projects.clone(),
            publications: faculty.publications.clone(),
        }
    }
}

/// 把空字串（或只有空白）轉成 `None`
pub fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// 命令列的手動輸入格式：以 `|` 分隔欄位，例如 "Professor|MIT|2015-2020"

fn split_entry(s: &str, max_parts: usize) -> Vec<String> {
    s.splitn(max_parts, '|').map(|p| p.trim().to_string()).collect()
}

impl FromStr for ExperienceItem {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts = split_entry(s, 3);
        match parts.as_slice() {
            [position, company, rest @ ..] if !position.is_empty() => Ok(Self {
                position: position.clone(),
                company: company.clone(),
                duration: rest.first().cloned().and_then(non_empty),
            }),
            _ => Err(format!(
                "expected 'position|company[|duration]', got '{}'",
                s
            )),
        }
    }
}

impl FromStr for Project {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts = split_entry(s, 2);
        match parts.as_slice() {
            [title, rest @ ..] if !title.is_empty() => Ok(Self {
                title: title.clone(),
                description: rest.first().cloned().and_then(non_empty),
            }),
            _ => Err(format!("expected 'title[|description]', got '{}'", s)),
        }
    }
}

impl FromStr for Certification {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts = split_entry(s, 2);
        match parts.as_slice() {
            [name, rest @ ..] if !name.is_empty() => Ok(Self {
                name: name.clone(),
                issuer: rest.first().cloned().and_then(non_empty),
            }),
            _ => Err(format!("expected 'name[|issuer]', got '{}'", s)),
        }
    }
}
