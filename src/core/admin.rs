use crate::core::csv_import::{self, ImportReport};
use crate::core::form::FacultyForm;
use crate::domain::model::{Faculty, ScrapedData};
use crate::domain::ports::DirectoryApi;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Admin dashboard operations. The API handed in must carry the session token.
pub struct AdminConsole<A: DirectoryApi> {
    api: A,
}

impl<A: DirectoryApi> AdminConsole<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn faculty(&self) -> Result<Vec<Faculty>> {
        self.api.list_faculty().await
    }

    pub async fn open_edit(&self, id: i64) -> Result<FacultyForm> {
        let existing = self.api.get_faculty(id).await?;
        Ok(FacultyForm::edit(&existing))
    }

    /// 以表單上的網址呼叫伺服器端爬蟲，結果取代表單的細節區塊
    pub async fn scrape(&self, form: &mut FacultyForm) -> Result<ScrapedData> {
        let (linkedin, scholar) = form.scrape_urls()?;
        tracing::info!("🔍 Requesting scrape preview");
        let scraped = self.api.scrape_preview(linkedin, scholar).await?;
        form.apply_scrape(scraped.clone());
        Ok(scraped)
    }

    pub async fn scrape_urls(
        &self,
        linkedin_url: Option<&str>,
        scholar_url: Option<&str>,
    ) -> Result<ScrapedData> {
        let mut form = FacultyForm::new();
        form.fields.linkedin_url = linkedin_url.unwrap_or_default().to_string();
        form.fields.google_scholar_url = scholar_url.unwrap_or_default().to_string();
        self.scrape(&mut form).await
    }

    /// Create when the form is new, update when it was opened for editing.
    pub async fn save(&self, form: &FacultyForm) -> Result<Faculty> {
        form.validate()?;
        for warning in form.warnings() {
            tracing::warn!("⚠️ {}", warning);
        }

        let payload = form.payload();
        let saved = match form.id() {
            Some(id) => self.api.update_faculty(id, &payload).await?,
            None => self.api.create_faculty(&payload).await?,
        };

        tracing::info!("💾 Saved {} (id {})", saved.name, saved.id);
        Ok(saved)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.api.delete_faculty(id).await?;
        tracing::info!("🗑️ Deleted faculty {}", id);
        Ok(())
    }

    pub async fn import_csv(&self, text: &str) -> Result<ImportReport> {
        let records = csv_import::parse_faculty_csv(text)?;
        tracing::info!("📥 Importing {} faculty records", records.len());
        Ok(csv_import::import_faculty(&self.api, &records).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::{FormChanges, ManualEntry};
    use crate::core::testing::MockApi;
    use crate::utils::error::HubError;

    #[tokio::test]
    async fn test_save_new_form_creates() {
        let api = MockApi::new();
        let admin = AdminConsole::new(api.clone());

        let mut form = FacultyForm::new();
        form.apply(&FormChanges {
            name: Some("Dr. Grace Hopper".to_string()),
            department: Some("Computer Science".to_string()),
            ..Default::default()
        });
        let saved = admin.save(&form).await.unwrap();

        assert_eq!(saved.name, "Dr. Grace Hopper");
        assert_eq!(api.call_count("create"), 1);
        assert_eq!(admin.faculty().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_updates_existing_record() {
        let api = MockApi::new().seed("Dr. Grace Hopper", "Computer Science");
        let admin = AdminConsole::new(api.clone());
        let id = api.records()[0].id;

        let mut form = admin.open_edit(id).await.unwrap();
        form.apply(&FormChanges {
            designation: Some("Emeritus Professor".to_string()),
            ..Default::default()
        });
        form.apply_manual(ManualEntry {
            headline: Some("COBOL pioneer".to_string()),
            ..Default::default()
        });
        admin.save(&form).await.unwrap();

        let stored = &api.records()[0];
        assert_eq!(api.call_count("update"), 1);
        assert_eq!(stored.title.as_deref(), Some("Emeritus Professor"));
        assert_eq!(stored.headline.as_deref(), Some("COBOL pioneer"));
        assert_eq!(stored.department.as_deref(), Some("Computer Science"));
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let api = MockApi::new();
        let admin = AdminConsole::new(api.clone());

        let err = admin.save(&FacultyForm::new()).await.unwrap_err();

        assert!(matches!(err, HubError::ValidationError { .. }));
        assert_eq!(api.call_count("create"), 0);
    }

    #[tokio::test]
    async fn test_scrape_fills_form_details() {
        let api = MockApi::new().with_scrape_headline("Quantum Computing Researcher");
        let admin = AdminConsole::new(api.clone());

        let mut form = FacultyForm::new();
        form.fields.name = "Dr. Q".to_string();
        form.fields.linkedin_url = "https://linkedin.com/in/q".to_string();
        admin.scrape(&mut form).await.unwrap();

        assert_eq!(
            form.payload().headline.as_deref(),
            Some("Quantum Computing Researcher")
        );
    }

    #[tokio::test]
    async fn test_scrape_without_urls_is_rejected_locally() {
        let api = MockApi::new();
        let admin = AdminConsole::new(api.clone());

        assert!(admin.scrape_urls(None, Some("  ")).await.is_err());
        assert_eq!(api.call_count("scrape"), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_record() {
        let admin = AdminConsole::new(MockApi::new());
        assert!(matches!(
            admin.delete(7).await.unwrap_err(),
            HubError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_import_csv_reports_counts() {
        let api = MockApi::new();
        let admin = AdminConsole::new(api.clone());

        let report = admin
            .import_csv("name,department\nDr. A,Physics\nDr. B,Mathematics\n")
            .await
            .unwrap();

        assert_eq!(report.successful, 2);
        assert_eq!(report.failed(), 0);
    }
}
