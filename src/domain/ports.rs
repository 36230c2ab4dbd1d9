use crate::domain::model::{AccessToken, Faculty, FacultyPayload, ScrapedData};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 檔案不存在時回傳 `Ok(false)`
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn session_dir(&self) -> &str;
}

/// The faculty hub REST API.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn list_faculty(&self) -> Result<Vec<Faculty>>;
    async fn get_faculty(&self, id: i64) -> Result<Faculty>;
    async fn search_faculty(&self, query: &str) -> Result<Vec<Faculty>>;

    async fn login(&self, password: &str) -> Result<AccessToken>;
    async fn scrape_preview(
        &self,
        linkedin_url: Option<&str>,
        scholar_url: Option<&str>,
    ) -> Result<ScrapedData>;
    async fn create_faculty(&self, payload: &FacultyPayload) -> Result<Faculty>;
    async fn update_faculty(&self, id: i64, payload: &FacultyPayload) -> Result<Faculty>;
    async fn delete_faculty(&self, id: i64) -> Result<()>;
}
