use crate::domain::model::Faculty;
use crate::domain::ports::DirectoryApi;
use crate::utils::error::Result;

/// Public, unauthenticated browsing of the faculty directory.
pub struct Directory<A: DirectoryApi> {
    api: A,
}

impl<A: DirectoryApi> Directory<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// A blank query lists every member; anything else goes to search.
    pub async fn browse(&self, query: &str) -> Result<Vec<Faculty>> {
        if query.trim().is_empty() {
            tracing::debug!("Listing all faculty");
            return self.api.list_faculty().await;
        }

        tracing::debug!("Searching faculty for '{}'", query);
        self.api.search_faculty(query).await
    }

    pub async fn profile(&self, id: i64) -> Result<Faculty> {
        self.api.get_faculty(id).await
    }
}
