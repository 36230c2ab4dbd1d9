use crate::domain::model::AccessToken;
use crate::domain::ports::{DirectoryApi, Storage};
use crate::utils::error::{HubError, Result};
use crate::utils::validation;

pub const TOKEN_FILE: &str = "admin_token";

/// Persists the admin access token between command invocations.
pub struct Session<S: Storage> {
    storage: S,
}

impl<S: Storage> Session<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn token(&self) -> Result<Option<String>> {
        match self.storage.read_file(TOKEN_FILE).await {
            Ok(bytes) => {
                let token = String::from_utf8_lossy(&bytes).trim().to_string();
                Ok(Some(token).filter(|t| !t.is_empty()))
            }
            Err(HubError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// 受保護的指令需要先登入
    pub async fn require_token(&self) -> Result<String> {
        self.token().await?.ok_or(HubError::NotAuthenticated)
    }

    pub async fn login<A: DirectoryApi + ?Sized>(
        &self,
        api: &A,
        password: &str,
    ) -> Result<AccessToken> {
        validation::validate_non_empty_string("password", password).map_err(|_| {
            HubError::ValidationError {
                message: "Password is required".to_string(),
            }
        })?;

        let token = api.login(password).await?;
        self.storage
            .write_file(TOKEN_FILE, token.access_token.as_bytes())
            .await?;

        tracing::info!("🔑 Admin session stored");
        Ok(token)
    }

    /// Returns whether a stored session was removed.
    pub async fn logout(&self) -> Result<bool> {
        let removed = self.storage.remove_file(TOKEN_FILE).await?;
        if removed {
            tracing::info!("🔒 Admin session cleared");
        } else {
            tracing::debug!("No admin session to clear");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{MockApi, MockStorage};

    #[tokio::test]
    async fn test_login_stores_token() {
        let api = MockApi::new().with_password("letmein");
        let storage = MockStorage::new();
        let session = Session::new(storage.clone());

        let token = session.login(&api, "letmein").await.unwrap();

        assert_eq!(token.token_type, "bearer");
        assert_eq!(
            storage.get_file(TOKEN_FILE).await,
            Some(token.access_token.clone().into_bytes())
        );
        assert_eq!(session.require_token().await.unwrap(), token.access_token);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_state() {
        let api = MockApi::new().with_password("letmein");
        let session = Session::new(MockStorage::new());

        let err = session.login(&api, "wrong").await.unwrap_err();

        assert!(matches!(err, HubError::InvalidPassword));
        assert!(session.token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_password_never_reaches_api() {
        let api = MockApi::new().with_password("letmein");
        let session = Session::new(MockStorage::new());

        let err = session.login(&api, "   ").await.unwrap_err();

        assert!(matches!(err, HubError::ValidationError { .. }));
        assert_eq!(api.call_count("login"), 0);
    }

    #[tokio::test]
    async fn test_logout_and_require_token() {
        let api = MockApi::new().with_password("pw");
        let session = Session::new(MockStorage::new());

        assert!(matches!(
            session.require_token().await.unwrap_err(),
            HubError::NotAuthenticated
        ));

        session.login(&api, "pw").await.unwrap();
        assert!(session.logout().await.unwrap());
        assert!(!session.logout().await.unwrap());
        assert!(session.token().await.unwrap().is_none());
    }
}
