use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use super::session::{now_secs, Session, SessionStore};
use super::IdentityProvider;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::User;

/// Firebase Authentication over its REST API
pub struct FirebaseAuth {
    client: Client,
    api_key: String,
    identity_url: String,
    token_url: String,
    session: RwLock<Option<Session>>,
    store: Option<SessionStore>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: Option<String>,
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl FirebaseAuth {
    /// Create a provider from configuration, persisting the session at
    /// `config.session_path`
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let api_key = config.api_key().ok_or(ClientError::MissingApiKey)?;
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(FirebaseAuth {
            client,
            api_key,
            identity_url: config.auth.identity_url.clone(),
            token_url: config.auth.token_url.clone(),
            session: RwLock::new(None),
            store: Some(SessionStore::new(&config.session_path)),
        })
    }

    #[doc(hidden)]
    pub fn with_base_urls(api_key: String, identity_url: String, token_url: String) -> Self {
        FirebaseAuth {
            client: Client::new(),
            api_key,
            identity_url,
            token_url,
            session: RwLock::new(None),
            store: None,
        }
    }

    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Pick up a session persisted by an earlier run. An unreadable session
    /// file is discarded and the user starts signed out.
    pub async fn restore(&self) -> Result<Option<User>, ClientError> {
        let Some(store) = &self.store else {
            return Ok(None);
        };
        let restored = match store.load().await {
            Ok(restored) => restored,
            Err(e) => {
                warn!(
                    "Discarding unreadable session file {}: {}",
                    store.path().display(),
                    e
                );
                store.clear().await?;
                None
            }
        };
        let user = restored.as_ref().map(Session::user);
        if let Some(user) = &user {
            info!("Restored session for {}", user.uid);
        }
        *self.session.write().await = restored;
        Ok(user)
    }

    async fn set_session(&self, session: Session) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&session).await {
                warn!("Failed to persist session: {}", e);
            }
        }
        *self.session.write().await = Some(session);
    }

    async fn refresh(&self, refresh_token: &str, email: Option<String>) -> Result<Session, ClientError> {
        debug!("Refreshing ID token");
        let response = self
            .client
            .post(format!("{}/v1/token", self.token_url))
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        let body: RefreshResponse = check(response).await?.json().await?;
        Ok(Session {
            uid: body.user_id,
            email,
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at: now_secs() + parse_expires_in(&body.expires_in),
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let response = self
            .client
            .post(format!("{}/v1/accounts:signInWithPassword", self.identity_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "email": email,
                "password": password,
                "returnSecureToken": true
            }))
            .send()
            .await?;

        let body: SignInResponse = check(response).await?.json().await?;
        let session = Session {
            uid: body.local_id,
            email: body.email.or_else(|| Some(email.to_string())),
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at: now_secs() + parse_expires_in(&body.expires_in),
        };
        let user = session.user();
        info!("Signed in as {}", user.uid);
        self.set_session(session).await;
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        // Stay signed in unless the stored session is gone too
        if let Some(store) = &self.store {
            store.clear().await?;
        }
        *self.session.write().await = None;
        info!("Signed out");
        Ok(())
    }

    async fn send_password_reset_email(&self, email: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/v1/accounts:sendOobCode", self.identity_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "requestType": "PASSWORD_RESET",
                "email": email
            }))
            .send()
            .await?;

        check(response).await?;
        debug!("Password reset email requested for {}", email);
        Ok(())
    }

    async fn current_user(&self) -> Option<User> {
        self.session.read().await.as_ref().map(Session::user)
    }

    async fn id_token(&self) -> Result<String, ClientError> {
        let current = self
            .session
            .read()
            .await
            .clone()
            .ok_or(ClientError::NotSignedIn)?;

        if !current.needs_refresh(now_secs()) {
            return Ok(current.id_token);
        }

        let refreshed = self.refresh(&current.refresh_token, current.email).await?;
        let token = refreshed.id_token.clone();
        self.set_session(refreshed).await;
        Ok(token)
    }
}

/// Turn a non-success response into an SDK-style auth error
async fn check(response: Response) -> Result<Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    debug!("Identity provider error ({}): {}", status, text);
    let code = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error.message)
        .unwrap_or_else(|_| "INTERNAL_ERROR".to_string());
    Err(ClientError::Auth(firebase_error_message(&code)))
}

fn parse_expires_in(value: &str) -> u64 {
    value.trim().parse().unwrap_or(3600)
}

/// Map a REST error code such as `EMAIL_NOT_FOUND` or
/// `WEAK_PASSWORD : Password should be at least 6 characters` to the message
/// the web SDK would show.
pub fn firebase_error_message(server_code: &str) -> String {
    let code = server_code.split(" : ").next().unwrap_or_default().trim();
    let auth_code = match code {
        "EMAIL_NOT_FOUND" => "user-not-found".to_string(),
        "INVALID_PASSWORD" => "wrong-password".to_string(),
        "INVALID_LOGIN_CREDENTIALS" => "invalid-credential".to_string(),
        "USER_DISABLED" => "user-disabled".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "too-many-requests".to_string(),
        "MISSING_PASSWORD" => "missing-password".to_string(),
        "MISSING_EMAIL" => "missing-email".to_string(),
        "TOKEN_EXPIRED" | "USER_NOT_FOUND" => "user-token-expired".to_string(),
        "INVALID_REFRESH_TOKEN" | "INVALID_ID_TOKEN" => "invalid-user-token".to_string(),
        "OPERATION_NOT_ALLOWED" | "PASSWORD_LOGIN_DISABLED" => "operation-not-allowed".to_string(),
        c if c.starts_with("API key not valid") => "invalid-api-key".to_string(),
        "" => "internal-error".to_string(),
        other => other.to_lowercase().replace('_', "-"),
    };
    format!("Firebase: Error (auth/{}).", auth_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn auth_for(server: &Server) -> FirebaseAuth {
        FirebaseAuth::with_base_urls("test-key".to_string(), server.url(), server.url())
    }

    const SIGN_IN_BODY: &str = r#"{
        "localId": "uid-123",
        "email": "cook@example.com",
        "idToken": "id-token-1",
        "refreshToken": "refresh-1",
        "expiresIn": "3600",
        "registered": true
    }"#;

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            firebase_error_message("EMAIL_NOT_FOUND"),
            "Firebase: Error (auth/user-not-found)."
        );
        assert_eq!(
            firebase_error_message("INVALID_LOGIN_CREDENTIALS"),
            "Firebase: Error (auth/invalid-credential)."
        );
        assert_eq!(
            firebase_error_message("WEAK_PASSWORD : Password should be at least 6 characters"),
            "Firebase: Error (auth/weak-password)."
        );
        assert_eq!(
            firebase_error_message("API key not valid. Please pass a valid API key."),
            "Firebase: Error (auth/invalid-api-key)."
        );
    }

    #[tokio::test]
    async fn test_sign_in_sets_current_user() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Regex("^/v1/accounts:signInWithPassword".to_string()))
            .match_query(Matcher::UrlEncoded("key".to_string(), "test-key".to_string()))
            .match_body(Matcher::PartialJson(json!({
                "email": "cook@example.com",
                "password": "secret",
                "returnSecureToken": true
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SIGN_IN_BODY)
            .create_async()
            .await;

        let auth = auth_for(&server);
        assert!(auth.current_user().await.is_none());

        let user = auth.sign_in("cook@example.com", "secret").await.unwrap();
        assert_eq!(user.uid, "uid-123");
        assert_eq!(auth.current_user().await, Some(user));
        assert_eq!(auth.id_token().await.unwrap(), "id-token-1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_sign_in_failure_maps_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", Matcher::Regex("^/v1/accounts:signInWithPassword".to_string()))
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"code": 400, "message": "INVALID_PASSWORD", "errors": []}}"#)
            .create_async()
            .await;

        let auth = auth_for(&server);
        let err = auth.sign_in("cook@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Firebase: Error (auth/wrong-password).");
        assert!(auth.current_user().await.is_none());
    }

    #[tokio::test]
    async fn test_password_reset_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Regex("^/v1/accounts:sendOobCode".to_string()))
            .match_body(Matcher::Json(json!({
                "requestType": "PASSWORD_RESET",
                "email": "cook@example.com"
            })))
            .with_status(200)
            .with_body(r#"{"email": "cook@example.com"}"#)
            .create_async()
            .await;

        let auth = auth_for(&server);
        auth.send_password_reset_email("cook@example.com")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_id_token_without_user() {
        let server = Server::new_async().await;
        let auth = auth_for(&server);
        assert!(matches!(
            auth.id_token().await,
            Err(ClientError::NotSignedIn)
        ));
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Regex("^/v1/token".to_string()))
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".to_string(), "refresh_token".to_string()),
                Matcher::UrlEncoded("refresh_token".to_string(), "old-refresh".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "id_token": "fresh-token",
                    "refresh_token": "new-refresh",
                    "expires_in": "3600",
                    "token_type": "Bearer",
                    "user_id": "uid-123"
                }"#,
            )
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store
            .save(&Session {
                uid: "uid-123".to_string(),
                email: Some("cook@example.com".to_string()),
                id_token: "stale-token".to_string(),
                refresh_token: "old-refresh".to_string(),
                expires_at: 0,
            })
            .await
            .unwrap();

        let auth = auth_for(&server).with_store(store.clone());
        let restored = auth.restore().await.unwrap().unwrap();
        assert_eq!(restored.uid, "uid-123");

        assert_eq!(auth.id_token().await.unwrap(), "fresh-token");
        mock.assert_async().await;

        let persisted = store.load().await.unwrap().unwrap();
        assert_eq!(persisted.refresh_token, "new-refresh");
        assert_eq!(persisted.email.as_deref(), Some("cook@example.com"));
    }

    #[tokio::test]
    async fn test_sign_out_clears_session_file() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", Matcher::Regex("^/v1/accounts:signInWithPassword".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SIGN_IN_BODY)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let auth = auth_for(&server).with_store(store.clone());

        auth.sign_in("cook@example.com", "secret").await.unwrap();
        assert!(store.load().await.unwrap().is_some());

        auth.sign_out().await.unwrap();
        assert!(auth.current_user().await.is_none());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_keeps_session_when_file_cannot_be_removed() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", Matcher::Regex("^/v1/accounts:signInWithPassword".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SIGN_IN_BODY)
            .create_async()
            .await;

        // A directory in place of the session file can be neither written nor removed
        let dir = tempfile::tempdir().unwrap();
        let auth = auth_for(&server).with_store(SessionStore::new(dir.path()));

        auth.sign_in("cook@example.com", "secret").await.unwrap();
        assert!(auth.sign_out().await.is_err());
        assert_eq!(auth.current_user().await.unwrap().uid, "uid-123");
    }

    #[tokio::test]
    async fn test_restore_discards_corrupt_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{truncated").unwrap();

        let server = Server::new_async().await;
        let auth = auth_for(&server).with_store(SessionStore::new(&path));

        assert_eq!(auth.restore().await.unwrap(), None);
        assert!(auth.current_user().await.is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_restore_without_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let server = Server::new_async().await;
        let auth = auth_for(&server).with_store(SessionStore::new(dir.path().join("none.json")));

        assert_eq!(auth.restore().await.unwrap(), None);
    }
}
