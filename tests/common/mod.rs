use async_trait::async_trait;
use nusantasty::{ClientError, IdentityProvider, User};
use std::sync::Mutex;

/// In-memory identity provider for driving the pages in tests
#[derive(Default)]
pub struct FakeAuth {
    user: Mutex<Option<User>>,
    /// When set, every provider call fails with this message
    pub failure: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeAuth {
    pub fn signed_in(uid: &str) -> Self {
        let auth = Self::default();
        *auth.user.lock().unwrap() = Some(User {
            uid: uid.to_string(),
            email: Some(format!("{uid}@example.com")),
        });
        auth
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_failure(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call.to_string());
        match &self.failure {
            Some(message) => Err(ClientError::Auth(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeAuth {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<User, ClientError> {
        self.record("sign_in")?;
        let user = User {
            uid: "uid-from-login".to_string(),
            email: Some(email.to_string()),
        };
        *self.user.lock().unwrap() = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        self.record("sign_out")?;
        *self.user.lock().unwrap() = None;
        Ok(())
    }

    async fn send_password_reset_email(&self, _email: &str) -> Result<(), ClientError> {
        self.record("send_password_reset_email")
    }

    async fn current_user(&self) -> Option<User> {
        self.user.lock().unwrap().clone()
    }

    async fn id_token(&self) -> Result<String, ClientError> {
        self.record("id_token")?;
        Ok("test-token".to_string())
    }
}
