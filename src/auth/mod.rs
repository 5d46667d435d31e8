mod firebase;
mod session;

pub use firebase::{firebase_error_message, FirebaseAuth};
pub use session::{Session, SessionStore};

use async_trait::async_trait;

use crate::error::ClientError;
use crate::model::User;

/// Operations the views need from the identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in with email and password, making that user current
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, ClientError>;

    /// Forget the current user
    async fn sign_out(&self) -> Result<(), ClientError>;

    async fn send_password_reset_email(&self, email: &str) -> Result<(), ClientError>;

    /// The signed-in user, if any
    async fn current_user(&self) -> Option<User>;

    /// A valid ID token for the current user, refreshed if close to expiry
    async fn id_token(&self) -> Result<String, ClientError>;
}
