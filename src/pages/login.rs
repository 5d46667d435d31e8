use log::debug;

use crate::auth::IdentityProvider;
use crate::components::{Button, InputField, InputKind};
use crate::error::ClientError;
use crate::notice::Notice;

pub struct Login {
    pub email: InputField,
    pub password: InputField,
    submit: Button,
    loading: bool,
}

impl Default for Login {
    fn default() -> Self {
        Self::new()
    }
}

impl Login {
    pub fn new() -> Self {
        Self {
            email: InputField::new(InputKind::Email, "Email").placeholder("Email"),
            password: InputField::new(InputKind::Password, "Password").placeholder("Password"),
            submit: Button::new("Login").busy_label("Logging in..."),
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn submit_button(&self) -> &Button {
        &self.submit
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.submit.set_disabled(loading);
    }

    /// Sign in with the entered credentials; every outcome ends in an alert
    pub async fn submit(&mut self, auth: &dyn IdentityProvider) -> Notice {
        if !self.submit.can_activate() {
            return Notice::Info(self.submit.label().to_string());
        }
        if let Err(e) = self.email.validate() {
            return Notice::Error(e.to_string());
        }

        self.set_loading(true);
        let notice = match self.sign_in(auth).await {
            Ok(()) => Notice::Alert("Login successful".to_string()),
            Err(e) => Notice::Alert(e.user_message()),
        };
        self.set_loading(false);
        notice
    }

    async fn sign_in(&self, auth: &dyn IdentityProvider) -> Result<(), ClientError> {
        auth.sign_in(self.email.value().trim(), self.password.value())
            .await?;
        let token = auth.id_token().await?;
        debug!("Token: {}", token);
        Ok(())
    }

    pub fn render(&self) -> String {
        super::render_form(
            "Form Login",
            &[&self.email, &self.password],
            &self.submit,
            &[],
            &[
                "Forgot password? (nusantasty forgot-password)",
                "Don't have an account? Sign Up (nusantasty signup)",
            ],
        )
    }
}
