use crate::backend::BackendClient;
use crate::components::{Button, InputField, InputKind};
use crate::error::ClientError;
use crate::notice::Notice;

pub struct Signup {
    pub email: InputField,
    pub password: InputField,
    submit: Button,
    loading: bool,
}

impl Default for Signup {
    fn default() -> Self {
        Self::new()
    }
}

impl Signup {
    pub fn new() -> Self {
        Self {
            email: InputField::new(InputKind::Email, "Email").placeholder("Input email"),
            password: InputField::new(InputKind::Password, "Password")
                .placeholder("Input password"),
            submit: Button::new("Sign Up").busy_label("Signing up..."),
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

    /// Create the account through the backend and alert its reply
    pub async fn submit(&mut self, backend: &BackendClient) -> Notice {
        if !self.submit.can_activate() {
            return Notice::Info(self.submit.label().to_string());
        }
        if let Err(e) = self.email.validate() {
            return Notice::Error(e.to_string());
        }

        self.set_loading(true);
        let result = backend
            .signup(self.email.value().trim(), self.password.value())
            .await;
        self.set_loading(false);

        match result {
            Ok(message) => Notice::Alert(message),
            Err(ClientError::Backend {
                error: Some(error), ..
            }) => Notice::Alert(error),
            Err(_) => Notice::Alert("Signup failed".to_string()),
        }
    }

    pub fn render(&self) -> String {
        super::render_form(
            "Signup Form",
            &[&self.email, &self.password],
            &self.submit,
            &[],
            &["Already have an account? Login (nusantasty login)"],
        )
    }
}
