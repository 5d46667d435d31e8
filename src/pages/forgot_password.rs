use crate::auth::IdentityProvider;
use crate::components::{Button, InputField, InputKind};
use crate::notice::Notice;

pub struct ForgotPassword {
    pub email: InputField,
    submit: Button,
    message: Option<Notice>,
    error: Option<Notice>,
    loading: bool,
}

impl Default for ForgotPassword {
    fn default() -> Self {
        Self::new()
    }
}

impl ForgotPassword {
    pub fn new() -> Self {
        Self {
            email: InputField::new(InputKind::Email, "Email").placeholder("Enter your email"),
            submit: Button::new("Send Reset Email").busy_label("Sending..."),
            message: None,
            error: None,
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn submit_button(&self) -> &Button {
        &self.submit
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(Notice::text)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(Notice::text)
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.submit.set_disabled(loading);
    }

    /// Request a reset email; the outcome lands in `message` or `error`
    pub async fn submit(&mut self, auth: &dyn IdentityProvider) {
        if !self.submit.can_activate() {
            return;
        }
        self.message = None;
        self.error = None;
        if let Err(e) = self.email.validate() {
            self.error = Some(Notice::Error(e.to_string()));
            return;
        }

        self.set_loading(true);
        match auth
            .send_password_reset_email(self.email.value().trim())
            .await
        {
            Ok(()) => {
                self.message = Some(Notice::Info(
                    "Password reset email sent. Check your inbox!".to_string(),
                ))
            }
            Err(e) => self.error = Some(Notice::Error(e.user_message())),
        }
        self.set_loading(false);
    }

    pub fn render(&self) -> String {
        let notices: Vec<&Notice> = self.message.iter().chain(self.error.iter()).collect();
        super::render_form(
            "Forgot Password",
            &[&self.email],
            &self.submit,
            &notices,
            &[],
        )
    }
}
