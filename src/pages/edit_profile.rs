use log::{debug, error};
use std::path::Path;
use tokio::fs;

use crate::auth::IdentityProvider;
use crate::backend::{BackendClient, PhotoUpload};
use crate::components::{Button, InputField, InputKind};
use crate::error::ClientError;
use crate::model::User;
use crate::notice::Notice;

pub struct EditProfile {
    pub name: InputField,
    photo: InputField,
    photo_preview: Option<String>,
    submit: Button,
    message: Option<Notice>,
    loading: bool,
}

impl Default for EditProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl EditProfile {
    pub fn new() -> Self {
        Self {
            name: InputField::new(InputKind::Text, "Name").required(),
            photo: InputField::new(InputKind::File, "Profile Photo").placeholder("image file"),
            photo_preview: None,
            submit: Button::new("Save").busy_label("Saving..."),
            message: None,
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn submit_button(&self) -> &Button {
        &self.submit
    }

    pub fn message(&self) -> Option<&Notice> {
        self.message.as_ref()
    }

    pub fn photo_preview(&self) -> Option<&str> {
        self.photo_preview.as_deref()
    }

    /// Pick the photo to upload and describe it as a preview
    pub async fn select_photo(&mut self, path: impl AsRef<Path>) -> Result<(), ClientError> {
        let path = path.as_ref();
        let meta = fs::metadata(path).await?;
        if !meta.is_file() {
            return Err(ClientError::Validation(format!(
                "Not a file: {}",
                path.display()
            )));
        }

        self.photo.set_value(path.to_string_lossy());
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.photo_preview = Some(format!("{} ({} bytes)", file_name, meta.len()));
        Ok(())
    }

    /// Upload name and optional photo for the signed-in user
    pub async fn submit(&mut self, auth: &dyn IdentityProvider, backend: &BackendClient) {
        if !self.submit.can_activate() {
            return;
        }
        if let Err(e) = self.name.validate() {
            self.message = Some(Notice::Error(e.to_string()));
            return;
        }

        let Some(user) = auth.current_user().await else {
            self.message = Some(Notice::Error(
                "You need to be logged in to update your profile.".to_string(),
            ));
            return;
        };

        self.loading = true;
        self.submit.set_disabled(true);
        let result = self.save(&user, auth, backend).await;
        match result {
            Ok(()) => {
                self.message = Some(Notice::Info("Profile updated successfully".to_string()))
            }
            Err(e) => {
                error!("Profile update failed: {}", e);
                self.message = Some(Notice::Error("Failed to update profile".to_string()));
            }
        }
        self.loading = false;
        self.submit.set_disabled(false);
    }

    async fn save(
        &self,
        user: &User,
        auth: &dyn IdentityProvider,
        backend: &BackendClient,
    ) -> Result<(), ClientError> {
        let photo = (!self.photo.is_empty()).then(|| PhotoUpload::new(self.photo.value()));
        let token = auth.id_token().await?;
        let response = backend
            .save_profile(&token, &user.uid, self.name.value(), photo.as_ref())
            .await?;
        debug!("{}", response);
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = super::render_form(
            "Edit Your Profile",
            &[&self.name, &self.photo],
            &self.submit,
            &self.message.iter().collect::<Vec<_>>(),
            &[],
        );
        if let Some(preview) = &self.photo_preview {
            out.push_str(&format!("  Preview: {}\n", preview));
        }
        out
    }
}
