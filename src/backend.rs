use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{
    BackendErrorBody, Recipe, RecommendRequest, RecommendResponse, SaveRecipeRequest,
    SignupRequest, SignupResponse,
};

/// Outcome of a `/recommend` call
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// The backend reported `success: true`
    Recipes(Vec<Recipe>),
    /// The backend answered but reported `success: false`
    Declined,
}

/// A profile photo to upload with `save-profile`
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub path: PathBuf,
}

impl PhotoUpload {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string())
    }
}

/// Client for the recipe backend
pub struct BackendClient {
    client: Client,
    recommend_url: String,
    api_url: String,
}

impl BackendClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(BackendClient {
            client,
            recommend_url: config.backend.recommend_url.clone(),
            api_url: config.backend.api_url.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_urls(recommend_url: String, api_url: String) -> Self {
        BackendClient {
            client: Client::new(),
            recommend_url,
            api_url,
        }
    }

    /// Ask for recipes matching a comma separated ingredient list
    pub async fn recommend(
        &self,
        token: &str,
        ingredients: &str,
        user_id: &str,
    ) -> Result<Recommendation, ClientError> {
        let response = self
            .client
            .post(format!("{}/recommend", self.recommend_url))
            .bearer_auth(token)
            .json(&RecommendRequest {
                ingredients,
                user_id,
            })
            .send()
            .await?;

        let body: RecommendResponse = check(response).await?.json().await?;
        debug!(
            "recommend: success={} recipes={}",
            body.success,
            body.recommendations.len()
        );
        if body.success {
            Ok(Recommendation::Recipes(body.recommendations))
        } else {
            Ok(Recommendation::Declined)
        }
    }

    pub async fn save_recipe(&self, token: &str, recipe: &Recipe, uid: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/save-recipe", self.api_url))
            .bearer_auth(token)
            .json(&SaveRecipeRequest { recipe, uid })
            .send()
            .await?;

        check(response).await?;
        debug!("Saved recipe {}", recipe.id());
        Ok(())
    }

    /// Upload the profile form as multipart: `uid`, `name` and optionally `photo`
    pub async fn save_profile(
        &self,
        token: &str,
        uid: &str,
        name: &str,
        photo: Option<&PhotoUpload>,
    ) -> Result<serde_json::Value, ClientError> {
        let mut form = Form::new()
            .text("uid", uid.to_string())
            .text("name", name.to_string());

        if let Some(photo) = photo {
            let bytes = fs::read(&photo.path).await?;
            let part = Part::bytes(bytes)
                .file_name(photo.file_name())
                .mime_str(guess_image_mime(&photo.path))?;
            form = form.part("photo", part);
        }

        let response = self
            .client
            .post(format!("{}/save-profile", self.api_url))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        let text = check(response).await?.text().await?;
        debug!("save-profile response: {}", text);
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }

    /// Create an account; returns the backend's confirmation message
    pub async fn signup(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(format!("{}/signup", self.api_url))
            .json(&SignupRequest { email, password })
            .send()
            .await?;

        let body: SignupResponse = check(response).await?.json().await?;
        Ok(body.message)
    }
}

/// Map a non-success status to `ClientError::Backend`, keeping the body's
/// `error` field when there is one
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    debug!("Backend error ({}): {}", status, text);
    let error = serde_json::from_str::<BackendErrorBody>(&text)
        .ok()
        .and_then(|body| body.error);
    Err(ClientError::Backend {
        status: status.as_u16(),
        error,
    })
}

fn guess_image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
