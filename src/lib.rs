pub mod auth;
pub mod backend;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod ingredients;
pub mod model;
pub mod notice;
pub mod pages;

pub use auth::{FirebaseAuth, IdentityProvider, Session, SessionStore};
pub use backend::{BackendClient, PhotoUpload, Recommendation};
pub use config::ClientConfig;
pub use error::ClientError;
pub use ingredients::parse_ingredient_groups;
pub use model::{IngredientGroup, Recipe, User};
pub use notice::Notice;
