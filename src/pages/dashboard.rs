use log::{debug, warn};
use std::fmt::Write;

use crate::auth::IdentityProvider;
use crate::backend::{BackendClient, Recommendation};
use crate::components::{Button, InputField, InputKind};
use crate::error::ClientError;
use crate::ingredients::parse_ingredient_groups;
use crate::model::Recipe;
use crate::notice::Notice;

const RECOMMEND_FAILED: &str = "Failed to get recommendations";

/// The main page: ask for recipes, browse them, save or drop them
pub struct Dashboard {
    pub ingredients: InputField,
    recipes: Vec<Recipe>,
    logout_button: Button,
    recommend_button: Button,
    clear_button: Button,
    save_button: Button,
    loading_logout: bool,
    loading_recommend: bool,
    loading: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            ingredients: InputField::new(InputKind::Text, "Ingredients").placeholder(
                "Enter ingredients separated by commas (e.g., tomato, onion, garlic). Use English.",
            ),
            recipes: Vec::new(),
            logout_button: Button::new("Logout").busy_label("Logging out..."),
            recommend_button: Button::new("Generate Recipes").busy_label("Generating..."),
            clear_button: Button::new("Clear"),
            save_button: Button::new("Save Recipe").busy_label("Saving..."),
            loading_logout: false,
            loading_recommend: false,
            loading: false,
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn is_logging_out(&self) -> bool {
        self.loading_logout
    }

    pub fn is_recommending(&self) -> bool {
        self.loading_recommend
    }

    pub fn is_saving(&self) -> bool {
        self.loading
    }

    fn set_loading_logout(&mut self, loading: bool) {
        self.loading_logout = loading;
        self.logout_button.set_disabled(loading);
    }

    fn set_loading_recommend(&mut self, loading: bool) {
        self.loading_recommend = loading;
        self.recommend_button.set_disabled(loading);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.save_button.set_disabled(loading);
        self.clear_button.set_disabled(loading);
    }

    pub async fn logout(&mut self, auth: &dyn IdentityProvider) -> Notice {
        if !self.logout_button.can_activate() {
            return Notice::Info(self.logout_button.label().to_string());
        }

        self.set_loading_logout(true);
        let notice = match auth.sign_out().await {
            Ok(()) => Notice::Alert("Logged out successfully!".to_string()),
            Err(e) => {
                warn!("Sign out failed: {}", e);
                Notice::Alert("Failed to log out".to_string())
            }
        };
        self.set_loading_logout(false);
        notice
    }

    /// Fetch recommendations for the current ingredient text. On success the
    /// recipe list is replaced and no notice is returned.
    pub async fn recommend(
        &mut self,
        auth: &dyn IdentityProvider,
        backend: &BackendClient,
    ) -> Option<Notice> {
        if !self.recommend_button.can_activate() {
            return None;
        }

        self.set_loading_recommend(true);
        let notice = match auth.current_user().await {
            None => Some(Notice::Alert(
                "You need to be logged in to get recommendations".to_string(),
            )),
            Some(user) => {
                let result = self.fetch_recommendations(&user.uid, auth, backend).await;
                match result {
                    Ok(Recommendation::Recipes(recipes)) => {
                        debug!("Received {} recipes", recipes.len());
                        self.recipes = recipes;
                        None
                    }
                    Ok(Recommendation::Declined) => Some(Notice::Alert(RECOMMEND_FAILED.to_string())),
                    Err(e) => {
                        warn!("Recommendation request failed: {}", e);
                        Some(Notice::Alert(RECOMMEND_FAILED.to_string()))
                    }
                }
            }
        };
        self.set_loading_recommend(false);
        notice
    }

    async fn fetch_recommendations(
        &self,
        uid: &str,
        auth: &dyn IdentityProvider,
        backend: &BackendClient,
    ) -> Result<Recommendation, ClientError> {
        let token = auth.id_token().await?;
        backend
            .recommend(&token, self.ingredients.value(), uid)
            .await
    }

    /// Empty the ingredient input and the recipe list
    pub fn clear(&mut self) {
        self.ingredients.clear();
        self.recipes.clear();
    }

    /// Save the listed recipe with the given id to the user's collection
    pub async fn save_recipe(
        &mut self,
        recipe_id: &str,
        auth: &dyn IdentityProvider,
        backend: &BackendClient,
    ) -> Notice {
        if !self.save_button.can_activate() {
            return Notice::Info(self.save_button.label().to_string());
        }
        let Some(recipe) = self.recipes.iter().find(|r| r.id() == recipe_id).cloned() else {
            return Notice::Error(format!("No recipe with id {}", recipe_id));
        };

        self.set_loading(true);
        let notice = match auth.current_user().await {
            None => Notice::Alert("You need to be logged in to save recipes".to_string()),
            Some(user) => match save(&recipe, &user.uid, auth, backend).await {
                Ok(()) => Notice::Alert("Recipe saved successfully!".to_string()),
                Err(e) => {
                    warn!("Saving recipe {} failed: {}", recipe_id, e);
                    Notice::Alert("Failed to save recipe".to_string())
                }
            },
        };
        self.set_loading(false);
        notice
    }

    /// Drop a recipe from the list shown; nothing is sent to the backend
    pub fn remove_recipe(&mut self, recipe_id: &str) {
        self.recipes.retain(|recipe| recipe.id() != recipe_id);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "NusanTasty    Saved Recipes    {}", self.logout_button);
        let _ = writeln!(out, "  {}", self.ingredients);
        let _ = writeln!(out, "  {}  {}", self.recommend_button, self.clear_button);

        if self.loading_recommend {
            let _ = writeln!(out, "\n  ... cooking up ideas ...");
        }

        if self.recipes.is_empty() && !self.loading {
            let _ = writeln!(out, "\n  Discover Your Next Favorite Recipe!");
            let _ = writeln!(out, "  Add some ingredients to get started.");
        }

        for recipe in &self.recipes {
            out.push('\n');
            out.push_str(&render_recipe(recipe, &self.save_button));
        }
        out
    }
}

async fn save(
    recipe: &Recipe,
    uid: &str,
    auth: &dyn IdentityProvider,
    backend: &BackendClient,
) -> Result<(), ClientError> {
    let token = auth.id_token().await?;
    backend.save_recipe(&token, recipe, uid).await
}

/// One recipe card
pub fn render_recipe(recipe: &Recipe, save_button: &Button) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", recipe.id(), recipe.title());
    let _ = writeln!(out, "  Image: {}", recipe.image());
    let _ = writeln!(out, "  Category: {}", recipe.category());
    let _ = writeln!(out, "  Description: {}", recipe.description());
    let _ = writeln!(out, "  Ingredients:");
    for group in parse_ingredient_groups(&recipe.ingredient_groups()) {
        let _ = writeln!(out, "    {}:", group.purpose);
        for ingredient in &group.ingredients {
            let _ = writeln!(out, "      - {}", ingredient);
        }
    }
    let _ = writeln!(out, "  Instructions: {}", recipe.instructions());
    let _ = writeln!(out, "  Ratings: {}", recipe.ratings());
    let _ = writeln!(out, "  Total Time: {} minutes", recipe.total_time());
    let _ = writeln!(out, "  Yields: {}", recipe.yields());
    let _ = writeln!(out, "  {}  [ Remove Recipe ]", save_button);
    out
}
