use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A recommended recipe as returned by the backend.
///
/// The record is kept exactly as received so it can be sent back to
/// `save-recipe` unchanged; the dashboard reads its fields through accessors.
/// Missing or `null` fields read as empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe {
    fields: Map<String, Value>,
}

impl Recipe {
    /// Recipe id as display text; numeric and string ids compare the same way
    pub fn id(&self) -> String {
        self.text("recipeId")
    }

    pub fn title(&self) -> String {
        self.text("Title")
    }

    pub fn image(&self) -> String {
        self.text("Image")
    }

    pub fn category(&self) -> String {
        self.text("Category")
    }

    pub fn description(&self) -> String {
        self.text("Description")
    }

    /// The raw `IngredientGroup(...)` listing, see [`crate::parse_ingredient_groups`]
    pub fn ingredient_groups(&self) -> String {
        self.text("Ingredient Groups")
    }

    pub fn instructions(&self) -> String {
        self.text("Instructions")
    }

    pub fn ratings(&self) -> String {
        self.text("Ratings")
    }

    pub fn total_time(&self) -> String {
        self.text("TotalTime")
    }

    pub fn yields(&self) -> String {
        self.text("Yields")
    }

    /// Any field of the record, including ones the dashboard never shows
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn text(&self, key: &str) -> String {
        self.fields.get(key).map(display_value).unwrap_or_default()
    }
}

/// Render a loosely-typed JSON scalar the way a template would interpolate it
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One themed set of ingredients, e.g. everything "for the sauce"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientGroup {
    pub ingredients: Vec<String>,
    pub purpose: String,
}

/// The signed-in user as far as the views are concerned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendRequest<'a> {
    pub ingredients: &'a str,
    #[serde(rename = "userId")]
    pub user_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub recommendations: Vec<Recipe>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SaveRecipeRequest<'a> {
    pub recipe: &'a Recipe,
    pub uid: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignupResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BackendErrorBody {
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_keeps_unknown_fields() {
        let raw = json!({
            "recipeId": 42,
            "Title": "Nasi Goreng",
            "Image": "https://example.com/nasi.jpg",
            "Category": "Rice",
            "Description": "Fried rice",
            "Ingredient Groups": "IngredientGroup(ingredients=['rice'], purpose='main')",
            "Instructions": "Fry it",
            "Ratings": 4.5,
            "TotalTime": "30",
            "Yields": "2 servings",
            "Cuisine": "Indonesian"
        });

        let recipe: Recipe = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(recipe.id(), "42");
        assert_eq!(recipe.title(), "Nasi Goreng");
        assert_eq!(recipe.ratings(), "4.5");
        assert_eq!(recipe.total_time(), "30");
        assert_eq!(recipe.get("Cuisine"), Some(&json!("Indonesian")));

        assert_eq!(serde_json::to_value(&recipe).unwrap(), raw);
    }

    #[test]
    fn test_partial_recipe_is_sent_back_without_added_keys() {
        let raw = json!({"recipeId": 5, "Title": "Soup"});
        let recipe: Recipe = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(recipe.description(), "");
        assert_eq!(recipe.ratings(), "");
        assert_eq!(serde_json::to_value(&recipe).unwrap(), raw);
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let raw = json!({
            "recipeId": 5,
            "Title": "Soup",
            "Description": null,
            "Ingredient Groups": null,
            "Ratings": null
        });
        let recipe: Recipe = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(recipe.title(), "Soup");
        assert_eq!(recipe.description(), "");
        assert_eq!(recipe.ingredient_groups(), "");
        assert_eq!(recipe.ratings(), "");
        assert_eq!(serde_json::to_value(&recipe).unwrap(), raw);
    }

    #[test]
    fn test_one_null_field_does_not_drop_the_batch() {
        let response: RecommendResponse = serde_json::from_value(json!({
            "success": true,
            "recommendations": [
                {"recipeId": 1, "Title": "Soto", "Description": null},
                {"recipeId": 2, "Title": null}
            ]
        }))
        .unwrap();

        assert_eq!(response.recommendations.len(), 2);
        assert_eq!(response.recommendations[1].title(), "");
    }

    #[test]
    fn test_recipe_with_missing_fields() {
        let recipe: Recipe = serde_json::from_value(json!({"Title": "Soup"})).unwrap();
        assert_eq!(recipe.title(), "Soup");
        assert_eq!(recipe.id(), "");
        assert!(recipe.ingredient_groups().is_empty());
    }

    #[test]
    fn test_recommend_request_uses_camel_case_user_id() {
        let body = serde_json::to_value(RecommendRequest {
            ingredients: "tomato, onion",
            user_id: "uid-1",
        })
        .unwrap();
        assert_eq!(body, json!({"ingredients": "tomato, onion", "userId": "uid-1"}));
    }
}
