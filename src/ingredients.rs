use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::IngredientGroup;

static INGREDIENT_GROUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"IngredientGroup\(ingredients=\[(.*?)\], purpose='(.*?)'\)")
        .expect("ingredient group pattern is valid")
});

/// Parse the backend's `Ingredient Groups` text into display groups.
///
/// The text is a sequence of `IngredientGroup(ingredients=[...], purpose='...')`
/// records. Each ingredient is trimmed and stripped of quote characters; the
/// purpose is taken verbatim. Returns an empty list when nothing matches.
pub fn parse_ingredient_groups(text: &str) -> Vec<IngredientGroup> {
    INGREDIENT_GROUP
        .captures_iter(text)
        .map(|caps| IngredientGroup {
            ingredients: split_ingredients(&caps[1]),
            purpose: caps[2].to_string(),
        })
        .collect()
}

fn split_ingredients(list: &str) -> Vec<String> {
    // `ingredients=[]` is an empty group, not one blank ingredient
    if list.trim().is_empty() {
        return Vec::new();
    }
    list.split(',')
        .map(|item| item.trim().replace('\'', ""))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_group() {
        let groups = parse_ingredient_groups(
            "[IngredientGroup(ingredients=['2 cups rice', '1 egg'], purpose='main')]",
        );
        assert_eq!(
            groups,
            vec![IngredientGroup {
                ingredients: vec!["2 cups rice".to_string(), "1 egg".to_string()],
                purpose: "main".to_string(),
            }]
        );
    }

    #[test]
    fn test_multiple_groups_keep_order() {
        let text = "[IngredientGroup(ingredients=['chicken', 'salt'], purpose='For the chicken'), \
                    IngredientGroup(ingredients=['soy sauce', 'garlic', 'sugar'], purpose='For the sauce'), \
                    IngredientGroup(ingredients=['scallion'], purpose='Garnish')]";
        let groups = parse_ingredient_groups(text);

        let purposes: Vec<&str> = groups.iter().map(|g| g.purpose.as_str()).collect();
        assert_eq!(purposes, ["For the chicken", "For the sauce", "Garnish"]);
        assert_eq!(groups[1].ingredients, ["soy sauce", "garlic", "sugar"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(parse_ingredient_groups("").is_empty());
        assert!(parse_ingredient_groups("rice, egg, onion").is_empty());
        assert!(parse_ingredient_groups("IngredientGroup(ingredients=['rice']").is_empty());
    }

    #[test]
    fn test_whitespace_and_quotes_are_stripped() {
        let groups = parse_ingredient_groups(
            "IngredientGroup(ingredients=[  'shallot'  ,'chili '' ,   lime  ], purpose='Sambal')",
        );
        assert_eq!(groups[0].ingredients, ["shallot", "chili ", "lime"]);
    }

    #[test]
    fn test_empty_ingredient_list() {
        let groups = parse_ingredient_groups("IngredientGroup(ingredients=[], purpose='None')");
        assert_eq!(groups.len(), 1);
        assert!(groups[0].ingredients.is_empty());
        assert_eq!(groups[0].purpose, "None");
    }

    #[test]
    fn test_blank_pieces_inside_a_list_are_kept() {
        let groups =
            parse_ingredient_groups("IngredientGroup(ingredients=['salt',, '', 'pepper'], purpose='Seasoning')");
        assert_eq!(groups[0].ingredients, ["salt", "", "", "pepper"]);

        let blank = parse_ingredient_groups("IngredientGroup(ingredients=[  ], purpose='None')");
        assert!(blank[0].ingredients.is_empty());
    }
}
