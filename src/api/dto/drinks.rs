/*
 * Responsibility
 * - drinks request/response DTOs
 * - short (public list) vs long (detail) representation
 * - validate() for shape rules serde cannot express
 */
use serde::{Deserialize, Serialize};

use crate::repos::{DrinkRow, Ingredient};

pub const TITLE_MAX_CHARS: usize = 80;

/// A recipe may be sent as a single ingredient object or as a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    One(Ingredient),
    Many(Vec<Ingredient>),
}

impl RecipeInput {
    pub fn into_vec(self) -> Vec<Ingredient> {
        match self {
            RecipeInput::One(ingredient) => vec![ingredient],
            RecipeInput::Many(ingredients) => ingredients,
        }
    }
}

fn validate_title(title: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("title cannot be empty");
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err("title must be <= 80 chars");
    }
    Ok(())
}

fn validate_recipe(recipe: &[Ingredient]) -> Result<(), &'static str> {
    if recipe.is_empty() {
        return Err("recipe needs at least one ingredient");
    }
    if recipe.iter().any(|i| i.name.trim().is_empty()) {
        return Err("ingredient name cannot be empty");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateDrinkRequest {
    pub title: String,
    pub recipe: RecipeInput,
}

impl CreateDrinkRequest {
    /// Validate and normalize into `(title, recipe)`.
    pub fn into_parts(self) -> Result<(String, Vec<Ingredient>), &'static str> {
        validate_title(&self.title)?;
        let recipe = self.recipe.into_vec();
        validate_recipe(&recipe)?;
        Ok((self.title, recipe))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

impl UpdateDrinkRequest {
    pub fn into_parts(self) -> Result<(Option<String>, Option<Vec<Ingredient>>), &'static str> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        let recipe = self.recipe.map(RecipeInput::into_vec);
        if let Some(recipe) = &recipe {
            validate_recipe(recipe)?;
        }
        Ok((self.title, recipe))
    }
}

#[derive(Debug, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// Public representation: no ingredient names.
#[derive(Debug, Serialize)]
pub struct DrinkShort {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

impl From<DrinkRow> for DrinkShort {
    fn from(row: DrinkRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            recipe: row
                .recipe
                .into_iter()
                .map(|i| ShortIngredient {
                    color: i.color,
                    parts: i.parts,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DrinkLong {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl From<DrinkRow> for DrinkLong {
    fn from(row: DrinkRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            recipe: row.recipe,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    pub fn ok(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteDrinkResponse {
    pub success: bool,
    pub delete: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> DrinkRow {
        DrinkRow {
            id: 7,
            title: "latte".into(),
            recipe: vec![Ingredient {
                name: "milk".into(),
                color: "white".into(),
                parts: 3,
            }],
        }
    }

    #[test]
    fn single_recipe_object_becomes_a_list() {
        let req: CreateDrinkRequest = serde_json::from_value(json!({
            "title": "Latte",
            "recipe": {"name": "milk", "color": "white", "parts": 1}
        }))
        .unwrap();
        let (_, recipe) = req.into_parts().unwrap();
        assert_eq!(recipe.len(), 1);
        assert_eq!(recipe[0].name, "milk");
    }

    #[test]
    fn recipe_list_is_kept() {
        let req: CreateDrinkRequest = serde_json::from_value(json!({
            "title": "Cappuccino",
            "recipe": [
                {"name": "espresso", "color": "brown", "parts": 1},
                {"name": "foam", "color": "white", "parts": 2}
            ]
        }))
        .unwrap();
        assert_eq!(req.into_parts().unwrap().1.len(), 2);
    }

    #[test]
    fn incomplete_ingredient_does_not_parse() {
        let parsed = serde_json::from_value::<CreateDrinkRequest>(json!({
            "title": "Latte",
            "recipe": {"name": "milk"}
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn blank_title_and_empty_recipe_are_rejected() {
        let req: CreateDrinkRequest =
            serde_json::from_value(json!({"title": "  ", "recipe": []})).unwrap();
        assert!(req.into_parts().is_err());

        let req: CreateDrinkRequest =
            serde_json::from_value(json!({"title": "Latte", "recipe": []})).unwrap();
        assert!(req.into_parts().is_err());
    }

    #[test]
    fn long_title_is_rejected() {
        let req = UpdateDrinkRequest {
            title: Some("x".repeat(81)),
            recipe: None,
        };
        assert!(req.into_parts().is_err());
    }

    #[test]
    fn empty_update_is_allowed() {
        let req: UpdateDrinkRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.into_parts().unwrap(), (None, None));
    }

    #[test]
    fn short_form_drops_ingredient_names() {
        let short = serde_json::to_value(DrinkShort::from(row())).unwrap();
        assert_eq!(
            short,
            json!({"id": 7, "title": "latte", "recipe": [{"color": "white", "parts": 3}]})
        );
    }

    #[test]
    fn long_form_keeps_everything() {
        let long = serde_json::to_value(DrinkLong::from(row())).unwrap();
        assert_eq!(long["recipe"][0]["name"], "milk");
    }
}
