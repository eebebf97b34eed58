//! Drink recipes and their short/long representations

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum length for drink titles (unique column)
const MAX_TITLE_LEN: usize = 80;

/// Maximum length for ingredient names and colors
const MAX_INGREDIENT_LEN: usize = 80;

/// One layer of a drink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub color: String,
    pub name: String,
    pub parts: u32,
}

/// Ingredient with the name hidden, for the public menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

impl From<&Ingredient> for ShortIngredient {
    fn from(i: &Ingredient) -> Self {
        Self {
            color: i.color.clone(),
            parts: i.parts,
        }
    }
}

/// Recipe as sent by clients: one ingredient object or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl RecipeInput {
    /// Validate into a non-empty recipe with trimmed names.
    pub fn into_recipe(self) -> Result<Vec<Ingredient>, ValidationError> {
        let items = match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        };

        if items.is_empty() {
            return Err(ValidationError::Empty { field: "recipe" });
        }

        items
            .into_iter()
            .map(|i| {
                let name = i.name.trim().to_owned();
                let color = i.color.trim().to_owned();
                if name.is_empty() {
                    return Err(ValidationError::Empty { field: "recipe.name" });
                }
                if color.is_empty() {
                    return Err(ValidationError::Empty { field: "recipe.color" });
                }
                if name.chars().count() > MAX_INGREDIENT_LEN
                    || color.chars().count() > MAX_INGREDIENT_LEN
                {
                    return Err(ValidationError::TooLong {
                        field: "recipe",
                        max: MAX_INGREDIENT_LEN,
                    });
                }
                if i.parts == 0 {
                    return Err(ValidationError::OutOfRange {
                        field: "recipe.parts",
                        min: 1,
                        max: u32::MAX as i64,
                    });
                }
                Ok(Ingredient {
                    color,
                    name,
                    parts: i.parts,
                })
            })
            .collect()
    }
}

/// Validated drink title.
pub fn drink_title(value: &str) -> Result<String, ValidationError> {
    let title = value.trim();
    if title.is_empty() {
        return Err(ValidationError::Empty { field: "title" });
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title",
            max: MAX_TITLE_LEN,
        });
    }
    Ok(title.to_owned())
}

/// Body of `POST /drinks`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

/// Body of `PATCH /drinks/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

/// Validated changes for an update; at least one field is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkChanges {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

impl UpdateDrinkRequest {
    pub fn into_changes(self) -> Result<DrinkChanges, ValidationError> {
        let title = self.title.as_deref().map(drink_title).transpose()?;
        let recipe = self.recipe.map(RecipeInput::into_recipe).transpose()?;

        if title.is_none() && recipe.is_none() {
            return Err(ValidationError::Missing {
                field: "title or recipe",
            });
        }

        Ok(DrinkChanges { title, recipe })
    }
}

/// Menu entry without ingredient names
#[derive(Debug, Clone, Serialize)]
pub struct DrinkShort {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Full drink, for baristas and managers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkLong {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl DrinkLong {
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.iter().map(ShortIngredient::from).collect(),
        }
    }
}
