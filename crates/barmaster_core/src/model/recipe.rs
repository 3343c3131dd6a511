//! Cocktail recipe record and ingredient amount decoding.
//!
//! Recipes live in the sheet as a `name` cell plus an `ingredients` cell of
//! the form `"Gin:45, Tonic:120, Mint:Handful"`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static ENTRY_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid separator regex"));
static PLAIN_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").expect("valid number regex"));

/// Ingredient amount: a number (ml, dashes, pieces) or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Numeric(f64),
    Text(String),
}

impl Quantity {
    /// Decodes an amount; only plain decimal numbers become `Numeric`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if PLAIN_NUMBER_RE.is_match(trimmed) {
            if let Ok(value) = trimmed.parse::<f64>() {
                return Self::Numeric(value);
            }
        }
        Self::Text(trimmed.to_string())
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{}", *value as i64)
            }
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: Quantity,
}

/// A named cocktail with its ingredients in recipe order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: Vec::new(),
        }
    }

    /// Appends one ingredient, keeping insertion order.
    pub fn with(mut self, ingredient: impl Into<String>, quantity: Quantity) -> Self {
        self.ingredients.push(Ingredient {
            name: ingredient.into(),
            quantity,
        });
        self
    }

    /// Looks up the amount for one ingredient by exact name.
    pub fn quantity_of(&self, ingredient: &str) -> Option<&Quantity> {
        self.ingredients
            .iter()
            .find(|item| item.name == ingredient)
            .map(|item| &item.quantity)
    }

    /// Case-insensitive substring match on the recipe name.
    ///
    /// An empty needle matches everything.
    pub fn name_matches(&self, needle_lowercase: &str) -> bool {
        needle_lowercase.is_empty() || self.name.to_lowercase().contains(needle_lowercase)
    }
}

/// Parses an `ingredients` cell into ordered entries.
///
/// Entries without `:` keep their text as the ingredient name with an empty
/// text amount; blank entries are skipped.
pub fn parse_ingredients(cell: &str) -> Vec<Ingredient> {
    ENTRY_SEPARATOR_RE
        .split(cell.trim())
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((name, amount)) => Ingredient {
                name: name.trim().to_string(),
                quantity: Quantity::parse(amount),
            },
            None => Ingredient {
                name: entry.trim().to_string(),
                quantity: Quantity::Text(String::new()),
            },
        })
        .collect()
}

/// Inverse of [`parse_ingredients`].
pub fn format_ingredients(ingredients: &[Ingredient]) -> String {
    ingredients
        .iter()
        .map(|item| match &item.quantity {
            Quantity::Text(text) if text.is_empty() => item.name.clone(),
            quantity => format!("{}:{quantity}", item.name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{format_ingredients, parse_ingredients, Quantity, Recipe};

    #[test]
    fn parse_ingredients_handles_mixed_amounts() {
        let items = parse_ingredients("Gin:45, Tonic: 120 ,Mint:Handful, Ice");
        let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Gin", "Tonic", "Mint", "Ice"]);
        assert_eq!(items[0].quantity, Quantity::Numeric(45.0));
        assert_eq!(items[1].quantity, Quantity::Numeric(120.0));
        assert_eq!(items[2].quantity, Quantity::Text("Handful".to_string()));
        assert_eq!(items[3].quantity, Quantity::Text(String::new()));
    }

    #[test]
    fn quantity_parse_keeps_unit_text_verbatim() {
        assert_eq!(Quantity::parse("22.5"), Quantity::Numeric(22.5));
        assert_eq!(Quantity::parse(".5"), Quantity::Numeric(0.5));
        assert_eq!(Quantity::parse("45ml"), Quantity::Text("45ml".to_string()));
        assert_eq!(Quantity::parse("NaN"), Quantity::Text("NaN".to_string()));
        assert_eq!(Quantity::parse("inf"), Quantity::Text("inf".to_string()));
    }

    #[test]
    fn format_ingredients_renders_integral_numbers_without_fraction() {
        let recipe = Recipe::new("Mojito")
            .with("Rum", Quantity::Numeric(50.0))
            .with("Lime", Quantity::Numeric(0.5))
            .with("Mint", Quantity::Text("Handful".to_string()))
            .with("Soda", Quantity::Text(String::new()));
        assert_eq!(
            format_ingredients(&recipe.ingredients),
            "Rum:50, Lime:0.5, Mint:Handful, Soda"
        );
    }

    #[test]
    fn blank_cell_has_no_ingredients() {
        assert!(parse_ingredients("  ").is_empty());
        assert!(parse_ingredients(",,").is_empty());
    }

    #[test]
    fn name_matches_is_case_insensitive() {
        let recipe = Recipe::new("Gin Tonic");
        assert!(recipe.name_matches("gin"));
        assert!(recipe.name_matches("c"));
        assert!(recipe.name_matches(""));
        assert!(!recipe.name_matches("rum"));
    }
}
