// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the drink API. All types derive `ToSchema`
//! for the OpenAPI document.
//!
//! ## Representations
//!
//! A drink is exposed two ways:
//!
//! - **Short**: recipe reduced to colour and parts, enough to draw the cup
//!   on the public menu
//! - **Long**: full recipe including ingredient names, for staff holding
//!   `get:drinks-detail`

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Drink
// =============================================================================

/// One ingredient layer of a drink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Ingredient {
    /// Ingredient name, e.g. "espresso".
    pub name: String,
    /// Display colour of the layer.
    pub color: String,
    /// Relative number of parts in the cup.
    pub parts: u32,
}

/// An ingredient as shown on the public menu.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// A drink on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Drink {
    /// Store-assigned identifier.
    pub id: u64,
    /// Unique title.
    pub title: String,
    /// Ordered ingredient layers.
    pub recipe: Vec<Ingredient>,
}

/// Public representation of a drink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ShortDrink {
    pub id: u64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

impl Drink {
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| ShortIngredient {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

/// A recipe as submitted by clients: a single ingredient is accepted in
/// place of a one-element list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl From<RecipeInput> for Vec<Ingredient> {
    fn from(value: RecipeInput) -> Self {
        match value {
            RecipeInput::Many(ingredients) => ingredients,
            RecipeInput::One(ingredient) => vec![ingredient],
        }
    }
}

/// Request to add a drink to the menu.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDrinkRequest {
    pub title: String,
    pub recipe: RecipeInput,
}

/// Request to edit a drink. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDrinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<RecipeInput>,
}

// =============================================================================
// Responses
// =============================================================================

/// Public menu, `{"success": true, "drinks": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MenuResponse {
    pub success: bool,
    pub drinks: Vec<ShortDrink>,
}

/// Drinks in long form, `{"success": true, "drinks": [...]}`.
///
/// Also returned by create and update, holding just the affected drink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DrinksResponse {
    pub success: bool,
    pub drinks: Vec<Drink>,
}

impl DrinksResponse {
    pub fn new(drinks: Vec<Drink>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

/// Deletion acknowledgement, `{"success": true, "delete": <id>}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DeleteDrinkResponse {
    pub success: bool,
    pub delete: u64,
}
