// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory drink menu.
//!
//! Drinks are keyed by a monotonically increasing id, so listings come back
//! in creation order. Ids are never reused after a deletion.

use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::models::{CreateDrinkRequest, Drink, Ingredient, UpdateDrinkRequest};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    drinks: BTreeMap<u64, Drink>,
    last_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the sample drink served on a fresh install.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.insert(
            "water".to_string(),
            vec![Ingredient {
                name: "water".to_string(),
                color: "blue".to_string(),
                parts: 1,
            }],
        );
        store
    }

    pub fn list_drinks(&self) -> Vec<Drink> {
        self.drinks.values().cloned().collect()
    }

    #[cfg(test)]
    pub fn get_drink(&self, drink_id: u64) -> Result<Drink, ApiError> {
        self.drinks
            .get(&drink_id)
            .cloned()
            .ok_or_else(|| drink_not_found(drink_id))
    }

    pub fn create_drink(&mut self, request: CreateDrinkRequest) -> Result<Drink, ApiError> {
        let title = validate_title(&request.title)?;
        let recipe = validate_recipe(request.recipe.into())?;
        self.ensure_title_free(&title, None)?;
        Ok(self.insert(title, recipe))
    }

    pub fn update_drink(
        &mut self,
        drink_id: u64,
        request: UpdateDrinkRequest,
    ) -> Result<Drink, ApiError> {
        if !self.drinks.contains_key(&drink_id) {
            return Err(drink_not_found(drink_id));
        }

        let title = request.title.as_deref().map(validate_title).transpose()?;
        let recipe = request
            .recipe
            .map(|recipe| validate_recipe(recipe.into()))
            .transpose()?;
        if let Some(title) = &title {
            self.ensure_title_free(title, Some(drink_id))?;
        }

        let Some(drink) = self.drinks.get_mut(&drink_id) else {
            return Err(drink_not_found(drink_id));
        };
        if let Some(title) = title {
            drink.title = title;
        }
        if let Some(recipe) = recipe {
            drink.recipe = recipe;
        }
        Ok(drink.clone())
    }

    pub fn delete_drink(&mut self, drink_id: u64) -> Result<(), ApiError> {
        if self.drinks.remove(&drink_id).is_some() {
            Ok(())
        } else {
            Err(drink_not_found(drink_id))
        }
    }

    fn insert(&mut self, title: String, recipe: Vec<Ingredient>) -> Drink {
        self.last_id += 1;
        let drink = Drink {
            id: self.last_id,
            title,
            recipe,
        };
        self.drinks.insert(drink.id, drink.clone());
        drink
    }

    fn ensure_title_free(&self, title: &str, except: Option<u64>) -> Result<(), ApiError> {
        let taken = self
            .drinks
            .values()
            .any(|drink| drink.title == title && Some(drink.id) != except);
        if taken {
            Err(ApiError::unprocessable(format!(
                "A drink titled '{title}' already exists"
            )))
        } else {
            Ok(())
        }
    }
}

fn drink_not_found(drink_id: u64) -> ApiError {
    ApiError::not_found(format!("Drink {drink_id} not found"))
}

fn validate_title(title: &str) -> Result<String, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::bad_request("title must not be empty"));
    }
    Ok(title.to_string())
}

fn validate_recipe(recipe: Vec<Ingredient>) -> Result<Vec<Ingredient>, ApiError> {
    if recipe.is_empty() {
        return Err(ApiError::bad_request(
            "recipe must contain at least one ingredient",
        ));
    }
    if recipe.iter().any(|ingredient| ingredient.parts == 0) {
        return Err(ApiError::bad_request(
            "every ingredient must have at least one part",
        ));
    }
    if recipe.iter().any(|ingredient| ingredient.name.trim().is_empty()) {
        return Err(ApiError::bad_request("ingredient name must not be empty"));
    }
    Ok(recipe)
}
