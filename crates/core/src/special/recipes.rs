use super::EmbeddedResolver;
use crate::error::ManualError;
use folio_idf::{
    BlueprintRecipe, Descriptor, EmbeddedContent, GridCell, PreparedIngredient, Recipe,
    RecipeGrid, shapeless_columns,
};
use folio_types::BranchId;
use serde_json::{Value, json};
use std::collections::HashMap;

const BLUEPRINT_ITEM: &str = "immersiveengineering:blueprint";

impl EmbeddedResolver {
    /// `crafting`: a single `recipe` key, or a `recipes` list whose nested
    /// arrays become cycling alternatives.
    pub(super) async fn crafting(
        &self,
        branch: &BranchId,
        descriptor: &Descriptor,
    ) -> Result<Option<EmbeddedContent>, ManualError> {
        if let Some(key) = descriptor.get_str("recipe") {
            return Ok(self
                .load_recipe(branch, key)
                .await?
                .map(EmbeddedContent::Recipe));
        }
        let Some(list) = descriptor.get("recipes").and_then(Value::as_array) else {
            return Ok(None);
        };
        let mut items = Vec::with_capacity(list.len());
        for entry in list {
            match entry {
                Value::Array(alternatives) => {
                    let recipes = self.multi_recipe(branch, alternatives).await?;
                    items.push(EmbeddedContent::MultiRecipe(recipes));
                }
                Value::String(key) => {
                    if let Some(recipe) = self.load_recipe(branch, key).await? {
                        items.push(EmbeddedContent::Recipe(recipe));
                    }
                }
                other => log::debug!("skipping recipe list entry {}", other),
            }
        }
        Ok(Some(EmbeddedContent::RecipeList(items)))
    }

    async fn multi_recipe(
        &self,
        branch: &BranchId,
        alternatives: &[Value],
    ) -> Result<Vec<Recipe>, ManualError> {
        let mut recipes = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            let key = match alternative {
                Value::String(key) => Some(key.as_str()),
                Value::Object(obj) => obj.get("recipe").and_then(Value::as_str),
                _ => None,
            };
            let Some(key) = key else { continue };
            if let Some(recipe) = self.load_recipe(branch, key).await? {
                recipes.push(recipe);
            }
        }
        Ok(recipes)
    }

    /// Loads `{recipes}{key}.json`. Shaped recipes lay out their `pattern`,
    /// shapeless ones their `ingredients`.
    pub(super) async fn load_recipe(
        &self,
        branch: &BranchId,
        key: &str,
    ) -> Result<Option<Recipe>, ManualError> {
        let url = format!("{}{}.json", self.paths.recipe_path(branch), key);
        let mut recipe = self.fetch_json(&url).await?;
        if let Some(base) = recipe.get("baseRecipe").cloned() {
            recipe = base;
        }

        let grid = if let Some(pattern) = recipe.get("pattern").and_then(Value::as_array) {
            self.shaped_grid(branch, pattern, recipe.get("key")).await
        } else if let Some(ingredients) = recipe.get("ingredients").and_then(Value::as_array) {
            self.shapeless_grid(branch, ingredients).await
        } else {
            log::warn!("recipe {} has neither a pattern nor ingredients", key);
            return Ok(None);
        };

        let output = match recipe.get("result") {
            Some(result) => self.prepare_ingredient(branch, result).await,
            None => None,
        };
        Ok(Some(Recipe {
            name: key.to_string(),
            grid,
            output,
        }))
    }

    async fn shaped_grid(
        &self,
        branch: &BranchId,
        pattern: &[Value],
        keys: Option<&Value>,
    ) -> RecipeGrid {
        let rows: Vec<&str> = pattern.iter().filter_map(Value::as_str).collect();
        let columns = rows.first().map(|r| r.chars().count()).unwrap_or(0);

        let mut prepared: HashMap<String, Option<PreparedIngredient>> = HashMap::new();
        if let Some(keys) = keys.and_then(Value::as_object) {
            for (symbol, ingredient) in keys {
                let ingredient = self.prepare_ingredient(branch, ingredient).await;
                prepared.insert(symbol.clone(), ingredient);
            }
        }

        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| {
                let symbol = c.to_string();
                let ingredient = prepared.get(&symbol).cloned().flatten();
                GridCell { symbol, ingredient }
            })
            .collect();
        RecipeGrid { columns, cells }
    }

    async fn shapeless_grid(&self, branch: &BranchId, ingredients: &[Value]) -> RecipeGrid {
        let mut cells = Vec::with_capacity(ingredients.len());
        for (i, ingredient) in ingredients.iter().enumerate() {
            cells.push(GridCell {
                symbol: i.to_string(),
                ingredient: self.prepare_ingredient(branch, ingredient).await,
            });
        }
        RecipeGrid {
            columns: shapeless_columns(cells.len()),
            cells,
        }
    }

    /// `blueprint`: one `recipe` object or a `recipes` list, each naming an
    /// `item` whose blueprint recipe lives under `recipes/blueprint/`.
    pub(super) async fn blueprint(
        &self,
        branch: &BranchId,
        descriptor: &Descriptor,
    ) -> Result<Option<EmbeddedContent>, ManualError> {
        let entries: Vec<&Value> = match (descriptor.get("recipe"), descriptor.get("recipes")) {
            (Some(single), _) => vec![single],
            (None, Some(Value::Array(many))) => many.iter().collect(),
            _ => return Ok(None),
        };

        let mut recipes = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(item) = entry.get("item").and_then(Value::as_str) else {
                continue;
            };
            let key = item.rsplit(':').next().unwrap_or(item);
            let url = format!("{}blueprint/{}.json", self.paths.recipe_path(branch), key);
            let recipe = self.fetch_json(&url).await?;
            recipes.push(self.blueprint_recipe(branch, key, &recipe).await);
        }
        Ok(Some(EmbeddedContent::Blueprint(recipes)))
    }

    async fn blueprint_recipe(&self, branch: &BranchId, name: &str, recipe: &Value) -> BlueprintRecipe {
        let inputs = recipe
            .get("inputs")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let grid = self.shapeless_grid(branch, inputs).await;
        let blueprint = self
            .prepare_ingredient(branch, &json!({ "item": BLUEPRINT_ITEM }))
            .await;
        let output = match recipe.get("result") {
            Some(result) => self.prepare_ingredient(branch, result).await,
            None => None,
        };
        BlueprintRecipe {
            name: name.to_string(),
            blueprint,
            grid,
            output,
        }
    }
}
