//! HTML for resolved embedded content.

use crate::escape::escape_html;
use crate::state::ViewState;
use folio_idf::{
    BlueprintRecipe, EmbeddedContent, ImageTile, IngredientTooltip, PreparedIngredient, Recipe,
    RecipeGrid,
};
use itertools::Itertools;

const MULTIBLOCK_NOTE: &str = "In the ingame manual, you would see a cool looking multiblock here.";

/// Renders embedded content placed under the anchor `key`.
pub fn render_embedded(content: &EmbeddedContent, key: &str, state: &ViewState) -> String {
    match content {
        EmbeddedContent::Recipe(recipe) => render_recipe(recipe),
        EmbeddedContent::MultiRecipe(recipes) => {
            let shown = recipes.get(state.carousel(key).min(recipes.len().saturating_sub(1)));
            carousel(
                "multi_recipe",
                state.carousel(key),
                recipes.len(),
                shown.map(render_recipe).unwrap_or_default(),
            )
        }
        EmbeddedContent::RecipeList(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| render_embedded(item, &format!("{}_{}", key, i), state))
            .join(""),
        EmbeddedContent::Blueprint(recipes) => {
            let shown = recipes.get(state.carousel(key).min(recipes.len().saturating_sub(1)));
            carousel(
                "blueprint multi_recipe",
                state.carousel(key),
                recipes.len(),
                shown.map(render_blueprint).unwrap_or_default(),
            )
        }
        EmbeddedContent::ItemDisplay(items) => format!(
            "<div class=\"item_display\">{}</div>",
            items
                .iter()
                .map(|item| render_ingredient("Item", item.as_ref()))
                .join("")
        ),
        EmbeddedContent::Images(tiles) => format!(
            "<div class=\"images\">{}</div>",
            tiles.iter().map(render_tile).join("")
        ),
        EmbeddedContent::Multiblock { name } => format!(
            "<div class=\"multiblock\">{}<br/>{}</div>",
            MULTIBLOCK_NOTE,
            escape_html(name)
        ),
    }
}

fn carousel(class: &str, index: usize, len: usize, body: String) -> String {
    let prev_off = if index > 0 { "" } else { " off" };
    let next_off = if index + 1 < len { "" } else { " off" };
    format!(
        "<div class=\"{class}\"><button class=\"recipe_prev{prev_off}\"></button>{body}<button class=\"recipe_next{next_off}\"></button></div>"
    )
}

fn render_grid(grid: &RecipeGrid) -> String {
    format!(
        "<div class=\"grid col{}\">{}</div>",
        grid.columns,
        grid.cells
            .iter()
            .map(|cell| render_ingredient(&cell.symbol, cell.ingredient.as_ref()))
            .join("")
    )
}

fn render_recipe(recipe: &Recipe) -> String {
    format!(
        "<div class=\"recipe\" name=\"{}\">{}<div class=\"crafting-arrow\"></div><div class=\"output\">{}</div></div>",
        escape_html(&recipe.name),
        render_grid(&recipe.grid),
        render_ingredient("?", recipe.output.as_ref())
    )
}

fn render_blueprint(recipe: &BlueprintRecipe) -> String {
    format!(
        "<div class=\"recipe\" name=\"{}\"><div class=\"blueprint-ingredient\">{}</div>{}<div class=\"output\">{}</div></div>",
        escape_html(&recipe.name),
        render_ingredient("B", recipe.blueprint.as_ref()),
        render_grid(&recipe.grid),
        render_ingredient("?", recipe.output.as_ref())
    )
}

fn render_tile(tile: &ImageTile) -> String {
    format!(
        "<div class=\"embedded_image\" style=\"background-image: url({}); height: {}vmin; background-size: {}%; background-position: {}vmin {}vmin\"></div>",
        escape_html(&tile.url),
        tile.height_vmin,
        tile.background_size_pct,
        tile.offset_vmin.0,
        tile.offset_vmin.1
    )
}

/// Renders one ingredient slot; missing ingredients become an empty slot.
pub fn render_ingredient(symbol: &str, ingredient: Option<&PreparedIngredient>) -> String {
    let Some(ingredient) = ingredient.filter(|i| !i.raw.is_null()) else {
        return "<div class=\"item empty\"></div>".to_string();
    };
    let face = match (&ingredient.icon, &ingredient.item) {
        (Some(icon), Some(item)) => format!(
            "<img class=\"item\" alt=\"{}\" src=\"{}\"/>",
            escape_html(&item.to_string()),
            escape_html(icon)
        ),
        _ => format!("<span class=\"symbol\">{}</span>", escape_html(symbol)),
    };
    let count = ingredient
        .count()
        .map(|c| format!("<span class=\"count\">{}</span>", escape_html(&count_text(c))))
        .unwrap_or_default();
    format!(
        "<div class=\"item\">{}{}<div class=\"tooltip\">{}</div></div>",
        face,
        count,
        render_tooltip(&ingredient.tooltip)
    )
}

fn count_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_tooltip(tooltip: &IngredientTooltip) -> String {
    match tooltip {
        IngredientTooltip::Tag(tag) => format!("<span>Tag:</span><br/><span>{}</span>", escape_html(tag)),
        IngredientTooltip::Item { name, domain } => format!(
            "<span>{}</span><br/><span class=\"domain formatting_o\">{}</span>",
            escape_html(name),
            escape_html(domain)
        ),
        IngredientTooltip::None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_idf::{GridCell, ResourceLocation};
    use serde_json::json;

    fn ingredient(name: &str, icon: bool) -> PreparedIngredient {
        PreparedIngredient {
            raw: json!({"item": format!("immersiveengineering:{name}"), "count": 2}),
            item: Some(ResourceLocation::parse(name, "immersiveengineering")),
            icon: icon.then(|| format!("https://host/icons/immersiveengineering/{name}.png")),
            tooltip: IngredientTooltip::Item {
                name: "Hammer".to_string(),
                domain: "Immersive Engineering".to_string(),
            },
        }
    }

    fn recipe(name: &str) -> Recipe {
        Recipe {
            name: name.to_string(),
            grid: RecipeGrid {
                columns: 1,
                cells: vec![GridCell {
                    symbol: "0".to_string(),
                    ingredient: Some(ingredient("plate", false)),
                }],
            },
            output: Some(ingredient("hammer", true)),
        }
    }

    #[test]
    fn test_recipe_html() {
        let html = render_embedded(&EmbeddedContent::Recipe(recipe("tools/hammer")), "k", &ViewState::new());
        assert!(html.starts_with("<div class=\"recipe\" name=\"tools/hammer\">"));
        assert!(html.contains("<div class=\"grid col1\">"));
        assert!(html.contains("<span class=\"symbol\">0</span>"));
        assert!(html.contains("alt=\"immersiveengineering:hammer\""));
        assert!(html.contains("<span class=\"count\">2</span>"));
        assert!(html.contains("formatting_o\">Immersive Engineering"));
    }

    #[test]
    fn test_carousel_buttons() {
        let content = EmbeddedContent::MultiRecipe(vec![recipe("a"), recipe("b")]);
        let mut state = ViewState::new();
        let first = render_embedded(&content, "r", &state);
        assert!(first.contains("recipe_prev off"));
        assert!(first.contains("name=\"a\""));
        state.step_carousel("r", true, 2);
        let second = render_embedded(&content, "r", &state);
        assert!(second.contains("recipe_next off"));
        assert!(second.contains("name=\"b\""));
    }

    #[test]
    fn test_empty_slot_and_multiblock() {
        assert_eq!(render_ingredient("A", None), "<div class=\"item empty\"></div>");
        let html = render_embedded(
            &EmbeddedContent::Multiblock {
                name: "Coke Oven".to_string(),
            },
            "m",
            &ViewState::new(),
        );
        assert!(html.contains("cool looking multiblock"));
        assert!(html.contains("Coke Oven"));
    }

    #[test]
    fn test_image_tile_style() {
        let html = render_embedded(
            &EmbeddedContent::Images(vec![ImageTile {
                url: "https://host/assets/textures/a.png".to_string(),
                height_vmin: 20.0,
                background_size_pct: 233,
                offset_vmin: (-5.0, 0.0),
            }]),
            "i",
            &ViewState::new(),
        );
        assert!(html.contains("height: 20vmin"));
        assert!(html.contains("background-size: 233%"));
        assert!(html.contains("background-position: -5vmin 0vmin"));
    }
}
