//! Resolved embedded content attached to anchor nodes.
//!
//! These are plain data; HTML generation lives in the render crate.

use serde_json::Value;

/// A namespaced identifier such as `immersiveengineering:hammer`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceLocation {
    pub domain: String,
    pub name: String,
}

impl ResourceLocation {
    /// Splits `domain:name`; a missing domain falls back to `default_domain`.
    pub fn parse(full: &str, default_domain: &str) -> Self {
        let mut parts = full.split(':');
        let first = parts.next().unwrap_or("");
        let last = full.rsplit(':').next().unwrap_or("");
        let domain = if full.contains(':') { first } else { default_domain };
        Self {
            domain: domain.to_string(),
            name: last.to_string(),
        }
    }
}

impl std::fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.domain, self.name)
    }
}

/// Hover text shown for an ingredient.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum IngredientTooltip {
    Tag(String),
    Item {
        name: String,
        domain: String,
    },
    #[default]
    None,
}

/// An ingredient ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedIngredient {
    /// The unwrapped ingredient JSON.
    pub raw: Value,
    pub item: Option<ResourceLocation>,
    /// Icon URL, present only when the icon was actually available.
    pub icon: Option<String>,
    pub tooltip: IngredientTooltip,
}

impl PreparedIngredient {
    pub fn count(&self) -> Option<&Value> {
        self.raw.get("count").filter(|c| !c.is_null())
    }
}

/// One cell of a recipe grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub symbol: String,
    pub ingredient: Option<PreparedIngredient>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeGrid {
    pub columns: usize,
    pub cells: Vec<GridCell>,
}

/// Grid width for shapeless layouts: one column for one input, two for up to four, else three.
pub fn shapeless_columns(count: usize) -> usize {
    match count {
        1 => 1,
        n if n < 5 => 2,
        _ => 3,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub grid: RecipeGrid,
    pub output: Option<PreparedIngredient>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlueprintRecipe {
    pub name: String,
    pub blueprint: Option<PreparedIngredient>,
    pub grid: RecipeGrid,
    pub output: Option<PreparedIngredient>,
}

/// One tile cut out of a texture atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTile {
    pub url: String,
    pub height_vmin: f32,
    pub background_size_pct: i64,
    pub offset_vmin: (f32, f32),
}

/// Content produced for an anchor descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddedContent {
    Recipe(Recipe),
    /// Alternatives cycled with previous/next controls.
    MultiRecipe(Vec<Recipe>),
    /// The `recipes` form of a crafting descriptor.
    RecipeList(Vec<EmbeddedContent>),
    Blueprint(Vec<BlueprintRecipe>),
    ItemDisplay(Vec<Option<PreparedIngredient>>),
    Images(Vec<ImageTile>),
    Multiblock { name: String },
}

impl EmbeddedContent {
    pub fn kind(&self) -> &'static str {
        match self {
            EmbeddedContent::Recipe(_) => "recipe",
            EmbeddedContent::MultiRecipe(_) => "multi-recipe",
            EmbeddedContent::RecipeList(_) => "recipe-list",
            EmbeddedContent::Blueprint(_) => "blueprint",
            EmbeddedContent::ItemDisplay(_) => "item-display",
            EmbeddedContent::Images(_) => "images",
            EmbeddedContent::Multiblock { .. } => "multiblock",
        }
    }
}
