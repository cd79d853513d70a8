use super::EmbeddedResolver;
use crate::localization::upper_case_name;
use crate::repository::MOD_ID;
use folio_idf::{IngredientTooltip, PreparedIngredient, ResourceLocation};
use folio_types::BranchId;
use serde_json::Value;

/// Strips `base_ingredient` wrappers. Alternative lists collapse to their first entry.
pub fn unwrap_ingredient(value: &Value) -> Option<&Value> {
    let mut current = match value {
        Value::Array(alternatives) => alternatives.first()?,
        other => other,
    };
    while let Some(base) = current.get("base_ingredient").filter(|b| !b.is_null()) {
        current = base;
    }
    (!current.is_null()).then_some(current)
}

fn item_name(raw: &Value) -> Option<&str> {
    raw.get("item")
        .or_else(|| raw.get("id"))
        .and_then(Value::as_str)
}

impl EmbeddedResolver {
    /// Prepares an ingredient for display: picks the item to show, fetches its
    /// icon and builds the tooltip.
    pub(crate) async fn prepare_ingredient(
        &self,
        branch: &BranchId,
        value: &Value,
    ) -> Option<PreparedIngredient> {
        let raw = unwrap_ingredient(value)?.clone();
        let item = self.item_to_show(branch, &raw).await;
        let icon = match &item {
            Some(location) => self.icon_for(branch, location).await,
            None => None,
        };
        let tooltip = self.ingredient_tooltip(&raw);
        Some(PreparedIngredient {
            raw,
            item,
            icon,
            tooltip,
        })
    }

    async fn item_to_show(&self, branch: &BranchId, raw: &Value) -> Option<ResourceLocation> {
        if let Some(item) = item_name(raw) {
            return Some(ResourceLocation::parse(item, MOD_ID));
        }
        let tag = raw.get("tag").and_then(Value::as_str)?;
        let tag = ResourceLocation::parse(tag, MOD_ID);
        let url = format!(
            "{}/{}/{}.json",
            self.paths.tag_path(branch),
            tag.domain,
            tag.name
        );
        let members: Vec<String> = match self.fetch_json(&url).await {
            Ok(value) => serde_json::from_value(value).unwrap_or_default(),
            Err(e) => {
                log::debug!("tag {} unavailable: {}", tag, e);
                return None;
            }
        };
        // Icons exist only for mod items.
        let chosen = members
            .iter()
            .find(|m| m.starts_with(MOD_ID))
            .or_else(|| members.first())?;
        Some(ResourceLocation::parse(chosen, MOD_ID))
    }

    async fn icon_for(&self, branch: &BranchId, item: &ResourceLocation) -> Option<String> {
        let url = format!(
            "{}{}/{}.png",
            self.paths.icon_path(branch),
            item.domain,
            item.name
        );
        match self.cache.get_or_fetch(&url).await {
            Ok(_) => Some(url),
            Err(e) => {
                log::trace!("no icon for {}: {}", item, e);
                None
            }
        }
    }

    fn ingredient_tooltip(&self, raw: &Value) -> IngredientTooltip {
        if let Some(tag) = raw.get("tag").and_then(Value::as_str) {
            return IngredientTooltip::Tag(tag.to_string());
        }
        let Some(item) = item_name(raw) else {
            return IngredientTooltip::None;
        };
        let location = ResourceLocation::parse(item, MOD_ID);
        if location.domain == MOD_ID {
            IngredientTooltip::Item {
                name: self.translator.translate_item(&location.name),
                domain: "Immersive Engineering".to_string(),
            }
        } else {
            IngredientTooltip::Item {
                name: upper_case_name(&location.name),
                domain: upper_case_name(&location.domain),
            }
        }
    }
}
