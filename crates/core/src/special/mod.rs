//! Embedded content: turns anchor descriptors into displayable recipes,
//! item displays, images and multiblock placeholders.
//!
//! Every fetch goes through the shared [`ContentCache`]. A descriptor whose
//! content cannot be fetched resolves to `None` and the anchor renders empty.

mod ingredient;
mod recipes;

use crate::error::ManualError;
use crate::localization::Translator;
use crate::repository::RepositoryPaths;
use folio_idf::{Descriptor, EmbeddedContent, ImageTile};
use folio_layout::estimate::IMAGE_SCALE;
use folio_traits::ContentCache;
use folio_types::BranchId;
use serde_json::Value;
use std::sync::Arc;

pub use ingredient::unwrap_ingredient;

#[derive(Debug)]
pub struct EmbeddedResolver {
    cache: Arc<dyn ContentCache>,
    paths: RepositoryPaths,
    translator: Arc<Translator>,
}

impl EmbeddedResolver {
    pub fn new(
        cache: Arc<dyn ContentCache>,
        paths: RepositoryPaths,
        translator: Arc<Translator>,
    ) -> Self {
        Self {
            cache,
            paths,
            translator,
        }
    }

    pub fn paths(&self) -> &RepositoryPaths {
        &self.paths
    }

    /// Resolves a descriptor, or `None` for unknown types and failed fetches.
    pub async fn resolve(&self, branch: &BranchId, descriptor: &Descriptor) -> Option<EmbeddedContent> {
        match self.try_resolve(branch, descriptor).await {
            Ok(content) => content,
            Err(e) => {
                log::warn!(
                    "embedded content of type {:?} unavailable: {}",
                    descriptor.kind(),
                    e
                );
                None
            }
        }
    }

    async fn try_resolve(
        &self,
        branch: &BranchId,
        descriptor: &Descriptor,
    ) -> Result<Option<EmbeddedContent>, ManualError> {
        match descriptor.kind() {
            Some("crafting") => self.crafting(branch, descriptor).await,
            Some("blueprint") => self.blueprint(branch, descriptor).await,
            Some("item_display") => self.item_display(branch, descriptor).await,
            Some("image") => Ok(self.images(branch, descriptor)),
            Some("multiblock") => Ok(Some(EmbeddedContent::Multiblock {
                name: descriptor.get_str("name").unwrap_or_default().to_string(),
            })),
            other => {
                log::debug!("no handler for embedded content type {:?}", other);
                Ok(None)
            }
        }
    }

    pub(crate) async fn fetch_json(&self, url: &str) -> Result<Value, ManualError> {
        let bytes = self.cache.get_or_fetch(url).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn item_display(
        &self,
        branch: &BranchId,
        descriptor: &Descriptor,
    ) -> Result<Option<EmbeddedContent>, ManualError> {
        let items: Vec<Value> = match descriptor.get("item").filter(|v| !v.is_null()) {
            Some(item) => vec![item.clone()],
            None => match descriptor.get("items").and_then(Value::as_array) {
                Some(items) => items.clone(),
                None => return Ok(None),
            },
        };
        let mut prepared = Vec::with_capacity(items.len());
        for item in &items {
            prepared.push(self.prepare_ingredient(branch, item).await);
        }
        Ok(Some(EmbeddedContent::ItemDisplay(prepared)))
    }

    fn images(&self, branch: &BranchId, descriptor: &Descriptor) -> Option<EmbeddedContent> {
        let images = descriptor.get("images")?.as_array()?;
        let asset_path = self.paths.asset_path(branch);
        let tiles = images
            .iter()
            .filter_map(|image| image_tile(&asset_path, image))
            .collect();
        Some(EmbeddedContent::Images(tiles))
    }
}

fn number(value: &Value, key: &str) -> Option<f32> {
    value.get(key).and_then(Value::as_f64).map(|n| n as f32)
}

/// Adding zero turns `-0.0` into `0.0` for display.
fn positive_zero(x: f32) -> f32 {
    x + 0.0
}

fn image_tile(asset_path: &str, image: &Value) -> Option<ImageTile> {
    let location = image.get("location")?.as_str()?;
    let u_size = number(image, "uSize").filter(|u| *u > 0.0)?;
    let v_size = number(image, "vSize")?;
    let scale = IMAGE_SCALE / u_size;
    let u_min = number(image, "uMin").unwrap_or(0.0);
    let v_min = number(image, "vMin").unwrap_or(0.0);
    Some(ImageTile {
        url: format!("{}{}", asset_path, location),
        height_vmin: scale * v_size,
        background_size_pct: (256.0 / f64::from(u_size) * 100.0).round() as i64,
        offset_vmin: (positive_zero(-scale * u_min), positive_zero(-scale * v_min)),
    })
}
