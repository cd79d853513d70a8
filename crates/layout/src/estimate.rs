//! Size Estimator: per-node capacity costs and embedded-content heights.

use crate::config::PageGeometry;
use folio_idf::{ContentNode, Descriptor};
use serde_json::Value;

/// Scale images are drawn at: 55 vmin across the tile width.
pub const IMAGE_SCALE: f32 = 55.0;
/// Lines per vmin of image height.
const IMAGE_LINE_FACTOR: f32 = 0.25;
const RECIPE_HEIGHT: f32 = 7.0;

/// Estimated cost of `node` in characters.
pub fn node_cost(node: &ContentNode, geometry: &PageGeometry) -> usize {
    match node {
        ContentNode::Text(s) => s.chars().count(),
        ContentNode::Formatted {
            estimated_length, ..
        }
        | ContentNode::Link {
            estimated_length, ..
        }
        | ContentNode::ConfigBool {
            estimated_length, ..
        } => *estimated_length,
        ContentNode::LineBreak => geometry.chars_per_line,
        ContentNode::ConfigInt { .. } | ContentNode::ConfigIntArray { .. } => {
            geometry.placeholder_width
        }
        ContentNode::Anchor(anchor) => reserved_size(anchor.reserved_height, geometry),
        // Budgeted as a full line, the default cost of unlisted nodes in the web viewer.
        ContentNode::Keybind { .. } => geometry.chars_per_line,
        ContentNode::PageBreak => 0,
    }
}

/// Converts a reserved height in lines into characters, rounding up.
pub fn reserved_size(height: f32, geometry: &PageGeometry) -> usize {
    if !height.is_finite() || height <= 0.0 {
        return 0;
    }
    (height * geometry.chars_per_line as f32).ceil() as usize
}

/// Height in lines reserved for an embedded-content descriptor.
///
/// Missing descriptors and unknown types reserve nothing.
pub fn embedded_height(descriptor: Option<&Descriptor>) -> f32 {
    let Some(descriptor) = descriptor else {
        return 0.0;
    };
    let height = match descriptor.kind().unwrap_or("") {
        "crafting" => crafting_height(descriptor),
        "item_display" => 4.0,
        "image" => image_height(descriptor),
        "blueprint" => 7.0,
        "multiblock" => 5.0,
        _ => 0.0,
    };
    if height.is_finite() && height > 0.0 {
        height
    } else {
        0.0
    }
}

fn crafting_height(descriptor: &Descriptor) -> f32 {
    if descriptor.get("recipe").is_some() {
        return RECIPE_HEIGHT;
    }
    match descriptor.get("recipes") {
        Some(Value::Array(recipes)) => RECIPE_HEIGHT * recipes.len() as f32,
        Some(_) => RECIPE_HEIGHT,
        None => 1.0,
    }
}

fn image_height(descriptor: &Descriptor) -> f32 {
    let Some(images) = descriptor.get("images") else {
        return 1.0;
    };
    let Some(images) = images.as_array() else {
        return f32::NAN;
    };
    images
        .iter()
        .map(|image| {
            let u_size = number(image, "uSize");
            let v_size = number(image, "vSize");
            v_size * (IMAGE_SCALE / u_size) * IMAGE_LINE_FACTOR
        })
        .sum()
}

fn number(value: &Value, key: &str) -> f32 {
    value
        .get(key)
        .and_then(Value::as_f64)
        .map(|n| n as f32)
        .unwrap_or(f32::NAN)
}
