//! The category tree described by `manual/autoload.json`.

use folio_types::EntryKey;
use serde_json::Value;
use std::collections::HashMap;

/// Key listing a category's entries.
pub const ENTRY_LIST: &str = "entry_list";
/// Sorting hint, not shown.
pub const CATEGORY_WEIGHT: &str = "category_weight";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Category {
    pub key: String,
    pub entries: Vec<EntryKey>,
    pub subcategories: Vec<String>,
    /// Only categories at the root of the file are listed on the start page.
    pub toplevel: bool,
}

/// Categories in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an autoload document. Anything but an object yields an empty catalog.
    pub fn from_autoload(autoload: &Value) -> Self {
        let mut catalog = Self::new();
        if let Some(root) = autoload.as_object() {
            for (key, value) in root {
                catalog.register(key, value, true);
            }
        } else {
            log::warn!("autoload document is not an object; no categories loaded");
        }
        catalog
    }

    /// Registers `value` under `key` if it is an object with an `entry_list`.
    fn register(&mut self, key: &str, value: &Value, toplevel: bool) {
        let Some(body) = value.as_object().filter(|o| o.contains_key(ENTRY_LIST)) else {
            log::debug!("skipping '{}': not a category", key);
            return;
        };
        let mut category = Category {
            key: key.to_string(),
            toplevel,
            ..Category::default()
        };
        let mut children = Vec::new();
        for (child, child_value) in body {
            match child.as_str() {
                ENTRY_LIST => {
                    category.entries = child_value
                        .as_array()
                        .map(|list| {
                            list.iter()
                                .filter_map(Value::as_str)
                                .map(EntryKey::new)
                                .collect()
                        })
                        .unwrap_or_default();
                }
                CATEGORY_WEIGHT => {}
                _ => {
                    category.subcategories.push(child.clone());
                    children.push((child, child_value));
                }
            }
        }
        self.insert(category);
        for (child, child_value) in children {
            self.register(child, child_value, false);
        }
    }

    /// Adds or replaces a category, keeping its original position on replace.
    pub fn insert(&mut self, category: Category) {
        match self.index.get(&category.key) {
            Some(&i) => self.categories[i] = category,
            None => {
                self.index.insert(category.key.clone(), self.categories.len());
                self.categories.push(category);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.index.get(key).map(|&i| &self.categories[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    pub fn toplevel(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.toplevel)
    }

    /// Every listed entry once, in first-seen order.
    pub fn all_entries(&self) -> Vec<EntryKey> {
        let mut seen = std::collections::HashSet::new();
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter())
            .filter(|key| seen.insert((*key).clone()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
