//! Translation table and name helpers.

use crate::repository::MOD_ID;
use folio_traits::Translate;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::sync::{LazyLock, RwLock};

/// `%s`, `%d`, `%1$s`, `%%` and a trailing `%`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%(\d+\$)?([A-Za-z%]|$)").expect("BUG: invalid PLACEHOLDER regex literal")
});

static SNAKE_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|_)([A-Za-z0-9_])").expect("BUG: invalid SNAKE_CASE regex literal")
});

const DEFAULT_TRANSLATIONS: [(&str, &str); 3] = [
    (
        "tooltip.config.boolean",
        "This behavior is controlled by the config parameter \"%1$s\". Click to toggle this value.",
    ),
    (
        "tooltip.config.int",
        "This value can be changed via the config option \"%1$s\"",
    ),
    (
        "tooltip.config.array",
        "These values can be changed via the config option \"%1$s\"",
    ),
];

/// Substitutes `args` into the placeholders of `template`, left to right.
///
/// Positional indices (`%2$s`) are not honoured; arguments are consumed in
/// order. Placeholders beyond the supplied arguments stay as written.
pub fn format_translation(template: &str, args: &[&str]) -> String {
    let mut next = args.iter();
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match next.next() {
            Some(arg) => (*arg).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// `manual.immersiveengineering.{key}`
pub fn prefix_manual(key: &str) -> String {
    format!("manual.{}.{}", MOD_ID, key)
}

/// `coke_oven` to `Coke Oven`.
pub fn upper_case_name(name: &str) -> String {
    SNAKE_CASE
        .replace_all(name, |caps: &Captures<'_>| {
            format!(" {}", caps[1].to_uppercase())
        })
        .trim()
        .to_string()
}

/// The translation table, keyed in insertion order.
#[derive(Debug)]
pub struct Translator {
    entries: RwLock<Map<String, Value>>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

fn defaults() -> Map<String, Value> {
    DEFAULT_TRANSLATIONS
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

impl Translator {
    /// A table holding only the config tooltip strings.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(defaults()),
        }
    }

    /// Drops everything but the built-in strings.
    pub fn reset(&self) {
        if let Ok(mut entries) = self.entries.write() {
            *entries = defaults();
        }
    }

    pub fn add_translation(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), Value::String(value.into()));
        }
    }

    pub fn add_translations<I, K, V>(&self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        if let Ok(mut entries) = self.entries.write() {
            for (k, v) in pairs {
                entries.insert(k.into(), Value::String(v.into()));
            }
        }
    }

    /// Merges a language file (a JSON object of strings). Non-string values are skipped.
    pub fn add_translations_json(&self, file: &Value) -> usize {
        let Some(object) = file.as_object() else {
            return 0;
        };
        let pairs: Vec<(&String, &str)> = object
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s)))
            .collect();
        let added = pairs.len();
        self.add_translations(pairs.into_iter().map(|(k, v)| (k.clone(), v)));
        added
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().ok()?;
        entries.get(key).and_then(Value::as_str).map(str::to_string)
    }

    pub fn has_all_translations(&self, keys: &[&str]) -> bool {
        keys.iter().all(|k| self.has_translation(k))
    }

    /// Display name of a mod item: the item translation, then the block one,
    /// then the raw name.
    pub fn translate_item(&self, name: &str) -> String {
        ["item", "block"]
            .iter()
            .find_map(|kind| self.lookup(&format!("{}.{}.{}", kind, MOD_ID, name)))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| name.to_string())
    }

    /// Hex checksum over the table's keys, for cache busting.
    pub fn checksum(&self) -> String {
        let joined = self
            .entries
            .read()
            .map(|e| e.keys().cloned().collect::<Vec<_>>().join(","))
            .unwrap_or_default();
        let mut sum: i64 = 0x1234_5678;
        for (i, unit) in joined.encode_utf16().enumerate() {
            sum = sum.wrapping_add(i64::from(unit).wrapping_mul(i as i64 + 1));
        }
        let low = sum as i32;
        if low < 0 {
            format!("-{:x}", low.unsigned_abs())
        } else {
            format!("{:x}", low)
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Translate for Translator {
    fn translate(&self, key: &str, args: &[&str]) -> String {
        match self.lookup(key) {
            Some(template) if !template.is_empty() => format_translation(&template, args),
            _ => key.to_string(),
        }
    }

    fn has_translation(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|e| e.contains_key(key))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_key_is_returned() {
        let t = Translator::new();
        assert_eq!(t.translate("unknown.key", &[]), "unknown.key");
    }

    #[test]
    fn test_default_tooltips() {
        let t = Translator::new();
        assert_eq!(
            t.translate("tooltip.config.int", &["machines.power"]),
            "This value can be changed via the config option \"machines.power\""
        );
        assert!(t.has_all_translations(&["tooltip.config.boolean", "tooltip.config.array"]));
    }

    #[test]
    fn test_sequential_substitution() {
        assert_eq!(format_translation("%2$s then %1$s", &["a", "b"]), "a then b");
        assert_eq!(format_translation("%s of %d", &["x"]), "x of %d");
        assert_eq!(format_translation("100%", &["!"]), "100!");
        assert_eq!(format_translation("no placeholders", &["x"]), "no placeholders");
    }

    #[test]
    fn test_language_file_merge() {
        let t = Translator::new();
        let added = t.add_translations_json(&json!({
            "item.immersiveengineering.hammer": "Engineer's Hammer",
            "block.immersiveengineering.coke_oven": "Coke Oven Brick",
            "weird": 5
        }));
        assert_eq!(added, 2);
        assert_eq!(t.translate_item("hammer"), "Engineer's Hammer");
        assert_eq!(t.translate_item("coke_oven"), "Coke Oven Brick");
        assert_eq!(t.translate_item("unknown_thing"), "unknown_thing");
        assert!(!t.has_translation("weird"));

        t.reset();
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_upper_case_name() {
        assert_eq!(upper_case_name("coke_oven"), "Coke Oven");
        assert_eq!(upper_case_name("minecraft"), "Minecraft");
    }

    #[test]
    fn test_prefix_manual() {
        assert_eq!(prefix_manual("hammer"), "manual.immersiveengineering.hammer");
    }

    #[test]
    fn test_checksum_tracks_keys() {
        let t = Translator::new();
        let before = t.checksum();
        assert_eq!(before, t.checksum());
        t.add_translation("a", "b");
        assert_ne!(before, t.checksum());
    }
}
