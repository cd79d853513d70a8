//! Translation lookup.

/// Resolves localization keys to display text.
pub trait Translate: Send + Sync {
    /// Looks up `key` and substitutes `args` into its placeholders.
    /// Unknown keys are returned unchanged.
    fn translate(&self, key: &str, args: &[&str]) -> String;

    fn has_translation(&self, key: &str) -> bool;
}

/// A translator that knows no keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTranslator;

impl Translate for IdentityTranslator {
    fn translate(&self, key: &str, _args: &[&str]) -> String {
        key.to_string()
    }

    fn has_translation(&self, _key: &str) -> bool {
        false
    }
}
