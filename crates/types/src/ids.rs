//! Newtype wrappers for the string identifiers that flow through the manual.
//!
//! Entry keys, anchor names, branches and languages are all plain strings in
//! the content repository. Wrapping them keeps a branch from being passed
//! where an entry key is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl From<Arc<str>> for $name {
            fn from(s: Arc<str>) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Key of a manual entry, e.g. `"hammer"`. Also used for category keys.
    EntryKey
);

string_id!(
    /// Name of an insertion point inside an entry's text (`<&name>`).
    AnchorName
);

string_id!(
    /// A content version line of the repository, e.g. `"1.19.2"`.
    BranchId
);

string_id!(
    /// A language code such as `"en_us"`.
    LanguageId
);

string_id!(
    /// Name of a config option referenced from manual text.
    ConfigKey
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_entry_key_creation() {
        let a = EntryKey::new("hammer");
        let b = EntryKey::from("hammer");
        let c = EntryKey::from(String::from("hammer"));

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_str(), "hammer");
        assert_eq!(a.to_string(), "hammer");
    }

    #[test]
    fn test_borrow_lookup_by_str() {
        let mut entries = HashMap::new();
        entries.insert(EntryKey::new("wire"), 3);
        assert_eq!(entries.get("wire"), Some(&3));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut branches = vec![BranchId::new("1.20.1"), BranchId::new("1.16.5"), BranchId::new("1.18.2")];
        branches.sort();
        assert_eq!(branches[0].as_str(), "1.16.5");
        assert_eq!(branches[2].as_str(), "1.20.1");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let key = EntryKey::new("wirecutter");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"wirecutter\"");

        let parsed: LanguageId = serde_json::from_str("\"de_de\"").unwrap();
        assert_eq!(parsed.as_str(), "de_de");
    }

    #[test]
    fn test_empty_anchor() {
        assert!(AnchorName::new("").is_empty());
        assert!(!AnchorName::new("start").is_empty());
    }
}
