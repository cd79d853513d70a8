//! Where manual content lives in the content repository.

use folio_types::{BranchId, LanguageId};

pub const MOD_ID: &str = "immersiveengineering";
pub const REPO_OWNER: &str = "BluSunrize";
pub const REPO_NAME: &str = "ImmersiveEngineering";
pub const DEFAULT_REPO_BASE: &str =
    "https://raw.githubusercontent.com/BluSunrize/ImmersiveEngineering";

pub const SUPPORTED_LANGUAGES: [&str; 8] = [
    "en_us", "de_de", "es_es", "ja_jp", "ko_kr", "pt_br", "ru_ru", "zh_cn",
];
pub const DEFAULT_LANGUAGE: &str = "en_us";

/// Release lines that predate the manual format and are never offered.
pub const EXCLUDED_BRANCHES: [&str; 7] = [
    "1.7.10", "1.8.9", "1.9.4", "1.10.2", "1.11.2", "1.13pre", "1.13",
];

/// URL builder for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPaths {
    base: String,
}

impl Default for RepositoryPaths {
    fn default() -> Self {
        Self::new(DEFAULT_REPO_BASE)
    }
}

impl RepositoryPaths {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn asset_path(&self, branch: &BranchId) -> String {
        format!(
            "{}/{}/src/main/resources/assets/{}/",
            self.base, branch, MOD_ID
        )
    }

    pub fn manual_path(&self, branch: &BranchId) -> String {
        format!("{}manual/", self.asset_path(branch))
    }

    pub fn recipe_path(&self, branch: &BranchId) -> String {
        format!(
            "{}/{}/src/generated/resources/data/{}/recipes/",
            self.base, branch, MOD_ID
        )
    }

    pub fn data_export_path(&self, branch: &BranchId) -> String {
        format!("{}/manual-data/{}/", self.base, branch)
    }

    pub fn icon_path(&self, branch: &BranchId) -> String {
        format!("{}icons/", self.data_export_path(branch))
    }

    /// Note: no trailing slash.
    pub fn tag_path(&self, branch: &BranchId) -> String {
        format!("{}tags", self.data_export_path(branch))
    }

    pub fn lang_file(&self, branch: &BranchId, lang: &LanguageId) -> String {
        format!("{}lang/{}.json", self.asset_path(branch), lang)
    }

    pub fn autoload(&self, branch: &BranchId) -> String {
        format!("{}autoload.json", self.manual_path(branch))
    }

    pub fn entry_data(&self, branch: &BranchId, key: &str) -> String {
        format!("{}{}.json", self.manual_path(branch), key)
    }

    pub fn entry_text(&self, branch: &BranchId, lang: &LanguageId, key: &str) -> String {
        format!("{}{}/{}.txt", self.manual_path(branch), lang, key)
    }
}

pub fn is_supported_language(lang: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&lang)
}

pub fn is_excluded_branch(branch: &str) -> bool {
    EXCLUDED_BRANCHES.contains(&branch)
}
