//! A miniature content repository served from memory.

use folio_core::RepositoryPaths;
use folio_types::{BranchId, LanguageId};
use serde_json::{Value, json};

pub const BRANCH: &str = "1.20.1";

pub fn branch() -> BranchId {
    BranchId::new(BRANCH)
}

pub fn english() -> LanguageId {
    LanguageId::new("en_us")
}

pub fn german() -> LanguageId {
    LanguageId::new("de_de")
}

pub fn paths() -> RepositoryPaths {
    RepositoryPaths::default()
}

pub fn wirecutter_text() -> String {
    let sentence = "The wirecutter removes connections between relays and connectors. ";
    format!("Wirecutter\nCuts wires\n{}", sentence.repeat(20))
}

fn json_file(url: String, value: Value) -> (String, String) {
    (url, value.to_string())
}

/// Every file of the repository, keyed by URL.
pub fn repository_files() -> Vec<(String, String)> {
    let paths = paths();
    let b = branch();
    let en = english();
    let de = german();
    let recipes = paths.recipe_path(&b);
    let icons = paths.icon_path(&b);

    vec![
        json_file(
            paths.lang_file(&b, &en),
            json!({
                "manual.immersiveengineering.manual": "Engineer's Manual",
                "manual.immersiveengineering.general": "General",
                "manual.immersiveengineering.tools": "Tools",
                "manual.immersiveengineering.energy": "Energy",
                "item.immersiveengineering.hammer": "Engineer's Hammer"
            }),
        ),
        json_file(
            paths.lang_file(&b, &de),
            json!({ "manual.immersiveengineering.general": "Allgemein" }),
        ),
        json_file(
            paths.autoload(&b),
            json!({
                "general": {
                    "category_weight": 0,
                    "entry_list": ["introduction", "hammer"],
                    "tools": { "entry_list": ["wirecutter"] }
                },
                "energy": { "entry_list": ["wiring"] }
            }),
        ),
        (
            paths.entry_text(&b, &en, "introduction"),
            "Introduction\nWelcome\nThis manual explains the mod. See <link;hammer;the hammer> or <link;secret;a secret>."
                .to_string(),
        ),
        json_file(
            paths.entry_data(&b, "hammer"),
            json!({ "crafting": { "type": "crafting", "recipe": "crafting/hammer" } }),
        ),
        (
            paths.entry_text(&b, &en, "hammer"),
            "Engineer's Hammer\nA tool\nThe hammer is crafted like this:<&crafting>It forms multiblocks.<np>Second page."
                .to_string(),
        ),
        (paths.entry_text(&b, &en, "wirecutter"), wirecutter_text()),
        (
            paths.entry_text(&b, &en, "wiring"),
            "Wiring\nPower lines\nConnect things.".to_string(),
        ),
        (
            paths.entry_text(&b, &de, "wiring"),
            "Verkabelung\nStromleitungen\nVerbinde Dinge.".to_string(),
        ),
        (
            paths.entry_text(&b, &en, "secret"),
            "Secret\nHidden\nYou found it.".to_string(),
        ),
        json_file(
            format!("{}crafting/hammer.json", recipes),
            json!({
                "pattern": [" if", " si", "s  "],
                "key": {
                    "i": { "item": "minecraft:iron_ingot" },
                    "f": { "item": "minecraft:string" },
                    "s": { "item": "minecraft:stick" }
                },
                "result": { "item": "immersiveengineering:hammer" }
            }),
        ),
        (
            format!("{}immersiveengineering/hammer.png", icons),
            "png".to_string(),
        ),
    ]
}
