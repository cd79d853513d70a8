//! Markup patterns, applied in a fixed order by the expander.
//!
//! Identifier classes are ASCII-only.

use regex::Regex;
use std::sync::LazyLock;

/// `<np>` plus any newlines that follow it.
pub static PAGE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<np>\n*").expect("BUG: invalid PAGE_BREAK regex literal"));

/// `<link;TARGET;LABEL[;ANCHOR]>`
pub static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<link;([A-Za-z0-9_]+);([^;]*?)(?:;([^>]*))?>")
        .expect("BUG: invalid LINK regex literal")
});

/// `§<code>...§r`, non-greedy.
pub static FORMATTING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"§([^r])(.+?)§r").expect("BUG: invalid FORMATTING regex literal"));

/// `<config;i;KEY>`
pub static CONFIG_INT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<config;i;([^;>]+)>").expect("BUG: invalid CONFIG_INT regex literal")
});

/// `<config;b;KEY;ON;OFF>`
pub static CONFIG_BOOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<config;b;([^;>]+);([^;>]+);([^;>]*)>")
        .expect("BUG: invalid CONFIG_BOOL regex literal")
});

/// `<config;iA;KEY[;EXTRA]>`
pub static CONFIG_INT_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<config;iA;([^;>]+)(?:;([^;>]*))?>")
        .expect("BUG: invalid CONFIG_INT_ARRAY regex literal")
});

/// `<&NAME>`
pub static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<&([A-Za-z0-9_]+)>").expect("BUG: invalid ANCHOR regex literal"));

/// `<keybind;ID>`
pub static KEYBIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<keybind;([A-Za-z0-9_.]+)>").expect("BUG: invalid KEYBIND regex literal")
});

/// A raw newline, an escaped `\n`, or `<br>`.
pub static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n|\\n|<br>").expect("BUG: invalid LINE_BREAK regex literal"));

/// Formatting reset code, dropped once spans are built.
pub const RESET: &str = "§r";

/// Target meaning "the current entry".
pub const SAME_ENTRY: &str = "this";
