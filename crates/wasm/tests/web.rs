//! WebAssembly integration tests.
//!
//! These tests run in a headless browser using wasm-bindgen-test.
//!
//! Run with: wasm-pack test --headless --chrome crates/wasm

use folio_wasm::{ManualViewer, WasmResourceProvider};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn field(value: &JsValue, name: &str) -> JsValue {
    js_sys::Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

fn pages(value: &JsValue) -> js_sys::Array {
    js_sys::Array::from(&field(value, "pages"))
}

#[wasm_bindgen_test]
fn test_init() {
    let version = folio_wasm::get_version();
    assert!(!version.is_empty());
}

#[wasm_bindgen_test]
fn test_resource_provider() {
    let provider = WasmResourceProvider::new();
    assert!(provider.is_empty());

    provider
        .add_text("https://host/manual/hammer.json", "{}")
        .expect("Should add resource");

    assert!(provider.exists("https://host/manual/hammer.json"));
    assert!(!provider.exists("https://host/manual/wiring.json"));
    assert_eq!(provider.count(), 1);
    assert!(provider.remove("https://host/manual/hammer.json"));
    assert!(provider.is_empty());
}

#[wasm_bindgen_test]
fn test_urls_follow_repository_layout() {
    let viewer = ManualViewer::new(Some("https://host/repo".into()), Some("1.20.1".into()), None);
    assert!(viewer.entry_text_url("hammer").ends_with("/manual/en_us/hammer.txt"));
    assert!(viewer.entry_data_url("hammer").ends_with("/manual/hammer.json"));
    assert!(viewer.lang_file_url().ends_with("/lang/en_us.json"));
}

#[wasm_bindgen_test]
fn test_page_size_must_be_non_zero() {
    let viewer = ManualViewer::new(None, None, None);
    assert!(viewer.with_page_size(0, 30).is_err());
}

#[wasm_bindgen_test]
fn test_translations() {
    let viewer = ManualViewer::new(None, None, None);
    let added = viewer
        .load_translations(r#"{"manual.hammer": "Engineer's Hammer"}"#)
        .unwrap();
    assert_eq!(added, 1);
    assert_eq!(viewer.translate("manual.hammer"), "Engineer's Hammer");
    assert_eq!(viewer.translate("manual.missing"), "manual.missing");
    assert!(viewer.load_translations("{").is_err());
}

#[wasm_bindgen_test]
async fn test_render_entry_pages() {
    let viewer = ManualViewer::new(None, None, None);
    let promise = viewer
        .render_entry("demo".into(), "Title\nSubtitle\nHello <np> World".into(), None)
        .unwrap();
    let entry = JsFuture::from(promise).await.unwrap();

    assert_eq!(field(&entry, "title").as_string().unwrap(), "Title");
    assert_eq!(field(&entry, "subtitle").as_string().unwrap(), "Subtitle");
    let pages = pages(&entry);
    assert_eq!(pages.length(), 2);
    assert!(pages.get(0).as_string().unwrap().contains("Hello"));
    assert!(pages.get(1).as_string().unwrap().contains("World"));
}

#[wasm_bindgen_test]
async fn test_render_entry_reports_links() {
    let viewer = ManualViewer::new(None, None, None);
    let promise = viewer
        .render_entry(
            "demo".into(),
            "Title\n\nSee <link;hammer;the hammer> and <link;wiring;wires>.".into(),
            Some("{}".into()),
        )
        .unwrap();
    let entry = JsFuture::from(promise).await.unwrap();

    let links: Vec<String> = js_sys::Array::from(&field(&entry, "links"))
        .iter()
        .filter_map(|v| v.as_string())
        .collect();
    assert_eq!(links, vec!["hammer", "wiring"]);
}

#[wasm_bindgen_test]
async fn test_render_stored_entry_falls_back_to_english() {
    let viewer = ManualViewer::new(Some("https://host/repo".into()), None, Some("de_de".into()));
    let english = viewer.entry_text_url("hammer").replace("/de_de/", "/en_us/");
    viewer
        .add_text(&english, "Hammer\nTool\nIt forms multiblocks.")
        .unwrap();

    let entry = JsFuture::from(viewer.render_stored_entry("hammer".into()))
        .await
        .unwrap();
    assert_eq!(field(&entry, "title").as_string().unwrap(), "Hammer");
    assert_eq!(pages(&entry).length(), 1);
}

#[wasm_bindgen_test]
async fn test_render_stored_entry_missing() {
    let viewer = ManualViewer::new(None, None, None);
    let err = JsFuture::from(viewer.render_stored_entry("nothing".into()))
        .await
        .unwrap_err();
    assert_eq!(field(&err, "code").as_string().unwrap(), "NOT_FOUND");
}

#[wasm_bindgen_test]
fn test_render_entry_rejects_bad_data() {
    let viewer = ManualViewer::new(None, None, None);
    assert!(
        viewer
            .render_entry("demo".into(), "T\n\nbody".into(), Some("{".into()))
            .is_err()
    );
}
