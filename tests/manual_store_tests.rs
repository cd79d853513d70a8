mod common;

use common::fixtures::*;
use common::{GatedFetcher, TestResult, init_logging, provider, store, wait_for_event};
use folio::{EntryKey, ManualBuilder, ManualError, ManualEvent, Route, ViewState, page_of_anchor};
use folio_idf::{ContentNode, EmbeddedContent};
use folio_traits::Translate;
use std::sync::Arc;

#[tokio::test]
async fn test_load_registers_categories_and_entries() -> TestResult {
    let store = store();
    let generation = store.load(&branch(), &english()).await?;
    assert_eq!(generation, 1);
    assert_eq!(store.generation(), 1);

    let toplevel: Vec<_> = store.toplevel_categories().into_iter().map(|c| c.key).collect();
    assert_eq!(toplevel, ["general", "energy"]);
    let general = store.category("general").unwrap();
    assert_eq!(general.subcategories, ["tools"]);
    assert!(!store.category("tools").unwrap().toplevel);

    for key in ["introduction", "hammer", "wirecutter", "wiring"] {
        assert!(store.has_entry(&EntryKey::new(key)), "{} should be loaded", key);
    }
    assert!(!store.has_entry(&EntryKey::new("secret")));

    let hammer = store.entry(&EntryKey::new("hammer")).unwrap();
    assert_eq!(hammer.title, "Engineer's Hammer");
    assert_eq!(hammer.subtitle, "A tool");
    assert_eq!(
        store.translator().translate("manual.immersiveengineering.hammer", &[]),
        "Engineer's Hammer"
    );

    let ready = wait_for_event(&store, |e| matches!(e, ManualEvent::ManualReady { .. })).await;
    assert_eq!(
        ready,
        Some(ManualEvent::ManualReady {
            branch: branch(),
            language: english(),
            generation: 1,
            entries: 4,
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_routes() -> TestResult {
    let store = store();
    store.load(&branch(), &english()).await?;

    assert_eq!(store.route(""), Route::Index);
    assert_eq!(store.route("#general"), Route::Category("general".into()));
    assert_eq!(
        store.route("hammer"),
        Route::Entry { key: EntryKey::new("hammer"), anchor: None }
    );
    assert_eq!(
        store.route("hammer?crafting"),
        Route::Entry { key: EntryKey::new("hammer"), anchor: Some("crafting".into()) }
    );
    assert_eq!(store.route("does_not_exist"), Route::Index);
    Ok(())
}

#[tokio::test]
async fn test_listings() -> TestResult {
    let store = store();
    store.load(&branch(), &english()).await?;
    let view = ViewState::new();

    let index = store.render_route("", 0, &view).await?;
    assert!(index.contains("<h2>Engineer&#39;s Manual</h2>"));
    assert!(index.contains("href=\"#general\""));
    assert!(index.contains(">Energy<"));

    let general = store.render_route("general", 0, &view).await?;
    assert!(general.contains("<h2>General</h2>"));
    let tools = general.find("#tools").unwrap();
    let hammer = general.find("#hammer").unwrap();
    assert!(tools < hammer, "subcategories are listed before entries");
    assert!(general.contains("Engineer&#39;s Hammer"));
    Ok(())
}

#[tokio::test]
async fn test_entry_pages_resolve_embedded_recipe() -> TestResult {
    let store = store();
    store.load(&branch(), &english()).await?;

    let key = EntryKey::new("hammer");
    let pages = store.entry_pages(&key).await?;
    assert_eq!(pages.len(), 3);
    assert_eq!(page_of_anchor(&pages, "crafting"), Some(1));

    let anchor = pages.get(1).unwrap().nodes()[0].as_anchor().unwrap();
    let Some(EmbeddedContent::Recipe(recipe)) = anchor.element.as_deref() else {
        panic!("crafting anchor should hold a recipe");
    };
    assert_eq!(recipe.grid.columns, 3);
    assert!(recipe.output.as_ref().unwrap().icon.is_some());

    let again = store.entry_pages(&key).await?;
    assert!(Arc::ptr_eq(&pages, &again), "pages are cached per generation");
    Ok(())
}

#[tokio::test]
async fn test_render_entry_at_anchor() -> TestResult {
    let store = store();
    store.load(&branch(), &english()).await?;
    let view = ViewState::new();

    let html = store.render_route("hammer?crafting", 0, &view).await?;
    assert!(html.contains("It forms multiblocks."));
    assert!(html.contains("<span class=\"page-number\">2</span>"));
    assert!(html.contains("icons/immersiveengineering/hammer.png"));

    let last = store.render_route("hammer", 2, &view).await?;
    assert!(last.contains("Second page."));
    assert!(last.contains("page_next off"));
    Ok(())
}

#[tokio::test]
async fn test_long_entry_spans_pages() -> TestResult {
    let store = store();
    store.load(&branch(), &english()).await?;

    let pages = store.entry_pages(&EntryKey::new("wirecutter")).await?;
    assert!(pages.len() >= 3);
    let text: String = pages
        .iter()
        .flat_map(|p| p.nodes())
        .filter_map(ContentNode::as_text)
        .collect();
    let expected = wirecutter_text();
    let body = expected.splitn(3, '\n').nth(2).unwrap();
    assert_eq!(text, body);
    Ok(())
}

#[tokio::test]
async fn test_linked_entry_loads_in_background() -> TestResult {
    let store = store();
    store.load(&branch(), &english()).await?;
    assert!(!store.has_entry(&EntryKey::new("secret")));

    store.entry_pages(&EntryKey::new("introduction")).await?;
    let event = wait_for_event(&store, |e| {
        matches!(e, ManualEvent::EntryReady { key, .. } if key.as_str() == "secret")
    })
    .await;

    assert_eq!(
        event,
        Some(ManualEvent::EntryReady { key: EntryKey::new("secret"), generation: 1 })
    );
    assert!(store.has_entry(&EntryKey::new("secret")));
    assert_eq!(store.route("secret"), Route::Entry { key: EntryKey::new("secret"), anchor: None });
    Ok(())
}

#[tokio::test]
async fn test_language_fallback() -> TestResult {
    let store = store();
    store.load(&branch(), &german()).await?;

    assert_eq!(store.entry(&EntryKey::new("wiring")).unwrap().title, "Verkabelung");
    assert_eq!(store.entry(&EntryKey::new("hammer")).unwrap().title, "Engineer's Hammer");

    let translator = store.translator();
    assert_eq!(translator.translate("manual.immersiveengineering.general", &[]), "Allgemein");
    assert_eq!(translator.translate("manual.immersiveengineering.tools", &[]), "Tools");
    Ok(())
}

#[tokio::test]
async fn test_reload_starts_a_new_generation() -> TestResult {
    let store = store();
    store.load(&branch(), &english()).await?;
    store.entry_pages(&EntryKey::new("hammer")).await?;

    let generation = store.load(&branch(), &german()).await?;
    assert_eq!(generation, 2);
    assert_eq!(store.entry(&EntryKey::new("wiring")).unwrap().title, "Verkabelung");
    assert_eq!(store.selection(), Some((branch(), german())));
    Ok(())
}

#[tokio::test]
async fn test_unsupported_selection_is_rejected() {
    let store = store();
    let excluded = store.load(&folio::BranchId::new("1.10.2"), &english()).await;
    assert!(matches!(excluded, Err(ManualError::Config(_))));
    let language = store.load(&branch(), &folio::LanguageId::new("xx_yy")).await;
    assert!(matches!(language, Err(ManualError::Config(_))));
    assert_eq!(store.generation(), 0);
}

#[tokio::test]
async fn test_missing_entry_is_an_error() -> TestResult {
    let store = store();
    store.load(&branch(), &english()).await?;
    assert!(store.entry_pages(&EntryKey::new("missing")).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_superseded_load_is_discarded() -> TestResult {
    init_logging();
    let fetcher = Arc::new(GatedFetcher::new(provider(), "autoload.json"));
    let store = ManualBuilder::new().with_fetcher(fetcher.clone()).build()?;

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.load(&branch(), &english()).await }
    });
    fetcher.reached.notified().await;
    let generation = store.clear()?;
    fetcher.gate.add_permits(1);

    let result = task.await?;
    assert!(matches!(result, Err(ManualError::Stale { expected: 1, found: 2 })));
    assert_eq!(generation, 2);
    assert!(store.toplevel_categories().is_empty());
    assert_eq!(store.entry_count(), 0);
    assert_eq!(store.selection(), None);
    Ok(())
}
