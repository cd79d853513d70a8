mod common;

use folio_idf::{ContentNode, EntryData, PageSequence};
use folio_layout::{PageGeometry, node_cost, paginate};
use folio_markup::parse_entry;
use folio_traits::NoopLinkSink;
use serde_json::json;

fn samples() -> Vec<(&'static str, String, EntryData)> {
    let recipe = json!({"type": "crafting", "recipe": "x"});
    vec![
        ("plain", "Hello <np> World".to_string(), EntryData::default()),
        ("long run", "x".repeat(200), EntryData::default()),
        (
            "wrapped prose",
            "Conveyor belts move items between machines. ".repeat(40),
            EntryData::default(),
        ),
        (
            "anchors",
            format!("{}<&a>{}<&b>{}", "a".repeat(100), "b ".repeat(150), "c".repeat(50)),
            EntryData::from_value(json!({
                "a": recipe,
                "b": {"type": "image", "images": [{"uSize": 55, "vSize": 200, "location": "x.png"}]}
            })),
        ),
        (
            "markup mix",
            "§lBold§r words <link;other;a link> <config;i;wires> <br><br><br> <keybind;key.jump> more text"
                .repeat(12),
            EntryData::default(),
        ),
        (
            "fan-out anchors",
            "intro <&steps> outro".to_string(),
            EntryData::from_value(json!({"steps": [recipe.clone(), recipe.clone(), recipe]})),
        ),
        ("only breaks", "<br><br><np><br>".to_string(), EntryData::default()),
    ]
}

fn text_of(nodes: &[ContentNode]) -> String {
    nodes.iter().filter_map(ContentNode::as_text).collect()
}

fn pages_for(text: &str, data: &EntryData) -> (Vec<ContentNode>, PageSequence) {
    let sequence = parse_entry(text, data, &NoopLinkSink);
    let pages = paginate(sequence.clone(), &PageGeometry::default());
    (sequence, pages)
}

#[test]
fn test_first_node_is_an_anchor() {
    common::init_logging();
    for (name, text, data) in samples() {
        let sequence = parse_entry(&text, &data, &NoopLinkSink);
        assert!(sequence[0].is_anchor(), "{}: sequence starts with {:?}", name, sequence[0]);
    }
}

#[test]
fn test_pages_respect_capacity() {
    let geometry = PageGeometry::default();
    for (name, text, data) in samples() {
        let (_, pages) = pages_for(&text, &data);
        for (i, page) in pages.iter().enumerate() {
            let total: usize = page.nodes().iter().map(|n| node_cost(n, &geometry)).sum();
            assert!(
                total <= geometry.capacity() || page.len() == 1,
                "{}: page {} costs {} with {} nodes",
                name,
                i,
                total,
                page.len()
            );
        }
    }
}

#[test]
fn test_no_empty_or_blank_pages() {
    for (name, text, data) in samples() {
        let (_, pages) = pages_for(&text, &data);
        for page in pages.iter() {
            assert!(!page.is_empty(), "{}: empty page", name);
            assert!(!page.is_blank(), "{}: page of line breaks only", name);
        }
    }
}

#[test]
fn test_text_survives_reassembly() {
    for (name, text, data) in samples() {
        let (sequence, pages) = pages_for(&text, &data);
        let reassembled: String = pages.iter().map(|p| text_of(p.nodes())).collect();
        assert_eq!(reassembled, text_of(&sequence), "{}", name);
    }
}

#[test]
fn test_long_run_splits_in_two() {
    let geometry = PageGeometry::new(5, 30).unwrap();
    let sequence = parse_entry(&"x".repeat(200), &EntryData::default(), &NoopLinkSink);
    let pages = paginate(sequence, &geometry);

    let runs: Vec<&str> = pages
        .iter()
        .flat_map(|p| p.nodes())
        .filter_map(ContentNode::as_text)
        .collect();
    assert_eq!(runs.len(), 2);
    assert_eq!(pages.len(), 2);
    assert_eq!(runs.concat(), "x".repeat(200));
    assert!(runs.iter().all(|r| r.chars().count() <= geometry.capacity()));
}

fn anchor_keys<'a>(nodes: impl Iterator<Item = &'a ContentNode>) -> Vec<String> {
    nodes.filter_map(ContentNode::as_anchor).map(|a| a.key()).collect()
}

#[test]
fn test_anchor_order_is_preserved() {
    let (_, text, data) = samples().swap_remove(5);
    let (sequence, pages) = pages_for(&text, &data);
    let before = anchor_keys(sequence.iter());
    let after = anchor_keys(pages.iter().flat_map(|p| p.nodes()));
    assert_eq!(before, after);
    assert_eq!(after, ["start", "steps_0", "steps_1", "steps_2"]);
}

#[test]
fn test_build_is_deterministic() {
    for (name, text, data) in samples() {
        let (_, first) = pages_for(&text, &data);
        let (_, second) = pages_for(&text, &data);
        assert_eq!(first, second, "{}", name);
    }
}
