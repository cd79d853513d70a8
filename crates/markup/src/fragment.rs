use folio_idf::ContentNode;
use regex::{Captures, Regex};

/// Intermediate result of expansion: strings not yet claimed by a pattern,
/// finished nodes, and nested groups (from anchor fan-out).
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Str(String),
    Node(ContentNode),
    Group(Vec<Fragment>),
}

impl Fragment {
    pub fn node(node: ContentNode) -> Self {
        Fragment::Node(node)
    }
}

impl From<ContentNode> for Fragment {
    fn from(node: ContentNode) -> Self {
        Fragment::Node(node)
    }
}

/// Runs one substitution pass over every unclaimed string, recursing into groups.
pub fn replace_pass<F>(fragments: Vec<Fragment>, pattern: &Regex, replace: &mut F) -> Vec<Fragment>
where
    F: FnMut(&Captures<'_>) -> Fragment,
{
    let mut out = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        match fragment {
            Fragment::Str(s) => split_matches(&s, pattern, replace, &mut out),
            Fragment::Group(inner) => out.push(Fragment::Group(replace_pass(inner, pattern, replace))),
            node @ Fragment::Node(_) => out.push(node),
        }
    }
    out
}

fn split_matches<F>(s: &str, pattern: &Regex, replace: &mut F, out: &mut Vec<Fragment>)
where
    F: FnMut(&Captures<'_>) -> Fragment,
{
    let mut last = 0;
    for caps in pattern.captures_iter(s) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            out.push(Fragment::Str(s[last..whole.start()].to_string()));
        }
        out.push(replace(&caps));
        last = whole.end();
    }
    if last < s.len() {
        out.push(Fragment::Str(s[last..].to_string()));
    }
}

/// Deletes every occurrence of `literal` from unclaimed strings.
pub fn strip_literal(fragments: Vec<Fragment>, literal: &str) -> Vec<Fragment> {
    fragments
        .into_iter()
        .map(|fragment| match fragment {
            Fragment::Str(s) => Fragment::Str(s.replace(literal, "")),
            Fragment::Group(inner) => Fragment::Group(strip_literal(inner, literal)),
            node => node,
        })
        .collect()
}
