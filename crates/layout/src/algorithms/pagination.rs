//! Pagination Engine: a single greedy pass over the linearized sequence.

use crate::config::PageGeometry;
use crate::estimate::{node_cost, reserved_size};
use crate::text::{split_at_budget, split_chars};
use folio_idf::{ContentNode, Page, PageSequence};
use std::collections::VecDeque;

pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining: usize,
}

/// Checks whether a node of `cost` fits on a page already holding `running_size`.
pub fn check_fit(running_size: usize, cost: usize, capacity: usize) -> BreakAnalysis {
    BreakAnalysis {
        should_break: running_size + cost > capacity,
        remaining: capacity.saturating_sub(running_size),
    }
}

/// Accumulator state of the pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    /// Index in the placed sequence where the open page starts.
    pub last_cut: usize,
    /// Estimated size of the open page.
    pub running_size: usize,
}

/// Groups a linearized sequence into pages.
///
/// Page breaks are consumed. Anchors close the open page and begin the next one,
/// seeding its size with their reserved height. Text that overflows is split
/// after the whole lines that still fit; other nodes that overflow move to a
/// fresh page. Empty pages and pages holding only line breaks are dropped.
pub fn paginate(sequence: Vec<ContentNode>, geometry: &PageGeometry) -> PageSequence {
    let mut paginator = Paginator::new(geometry);
    let mut queue: VecDeque<ContentNode> = sequence.into();
    while let Some(node) = queue.pop_front() {
        if let Some(remainder) = paginator.place(node) {
            queue.push_front(remainder);
        }
    }
    paginator.finish()
}

struct Paginator<'a> {
    geometry: &'a PageGeometry,
    placed: Vec<ContentNode>,
    cuts: Vec<usize>,
    cursor: PaginationCursor,
}

impl<'a> Paginator<'a> {
    fn new(geometry: &'a PageGeometry) -> Self {
        Self {
            geometry,
            placed: Vec::new(),
            cuts: Vec::new(),
            cursor: PaginationCursor::default(),
        }
    }

    fn page_is_open(&self) -> bool {
        self.placed.len() > self.cursor.last_cut
    }

    fn cut(&mut self, seed: usize) {
        self.cuts.push(self.placed.len());
        self.cursor = PaginationCursor {
            last_cut: self.placed.len(),
            running_size: seed,
        };
    }

    /// Places one node, returning a split remainder that must be placed next.
    fn place(&mut self, node: ContentNode) -> Option<ContentNode> {
        match node {
            ContentNode::PageBreak => {
                log::trace!("explicit page break at {}", self.placed.len());
                self.cut(0);
                None
            }
            ContentNode::Anchor(anchor) => {
                let seed = reserved_size(anchor.reserved_height, self.geometry);
                log::trace!("anchor '{}' opens a page seeded at {}", anchor.key(), seed);
                self.cut(seed);
                self.placed.push(ContentNode::Anchor(anchor));
                None
            }
            other => self.place_flow(other),
        }
    }

    fn place_flow(&mut self, node: ContentNode) -> Option<ContentNode> {
        let capacity = self.geometry.capacity();
        let cost = node_cost(&node, self.geometry);
        let fit = check_fit(self.cursor.running_size, cost, capacity);
        if !fit.should_break {
            self.cursor.running_size += cost;
            self.placed.push(node);
            return None;
        }

        let ContentNode::Text(text) = node else {
            if self.page_is_open() {
                log::trace!("{} of cost {} moves to a new page", node.kind(), cost);
                self.cut(0);
            }
            self.cursor.running_size += cost;
            self.placed.push(node);
            return None;
        };

        if let Some((head, tail)) = split_at_budget(&text, self.geometry.chars_per_line, fit.remaining)
        {
            log::trace!(
                "split text of {} chars, keeping {}",
                cost,
                head.chars().count()
            );
            self.placed.push(ContentNode::Text(head));
            self.cut(0);
            return Some(ContentNode::Text(tail));
        }

        if self.page_is_open() || self.cursor.running_size > 0 {
            // Re-evaluate on a fresh page.
            self.cut(0);
            return Some(ContentNode::Text(text));
        }

        // A fresh page that cannot hold a single line.
        match split_chars(&text, fit.remaining) {
            Some((head, tail)) => {
                self.placed.push(ContentNode::Text(head));
                self.cut(0);
                Some(ContentNode::Text(tail))
            }
            None => {
                self.cursor.running_size += cost;
                self.placed.push(ContentNode::Text(text));
                None
            }
        }
    }

    fn finish(self) -> PageSequence {
        let total = self.placed.len();
        let mut nodes = self.placed.into_iter();
        let mut start = 0;
        let mut pages = Vec::with_capacity(self.cuts.len() + 1);
        for end in self.cuts.into_iter().chain(std::iter::once(total)) {
            let page: Vec<ContentNode> = nodes.by_ref().take(end - start).collect();
            start = end;
            pages.push(Page::new(page));
        }
        let before = pages.len();
        pages.retain(|p| !p.is_empty() && !p.is_blank());
        log::debug!(
            "paginated {} nodes into {} pages ({} empty dropped)",
            total,
            pages.len(),
            before - pages.len()
        );
        PageSequence::new(pages)
    }
}
