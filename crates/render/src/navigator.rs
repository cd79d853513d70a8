//! Page navigation state for one entry.

/// Fraction of the viewport width a horizontal drag must cover to turn the page.
pub const SWIPE_THRESHOLD: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Next,
    Previous,
}

/// Tracks the active page of an entry with `page_count` pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    current: usize,
    page_count: usize,
}

impl Navigator {
    pub fn new(page_count: usize) -> Self {
        Self {
            current: 0,
            page_count,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    /// Advances one page. Returns false, leaving the state alone, on the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Goes back one page. Returns false on the first page.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jumps to `index`, clamped to the last page.
    pub fn go_to(&mut self, index: usize) {
        self.current = index.min(self.page_count.saturating_sub(1));
    }

    /// Interprets a horizontal drag from `start_x` to `end_x` across a viewport
    /// of `width`. Dragging left turns forward.
    pub fn swipe(&mut self, start_x: f32, end_x: f32, width: f32) -> Option<SwipeDirection> {
        if width.is_nan() || width <= 0.0 {
            return None;
        }
        let dist = (start_x - end_x) / width;
        if dist.abs() <= SWIPE_THRESHOLD {
            return None;
        }
        if dist > 0.0 {
            self.next().then_some(SwipeDirection::Next)
        } else {
            self.previous().then_some(SwipeDirection::Previous)
        }
    }
}
