//! Greedy word wrapping by character count.

/// Breaks `text` into lines of at most `width` characters plus one trailing
/// whitespace character.
///
/// Lines break after the last whitespace that fits; a word longer than the
/// line is cut at `width`. The returned slices always concatenate back to
/// `text`.
pub fn wrap_lines(text: &str, width: usize) -> Vec<&str> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(line_end(rest, width));
        lines.push(line);
        rest = tail;
    }
    lines
}

/// Byte offset where the first line of `text` ends.
fn line_end(text: &str, width: usize) -> usize {
    let mut last_break = None;
    let mut hard_break = text.len();
    for (count, (idx, ch)) in text.char_indices().enumerate() {
        if count == width {
            hard_break = idx;
        }
        if count > width {
            break;
        }
        if ch.is_whitespace() {
            last_break = Some(idx + ch.len_utf8());
        }
    }
    if hard_break == text.len() {
        // Everything fits.
        return text.len();
    }
    match last_break {
        Some(end) => end,
        None => hard_break,
    }
}

/// Splits `text` after as many whole lines as fit in `budget` characters.
///
/// Returns `None` when the text is a single line or no line fits.
pub fn split_at_budget(text: &str, width: usize, budget: usize) -> Option<(String, String)> {
    let lines = wrap_lines(text, width);
    if lines.len() < 2 {
        return None;
    }
    let mut used = 0;
    let mut keep_bytes = 0;
    for line in &lines[..lines.len() - 1] {
        let len = line.chars().count();
        if used + len > budget {
            break;
        }
        used += len;
        keep_bytes += line.len();
    }
    if keep_bytes == 0 {
        return None;
    }
    let (head, tail) = text.split_at(keep_bytes);
    Some((head.to_string(), tail.to_string()))
}

/// Splits `text` after exactly `budget` characters, ignoring word boundaries.
pub fn split_chars(text: &str, budget: usize) -> Option<(String, String)> {
    let idx = text.char_indices().nth(budget).map(|(i, _)| i)?;
    if idx == 0 {
        return None;
    }
    let (head, tail) = text.split_at(idx);
    Some((head.to_string(), tail.to_string()))
}
