//! Unicode- and ANSI-aware text primitives.
//!
//! Everything in this module measures text in terminal display columns:
//! CJK characters count as 2, combining marks as 0, and ANSI escape
//! sequences as 0. Truncation and wrapping never split an escape sequence
//! and carry skipped sequences through, so styled input stays balanced.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One lexical piece of a styled string: either a whole ANSI escape
/// sequence (width 0) or a single visible character with its width.
#[derive(Clone, Copy, Debug)]
enum Piece<'a> {
    Ansi(&'a str),
    Glyph(char, usize),
}

/// Split a string into ANSI escape sequences and visible characters.
fn pieces(s: &str) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut iter = s.char_indices().peekable();
    while let Some((i, ch)) = iter.next() {
        if ch != '\u{1b}' {
            out.push(Piece::Glyph(ch, ch.width().unwrap_or(0)));
            continue;
        }
        let start = i;
        let mut end = i + ch.len_utf8();
        if let Some(&(_, '[')) = iter.peek() {
            // CSI sequence: ESC [ ... final byte in 0x40..=0x7e
            iter.next();
            end += 1;
            while let Some(&(j, c)) = iter.peek() {
                iter.next();
                end = j + c.len_utf8();
                if ('\u{40}'..='\u{7e}').contains(&c) {
                    break;
                }
            }
        } else if let Some(&(j, c)) = iter.peek() {
            // Two-byte escape (ESC c, ESC ( B, ...); treat as opaque.
            iter.next();
            end = j + c.len_utf8();
        }
        out.push(Piece::Ansi(&s[start..end]));
    }
    out
}

/// Display width of a string in terminal columns, ignoring ANSI codes.
///
/// # Example
///
/// ```rust
/// use spangrid::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("日本"), 4);
/// assert_eq!(display_width("\u{1b}[31mred\u{1b}[0m"), 3);
/// ```
pub fn display_width(s: &str) -> usize {
    console::strip_ansi_codes(s).width()
}

/// Left-align: pad on the right to `width` display columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Right-align: pad on the left to `width` display columns.
pub fn pad_left(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - w), s)
    }
}

/// Center: pad both sides to `width` display columns.
///
/// When the leftover space is odd the extra column goes on the right.
pub fn pad_center(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        return s.to_string();
    }
    let left = (width - w) / 2;
    let right = width - w - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

/// Truncate at the end, keeping the start visible: `"Hello W…"`.
///
/// Returns the input unchanged when it already fits. ANSI sequences after
/// the cut point are preserved so styling stays balanced.
pub fn truncate_end(s: &str, max_width: usize, ellipsis: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(display_width(ellipsis));
    let mut out = String::new();
    let mut used = 0;
    let mut cut = false;
    for piece in pieces(s) {
        match piece {
            Piece::Ansi(code) => out.push_str(code),
            Piece::Glyph(ch, w) => {
                if cut || used + w > budget {
                    cut = true;
                    continue;
                }
                used += w;
                out.push(ch);
            }
        }
    }
    out.push_str(ellipsis);
    out
}

/// Truncate at the start, keeping the end visible: `"…o World"`.
pub fn truncate_start(s: &str, max_width: usize, ellipsis: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(display_width(ellipsis));
    let all = pieces(s);

    // Walk backwards to find the widest suffix that fits the budget.
    let mut kept = 0;
    let mut cut_index = all.len();
    for (i, piece) in all.iter().enumerate().rev() {
        if let Piece::Glyph(_, w) = piece {
            if kept + w > budget {
                break;
            }
            kept += w;
        }
        cut_index = i;
    }

    let mut out = String::new();
    for piece in &all[..cut_index] {
        if let Piece::Ansi(code) = piece {
            out.push_str(code);
        }
    }
    out.push_str(ellipsis);
    for piece in &all[cut_index..] {
        match piece {
            Piece::Ansi(code) => out.push_str(code),
            Piece::Glyph(ch, _) => out.push(*ch),
        }
    }
    out
}

/// Truncate in the middle, keeping both ends visible: `"Hel…orld"`.
pub fn truncate_middle(s: &str, max_width: usize, ellipsis: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(display_width(ellipsis));
    let head_budget = budget / 2;
    let tail_budget = budget - head_budget;
    let all = pieces(s);

    // Head: glyphs from the front up to head_budget.
    let mut head = String::new();
    let mut used = 0;
    let mut head_end = all.len();
    for (i, piece) in all.iter().enumerate() {
        match piece {
            Piece::Ansi(code) => head.push_str(code),
            Piece::Glyph(ch, w) => {
                if used + w > head_budget {
                    head_end = i;
                    break;
                }
                used += w;
                head.push(*ch);
            }
        }
    }

    // Tail: widest suffix (after the head) that fits tail_budget.
    let mut kept = 0;
    let mut cut_index = all.len();
    for (i, piece) in all.iter().enumerate().skip(head_end).rev() {
        if let Piece::Glyph(_, w) = piece {
            if kept + w > tail_budget {
                break;
            }
            kept += w;
        }
        cut_index = i;
    }

    let cut_index = cut_index.max(head_end);
    let mut out = head;
    out.push_str(ellipsis);
    // Codes from the skipped middle still apply to the tail.
    for piece in &all[head_end..cut_index] {
        if let Piece::Ansi(code) = piece {
            out.push_str(code);
        }
    }
    for piece in &all[cut_index..] {
        match piece {
            Piece::Ansi(code) => out.push_str(code),
            Piece::Glyph(ch, _) => out.push(*ch),
        }
    }
    out
}

/// Drop a trailing partial word left behind by [`truncate_end`].
///
/// `kept` is the truncated text including the ellipsis; when a space exists
/// before the cut the text is shortened to end at that word boundary.
pub(crate) fn back_off_end_to_word(kept: &str, ellipsis: &str) -> String {
    let body = kept.strip_suffix(ellipsis).unwrap_or(kept);
    match body.rfind(' ') {
        Some(pos) if pos > 0 => format!("{}{}", body[..pos].trim_end(), ellipsis),
        _ => kept.to_string(),
    }
}

/// Drop a leading partial word left behind by [`truncate_start`].
pub(crate) fn back_off_start_to_word(kept: &str, ellipsis: &str) -> String {
    let body = kept.strip_prefix(ellipsis).unwrap_or(kept);
    match body.find(' ') {
        Some(pos) if pos + 1 < body.len() => {
            format!("{}{}", ellipsis, body[pos + 1..].trim_start())
        }
        _ => kept.to_string(),
    }
}

/// Word-wrap text to `width` display columns.
///
/// Wrapping is greedy on whitespace; a word wider than the line is broken
/// mid-word so no output line ever exceeds `width`. Empty input yields a
/// single empty line.
///
/// # Example
///
/// ```rust
/// use spangrid::wrap;
///
/// assert_eq!(wrap("hello world foo bar", 11), vec!["hello world", "foo bar"]);
/// ```
pub fn wrap(s: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in s.split_whitespace() {
        let word_width = display_width(word);
        let sep = usize::from(line_width > 0);

        if line_width + sep + word_width <= width {
            if sep == 1 {
                line.push(' ');
            }
            line.push_str(word);
            line_width += sep + word_width;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }

        if word_width <= width {
            line.push_str(word);
            line_width = word_width;
        } else {
            // Hard-break an overlong word, escape sequences kept intact.
            for piece in pieces(word) {
                match piece {
                    Piece::Ansi(code) => line.push_str(code),
                    Piece::Glyph(ch, w) => {
                        if line_width + w > width && line_width > 0 {
                            lines.push(std::mem::take(&mut line));
                            line_width = 0;
                        }
                        line.push(ch);
                        line_width += w;
                    }
                }
            }
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
