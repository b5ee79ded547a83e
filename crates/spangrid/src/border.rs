//! Border styles and join resolution.
//!
//! A border style names sixteen glyph/width pairs: four corners, four edge
//! bodies, four edge joins, and four interior pieces. A borderless style
//! maps every glyph to the empty string, which removes the corresponding
//! lines and separators from the output entirely while cell spacing stays
//! intact.
//!
//! Join resolution works on "arms": at any intersection, each of the four
//! compass directions either carries a border segment or is swallowed by a
//! span that continues across it. The arm combination selects the glyph
//! (cross, T, body, or blank), which keeps arbitrary overlapping spans
//! topologically consistent.

use serde::{Deserialize, Serialize};

use crate::text::display_width;

/// The default border style used by [`crate::GridOptions::default`].
pub const DEFAULT_BORDER: BorderStyle = BorderStyle::Light;

/// The borderless style: zero border characters in the output.
pub const NO_BORDER: BorderStyle = BorderStyle::None;

/// Border style for grid decoration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// No borders.
    None,
    /// ASCII borders: `+`, `-`, `|`.
    Ascii,
    /// Light Unicode box-drawing characters: `┌`, `─`, `│`, `┼`.
    #[default]
    Light,
    /// Heavy Unicode box-drawing characters: `┏`, `━`, `┃`, `╋`.
    Heavy,
    /// Double-line Unicode box-drawing: `╔`, `═`, `║`, `╬`.
    Double,
    /// Rounded corners with light lines: `╭`, `╮`, `╰`, `╯`.
    Rounded,
}

/// The sixteen glyphs of a border style.
///
/// Glyph widths are measured, never assumed: a glyph may be empty (width 0,
/// borderless) and in principle wider than one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderGlyphs {
    /// Top-left corner: `┌`.
    pub top_left: &'static str,
    /// Top edge body: `─`.
    pub top: &'static str,
    /// Top edge join: `┬`.
    pub top_join: &'static str,
    /// Top-right corner: `┐`.
    pub top_right: &'static str,
    /// Left edge body: `│`.
    pub left: &'static str,
    /// Left edge join: `├`.
    pub left_join: &'static str,
    /// Right edge body: `│`.
    pub right: &'static str,
    /// Right edge join: `┤`.
    pub right_join: &'static str,
    /// Bottom-left corner: `└`.
    pub bottom_left: &'static str,
    /// Bottom edge body: `─`.
    pub bottom: &'static str,
    /// Bottom edge join: `┴`.
    pub bottom_join: &'static str,
    /// Bottom-right corner: `┘`.
    pub bottom_right: &'static str,
    /// Interior horizontal body: `─`.
    pub mid: &'static str,
    /// Interior vertical body: `│`.
    pub middle: &'static str,
    /// Interior 4-way join: `┼`.
    pub cross: &'static str,
    /// Filler for fully swallowed interior intersections.
    pub blank: &'static str,
}

impl BorderStyle {
    /// The glyph set for this style.
    pub fn glyphs(&self) -> BorderGlyphs {
        match self {
            BorderStyle::None => BorderGlyphs {
                top_left: "",
                top: "",
                top_join: "",
                top_right: "",
                left: "",
                left_join: "",
                right: "",
                right_join: "",
                bottom_left: "",
                bottom: "",
                bottom_join: "",
                bottom_right: "",
                mid: "",
                middle: "",
                cross: "",
                blank: "",
            },
            BorderStyle::Ascii => BorderGlyphs {
                top_left: "+",
                top: "-",
                top_join: "+",
                top_right: "+",
                left: "|",
                left_join: "+",
                right: "|",
                right_join: "+",
                bottom_left: "+",
                bottom: "-",
                bottom_join: "+",
                bottom_right: "+",
                mid: "-",
                middle: "|",
                cross: "+",
                blank: " ",
            },
            BorderStyle::Light => BorderGlyphs {
                top_left: "┌",
                top: "─",
                top_join: "┬",
                top_right: "┐",
                left: "│",
                left_join: "├",
                right: "│",
                right_join: "┤",
                bottom_left: "└",
                bottom: "─",
                bottom_join: "┴",
                bottom_right: "┘",
                mid: "─",
                middle: "│",
                cross: "┼",
                blank: " ",
            },
            BorderStyle::Heavy => BorderGlyphs {
                top_left: "┏",
                top: "━",
                top_join: "┳",
                top_right: "┓",
                left: "┃",
                left_join: "┣",
                right: "┃",
                right_join: "┫",
                bottom_left: "┗",
                bottom: "━",
                bottom_join: "┻",
                bottom_right: "┛",
                mid: "━",
                middle: "┃",
                cross: "╋",
                blank: " ",
            },
            BorderStyle::Double => BorderGlyphs {
                top_left: "╔",
                top: "═",
                top_join: "╦",
                top_right: "╗",
                left: "║",
                left_join: "╠",
                right: "║",
                right_join: "╣",
                bottom_left: "╚",
                bottom: "═",
                bottom_join: "╩",
                bottom_right: "╝",
                mid: "═",
                middle: "║",
                cross: "╬",
                blank: " ",
            },
            BorderStyle::Rounded => BorderGlyphs {
                top_left: "╭",
                top: "─",
                top_join: "┬",
                top_right: "╮",
                left: "│",
                left_join: "├",
                right: "│",
                right_join: "┤",
                bottom_left: "╰",
                bottom: "─",
                bottom_join: "┴",
                bottom_right: "╯",
                mid: "─",
                middle: "│",
                cross: "┼",
                blank: " ",
            },
        }
    }
}

impl BorderGlyphs {
    /// Whether the top border line has anything to draw.
    pub(crate) fn draws_top(&self) -> bool {
        !self.top.is_empty() || !self.top_left.is_empty() || !self.top_join.is_empty()
    }

    /// Whether interior horizontal lines have anything to draw.
    pub(crate) fn draws_interior(&self) -> bool {
        !self.mid.is_empty() || !self.cross.is_empty()
    }

    /// Whether the bottom border line has anything to draw.
    pub(crate) fn draws_bottom(&self) -> bool {
        !self.bottom.is_empty() || !self.bottom_left.is_empty() || !self.bottom_join.is_empty()
    }

    /// Display width of the interior vertical separator.
    pub(crate) fn vertical_width(&self) -> usize {
        display_width(self.middle)
    }

    /// Display width of the left and right edge glyphs.
    pub(crate) fn edge_widths(&self) -> (usize, usize) {
        (display_width(self.left), display_width(self.right))
    }
}

/// Which of the four compass directions around an intersection carry a
/// drawn border segment (as opposed to being swallowed by a span).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Arms {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Select the glyph for an interior intersection from its arms.
///
/// This is the canonical box-drawing join table: all four arms make a
/// cross, three make the matching T, two opposite arms make a body glyph,
/// anything less degenerates to the blank filler (two adjacent arms can
/// only arise from degenerate layouts and keep the cross for continuity).
pub(crate) fn interior_glyph(glyphs: &BorderGlyphs, arms: Arms) -> &'static str {
    match (arms.up, arms.down, arms.left, arms.right) {
        (true, true, true, true) => glyphs.cross,
        (false, true, true, true) => glyphs.top_join,
        (true, false, true, true) => glyphs.bottom_join,
        (true, true, false, true) => glyphs.left_join,
        (true, true, true, false) => glyphs.right_join,
        (false, false, true, true) => glyphs.mid,
        (true, true, false, false) => glyphs.middle,
        (true, false, false, false) | (false, true, false, false) => glyphs.middle,
        (false, false, true, false) | (false, false, false, true) => glyphs.mid,
        (false, false, false, false) => glyphs.blank,
        _ => glyphs.cross,
    }
}
