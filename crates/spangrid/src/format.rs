//! Content formatting: shaping cell text into fixed-width visual lines.
//!
//! A formatted cell is a list of strings, each exactly the cell's box width
//! in display columns: left padding, shaped content, alignment fill, right
//! padding. Shaping picks one strategy per cell: word-wrap when enabled for
//! the cell or the table, truncation otherwise, degrading to a hard clip
//! when the ellipsis itself does not fit.
//!
//! Formatting is pure and memoized per render in [`FormatCache`], keyed by
//! cell identity and box width: sizing probes candidate widths and the
//! compositor replays the final one, so the same cell is commonly formatted
//! at the same width more than once.

use std::collections::HashMap;

use crate::cell::{Cell, HAlign, TruncateAt, TruncateSpec};
use crate::options::GridOptions;
use crate::placement::CellId;
use crate::text::{
    back_off_end_to_word, back_off_start_to_word, display_width, pad_center, pad_left, pad_right,
    truncate_end, truncate_middle, truncate_start, wrap,
};

/// Shape one cell's content into visual lines of exactly `box_width`
/// display columns.
pub(crate) fn format_cell(cell: &Cell, box_width: usize, opts: &GridOptions) -> Vec<String> {
    let pad = opts.padding;
    if box_width <= pad.total() {
        // Degenerate box: nothing left for content.
        return vec![" ".repeat(box_width)];
    }
    let inner = box_width - pad.total();
    let wrap_enabled = cell.word_wrap.unwrap_or(opts.word_wrap);
    let truncate = cell.truncate.as_ref().unwrap_or(&opts.truncate);

    let mut shaped: Vec<String> = Vec::new();
    for line in cell.content.lines() {
        if wrap_enabled {
            shaped.extend(wrap(line, inner));
        } else if display_width(line) > inner {
            shaped.push(truncate_line(line, inner, truncate));
        } else {
            shaped.push(line.to_string());
        }
    }

    shaped
        .iter()
        .map(|line| {
            let aligned = match cell.h_align {
                HAlign::Left => pad_right(line, inner),
                HAlign::Center => pad_center(line, inner),
                HAlign::Right => pad_left(line, inner),
            };
            format!(
                "{}{}{}",
                " ".repeat(pad.left),
                aligned,
                " ".repeat(pad.right)
            )
        })
        .collect()
}

fn truncate_line(line: &str, width: usize, spec: &TruncateSpec) -> String {
    if display_width(&spec.ellipsis) >= width {
        // No room for the marker: hard clip.
        return truncate_end(line, width, "");
    }
    let kept = match spec.at {
        TruncateAt::End => truncate_end(line, width, &spec.ellipsis),
        TruncateAt::Start => truncate_start(line, width, &spec.ellipsis),
        TruncateAt::Middle => truncate_middle(line, width, &spec.ellipsis),
    };
    if !spec.space {
        return kept;
    }
    match spec.at {
        TruncateAt::End => back_off_end_to_word(&kept, &spec.ellipsis),
        TruncateAt::Start => back_off_start_to_word(&kept, &spec.ellipsis),
        TruncateAt::Middle => kept,
    }
}

/// Per-render memo of formatted cell lines, keyed by `(cell, box width)`.
#[derive(Debug, Default)]
pub(crate) struct FormatCache {
    lines: HashMap<(CellId, usize), Vec<String>>,
}

impl FormatCache {
    pub fn lines(
        &mut self,
        id: CellId,
        cell: &Cell,
        box_width: usize,
        opts: &GridOptions,
    ) -> &[String] {
        self.lines
            .entry((id, box_width))
            .or_insert_with(|| format_cell(cell, box_width, opts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{normalize, CellSpec, VAlign};

    fn cell(input: impl Into<crate::cell::CellInput>) -> Cell {
        normalize(input.into()).unwrap()
    }

    #[test]
    fn fitting_content_is_padded_and_left_aligned() {
        let lines = format_cell(&cell("hi"), 4, &GridOptions::default());
        assert_eq!(lines, vec![" hi "]);
    }

    #[test]
    fn alignment_fills_the_inner_width() {
        let opts = GridOptions::default();
        let left = cell(CellSpec::text("ab").h_align(HAlign::Left));
        let center = cell(CellSpec::text("ab").h_align(HAlign::Center));
        let right = cell(CellSpec::text("ab").h_align(HAlign::Right));
        assert_eq!(format_cell(&left, 7, &opts), vec![" ab    "]);
        assert_eq!(format_cell(&center, 7, &opts), vec!["  ab   "]);
        assert_eq!(format_cell(&right, 7, &opts), vec!["    ab "]);
    }

    #[test]
    fn over_wide_content_truncates_with_default_ellipsis() {
        let lines = format_cell(&cell("Hello"), 5, &GridOptions::default());
        assert_eq!(lines, vec![" He… "]);
    }

    #[test]
    fn truncation_position_is_per_cell_configurable() {
        let opts = GridOptions::default();
        let start = cell(CellSpec::text("Hello World").truncate(TruncateSpec::at(TruncateAt::Start)));
        let middle =
            cell(CellSpec::text("Hello World").truncate(TruncateSpec::at(TruncateAt::Middle)));
        assert_eq!(format_cell(&start, 10, &opts), vec![" …o World "]);
        assert_eq!(format_cell(&middle, 10, &opts), vec![" Hel…orld "]);
    }

    #[test]
    fn word_boundary_truncation_backs_off() {
        let opts = GridOptions::default();
        let c = cell(
            CellSpec::text("lorem ipsum dolor")
                .truncate(TruncateSpec::at(TruncateAt::End).at_word()),
        );
        // Inner width 13 cuts mid-gap; backing off lands on "ipsum".
        assert_eq!(format_cell(&c, 15, &opts), vec![" lorem ipsum…  "]);
    }

    #[test]
    fn wrap_overrides_truncation() {
        let opts = GridOptions::default();
        let c = cell(CellSpec::text("hello world").word_wrap(true));
        assert_eq!(format_cell(&c, 7, &opts), vec![" hello ", " world "]);
    }

    #[test]
    fn table_level_wrap_applies_without_cell_override() {
        let opts = GridOptions::default().word_wrap(true);
        assert_eq!(
            format_cell(&cell("hello world"), 7, &opts),
            vec![" hello ", " world "]
        );
    }

    #[test]
    fn multiline_content_keeps_its_breaks() {
        let lines = format_cell(&cell("a\nbb"), 6, &GridOptions::default());
        assert_eq!(lines, vec![" a    ", " bb   "]);
    }

    #[test]
    fn degenerate_box_is_one_blank_line() {
        assert_eq!(format_cell(&cell("hi"), 2, &GridOptions::default()), vec!["  "]);
        assert_eq!(format_cell(&cell("hi"), 0, &GridOptions::default()), vec![""]);
    }

    #[test]
    fn tiny_box_hard_clips_without_ellipsis() {
        // Inner width 1 equals the ellipsis width, so the marker is dropped.
        let lines = format_cell(&cell("xyz"), 3, &GridOptions::default());
        assert_eq!(lines, vec![" x "]);
    }

    #[test]
    fn empty_content_formats_as_blank() {
        let c = cell(CellSpec::empty().v_align(VAlign::Middle));
        assert_eq!(format_cell(&c, 4, &GridOptions::default()), vec!["    "]);
    }

    #[test]
    fn every_line_matches_the_box_width() {
        let opts = GridOptions::default().word_wrap(true);
        let c = cell("the quick brown fox jumps over the lazy dog");
        for width in 3..12 {
            for line in format_cell(&c, width, &opts) {
                assert_eq!(display_width(&line), width, "box width {}", width);
            }
        }
    }
}
