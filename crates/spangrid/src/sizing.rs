//! Column width and row height resolution.
//!
//! Widths come first: single-column cells establish per-column minimums,
//! fixed widths override them, and spanning cells distribute any remaining
//! shortfall across their columns. The result is then shrunk proportionally
//! when it exceeds the width budget (explicit cap or terminal width).
//!
//! Heights follow the same shape but depend on the resolved widths, since a
//! cell's line count is only known once its box width is: single-row cells
//! establish per-row minimums, fixed heights clamp them, and row-spanning
//! cells stretch the non-fixed rows they cross.

use crate::border::BorderGlyphs;
use crate::cell::Cell;
use crate::format::FormatCache;
use crate::options::GridOptions;
use crate::placement::{CellId, Layout, SpanBounds};
use crate::text::display_width;

/// Structural width of one interior column boundary: separator glyph plus
/// the configured gap.
pub(crate) fn separator_width(glyphs: &BorderGlyphs, gap: usize) -> usize {
    glyphs.vertical_width() + gap
}

/// Total box width of a cell spanning columns `left..=right`: the column
/// widths plus the structural width of the boundaries it swallows.
pub(crate) fn box_width(widths: &[usize], sep_w: usize, left: usize, right: usize) -> usize {
    widths[left..=right].iter().sum::<usize>() + sep_w * (right - left)
}

/// Interior row boundaries that will carry a border line: the style draws
/// horizontal interiors and at least one column's occupant changes across
/// the boundary. Height allocation and line composition both read this,
/// so a row span is credited exactly the border lines that materialize.
pub(crate) fn drawn_boundaries(layout: &Layout, glyphs: &BorderGlyphs) -> Vec<bool> {
    let rows = layout.matrix.rows();
    let columns = layout.matrix.columns();
    (0..rows.saturating_sub(1))
        .map(|b| {
            glyphs.draws_interior() && (0..columns).any(|c| !layout.matrix.continues(b, c))
        })
        .collect()
}

fn desired_width(cell: &Cell, pad: usize) -> usize {
    let natural = cell
        .content
        .lines()
        .iter()
        .map(|line| display_width(line))
        .max()
        .unwrap_or(0);
    let capped = match cell.max_width {
        Some(max) => natural.min(max),
        None => natural,
    };
    (pad + capped).max(1)
}

/// Content-driven width pass: single-column minimums, per-index fixed
/// overrides, then span distribution, narrowest spans first so wide spans
/// see the space already granted.
fn content_widths(layout: &Layout, opts: &GridOptions, sep_w: usize, pad: usize) -> Vec<usize> {
    let columns = layout.matrix.columns();
    let mut widths = vec![1usize; columns];
    for (&id, b) in &layout.bounds {
        if b.width() != 1 {
            continue;
        }
        let desired = desired_width(layout.arena.get(id), pad);
        widths[b.left] = widths[b.left].max(desired);
    }

    let mut fixed = vec![false; columns];
    for (c, width) in widths.iter_mut().enumerate() {
        if let Some(w) = opts.column_widths.get(c) {
            *width = w.max(1);
            fixed[c] = true;
        }
    }

    let mut spans: Vec<(CellId, SpanBounds)> = layout
        .bounds
        .iter()
        .filter(|(_, b)| b.width() > 1)
        .map(|(&id, &b)| (id, b))
        .collect();
    spans.sort_by_key(|&(id, b)| (b.width(), id));

    for (id, b) in spans {
        let desired = desired_width(layout.arena.get(id), pad);
        let current = box_width(&widths, sep_w, b.left, b.right);
        if desired <= current {
            continue;
        }
        let shortfall = desired - current;
        let free: Vec<usize> = (b.left..=b.right).filter(|&c| !fixed[c]).collect();
        if free.is_empty() {
            continue;
        }
        let per = shortfall / free.len();
        let rem = shortfall % free.len();
        for (i, &c) in free.iter().enumerate() {
            widths[c] += per + usize::from(i < rem);
        }
    }
    widths
}

/// Resolve the width of every column.
pub(crate) fn column_widths(
    layout: &Layout,
    opts: &GridOptions,
    glyphs: &BorderGlyphs,
) -> Vec<usize> {
    let columns = layout.matrix.columns();
    let sep_w = separator_width(glyphs, opts.gap);
    let pad = opts.padding.total();

    // A fully fixed spec replaces the content and span passes outright;
    // shrink-to-budget below still applies.
    let mut widths = if opts.column_widths.fully_specifies(columns) {
        (0..columns)
            .map(|c| opts.column_widths.get(c).unwrap_or(1).max(1))
            .collect()
    } else {
        content_widths(layout, opts, sep_w, pad)
    };

    let edges = glyphs.edge_widths();
    let structural = edges.0 + edges.1 + sep_w * columns.saturating_sub(1);
    let budget = opts.width_budget();
    let total: usize = widths.iter().sum::<usize>() + structural;
    if total > budget {
        let available = budget.saturating_sub(structural);
        if available < columns {
            // Not even one column each: collapse to the floor.
            widths.fill(1);
        } else {
            scale_to(&mut widths, available);
        }
    }
    widths
}

/// Shrink widths so they sum to `available`, proportionally with a floor
/// of 1, assigning leftover columns by largest fractional remainder.
fn scale_to(widths: &mut [usize], available: usize) {
    let total: usize = widths.iter().sum();
    if total <= available {
        return;
    }
    let mut scaled: Vec<usize> = widths.iter().map(|w| w * available / total).collect();
    let mut leftover = available - scaled.iter().sum::<usize>();

    let mut remainders: Vec<(usize, usize)> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| (w * available % total, i))
        .collect();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in &remainders {
        if leftover == 0 {
            break;
        }
        scaled[i] += 1;
        leftover -= 1;
    }

    // Raise any zero to the floor, reclaiming the column from the widest.
    for i in 0..scaled.len() {
        if scaled[i] == 0 {
            scaled[i] = 1;
            if let Some(j) = (0..scaled.len())
                .filter(|&j| scaled[j] > 1)
                .max_by_key(|&j| scaled[j])
            {
                scaled[j] -= 1;
            }
        }
    }
    widths.copy_from_slice(&scaled);
}

/// Resolve the height of every row, in visual lines.
pub(crate) fn row_heights(
    layout: &Layout,
    opts: &GridOptions,
    widths: &[usize],
    glyphs: &BorderGlyphs,
    cache: &mut FormatCache,
) -> Vec<usize> {
    let rows = layout.matrix.rows();
    let sep_w = separator_width(glyphs, opts.gap);
    let mut heights = vec![1usize; rows];

    for (&id, b) in &layout.bounds {
        if b.height() != 1 {
            continue;
        }
        let cell = layout.arena.get(id);
        let bw = box_width(widths, sep_w, b.left, b.right);
        let lines = cache.lines(id, cell, bw, opts).len();
        heights[b.top] = heights[b.top].max(lines);
    }

    let mut fixed = vec![false; rows];
    for (r, height) in heights.iter_mut().enumerate() {
        if let Some(h) = opts.row_heights.get(r) {
            *height = h.max(1);
            fixed[r] = true;
        }
    }

    let mut spans: Vec<(CellId, SpanBounds)> = layout
        .bounds
        .iter()
        .filter(|(_, b)| b.height() > 1)
        .map(|(&id, &b)| (id, b))
        .collect();
    spans.sort_by_key(|&(id, b)| (b.height(), id));

    let drawn = drawn_boundaries(layout, glyphs);
    for (id, b) in spans {
        let cell = layout.arena.get(id);
        let bw = box_width(widths, sep_w, b.left, b.right);
        let need = cache.lines(id, cell, bw, opts).len();

        // A spanning cell also owns the interior border lines it swallows,
        // but only the ones the compositor will actually draw.
        let border_units = drawn[b.top..b.bottom].iter().filter(|&&d| d).count();
        let alloc: usize = heights[b.top..=b.bottom].iter().sum::<usize>() + border_units;
        if need <= alloc {
            continue;
        }
        let deficit = need - alloc;
        let free: Vec<usize> = (b.top..=b.bottom).filter(|&r| !fixed[r]).collect();
        if free.is_empty() {
            tracing::warn!(
                rows = b.height(),
                deficit,
                "fixed row heights leave no room for spanning cell, clipping its content"
            );
            continue;
        }
        let share = deficit.div_ceil(free.len());
        let mut remaining = deficit;
        for &r in &free {
            let add = share.min(remaining);
            heights[r] += add;
            remaining -= add;
            if remaining == 0 {
                break;
            }
        }
    }
    heights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::BorderStyle;
    use crate::cell::{normalize, CellSpec};
    use crate::placement::place_cells;

    fn text(s: &str) -> Cell {
        normalize(s.into()).unwrap()
    }

    fn widths_for(rows: Vec<Vec<Cell>>, opts: &GridOptions) -> Vec<usize> {
        let layout = place_cells(rows, opts);
        column_widths(&layout, opts, &opts.effective_border().glyphs())
    }

    fn heights_for(rows: Vec<Vec<Cell>>, opts: &GridOptions) -> Vec<usize> {
        let layout = place_cells(rows, opts);
        let glyphs = opts.effective_border().glyphs();
        let widths = column_widths(&layout, opts, &glyphs);
        row_heights(&layout, opts, &widths, &glyphs, &mut FormatCache::default())
    }

    #[test]
    fn single_cell_width_is_content_plus_padding() {
        let opts = GridOptions::default();
        assert_eq!(widths_for(vec![vec![text("hi")]], &opts), vec![4]);
    }

    #[test]
    fn columns_size_to_their_widest_cell() {
        let opts = GridOptions::default();
        let widths = widths_for(
            vec![vec![text("a"), text("bbb")], vec![text("cc"), text("d")]],
            &opts,
        );
        assert_eq!(widths, vec![4, 5]);
    }

    #[test]
    fn max_width_caps_the_sizing_request() {
        let opts = GridOptions::default();
        let widths = widths_for(
            vec![vec![normalize(CellSpec::text("abcdefgh").max_width(3).into()).unwrap()]],
            &opts,
        );
        assert_eq!(widths, vec![5]);
    }

    #[test]
    fn uniform_fixed_widths_override_content() {
        let opts = GridOptions::default().column_widths(7usize);
        let widths = widths_for(vec![vec![text("a"), text("very long cell")]], &opts);
        assert_eq!(widths, vec![7, 7]);
    }

    #[test]
    fn per_index_fixed_width_pins_one_column() {
        let opts = GridOptions::default().column_widths(vec![Some(2), None]);
        let widths = widths_for(vec![vec![text("wide one"), text("xy")]], &opts);
        assert_eq!(widths, vec![2, 4]);
    }

    #[test]
    fn span_shortfall_spreads_across_columns() {
        let opts = GridOptions::default();
        let widths = widths_for(
            vec![
                vec![normalize(CellSpec::text("abcdefgh").col_span(2).into()).unwrap()],
                vec![text("a"), text("b")],
            ],
            &opts,
        );
        // Span needs 10; the two columns plus one separator give 7, so the
        // extra 3 lands 2 on the first column, 1 on the second.
        assert_eq!(widths, vec![5, 4]);
    }

    #[test]
    fn shrink_scales_to_the_budget() {
        let opts = GridOptions::default().terminal_width(13);
        let widths = widths_for(
            vec![vec![text("aaaaaaaa"), text("bbbbbbbb")]],
            &opts,
        );
        let glyphs = BorderStyle::Light.glyphs();
        let structural = 2 + separator_width(&glyphs, 0);
        assert_eq!(widths.iter().sum::<usize>() + structural, 13);
        assert_eq!(widths, vec![5, 5]);
    }

    #[test]
    fn fixed_widths_still_shrink_to_the_budget() {
        let opts = GridOptions::default()
            .column_widths(vec![30usize, 30])
            .terminal_width(20);
        let widths = widths_for(vec![vec![text("a"), text("b")]], &opts);
        // Fixed widths are requests, not exemptions: 60 columns of content
        // in a 20-column budget scale down like any other sizing.
        let glyphs = BorderStyle::Light.glyphs();
        let structural = 2 + separator_width(&glyphs, 0);
        assert!(widths.iter().sum::<usize>() + structural <= 20);
        assert_eq!(widths, vec![9, 8]);
    }

    #[test]
    fn impossible_budget_collapses_to_the_floor() {
        let opts = GridOptions::default().terminal_width(2);
        let widths = widths_for(vec![vec![text("aaa"), text("bbb")]], &opts);
        assert_eq!(widths, vec![1, 1]);
    }

    #[test]
    fn multiline_content_sets_row_height() {
        let opts = GridOptions::default();
        assert_eq!(heights_for(vec![vec![text("a\nb\nc")]], &opts), vec![3]);
    }

    #[test]
    fn wrapping_drives_row_height() {
        let opts = GridOptions::default().word_wrap(true).column_widths(7usize);
        assert_eq!(
            heights_for(vec![vec![text("hello world again")]], &opts),
            vec![3]
        );
    }

    #[test]
    fn fixed_height_clips_tall_content() {
        let opts = GridOptions::default().row_heights(1usize);
        assert_eq!(heights_for(vec![vec![text("a\nb\nc")]], &opts), vec![1]);
    }

    #[test]
    fn row_span_deficit_stretches_its_rows() {
        let opts = GridOptions::default();
        let tall = normalize(CellSpec::text("1\n2\n3\n4\n5").row_span(2).into()).unwrap();
        let heights = heights_for(
            vec![vec![tall, text("b")], vec![text("c")]],
            &opts,
        );
        // Five lines across two rows and one swallowed border line.
        assert_eq!(heights, vec![2, 2]);
    }

    #[test]
    fn all_fixed_rows_leave_span_clipped() {
        let opts = GridOptions::default().row_heights(1usize);
        let tall = normalize(CellSpec::text("1\n2\n3\n4\n5").row_span(2).into()).unwrap();
        let heights = heights_for(
            vec![vec![tall, text("b")], vec![text("c")]],
            &opts,
        );
        assert_eq!(heights, vec![1, 1]);
    }

    #[test]
    fn full_width_span_counts_only_drawn_boundaries() {
        let opts = GridOptions::default();
        let tall = normalize(CellSpec::text("1\n2\n3").row_span(2).into()).unwrap();
        let heights = heights_for(vec![vec![tall]], &opts);
        // The span fills both rows of its only column, so the boundary
        // between them is never drawn and earns no border unit; all three
        // lines must come from the row heights themselves.
        assert_eq!(heights, vec![2, 1]);
    }

    #[test]
    fn borderless_span_counts_no_border_units() {
        let opts = GridOptions::default().border(BorderStyle::None);
        let tall = normalize(CellSpec::text("1\n2\n3\n4\n5").row_span(2).into()).unwrap();
        let heights = heights_for(
            vec![vec![tall, text("b")], vec![text("c")]],
            &opts,
        );
        // No swallowed border line: all five lines come from row heights.
        assert_eq!(heights, vec![3, 2]);
    }
}
