//! Line composition: turning a sized layout into terminal output.
//!
//! The compositor emits the grid top to bottom: an optional top border, the
//! visual lines of each matrix row with interior border lines between rows,
//! and an optional bottom border. An interior border line is skipped when
//! every column's occupant continues across the boundary; a row-spanning
//! cell swallows the border lines inside its footprint and shows its own
//! content there instead.
//!
//! Vertical separators follow the same rule per column: a separator is
//! drawn between two slots unless one cell occupies both. Junctions on
//! border lines are resolved through the four-arm table in [`crate::border`].

use crate::border::{interior_glyph, Arms, BorderGlyphs};
use crate::cell::{CellInput, VAlign};
use crate::error::GridError;
use crate::format::FormatCache;
use crate::options::GridOptions;
use crate::placement::{place_cells, CellId, Layout, SpanBounds};
use crate::sizing::{box_width, column_widths, drawn_boundaries, row_heights, separator_width};

/// A grid builder: options plus header and body rows.
///
/// ```rust
/// use spangrid::{Grid, GridOptions};
///
/// let out = Grid::new(GridOptions::default())
///     .header_row(["name", "size"])
///     .row(["a.txt", "120"])
///     .row(["b.txt", "64"])
///     .render()
///     .unwrap();
/// assert!(out.starts_with('┌'));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Grid {
    options: GridOptions,
    header: Vec<Vec<CellInput>>,
    body: Vec<Vec<CellInput>>,
}

impl Grid {
    /// A grid with the given options and no rows.
    pub fn new(options: GridOptions) -> Self {
        Grid {
            options,
            header: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Append a header row. Header rows render before the body and are
    /// dropped entirely when `show_header` is off.
    pub fn header_row<I, T>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CellInput>,
    {
        self.header.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Append a body row.
    pub fn row<I, T>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CellInput>,
    {
        self.body.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Render the grid to a string without a trailing newline.
    pub fn render(&self) -> Result<String, GridError> {
        render(self.header.clone(), self.body.clone(), &self.options)
    }
}

/// Render header and body rows with the given options.
///
/// This is the full pipeline: normalize, place, size, compose. The only
/// fatal outcome is a cell input that cannot be normalized; layout
/// anomalies degrade with a warning instead.
pub fn render(
    header: Vec<Vec<CellInput>>,
    body: Vec<Vec<CellInput>>,
    options: &GridOptions,
) -> Result<String, GridError> {
    let mut rows = Vec::new();
    if options.show_header {
        rows.extend(header);
    }
    rows.extend(body);

    let cells = rows
        .into_iter()
        .map(|row| row.into_iter().map(crate::cell::normalize).collect())
        .collect::<Result<Vec<Vec<_>>, GridError>>()?;

    let layout = place_cells(cells, options);
    if layout.is_empty() {
        return Ok(String::new());
    }
    Ok(Composer::new(&layout, options).compose())
}

struct Composer<'a> {
    layout: &'a Layout,
    opts: &'a GridOptions,
    glyphs: BorderGlyphs,
    sep_w: usize,
    widths: Vec<usize>,
    heights: Vec<usize>,
    /// Per interior row boundary: is a border line emitted there.
    drawn: Vec<bool>,
    cache: FormatCache,
}

impl<'a> Composer<'a> {
    fn new(layout: &'a Layout, opts: &'a GridOptions) -> Self {
        let glyphs = opts.effective_border().glyphs();
        let sep_w = separator_width(&glyphs, opts.gap);
        let widths = column_widths(layout, opts, &glyphs);
        let mut cache = FormatCache::default();
        let heights = row_heights(layout, opts, &widths, &glyphs, &mut cache);

        // Height allocation used the same boundary map, so a span's box is
        // exactly as tall as the lines it renders.
        let drawn = drawn_boundaries(layout, &glyphs);

        Composer {
            layout,
            opts,
            glyphs,
            sep_w,
            widths,
            heights,
            drawn,
            cache,
        }
    }

    fn compose(&mut self) -> String {
        let rows = self.layout.matrix.rows();
        let mut out = Vec::new();
        if self.glyphs.draws_top() {
            out.push(self.top_line());
        }
        for r in 0..rows {
            for l in 0..self.heights[r] {
                out.push(self.data_line(r, l));
            }
            if r + 1 < rows && self.drawn[r] {
                out.push(self.border_line(r));
            }
        }
        if self.glyphs.draws_bottom() {
            out.push(self.bottom_line());
        }
        out.join("\n")
    }

    /// One visual line of matrix row `r`.
    fn data_line(&mut self, r: usize, l: usize) -> String {
        let columns = self.layout.matrix.columns();
        let mut line = String::new();
        line.push_str(&self.border_paint(self.glyphs.left));
        let mut c = 0;
        while c < columns {
            if c > 0 {
                let sep = format!("{}{}", self.glyphs.middle, " ".repeat(self.opts.gap));
                line.push_str(&self.border_paint(&sep));
            }
            match self.layout.matrix.get(r, c) {
                Some(id) => {
                    let Some(&b) = self.layout.bounds.get(&id) else {
                        c += 1;
                        continue;
                    };
                    let index = self.lines_above(&b, r) + l;
                    line.push_str(&self.cell_segment(id, b, index));
                    c = b.right + 1;
                }
                None => {
                    let blank = " ".repeat(self.widths[c]);
                    line.push_str(&paint(&blank, None, self.opts.bg.as_ref()));
                    c += 1;
                }
            }
        }
        line.push_str(&self.border_paint(self.glyphs.right));
        line
    }

    /// The interior border line under matrix row `b`.
    fn border_line(&mut self, b: usize) -> String {
        let columns = self.layout.matrix.columns();
        let mut line = String::new();

        let left = if self.layout.matrix.continues(b, 0) {
            self.glyphs.left
        } else {
            self.glyphs.left_join
        };
        line.push_str(&self.border_paint(left));

        let mut c = 0;
        while c < columns {
            if c > 0 {
                let arms = Arms {
                    up: self.separated(b, c),
                    down: self.separated(b + 1, c),
                    left: !self.layout.matrix.continues(b, c - 1),
                    right: !self.layout.matrix.continues(b, c),
                };
                let junction = interior_glyph(&self.glyphs, arms);
                let fill = if arms.right {
                    self.glyphs.mid.repeat(self.opts.gap)
                } else {
                    " ".repeat(self.opts.gap)
                };
                line.push_str(&self.border_paint(&format!("{}{}", junction, fill)));
            }
            if self.layout.matrix.continues(b, c) {
                if let Some(id) = self.layout.matrix.get(b, c) {
                    let Some(&bounds) = self.layout.bounds.get(&id) else {
                        c += 1;
                        continue;
                    };
                    let index = self.lines_above(&bounds, b) + self.heights[b];
                    line.push_str(&self.cell_segment(id, bounds, index));
                    c = bounds.right + 1;
                    continue;
                }
                c += 1;
            } else {
                line.push_str(&self.border_paint(&self.glyphs.mid.repeat(self.widths[c])));
                c += 1;
            }
        }

        let right = if self.layout.matrix.continues(b, columns - 1) {
            self.glyphs.right
        } else {
            self.glyphs.right_join
        };
        line.push_str(&self.border_paint(right));
        line
    }

    fn top_line(&self) -> String {
        self.edge_line(
            self.glyphs.top_left,
            self.glyphs.top,
            self.glyphs.top_join,
            self.glyphs.top_right,
            0,
        )
    }

    fn bottom_line(&self) -> String {
        self.edge_line(
            self.glyphs.bottom_left,
            self.glyphs.bottom,
            self.glyphs.bottom_join,
            self.glyphs.bottom_right,
            self.layout.matrix.rows() - 1,
        )
    }

    fn edge_line(
        &self,
        corner_l: &str,
        body: &str,
        join: &str,
        corner_r: &str,
        row: usize,
    ) -> String {
        let columns = self.layout.matrix.columns();
        let mut line = String::new();
        line.push_str(corner_l);
        for c in 0..columns {
            if c > 0 {
                let junction = if self.separated(row, c) { join } else { body };
                line.push_str(junction);
                line.push_str(&body.repeat(self.opts.gap));
            }
            line.push_str(&body.repeat(self.widths[c]));
        }
        line.push_str(corner_r);
        self.border_paint(&line)
    }

    /// Is a vertical separator drawn between columns `c - 1` and `c` on the
    /// data lines of `row`.
    fn separated(&self, row: usize, c: usize) -> bool {
        match (
            self.layout.matrix.get(row, c - 1),
            self.layout.matrix.get(row, c),
        ) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        }
    }

    /// Visual lines of this cell's box consumed above matrix row `r`:
    /// sibling row heights plus swallowed border lines.
    fn lines_above(&self, b: &SpanBounds, r: usize) -> usize {
        let heights: usize = self.heights[b.top..r].iter().sum();
        let borders = self.drawn[b.top..r].iter().filter(|&&d| d).count();
        heights + borders
    }

    fn box_height(&self, b: &SpanBounds) -> usize {
        let heights: usize = self.heights[b.top..=b.bottom].iter().sum();
        let borders = self.drawn[b.top..b.bottom].iter().filter(|&&d| d).count();
        heights + borders
    }

    /// The cell's content at one visual index of its box, vertically
    /// aligned and painted.
    fn cell_segment(&mut self, id: CellId, b: SpanBounds, index: usize) -> String {
        let cell = self.layout.arena.get(id);
        let box_w = box_width(&self.widths, self.sep_w, b.left, b.right);
        let box_h = self.box_height(&b);
        let lines = self.cache.lines(id, cell, box_w, self.opts);

        let offset = match cell.v_align {
            VAlign::Top => 0,
            VAlign::Middle => (box_h.saturating_sub(lines.len()) + 1) / 2,
            VAlign::Bottom => box_h.saturating_sub(lines.len()),
        };
        let content = index
            .checked_sub(offset)
            .and_then(|i| lines.get(i))
            .cloned()
            .unwrap_or_else(|| " ".repeat(box_w));

        let fg = cell.fg.as_ref().or(self.opts.fg.as_ref());
        let bg = cell.bg.as_ref().or(self.opts.bg.as_ref());
        paint(&content, fg, bg)
    }

    fn border_paint(&self, s: &str) -> String {
        if s.is_empty() {
            return String::new();
        }
        let fg = self.opts.border_color.as_ref().or(self.opts.fg.as_ref());
        paint(s, fg, self.opts.bg.as_ref())
    }
}


fn paint(s: &str, fg: Option<&console::Style>, bg: Option<&console::Style>) -> String {
    let mut out = s.to_string();
    if let Some(style) = fg {
        out = style.apply_to(out).to_string();
    }
    if let Some(style) = bg {
        out = style.apply_to(out).to_string();
    }
    out
}
