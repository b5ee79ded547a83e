//! Grid-level configuration.

use console::Style;
use serde::{Deserialize, Serialize};

use crate::border::{BorderStyle, DEFAULT_BORDER};
use crate::cell::TruncateSpec;

/// Terminal width assumed when detection fails and no override is given.
pub(crate) const FALLBACK_TERMINAL_WIDTH: usize = 80;

/// Direction in which cells flow into the layout matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoFlow {
    /// Row-major: each input row fills left to right, top to bottom.
    #[default]
    Row,
    /// Column-major: each input list fills top to bottom, left to right.
    Column,
}

/// A fixed-size specification for column widths or row heights.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeSpec {
    /// Sizes are computed from content.
    #[default]
    Auto,
    /// One size broadcast to every column/row.
    Uniform(usize),
    /// Per-index sizes; `None` entries (and indices past the end) keep
    /// their computed size.
    Each(Vec<Option<usize>>),
}

impl SizeSpec {
    /// The fixed size for an index, if one is configured.
    pub fn get(&self, index: usize) -> Option<usize> {
        match self {
            SizeSpec::Auto => None,
            SizeSpec::Uniform(n) => Some(*n),
            SizeSpec::Each(sizes) => sizes.get(index).copied().flatten(),
        }
    }

    /// True when every one of `count` indices has a fixed size.
    pub fn fully_specifies(&self, count: usize) -> bool {
        match self {
            SizeSpec::Auto => false,
            SizeSpec::Uniform(_) => true,
            SizeSpec::Each(sizes) => {
                sizes.len() >= count && sizes.iter().take(count).all(Option::is_some)
            }
        }
    }
}

impl From<usize> for SizeSpec {
    fn from(n: usize) -> Self {
        SizeSpec::Uniform(n)
    }
}

impl From<Vec<usize>> for SizeSpec {
    fn from(sizes: Vec<usize>) -> Self {
        SizeSpec::Each(sizes.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<usize>>> for SizeSpec {
    fn from(sizes: Vec<Option<usize>>) -> Self {
        SizeSpec::Each(sizes)
    }
}

/// Horizontal padding inside every cell box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    /// Columns of padding on the left of the content.
    pub left: usize,
    /// Columns of padding on the right of the content.
    pub right: usize,
}

impl Default for Padding {
    fn default() -> Self {
        Padding { left: 1, right: 1 }
    }
}

impl Padding {
    /// Uniform padding on both sides.
    pub fn uniform(n: usize) -> Self {
        Padding { left: n, right: n }
    }

    /// Total padding width.
    pub fn total(&self) -> usize {
        self.left + self.right
    }
}

/// Global options for one grid render.
///
/// ```rust
/// use spangrid::{GridOptions, BorderStyle};
///
/// let options = GridOptions::default()
///     .columns(3)
///     .gap(1)
///     .border(BorderStyle::Ascii)
///     .max_width(60);
/// ```
#[derive(Clone, Debug)]
pub struct GridOptions {
    /// Explicit column count; inferred from the widest input row when unset.
    pub columns: Option<usize>,
    /// Fixed row count; also caps how many rows placement may create.
    pub rows: Option<usize>,
    /// Cell flow direction.
    pub auto_flow: AutoFlow,
    /// Fixed column widths (content + padding).
    pub column_widths: SizeSpec,
    /// Fixed row heights in visual lines.
    pub row_heights: SizeSpec,
    /// Extra spacing columns after each interior column boundary.
    pub gap: usize,
    /// Hard cap on the total rendered width.
    pub max_width: Option<usize>,
    /// Terminal width override; detected when unset.
    pub terminal_width: Option<usize>,
    /// Horizontal cell padding.
    pub padding: Padding,
    /// Table-level word-wrap default.
    pub word_wrap: bool,
    /// Table-level truncation default.
    pub truncate: TruncateSpec,
    /// Border style.
    pub border: BorderStyle,
    /// Draw borders at all; `false` renders like [`crate::NO_BORDER`].
    pub show_borders: bool,
    /// Include header rows in the layout.
    pub show_header: bool,
    /// Table-level foreground style.
    pub fg: Option<Style>,
    /// Table-level background style.
    pub bg: Option<Style>,
    /// Border glyph style; falls back to `fg` when unset.
    pub border_color: Option<Style>,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            columns: None,
            rows: None,
            auto_flow: AutoFlow::Row,
            column_widths: SizeSpec::Auto,
            row_heights: SizeSpec::Auto,
            gap: 0,
            max_width: None,
            terminal_width: None,
            padding: Padding::default(),
            word_wrap: false,
            truncate: TruncateSpec::default(),
            border: DEFAULT_BORDER,
            show_borders: true,
            show_header: true,
            fg: None,
            bg: None,
            border_color: None,
        }
    }
}

impl GridOptions {
    /// Set an explicit column count.
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Fix the row count (also caps placement search).
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Set the auto-flow direction.
    pub fn auto_flow(mut self, flow: AutoFlow) -> Self {
        self.auto_flow = flow;
        self
    }

    /// Fix column widths.
    pub fn column_widths(mut self, widths: impl Into<SizeSpec>) -> Self {
        self.column_widths = widths.into();
        self
    }

    /// Fix row heights.
    pub fn row_heights(mut self, heights: impl Into<SizeSpec>) -> Self {
        self.row_heights = heights.into();
        self
    }

    /// Set the inter-column gap width.
    pub fn gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    /// Cap the total rendered width.
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Override the detected terminal width.
    pub fn terminal_width(mut self, width: usize) -> Self {
        self.terminal_width = Some(width);
        self
    }

    /// Set horizontal cell padding.
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Enable word-wrap as the table default.
    pub fn word_wrap(mut self, wrap: bool) -> Self {
        self.word_wrap = wrap;
        self
    }

    /// Set the table-level truncation default.
    pub fn truncate(mut self, spec: TruncateSpec) -> Self {
        self.truncate = spec;
        self
    }

    /// Set the border style.
    pub fn border(mut self, style: BorderStyle) -> Self {
        self.border = style;
        self
    }

    /// Show or hide all borders.
    pub fn show_borders(mut self, show: bool) -> Self {
        self.show_borders = show;
        self
    }

    /// Show or hide header rows.
    pub fn show_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    /// Set the table-level foreground style.
    pub fn fg(mut self, style: Style) -> Self {
        self.fg = Some(style);
        self
    }

    /// Set the table-level background style.
    pub fn bg(mut self, style: Style) -> Self {
        self.bg = Some(style);
        self
    }

    /// Set the border glyph style.
    pub fn border_color(mut self, style: Style) -> Self {
        self.border_color = Some(style);
        self
    }

    /// The effective border style after the show/hide flag.
    pub(crate) fn effective_border(&self) -> BorderStyle {
        if self.show_borders {
            self.border
        } else {
            BorderStyle::None
        }
    }

    /// The width budget: min of the explicit cap and the terminal width.
    pub(crate) fn width_budget(&self) -> usize {
        let terminal = self
            .terminal_width
            .unwrap_or_else(detect_terminal_width);
        match self.max_width {
            Some(max) => max.min(terminal),
            None => terminal,
        }
    }
}

/// Detected terminal width, with a fixed fallback for non-TTY contexts.
pub(crate) fn detect_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(FALLBACK_TERMINAL_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_spec_lookup() {
        assert_eq!(SizeSpec::Auto.get(0), None);
        assert_eq!(SizeSpec::Uniform(4).get(7), Some(4));
        let each = SizeSpec::Each(vec![Some(3), None, Some(5)]);
        assert_eq!(each.get(0), Some(3));
        assert_eq!(each.get(1), None);
        assert_eq!(each.get(2), Some(5));
        assert_eq!(each.get(9), None);
    }

    #[test]
    fn size_spec_full_specification() {
        assert!(!SizeSpec::Auto.fully_specifies(1));
        assert!(SizeSpec::Uniform(2).fully_specifies(10));
        assert!(SizeSpec::from(vec![5usize, 6]).fully_specifies(2));
        assert!(!SizeSpec::from(vec![5usize, 6]).fully_specifies(3));
        assert!(!SizeSpec::Each(vec![Some(5), None]).fully_specifies(2));
    }

    #[test]
    fn padding_defaults_to_one_each_side() {
        assert_eq!(Padding::default(), Padding { left: 1, right: 1 });
        assert_eq!(Padding::default().total(), 2);
        assert_eq!(Padding::uniform(0).total(), 0);
    }

    #[test]
    fn width_budget_takes_the_minimum() {
        let opts = GridOptions::default().terminal_width(100).max_width(40);
        assert_eq!(opts.width_budget(), 40);

        let opts = GridOptions::default().terminal_width(30).max_width(40);
        assert_eq!(opts.width_budget(), 30);

        let opts = GridOptions::default().terminal_width(72);
        assert_eq!(opts.width_budget(), 72);
    }

    #[test]
    fn hiding_borders_degrades_to_borderless() {
        let opts = GridOptions::default().show_borders(false);
        assert_eq!(opts.effective_border(), BorderStyle::None);
        let opts = GridOptions::default();
        assert_eq!(opts.effective_border(), BorderStyle::Light);
    }

    #[test]
    fn builder_chains() {
        let opts = GridOptions::default()
            .columns(4)
            .rows(2)
            .auto_flow(AutoFlow::Column)
            .gap(2)
            .padding(Padding::uniform(0));
        assert_eq!(opts.columns, Some(4));
        assert_eq!(opts.rows, Some(2));
        assert_eq!(opts.auto_flow, AutoFlow::Column);
        assert_eq!(opts.gap, 2);
        assert_eq!(opts.padding.total(), 0);
    }
}
