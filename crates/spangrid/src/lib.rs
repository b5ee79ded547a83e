//! Terminal grid rendering with cell spans, auto-flow, and box-drawing
//! borders.
//!
//! `spangrid` lays out heterogeneous cells on a sparse matrix (cells may
//! span columns and rows), sizes columns and rows from their content under
//! a width budget, shapes text Unicode- and ANSI-aware (wrap, truncate,
//! align), and composes the result line by line with resolved border
//! junctions and optional colors.
//!
//! # Example
//!
//! ```rust
//! use spangrid::{Grid, GridOptions};
//!
//! let out = Grid::new(GridOptions::default())
//!     .header_row(["file", "size"])
//!     .row(["a.txt", "120"])
//!     .row(["b.txt", "64"])
//!     .render()
//!     .unwrap();
//!
//! assert_eq!(out.lines().count(), 7);
//! assert!(out.contains("┌"));
//! ```
//!
//! Cells accept plain strings, numbers, booleans, `serde_json::Value`s, or
//! a [`CellSpec`] with per-cell overrides:
//!
//! ```rust
//! use spangrid::{CellSpec, Grid, GridOptions, HAlign};
//!
//! let out = Grid::new(GridOptions::default())
//!     .row([CellSpec::text("total").col_span(2).h_align(HAlign::Right)])
//!     .row(["a", "b"])
//!     .render()
//!     .unwrap();
//! assert!(out.contains("total"));
//! ```

mod border;
mod cell;
mod compose;
mod error;
mod format;
mod options;
mod placement;
mod sizing;
mod text;

pub use border::{BorderGlyphs, BorderStyle, DEFAULT_BORDER, NO_BORDER};
pub use cell::{CellInput, CellSpec, Content, HAlign, TruncateAt, TruncateSpec, VAlign};
pub use compose::{render, Grid};
pub use error::GridError;
pub use options::{AutoFlow, GridOptions, Padding, SizeSpec};
pub use text::{
    display_width, pad_center, pad_left, pad_right, truncate_end, truncate_middle, truncate_start,
    wrap,
};
