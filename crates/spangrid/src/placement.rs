//! Cell placement: mapping normalized cells onto the layout matrix.
//!
//! Placement owns three structures. The [`CellArena`] holds every placed
//! cell exactly once and hands out dense [`CellId`]s. The [`Matrix`] is the
//! sparse occupancy grid: row-major slots, each either free or claimed by a
//! cell id; a spanning cell claims every slot of its rectangular footprint
//! under the same id, so span membership is an id comparison. [`SpanBounds`]
//! is the footprint of a cell as recovered from occupancy, which reflects
//! any clipping applied at the matrix boundary rather than the declared
//! spans.
//!
//! The cursor machine scans forward one slot at a time looking for a free
//! rectangle. Each input row re-homes the cursor at the start of the next
//! matrix row, so overflow from a crowded row flows around existing spans
//! instead of shifting later rows. Column flow reuses the same machine on a
//! transposed matrix with the spans swapped.

use std::collections::HashMap;

use crate::cell::Cell;
use crate::options::{AutoFlow, GridOptions};

/// Identity of a placed cell. Two matrix slots belong to the same spanning
/// cell iff their ids are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct CellId(u32);

/// Owner of all placed cells for one render.
#[derive(Debug, Default)]
pub(crate) struct CellArena {
    cells: Vec<Cell>,
}

impl CellArena {
    fn push(&mut self, cell: Cell) -> CellId {
        let id = CellId(self.cells.len() as u32);
        self.cells.push(cell);
        id
    }

    pub fn get(&self, id: CellId) -> &Cell {
        &self.cells[id.0 as usize]
    }
}

/// Row-major occupancy grid with a fixed column count.
#[derive(Debug)]
pub(crate) struct Matrix {
    columns: usize,
    slots: Vec<Vec<Option<CellId>>>,
}

impl Matrix {
    fn new(columns: usize) -> Self {
        Matrix {
            columns: columns.max(1),
            slots: Vec::new(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellId> {
        self.slots.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Does one cell occupy column `col` on both sides of the boundary
    /// between rows `boundary` and `boundary + 1`.
    pub fn continues(&self, boundary: usize, col: usize) -> bool {
        match (self.get(boundary, col), self.get(boundary + 1, col)) {
            (Some(above), Some(below)) => above == below,
            _ => false,
        }
    }

    fn ensure_rows(&mut self, rows: usize) {
        while self.slots.len() < rows {
            self.slots.push(vec![None; self.columns]);
        }
    }

    fn set(&mut self, row: usize, col: usize, id: CellId) {
        self.slots[row][col] = Some(id);
    }

    fn row_is_empty(&self, row: usize) -> bool {
        self.slots[row].iter().all(Option::is_none)
    }

    fn trim_trailing_empty_rows(&mut self) {
        while let Some(last) = self.slots.len().checked_sub(1) {
            if self.row_is_empty(last) {
                self.slots.pop();
            } else {
                break;
            }
        }
    }

    fn transposed(&self) -> Matrix {
        let mut out = Matrix::new(self.rows());
        out.ensure_rows(self.columns);
        for r in 0..self.rows() {
            for c in 0..self.columns {
                if let Some(id) = self.get(r, c) {
                    out.set(c, r, id);
                }
            }
        }
        out
    }
}

/// Inclusive footprint of a cell as it actually landed in the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SpanBounds {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl SpanBounds {
    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }
}

/// The placed layout: cells, occupancy, and recovered footprints.
#[derive(Debug)]
pub(crate) struct Layout {
    pub arena: CellArena,
    pub matrix: Matrix,
    pub bounds: HashMap<CellId, SpanBounds>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.matrix.rows() == 0
    }
}

/// The forward-scanning cursor machine.
struct Placer {
    matrix: Matrix,
    row: usize,
    col: usize,
    line_start_row: usize,
    row_cap: Option<usize>,
}

impl Placer {
    fn new(columns: usize, row_cap: Option<usize>) -> Self {
        Placer {
            matrix: Matrix::new(columns),
            row: 0,
            col: 0,
            line_start_row: 0,
            row_cap,
        }
    }

    /// Re-home the cursor for the next input row.
    fn break_line(&mut self) {
        self.line_start_row += 1;
        self.row = self.line_start_row;
        self.col = 0;
    }

    /// Advance the cursor past the next free slot without claiming it.
    fn skip(&mut self) {
        let columns = self.matrix.columns();
        let budget = (self.matrix.rows() + 6) * columns;
        let (mut r, mut c) = (self.row, self.col);
        for _ in 0..budget {
            if c >= columns {
                r += 1;
                c = 0;
                continue;
            }
            if self.row_cap.is_some_and(|cap| r >= cap) {
                break;
            }
            self.matrix.ensure_rows(r + 1);
            if self.matrix.get(r, c).is_none() {
                c += 1;
                break;
            }
            c += 1;
        }
        self.row = r;
        self.col = c;
    }

    /// Find a free rectangle for the cell and claim it. Returns `false`
    /// when the attempt budget or the fixed row count runs out.
    fn place(&mut self, id: CellId, col_span: usize, row_span: usize) -> bool {
        let columns = self.matrix.columns();
        let w = col_span.min(columns);
        let budget = (self.matrix.rows() + row_span + 5) * columns;
        let (mut r, mut c) = (self.row, self.col);

        for _ in 0..budget {
            if c + w > columns {
                r += 1;
                c = 0;
                continue;
            }
            let h = match self.row_cap {
                Some(cap) if r >= cap => break,
                Some(cap) => row_span.min(cap - r),
                None => row_span,
            };
            self.matrix.ensure_rows(r + h);
            let free = (r..r + h).all(|fr| (c..c + w).all(|fc| self.matrix.get(fr, fc).is_none()));
            if free {
                for fr in r..r + h {
                    for fc in c..c + w {
                        self.matrix.set(fr, fc, id);
                    }
                }
                self.row = r;
                self.col = c + w;
                return true;
            }
            c += 1;
        }
        // The cell is dropped; the cursor still steps one slot so the
        // next cell does not rescan from the identical position.
        self.col += 1;
        if self.col >= columns {
            self.col = 0;
            self.row += 1;
        }
        false
    }

    fn into_matrix(self) -> Matrix {
        self.matrix
    }
}

/// Place normalized cell rows into a layout according to the flow options.
pub(crate) fn place_cells(rows: Vec<Vec<Cell>>, opts: &GridOptions) -> Layout {
    let (arena, mut matrix) = match opts.auto_flow {
        AutoFlow::Row => {
            let columns = opts
                .columns
                .unwrap_or_else(|| inferred_columns(&rows, |cell| cell.col_span))
                .max(1);
            flow(rows, columns, opts.rows, false)
        }
        AutoFlow::Column => {
            // Each input list becomes a column: run the machine with the
            // axes swapped, then transpose the occupancy back.
            let target_rows = opts
                .rows
                .unwrap_or_else(|| inferred_columns(&rows, |cell| cell.row_span))
                .max(1);
            let (arena, machine) = flow(rows, target_rows, opts.columns, true);
            (arena, machine.transposed())
        }
    };

    match opts.rows {
        Some(fixed) => matrix.ensure_rows(fixed),
        None => matrix.trim_trailing_empty_rows(),
    }

    let bounds = span_bounds(&matrix);
    Layout {
        arena,
        matrix,
        bounds,
    }
}

/// Widest input row measured by a span accessor.
fn inferred_columns(rows: &[Vec<Cell>], span: impl Fn(&Cell) -> usize) -> usize {
    rows.iter()
        .map(|row| row.iter().map(&span).sum())
        .max()
        .unwrap_or(0)
}

fn flow(
    rows: Vec<Vec<Cell>>,
    columns: usize,
    row_cap: Option<usize>,
    swap_spans: bool,
) -> (CellArena, Matrix) {
    let mut arena = CellArena::default();
    let mut placer = Placer::new(columns, row_cap);
    for (index, row) in rows.into_iter().enumerate() {
        if index > 0 {
            placer.break_line();
        }
        for cell in row {
            if cell.is_placement_gap() {
                placer.skip();
                continue;
            }
            let (w, h) = if swap_spans {
                (cell.row_span, cell.col_span)
            } else {
                (cell.col_span, cell.row_span)
            };
            let id = arena.push(cell);
            if !placer.place(id, w, h) {
                tracing::warn!(
                    cell = id.0,
                    "no free slot found for cell, dropping it from the layout"
                );
            }
        }
    }
    (arena, placer.into_matrix())
}

fn span_bounds(matrix: &Matrix) -> HashMap<CellId, SpanBounds> {
    let mut bounds: HashMap<CellId, SpanBounds> = HashMap::new();
    for r in 0..matrix.rows() {
        for c in 0..matrix.columns() {
            if let Some(id) = matrix.get(r, c) {
                bounds
                    .entry(id)
                    .and_modify(|b| {
                        b.top = b.top.min(r);
                        b.left = b.left.min(c);
                        b.bottom = b.bottom.max(r);
                        b.right = b.right.max(c);
                    })
                    .or_insert(SpanBounds {
                        top: r,
                        left: c,
                        bottom: r,
                        right: c,
                    });
            }
        }
    }
    bounds
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::cell::{normalize, CellSpec};
    use crate::options::GridOptions;
    use proptest::prelude::*;

    fn arb_rows() -> impl Strategy<Value = Vec<Vec<(usize, usize)>>> {
        prop::collection::vec(
            prop::collection::vec((1usize..4, 1usize..4), 1..5),
            1..5,
        )
    }

    proptest! {
        /// Every placed cell occupies a solid rectangle, and every slot of
        /// that rectangle carries its id.
        #[test]
        fn footprints_are_solid_rectangles(rows in arb_rows()) {
            let cells: Vec<Vec<Cell>> = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|&(w, h)| {
                            normalize(CellSpec::text("x").col_span(w).row_span(h).into())
                                .unwrap()
                        })
                        .collect()
                })
                .collect();
            let layout = place_cells(cells, &GridOptions::default());

            for (&id, bounds) in &layout.bounds {
                let mut area = 0usize;
                for r in bounds.top..=bounds.bottom {
                    for c in bounds.left..=bounds.right {
                        prop_assert_eq!(layout.matrix.get(r, c), Some(id));
                        area += 1;
                    }
                }
                prop_assert_eq!(area, bounds.width() * bounds.height());
            }

            // No slot outside a footprint carries a bounded id.
            for r in 0..layout.matrix.rows() {
                for c in 0..layout.matrix.columns() {
                    if let Some(id) = layout.matrix.get(r, c) {
                        let b = layout.bounds[&id];
                        prop_assert!(r >= b.top && r <= b.bottom);
                        prop_assert!(c >= b.left && c <= b.right);
                    }
                }
            }
        }
    }
}
