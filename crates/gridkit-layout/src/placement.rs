//! Auto-placement of grid children.
//!
//! Children without an explicit row or column are packed into the first free
//! cells. A per-column high-water mark records the first row not yet occluded
//! in that column and seeds the search; collisions are checked against every
//! placed child span.
//!
//! Children with both indices given are registered as occluders before any
//! auto-placement happens, so auto-placed children never land on them
//! regardless of declaration order. Collapsed children receive indices but
//! never occlude.

use tracing::trace;

use crate::element::ItemStyle;
use crate::LayoutError;

/// Resolved row and column of one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IndexPair {
    pub row: usize,
    pub column: usize,
}

impl IndexPair {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Placement input for one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest {
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub row_span: usize,
    pub column_span: usize,
    pub collapsed: bool,
}

impl PlacementRequest {
    pub fn from_style(style: &ItemStyle) -> Self {
        Self {
            row: style.row,
            column: style.column,
            row_span: style.row_span,
            column_span: style.column_span,
            collapsed: style.is_collapsed(),
        }
    }

    /// Whether both indices were given by the caller.
    pub fn is_manual(&self) -> bool {
        self.row.is_some() && self.column.is_some()
    }

    /// Columns needed to hold this child without clipping its span.
    pub fn required_columns(&self) -> usize {
        self.column.unwrap_or(0) + self.column_span
    }
}

/// Reject zero spans.
pub fn validate_spans(requests: &[PlacementRequest]) -> Result<(), LayoutError> {
    for (index, request) in requests.iter().enumerate() {
        if request.row_span == 0 || request.column_span == 0 {
            return Err(LayoutError::InvalidSpan {
                index,
                row_span: request.row_span,
                column_span: request.column_span,
            });
        }
    }
    Ok(())
}

/// Output of the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// One pair per request, in request order.
    pub pairs: Vec<IndexPair>,
    /// Rows needed so that every span fits.
    pub required_rows: usize,
}

/// A placed, visible span.
#[derive(Debug, Clone, Copy)]
struct Occupant {
    row: usize,
    column: usize,
    row_span: usize,
    column_span: usize,
}

impl Occupant {
    fn bottom(&self) -> usize {
        self.row + self.row_span
    }

    fn overlaps(&self, row: usize, row_span: usize, column: usize, column_span: usize) -> bool {
        self.row < row + row_span
            && row < self.bottom()
            && self.column < column + column_span
            && column < self.column + self.column_span
    }
}

/// Auto-placement state.
#[derive(Debug)]
struct AutoPlacer {
    column_count: usize,
    /// First row not yet occluded, per column.
    column_heights: Vec<usize>,
    occupants: Vec<Occupant>,
}

impl AutoPlacer {
    fn new(column_count: usize) -> Self {
        Self {
            column_count,
            column_heights: vec![0; column_count],
            occupants: Vec::new(),
        }
    }

    fn blockers(
        &self,
        row: usize,
        row_span: usize,
        column: usize,
        column_span: usize,
    ) -> impl Iterator<Item = &Occupant> {
        self.occupants
            .iter()
            .filter(move |o| o.overlaps(row, row_span, column, column_span))
    }

    fn collides(&self, row: usize, row_span: usize, column: usize, column_span: usize) -> bool {
        self.blockers(row, row_span, column, column_span).next().is_some()
    }

    /// Lowest high-water mark across all columns.
    fn lowest_mark(&self) -> usize {
        self.column_heights.iter().copied().min().unwrap_or(0)
    }

    /// Find a row for a child pinned to `column`.
    fn find_row(&self, column: usize, request: &PlacementRequest) -> usize {
        let mut row = self.column_heights[column..column + request.column_span]
            .iter()
            .copied()
            .max()
            .unwrap_or(0);

        // Jump past occluders until the span is clear. Each jump moves strictly
        // downwards, and rows below every occupant are always clear.
        while let Some(bottom) = self
            .blockers(row, request.row_span, column, request.column_span)
            .map(Occupant::bottom)
            .max()
        {
            row = bottom;
        }
        row
    }

    /// Find the first free column at `row`, advancing rows until one exists.
    fn find_cell(&self, mut row: usize, request: &PlacementRequest) -> IndexPair {
        let last_start = self.column_count.saturating_sub(request.column_span);
        loop {
            let free = (0..=last_start)
                .find(|&column| !self.collides(row, request.row_span, column, request.column_span));
            if let Some(column) = free {
                return IndexPair::new(row, column);
            }
            row += 1;
        }
    }

    /// Raise the high-water marks of the columns a child spans.
    fn raise_marks(&mut self, pair: IndexPair, request: &PlacementRequest, auto_placed: bool) {
        let bottom = pair.row + request.row_span;
        let end = (pair.column + request.column_span).min(self.column_count);
        for mark in &mut self.column_heights[pair.column..end] {
            if auto_placed {
                *mark = (*mark).max(bottom);
            } else if pair.row <= *mark && *mark < bottom {
                // A manual child only blocks future auto-placement when it
                // covers the slot the mark points at.
                *mark = bottom;
            }
        }
    }

    fn occupy(&mut self, pair: IndexPair, request: &PlacementRequest) {
        self.occupants.push(Occupant {
            row: pair.row,
            column: pair.column,
            row_span: request.row_span,
            column_span: request.column_span,
        });
    }
}

/// Resolve an [`IndexPair`] for every request.
///
/// `column_count` must already cover [`PlacementRequest::required_columns`]
/// for every request; the caller grows the column list beforehand.
pub fn resolve_placements(
    requests: &[PlacementRequest],
    column_count: usize,
) -> Result<Placement, LayoutError> {
    validate_spans(requests)?;

    let column_count = requests
        .iter()
        .map(PlacementRequest::required_columns)
        .fold(column_count.max(1), usize::max);
    let mut placer = AutoPlacer::new(column_count);

    for request in requests.iter().filter(|r| r.is_manual() && !r.collapsed) {
        if let (Some(row), Some(column)) = (request.row, request.column) {
            placer.occupy(IndexPair::new(row, column), request);
        }
    }

    let mut pairs = Vec::with_capacity(requests.len());
    let mut required_rows = 0;

    for (index, request) in requests.iter().enumerate() {
        let pair = match (request.row, request.column) {
            (Some(row), Some(column)) => IndexPair::new(row, column),
            (None, Some(column)) => IndexPair::new(placer.find_row(column, request), column),
            (Some(row), None) => placer.find_cell(row, request),
            (None, None) => placer.find_cell(placer.lowest_mark(), request),
        };

        trace!(
            "placement: child {} -> row {}, column {} (span {}x{}{})",
            index,
            pair.row,
            pair.column,
            request.row_span,
            request.column_span,
            if request.is_manual() { ", manual" } else { "" }
        );

        if !request.collapsed {
            let auto_placed = !request.is_manual();
            if auto_placed {
                placer.occupy(pair, request);
            }
            placer.raise_marks(pair, request, auto_placed);
        }

        required_rows = required_rows.max(pair.row + request.row_span);
        pairs.push(pair);
    }

    Ok(Placement {
        pairs,
        required_rows,
    })
}
