//! # Grid Layout
//!
//! Entry point of the engine.
//!
//! ## Overview
//!
//! A layout call runs, in order:
//! - Validation of the container bounds and child spans
//! - Auto-placement of children without explicit indices
//! - Track sizing for columns and rows (first pass)
//! - Arrangement, which may re-size individual Auto tracks (second pass)
//! - Commit of track spaces and child frames
//!
//! All work happens on transient copies of the track lists. Nothing is
//! written back to the grid until every step has succeeded, so a rejected call
//! leaves previously committed geometry intact.

use tracing::{debug, trace};

use crate::arrange::{sanitize, Arranger, AxisState, ChildSlot};
use crate::element::GridElement;
use crate::measure_cache::MeasureCache;
use crate::placement::{resolve_placements, validate_spans, IndexPair, PlacementRequest};
use crate::sizing::{Contribution, Extent, TrackPlan};
use crate::track::{GridTrack, Space};
use crate::{Axis, EdgeSizes, LayoutConfig, LayoutError, Rect, Size};

/// A grid container.
#[derive(Debug, Clone)]
pub struct Grid<E> {
    /// Column tracks, left to right.
    pub columns: Vec<GridTrack>,
    /// Row tracks, top to bottom.
    pub rows: Vec<GridTrack>,
    /// Inner padding, multiplied by `scale_factor`.
    pub padding: EdgeSizes,
    /// Device scale applied to padding, margins and Absolute lengths.
    pub scale_factor: f32,
    /// Children in declaration order.
    pub children: Vec<E>,
}

impl<E> Default for Grid<E> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            padding: EdgeSizes::default(),
            scale_factor: 1.0,
            children: Vec::new(),
        }
    }
}

impl<E: GridElement> Grid<E> {
    /// Create a grid from track definitions.
    pub fn new(columns: Vec<GridTrack>, rows: Vec<GridTrack>) -> Self {
        Self {
            columns,
            rows,
            ..Default::default()
        }
    }

    pub fn with_padding(mut self, padding: EdgeSizes) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Append a child.
    pub fn push(&mut self, child: E) {
        self.children.push(child);
    }

    /// Get number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Outcome of a layout call.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayoutResult {
    /// Size consumed by the grid, never below the requested minimum.
    pub size: Size,
    /// Resolved column geometry, also written back onto the grid.
    pub column_spaces: Vec<Space>,
    /// Resolved row geometry, also written back onto the grid.
    pub row_spaces: Vec<Space>,
    /// Resolved indices, one per child.
    pub placements: Vec<IndexPair>,
    /// Track re-sizes triggered during arrangement.
    pub track_adjustments: usize,
}

/// Everything one pass computes, before anything is committed.
struct LayoutPass {
    columns: Vec<GridTrack>,
    rows: Vec<GridTrack>,
    frames: Vec<Rect>,
    result: GridLayoutResult,
}

/// Grid layout engine.
#[derive(Debug, Clone, Default)]
pub struct GridLayoutEngine {
    config: LayoutConfig,
}

impl GridLayoutEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Lay out `grid` within `minimum..=maximum`.
    ///
    /// Writes the resolved [`Space`] of every track back onto `grid.columns`
    /// and `grid.rows` (growing them as placement requires) and commits each
    /// child's frame through [`GridElement::set_location`].
    pub fn layout<E: GridElement>(
        &self,
        grid: &mut Grid<E>,
        minimum: Size,
        maximum: Size,
    ) -> Result<GridLayoutResult, LayoutError> {
        let pass = self.run(grid, minimum, maximum)?;

        grid.columns = pass.columns;
        grid.rows = pass.rows;
        for (child, frame) in grid.children.iter_mut().zip(pass.frames) {
            child.set_location(frame);
        }

        Ok(pass.result)
    }

    /// Compute the size `grid` would consume without committing anything.
    pub fn measure<E: GridElement>(
        &self,
        grid: &Grid<E>,
        minimum: Size,
        maximum: Size,
    ) -> Result<Size, LayoutError> {
        self.run(grid, minimum, maximum).map(|pass| pass.result.size)
    }

    fn run<E: GridElement>(
        &self,
        grid: &Grid<E>,
        minimum: Size,
        maximum: Size,
    ) -> Result<LayoutPass, LayoutError> {
        validate_bounds(minimum, maximum)?;
        let requests: Vec<PlacementRequest> = grid
            .children
            .iter()
            .map(|child| PlacementRequest::from_style(child.style()))
            .collect();
        validate_spans(&requests)?;

        debug!(
            "Grid layout: min {}x{}, max {}x{}, {} columns, {} rows, {} children",
            minimum.width,
            minimum.height,
            maximum.width,
            maximum.height,
            grid.column_count(),
            grid.row_count(),
            grid.children.len()
        );

        let scale = if grid.scale_factor.is_finite() && grid.scale_factor > 0.0 {
            grid.scale_factor
        } else {
            1.0
        };

        let mut columns = grid.columns.clone();
        let mut rows = grid.rows.clone();

        // Ensure at least one column and row
        if columns.is_empty() {
            columns.push(GridTrack::auto());
        }
        if rows.is_empty() {
            rows.push(GridTrack::auto());
        }

        let required_columns = requests
            .iter()
            .map(PlacementRequest::required_columns)
            .max()
            .unwrap_or(0);
        grow_tracks(&mut columns, required_columns, Axis::Horizontal);

        let placement = resolve_placements(&requests, columns.len())?;
        grow_tracks(&mut rows, placement.required_rows, Axis::Vertical);

        let padding = grid.padding.scaled(scale);
        let column_plan = TrackPlan::new(
            Axis::Horizontal,
            &columns,
            content_extent(minimum, maximum, &padding, Axis::Horizontal),
            padding.leading(Axis::Horizontal),
            scale,
        );
        let row_plan = TrackPlan::new(
            Axis::Vertical,
            &rows,
            content_extent(minimum, maximum, &padding, Axis::Vertical),
            padding.leading(Axis::Vertical),
            scale,
        );

        // First pass: measure only children that can drive a track.
        let constraint = Size::new(column_plan.remaining(), row_plan.remaining());
        let mut cache = MeasureCache::new();
        let mut slots = Vec::with_capacity(grid.children.len());
        let mut column_contributions = Vec::new();
        let mut row_contributions = Vec::new();

        for (index, (child, (request, pair))) in grid
            .children
            .iter()
            .zip(requests.iter().zip(&placement.pairs))
            .enumerate()
        {
            let margin = child.style().margin.scaled(scale);
            let drives_column =
                request.column_span == 1 && column_plan.is_content_driven(pair.column);
            let drives_row = request.row_span == 1 && row_plan.is_content_driven(pair.row);

            let desired = if !request.collapsed && (drives_column || drives_row) {
                let size = sanitize(index, cache.measure(index, child, constraint));
                trace!("child {} desired {}x{}", index, size.width, size.height);
                Some(size)
            } else {
                None
            };

            if let Some(size) = desired {
                if drives_column {
                    column_contributions.push(Contribution {
                        child: index,
                        track: pair.column,
                        outer: size.width + margin.horizontal(),
                    });
                }
                if drives_row {
                    row_contributions.push(Contribution {
                        child: index,
                        track: pair.row,
                        outer: size.height + margin.vertical(),
                    });
                }
            }

            slots.push(ChildSlot {
                pair: *pair,
                row_span: request.row_span,
                column_span: request.column_span,
                margin,
                collapsed: request.collapsed,
                desired,
            });
        }

        // Second pass.
        let mut arranger = Arranger::new(
            &self.config,
            &slots,
            AxisState::new(column_plan, column_contributions),
            AxisState::new(row_plan, row_contributions),
        );
        arranger.measure_children(&grid.children, &mut cache);
        let frames = arranger.frames(&grid.children);

        let size = Size::new(
            (arranger.columns.total() + padding.horizontal()).max(minimum.width),
            (arranger.rows.total() + padding.vertical()).max(minimum.height),
        );

        let stats = cache.stats();
        trace!(
            "measure cache: {} lookups, {} hits, {} stores",
            stats.lookups,
            stats.hits,
            stats.stores
        );

        for (track, space) in columns.iter_mut().zip(&arranger.columns.spaces) {
            track.space = *space;
        }
        for (track, space) in rows.iter_mut().zip(&arranger.rows.spaces) {
            track.space = *space;
        }

        debug!(
            "Grid layout complete: {} columns, {} rows, size {}x{}, {} track adjustments",
            columns.len(),
            rows.len(),
            size.width,
            size.height,
            arranger.adjustments
        );

        let result = GridLayoutResult {
            size,
            column_spaces: arranger.columns.spaces.clone(),
            row_spaces: arranger.rows.spaces.clone(),
            placements: placement.pairs,
            track_adjustments: arranger.adjustments,
        };

        Ok(LayoutPass {
            columns,
            rows,
            frames,
            result,
        })
    }
}

/// Lay out `grid` with the default configuration.
pub fn layout_grid<E: GridElement>(
    grid: &mut Grid<E>,
    minimum: Size,
    maximum: Size,
) -> Result<GridLayoutResult, LayoutError> {
    GridLayoutEngine::default().layout(grid, minimum, maximum)
}

fn validate_bounds(minimum: Size, maximum: Size) -> Result<(), LayoutError> {
    if !minimum.width.is_finite() || !minimum.height.is_finite() {
        return Err(LayoutError::InvalidArgument(format!(
            "minimum size must be finite, got {}x{}",
            minimum.width, minimum.height
        )));
    }
    if minimum.width < 0.0 || minimum.height < 0.0 {
        return Err(LayoutError::InvalidArgument(format!(
            "minimum size must not be negative, got {}x{}",
            minimum.width, minimum.height
        )));
    }
    let invalid = |value: f32| value.is_nan() || value < 0.0;
    if invalid(maximum.width) || invalid(maximum.height) {
        return Err(LayoutError::InvalidArgument(format!(
            "maximum size must not be negative, got {}x{}",
            maximum.width, maximum.height
        )));
    }
    Ok(())
}

/// Bounds of the track area along `axis`, padding removed.
fn content_extent(minimum: Size, maximum: Size, padding: &EdgeSizes, axis: Axis) -> Extent {
    let inset = padding.along(axis);
    Extent::new(
        (minimum.along(axis) - inset).max(0.0),
        (maximum.along(axis) - inset).max(0.0),
    )
}

/// Append Auto tracks until `tracks` holds `count`.
fn grow_tracks(tracks: &mut Vec<GridTrack>, count: usize, axis: Axis) {
    if tracks.len() < count {
        debug!("growing {:?} tracks from {} to {}", axis, tracks.len(), count);
        tracks.resize(count, GridTrack::auto());
    }
}
