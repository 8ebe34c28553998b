//! # GridKit Layout
//!
//! Platform-agnostic grid layout engine.
//! Places child elements into rows and columns and computes the pixel
//! geometry of every track and every element.
//!
//! ## Design Goals
//!
//! 1. **Track model**: Absolute, Auto (content-driven) and Star (proportional) tracks
//! 2. **Auto-placement**: Children without an explicit row or column are packed
//!    into free cells using per-column high-water marks
//! 3. **Track sizing**: Honors minimum/maximum container bounds, including
//!    unbounded (infinite) maxima
//! 4. **Arrangement**: Re-measures children against their final cells,
//!    reconciles Auto tracks, and applies alignment and content stretch
//!
//! ## Side effects
//!
//! [`GridLayoutEngine::layout`] writes the resolved [`Space`] of every track
//! back onto the grid's row and column lists and commits each child's frame
//! through [`GridElement::set_location`]. The same spaces are also returned in
//! the [`GridLayoutResult`]. Layout calls against one grid must be serialized
//! by the caller.

pub mod arrange;
pub mod config;
pub mod element;
pub mod grid;
pub mod measure_cache;
pub mod placement;
pub mod sizing;
pub mod track;

pub use arrange::align;
pub use config::{LayoutConfig, LayoutConfigBuilder};
pub use element::{
    Alignment, ContentStretch, GridElement, HasIntrinsicAspectRatio, ItemStyle, Visibility,
};
pub use grid::{layout_grid, Grid, GridLayoutEngine, GridLayoutResult};
pub use placement::IndexPair;
pub use track::{GridTrack, Space, TrackSize};

use thiserror::Error;

/// Errors that can occur in layout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid span on child {index}: row span {row_span}, column span {column_span}")]
    InvalidSpan {
        index: usize,
        row_span: usize,
        column_span: usize,
    },
}

impl LayoutError {
    /// Whether this error rejects caller-supplied input.
    ///
    /// Every current variant does; span errors are argument errors reported
    /// with the offending child.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            LayoutError::InvalidArgument(_) | LayoutError::InvalidSpan { .. }
        )
    }
}

/// The two layout dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Columns, measured along x.
    Horizontal,
    /// Rows, measured along y.
    Vertical,
}

/// A 2D size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Unbounded in both dimensions.
    pub const INFINITE: Size = Size {
        width: f32::INFINITY,
        height: f32::INFINITY,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The extent along one axis.
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// A 2D rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Shrink by edge sizes, never below zero extent.
    pub fn deflate(&self, edges: &EdgeSizes) -> Rect {
        Rect {
            x: self.x + edges.left,
            y: self.y + edges.top,
            width: (self.width - edges.horizontal()).max(0.0),
            height: (self.height - edges.vertical()).max(0.0),
        }
    }
}

/// Edge sizes (margin, padding).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeSizes {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Sum of both edges along an axis.
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal(),
            Axis::Vertical => self.vertical(),
        }
    }

    /// Leading edge (left or top) along an axis.
    pub fn leading(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Trailing edge (right or bottom) along an axis.
    pub fn trailing(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    /// Multiply every edge by a device scale factor.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            top: self.top * factor,
            right: self.right * factor,
            bottom: self.bottom * factor,
            left: self.left * factor,
        }
    }
}
