//! Grid children: layout attributes and the capabilities the engine needs.

use crate::{EdgeSizes, Rect, Size};

/// Placement of an element inside its available area, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Fill the available area.
    #[default]
    Stretch,
    /// Natural size, anchored to the leading edge.
    Start,
    /// Natural size, anchored to the trailing edge.
    End,
    /// Natural size, centered.
    Center,
}

/// Whether an element takes part in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Placed, but never measured and committed with zero size.
    Collapsed,
}

/// How image-like content scales into its available area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentStretch {
    /// Take the full area, possibly distorting the content.
    Fill,
    /// Take the full area; the content is expected to crop.
    UniformToFill,
    /// Largest aspect-preserving size that fits the area.
    #[default]
    Uniform,
    /// Intrinsic size, shrunk (never grown) to fit with aspect preserved.
    None,
}

impl ContentStretch {
    /// Resolve the content size for an intrinsic size within `available`.
    ///
    /// Unbounded available extents impose no limit on that axis.
    pub fn fit(self, intrinsic: Size, available: Size) -> Size {
        if intrinsic.width <= 0.0 || intrinsic.height <= 0.0 {
            return match self {
                ContentStretch::Fill | ContentStretch::UniformToFill => {
                    bounded(available, intrinsic)
                }
                _ => Size::ZERO,
            };
        }

        match self {
            ContentStretch::Fill | ContentStretch::UniformToFill => bounded(available, intrinsic),
            ContentStretch::Uniform => {
                let scale = fit_scale(intrinsic, available);
                if scale.is_finite() {
                    Size::new(intrinsic.width * scale, intrinsic.height * scale)
                } else {
                    intrinsic
                }
            }
            ContentStretch::None => {
                let scale = fit_scale(intrinsic, available).min(1.0);
                Size::new(intrinsic.width * scale, intrinsic.height * scale)
            }
        }
    }
}

/// Scale factor that makes `intrinsic` fit `available`; infinite if unbounded.
fn fit_scale(intrinsic: Size, available: Size) -> f32 {
    let sx = available.width / intrinsic.width;
    let sy = available.height / intrinsic.height;
    sx.min(sy).max(0.0)
}

/// The available size, falling back to `fallback` on unbounded axes.
fn bounded(available: Size, fallback: Size) -> Size {
    Size::new(
        if available.width.is_finite() {
            available.width
        } else {
            fallback.width
        },
        if available.height.is_finite() {
            available.height
        } else {
            fallback.height
        },
    )
}

/// Layout attributes of a grid child.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStyle {
    /// Row index; `None` requests auto-placement.
    pub row: Option<usize>,
    /// Column index; `None` requests auto-placement.
    pub column: Option<usize>,
    /// Rows occupied, at least 1.
    pub row_span: usize,
    /// Columns occupied, at least 1.
    pub column_span: usize,
    /// Outer margin, multiplied by the grid's scale factor.
    pub margin: EdgeSizes,
    pub horizontal_alignment: Alignment,
    pub vertical_alignment: Alignment,
    pub visibility: Visibility,
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            row: None,
            column: None,
            row_span: 1,
            column_span: 1,
            margin: EdgeSizes::default(),
            horizontal_alignment: Alignment::Stretch,
            vertical_alignment: Alignment::Stretch,
            visibility: Visibility::Visible,
        }
    }
}

impl ItemStyle {
    /// Explicitly placed at `(row, column)`.
    pub fn at(row: usize, column: usize) -> Self {
        Self {
            row: Some(row),
            column: Some(column),
            ..Default::default()
        }
    }

    /// Set the spans.
    pub fn spanning(mut self, row_span: usize, column_span: usize) -> Self {
        self.row_span = row_span;
        self.column_span = column_span;
        self
    }

    /// Set both alignments.
    pub fn aligned(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    pub fn is_collapsed(&self) -> bool {
        self.visibility == Visibility::Collapsed
    }
}

/// Content with an intrinsic size that scales by a [`ContentStretch`] policy.
pub trait HasIntrinsicAspectRatio {
    /// Natural size of the content.
    fn intrinsic_size(&self) -> Size;

    /// Scaling policy.
    fn content_stretch(&self) -> ContentStretch;

    /// Width over height, if the intrinsic size is non-degenerate.
    fn aspect_ratio(&self) -> Option<f32> {
        let size = self.intrinsic_size();
        if size.width > 0.0 && size.height > 0.0 {
            Some(size.width / size.height)
        } else {
            None
        }
    }
}

/// Anything that can be placed in a grid.
pub trait GridElement {
    /// Placement and alignment attributes.
    fn style(&self) -> &ItemStyle;

    /// Desired size given the space on offer. Either extent may be infinite.
    fn measure(&self, available: Size) -> Size;

    /// Commit the final frame, relative to the grid's outer edge.
    fn set_location(&mut self, frame: Rect);

    /// Image-like content, queried during arrangement.
    fn intrinsic_content(&self) -> Option<&dyn HasIntrinsicAspectRatio> {
        None
    }
}

impl<T: GridElement + ?Sized> GridElement for Box<T> {
    fn style(&self) -> &ItemStyle {
        (**self).style()
    }

    fn measure(&self, available: Size) -> Size {
        (**self).measure(available)
    }

    fn set_location(&mut self, frame: Rect) {
        (**self).set_location(frame)
    }

    fn intrinsic_content(&self) -> Option<&dyn HasIntrinsicAspectRatio> {
        (**self).intrinsic_content()
    }
}
