//! Element arrangement.
//!
//! Second pass of the layout: every visible child is re-measured against the
//! area its sized tracks give it. When the new measurement disagrees with the
//! first-pass one and the child sits alone in the span of a single
//! content-driven track, that track is pinned to the new size and the axis is
//! re-sized. Each child pins at most one track per axis, which bounds the
//! number of re-sizer runs by twice the visible child count.
//!
//! Frames are computed only after every child has been reconciled, so all of
//! them are derived from the same final track geometry.

use tracing::{trace, warn};

use crate::element::{Alignment, GridElement};
use crate::measure_cache::MeasureCache;
use crate::placement::IndexPair;
use crate::sizing::{Contribution, TrackPlan};
use crate::track::{span_length, Space};
use crate::{Axis, EdgeSizes, LayoutConfig, Rect, Size};

/// Position and extent of a child along one axis.
///
/// `Stretch` fills the available extent; the other alignments keep the natural
/// extent, clamped to what is available.
pub fn align(alignment: Alignment, start: f32, available: f32, natural: f32) -> (f32, f32) {
    let available = available.max(0.0);
    let natural = natural.max(0.0).min(available);
    match alignment {
        Alignment::Stretch => (start, available),
        Alignment::Start => (start, natural),
        Alignment::End => (start + available - natural, natural),
        Alignment::Center => (start + (available - natural) / 2.0, natural),
    }
}

/// Replace non-finite or negative extents returned by `measure` with zero.
pub(crate) fn sanitize(child: usize, size: Size) -> Size {
    let clean = |value: f32| if value.is_finite() { value.max(0.0) } else { 0.0 };
    let sanitized = Size::new(clean(size.width), clean(size.height));
    if sanitized != size {
        warn!("child {} measured to {:?}; clamped to {:?}", child, size, sanitized);
    }
    sanitized
}

/// Engine-side view of one child.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChildSlot {
    pub pair: IndexPair,
    pub row_span: usize,
    pub column_span: usize,
    /// Scaled margin.
    pub margin: EdgeSizes,
    pub collapsed: bool,
    /// First-pass desired size, for children that were measured.
    pub desired: Option<Size>,
}

impl ChildSlot {
    pub fn start(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.pair.column,
            Axis::Vertical => self.pair.row,
        }
    }

    pub fn span(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.column_span,
            Axis::Vertical => self.row_span,
        }
    }
}

/// Sizing state of one axis during arrangement.
#[derive(Debug, Clone)]
pub(crate) struct AxisState {
    pub plan: TrackPlan,
    pub contributions: Vec<Contribution>,
    pub pinned: Vec<Option<f32>>,
    pub spaces: Vec<Space>,
}

impl AxisState {
    pub fn new(plan: TrackPlan, contributions: Vec<Contribution>) -> Self {
        let pinned = vec![None; plan.track_count()];
        let spaces = plan.resolve(&contributions, &pinned);
        Self {
            plan,
            contributions,
            pinned,
            spaces,
        }
    }

    /// Content size a track was sized from, before clipping or stretching.
    fn content_size(&self, track: usize) -> f32 {
        self.pinned[track]
            .unwrap_or_else(|| self.plan.requirement(track, &self.contributions, None))
    }

    /// Pin a track's content size and re-size the axis.
    fn pin(&mut self, track: usize, size: f32) {
        self.pinned[track] = Some(size);
        self.spaces = self.plan.resolve(&self.contributions, &self.pinned);
    }

    pub fn total(&self) -> f32 {
        self.spaces.iter().map(|s| s.size).sum()
    }
}

/// Second-pass state.
pub(crate) struct Arranger<'a> {
    config: &'a LayoutConfig,
    slots: &'a [ChildSlot],
    pub columns: AxisState,
    pub rows: AxisState,
    /// Sizes recorded for arranged children.
    finals: Vec<Option<Size>>,
    /// Re-sizer runs triggered by reconciliation.
    pub adjustments: usize,
}

impl<'a> Arranger<'a> {
    pub fn new(
        config: &'a LayoutConfig,
        slots: &'a [ChildSlot],
        columns: AxisState,
        rows: AxisState,
    ) -> Self {
        Self {
            config,
            slots,
            columns,
            rows,
            finals: vec![None; slots.len()],
            adjustments: 0,
        }
    }

    fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::Horizontal => &self.columns,
            Axis::Vertical => &self.rows,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisState {
        match axis {
            Axis::Horizontal => &mut self.columns,
            Axis::Vertical => &mut self.rows,
        }
    }

    /// The rectangle spanned by a child's tracks.
    fn cell(&self, slot: &ChildSlot) -> Rect {
        let columns = &self.columns.spaces;
        let rows = &self.rows.spaces;
        Rect::new(
            columns.get(slot.pair.column).map_or(0.0, |s| s.origin),
            rows.get(slot.pair.row).map_or(0.0, |s| s.origin),
            span_length(columns, slot.pair.column, slot.column_span),
            span_length(rows, slot.pair.row, slot.row_span),
        )
    }

    fn available_area(&self, slot: &ChildSlot) -> Rect {
        self.cell(slot).deflate(&slot.margin)
    }

    fn measure_in_cell<E: GridElement>(
        &self,
        index: usize,
        child: &E,
        slot: &ChildSlot,
        cache: &mut MeasureCache,
    ) -> Size {
        let mut constraint = self.available_area(slot).size();
        if self.config.relax_auto_row_height
            && self.rows.plan.spans_content_driven(slot.pair.row, slot.row_span)
        {
            constraint.height = f32::INFINITY;
        }
        sanitize(index, cache.measure(index, child, constraint))
    }

    /// Re-measure every visible child in its cell, reconciling Auto tracks.
    pub fn measure_children<E: GridElement>(&mut self, children: &[E], cache: &mut MeasureCache) {
        let slots = self.slots;
        for (index, (child, slot)) in children.iter().zip(slots).enumerate() {
            if slot.collapsed {
                continue;
            }

            let mut measured = self.measure_in_cell(index, child, slot, cache);
            if self.config.reconcile {
                if self.reconcile(Axis::Horizontal, index, slot, measured) {
                    measured = self.measure_in_cell(index, child, slot, cache);
                }
                self.reconcile(Axis::Vertical, index, slot, measured);
            }
            self.finals[index] = Some(measured);
        }
    }

    /// Adjust the child's content-driven track along `axis` if its new
    /// measurement requires it. Returns whether the axis was re-sized.
    fn reconcile(&mut self, axis: Axis, index: usize, slot: &ChildSlot, measured: Size) -> bool {
        let Some(desired) = slot.desired else {
            return false;
        };
        if slot.span(axis) != 1 {
            return false;
        }

        let track = slot.start(axis);
        let tolerance = self.config.tolerance();
        let state = self.axis(axis);
        if !state.plan.is_content_driven(track) {
            return false;
        }

        let measured_extent = measured.along(axis);
        if (measured_extent - desired.along(axis)).abs() <= tolerance {
            return false;
        }

        let margin = slot.margin.along(axis);
        let need = measured_extent + margin;
        let current = state.spaces[track].size;
        let content = state.content_size(track);

        let target = if need > current + tolerance {
            if need <= content + tolerance {
                // Already requested; the budget clipped it.
                return false;
            }
            need
        } else if need < current - tolerance {
            let first = desired.along(axis) + margin;
            if (first - content).abs() > tolerance {
                return false;
            }
            let target = need.max(self.sibling_requirement(axis, track, index));
            if target >= content - tolerance {
                return false;
            }
            target
        } else {
            return false;
        };

        trace!(
            "reconcile {:?}: child {} moves track {} from {} to {}",
            axis,
            index,
            track,
            current,
            target
        );
        self.axis_mut(axis).pin(track, target);
        self.adjustments += 1;
        true
    }

    /// Largest margin-box size other single-span children need from `track`.
    fn sibling_requirement(&self, axis: Axis, track: usize, except: usize) -> f32 {
        self.slots
            .iter()
            .enumerate()
            .filter(|(i, s)| {
                *i != except && !s.collapsed && s.span(axis) == 1 && s.start(axis) == track
            })
            .map(|(i, s)| {
                let size = self.finals[i].or(s.desired).map_or(0.0, |size| size.along(axis));
                size + s.margin.along(axis)
            })
            .fold(0.0, f32::max)
    }

    /// Final frame of every child, from the final track geometry.
    pub fn frames<E: GridElement>(&self, children: &[E]) -> Vec<Rect> {
        children
            .iter()
            .zip(self.slots)
            .enumerate()
            .map(|(index, (child, slot))| {
                if slot.collapsed {
                    let cell = self.cell(slot);
                    return Rect::new(cell.x, cell.y, 0.0, 0.0);
                }

                let area = self.available_area(slot);
                let style = child.style();
                let (natural, horizontal, vertical) = match child.intrinsic_content() {
                    Some(content) => (
                        content
                            .content_stretch()
                            .fit(content.intrinsic_size(), area.size()),
                        centered_if_stretch(style.horizontal_alignment),
                        centered_if_stretch(style.vertical_alignment),
                    ),
                    None => (
                        self.finals[index].unwrap_or_else(|| area.size()),
                        style.horizontal_alignment,
                        style.vertical_alignment,
                    ),
                };

                let (x, width) = align(horizontal, area.x, area.width, natural.width);
                let (y, height) = align(vertical, area.y, area.height, natural.height);
                Rect::new(x, y, width.max(0.0), height.max(0.0))
            })
            .collect()
    }
}

/// Image-like content keeps its fitted size; `Stretch` centres it instead.
fn centered_if_stretch(alignment: Alignment) -> Alignment {
    match alignment {
        Alignment::Stretch => Alignment::Center,
        other => other,
    }
}
