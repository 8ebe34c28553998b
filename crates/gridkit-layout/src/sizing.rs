//! Track sizing.
//!
//! Rows and columns are sized independently with the same algorithm:
//!
//! 1. Absolute tracks take their scaled length
//! 2. With an unbounded maximum, the lightest Star track is sized as if it
//!    were Auto and anchors the Star distribution
//! 3. Auto tracks take the largest margin-box size of the single-span
//!    children they hold
//! 4. Auto tracks are clipped greedily to the remaining budget
//! 5. Star tracks share what is left by weight
//! 6. A shortfall against the minimum extent grows the last non-empty Auto track
//! 7. Origins accumulate from the leading padding

use tracing::trace;

use crate::track::{GridTrack, Space, TrackSize};
use crate::Axis;

/// Container bounds for the track area (padding already removed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f32,
    /// May be infinite.
    pub max: f32,
}

impl Extent {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Margin-box size a single-span child requires of its track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub child: usize,
    pub track: usize,
    pub outer: f32,
}

/// Per-call sizing plan for one axis.
///
/// Built once from the track definitions; [`TrackPlan::resolve`] can then be
/// re-run with different pinned sizes during arrangement.
#[derive(Debug, Clone)]
pub struct TrackPlan {
    axis: Axis,
    sizing: Vec<TrackSize>,
    /// Scaled length of Absolute tracks, zero elsewhere.
    absolute: Vec<f32>,
    absolute_total: f32,
    /// Auto tracks, plus the Star anchor when the maximum is unbounded.
    content_driven: Vec<bool>,
    anchor: Option<usize>,
    extent: Extent,
    leading: f32,
}

impl TrackPlan {
    pub fn new(axis: Axis, tracks: &[GridTrack], extent: Extent, leading: f32, scale: f32) -> Self {
        let sizing: Vec<TrackSize> = tracks.iter().map(|t| t.sizing).collect();

        let absolute: Vec<f32> = sizing
            .iter()
            .map(|s| match s {
                TrackSize::Absolute(length) => (length * scale).max(0.0),
                _ => 0.0,
            })
            .collect();
        let absolute_total = absolute.iter().sum();

        // An unbounded Star distribution has no unit; borrow one from the
        // lightest Star track sized by its content.
        let anchor = if extent.max.is_infinite() {
            sizing
                .iter()
                .enumerate()
                .filter(|(_, s)| s.star_weight() > 0.0)
                .fold(None, |best: Option<(usize, f32)>, (i, s)| match best {
                    Some((_, weight)) if weight <= s.star_weight() => best,
                    _ => Some((i, s.star_weight())),
                })
                .map(|(i, _)| i)
        } else {
            None
        };

        if let Some(index) = anchor {
            trace!("track sizing {:?}: star track {} anchors unbounded extent", axis, index);
        }

        let content_driven = sizing
            .iter()
            .enumerate()
            .map(|(i, s)| s.is_auto() || Some(i) == anchor)
            .collect();

        Self {
            axis,
            sizing,
            absolute,
            absolute_total,
            content_driven,
            anchor,
            extent,
            leading,
        }
    }

    pub fn track_count(&self) -> usize {
        self.sizing.len()
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn is_content_driven(&self, track: usize) -> bool {
        self.content_driven.get(track).copied().unwrap_or(false)
    }

    /// Whether any track in `start..start + span` is content-driven.
    pub fn spans_content_driven(&self, start: usize, span: usize) -> bool {
        (start..start + span).any(|track| self.is_content_driven(track))
    }

    /// Space left once Absolute tracks are taken; infinite if unbounded.
    pub fn remaining(&self) -> f32 {
        (self.extent.max - self.absolute_total).max(0.0)
    }

    /// Largest contribution to `track`, ignoring `except`.
    pub fn requirement(
        &self,
        track: usize,
        contributions: &[Contribution],
        except: Option<usize>,
    ) -> f32 {
        contributions
            .iter()
            .filter(|c| c.track == track && Some(c.child) != except)
            .map(|c| c.outer)
            .fold(0.0, f32::max)
    }

    /// Size every track.
    ///
    /// `pinned[i]`, when set, replaces the content size measured for
    /// content-driven track `i`.
    pub fn resolve(&self, contributions: &[Contribution], pinned: &[Option<f32>]) -> Vec<Space> {
        let count = self.sizing.len();
        let mut sizes = self.absolute.clone();

        let mut content = vec![0.0f32; count];
        for contribution in contributions {
            if self.is_content_driven(contribution.track) {
                let slot = &mut content[contribution.track];
                *slot = slot.max(contribution.outer);
            }
        }
        for (slot, pin) in content.iter_mut().zip(pinned) {
            if let Some(size) = pin {
                *slot = size.max(0.0);
            }
        }

        // Auto tracks, first come first served.
        let mut budget = self.remaining();
        for track in (0..count).filter(|&t| self.content_driven[t]) {
            let size = content[track].min(budget).max(0.0);
            sizes[track] = size;
            if budget.is_finite() {
                budget -= size;
            }
        }

        self.distribute_stars(&mut sizes, budget);

        let total: f32 = sizes.iter().sum();
        if total < self.extent.min {
            let shortfall = self.extent.min - total;
            if let Some(track) = (0..count)
                .rev()
                .find(|&t| self.content_driven[t] && sizes[t] > 0.0)
            {
                trace!(
                    "track sizing {:?}: track {} absorbs {}px shortfall",
                    self.axis,
                    track,
                    shortfall
                );
                sizes[track] += shortfall;
            }
        }

        let mut origin = self.leading;
        let spaces: Vec<Space> = sizes
            .into_iter()
            .map(|size| {
                let space = Space::new(origin, size);
                origin += size;
                space
            })
            .collect();

        trace!(
            "track sizing {:?}: {:?}",
            self.axis,
            spaces.iter().map(|s| s.size).collect::<Vec<_>>()
        );

        spaces
    }

    fn distribute_stars(&self, sizes: &mut [f32], budget: f32) {
        let total_weight: f32 = self.sizing.iter().map(TrackSize::star_weight).sum();
        if total_weight <= 0.0 {
            for (size, sizing) in sizes.iter_mut().zip(&self.sizing) {
                if sizing.is_star() {
                    *size = 0.0;
                }
            }
            return;
        }

        let unit = match self.anchor {
            Some(anchor) => {
                let mut unit = sizes[anchor] / self.sizing[anchor].star_weight();
                self.apply_unit(sizes, unit);

                let total: f32 = sizes.iter().sum();
                if total < self.extent.min {
                    unit += (self.extent.min - total) / total_weight;
                }
                unit
            }
            None if budget.is_finite() => budget.max(0.0) / total_weight,
            None => 0.0,
        };

        self.apply_unit(sizes, unit);
    }

    fn apply_unit(&self, sizes: &mut [f32], unit: f32) {
        for (size, sizing) in sizes.iter_mut().zip(&self.sizing) {
            if sizing.is_star() {
                *size = sizing.star_weight() * unit;
            }
        }
    }
}
