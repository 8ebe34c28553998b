//! Row and column track definitions.

/// Sizing policy of a track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrackSize {
    /// Fixed length, multiplied by the grid's scale factor.
    Absolute(f32),
    /// Sized by the content of the children it holds.
    #[default]
    Auto,
    /// Proportional share of the remaining space, by weight.
    Star(f32),
}

impl TrackSize {
    pub fn is_auto(&self) -> bool {
        matches!(self, TrackSize::Auto)
    }

    pub fn is_star(&self) -> bool {
        matches!(self, TrackSize::Star(_))
    }

    /// Star weight, or zero for non-star tracks. Negative weights count as zero.
    pub fn star_weight(&self) -> f32 {
        match self {
            TrackSize::Star(weight) if *weight > 0.0 => *weight,
            _ => 0.0,
        }
    }
}

/// Resolved geometry of one track.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Space {
    /// Offset from the grid's outer edge (padding included).
    pub origin: f32,
    /// Final track length.
    pub size: f32,
}

impl Space {
    pub fn new(origin: f32, size: f32) -> Self {
        Self { origin, size }
    }

    pub fn end(&self) -> f32 {
        self.origin + self.size
    }
}

/// A row or column of the grid.
///
/// `space` is overwritten by every successful layout call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridTrack {
    /// Sizing policy.
    pub sizing: TrackSize,
    /// Resolved origin and size.
    pub space: Space,
}

impl GridTrack {
    pub fn new(sizing: TrackSize) -> Self {
        Self {
            sizing,
            space: Space::default(),
        }
    }

    pub fn absolute(length: f32) -> Self {
        Self::new(TrackSize::Absolute(length))
    }

    pub fn auto() -> Self {
        Self::new(TrackSize::Auto)
    }

    pub fn star(weight: f32) -> Self {
        Self::new(TrackSize::Star(weight))
    }
}

/// Total length of the tracks in `start..start + span`.
pub(crate) fn span_length(spaces: &[Space], start: usize, span: usize) -> f32 {
    spaces.iter().skip(start).take(span).map(|s| s.size).sum()
}
