//! Layout engine configuration.

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Re-size Auto tracks when a child's arranged size disagrees with its
    /// first-pass measurement.
    pub reconcile: bool,
    /// Difference below which the two measurements count as equal.
    pub reconcile_tolerance: f32,
    /// Measure children spanning an Auto row with unbounded height during
    /// arrangement, so wrapping content can trade width for height.
    pub relax_auto_row_height: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            reconcile: true,
            reconcile_tolerance: 0.01,
            relax_auto_row_height: true,
        }
    }
}

impl LayoutConfig {
    /// Tolerance with negative and NaN values clamped to zero.
    pub fn tolerance(&self) -> f32 {
        if self.reconcile_tolerance > 0.0 {
            self.reconcile_tolerance
        } else {
            0.0
        }
    }
}

/// Builder for [`LayoutConfig`].
#[derive(Debug, Clone, Default)]
pub struct LayoutConfigBuilder {
    config: LayoutConfig,
}

impl LayoutConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable Auto-track reconciliation.
    pub fn reconcile(mut self, enabled: bool) -> Self {
        self.config.reconcile = enabled;
        self
    }

    /// Set the reconciliation tolerance.
    pub fn reconcile_tolerance(mut self, tolerance: f32) -> Self {
        self.config.reconcile_tolerance = tolerance;
        self
    }

    /// Enable or disable unbounded-height measurement in Auto rows.
    pub fn relax_auto_row_height(mut self, enabled: bool) -> Self {
        self.config.relax_auto_row_height = enabled;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> LayoutConfig {
        self.config
    }
}
