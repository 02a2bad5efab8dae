//! Surface sampling settings.

use crate::error::{Result, SurfaceError};

/// Radii are used as tabulated by default
pub const DEFAULT_SCALE: f64 = 1.0;
/// One point per Å² of scaled sphere area
pub const DEFAULT_DENSITY: f64 = 1.0;
/// Slack (Å) on the burial test so points tangent to a neighbour sphere survive
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
/// Upper bound on the candidate points sampled for a single atom
pub const MAX_POINTS_PER_ATOM: usize = 1 << 24;

/// Parameters shared by the sampler and the occlusion filter.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceSettings {
    /// Multiplier applied to every atomic radius
    pub scale: f64,
    /// Target points per Å² of each scaled sphere
    pub density: f64,
    /// Burial tolerance ε in Å
    pub tolerance: f64,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            density: DEFAULT_DENSITY,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SurfaceSettings {
    /// Settings with the default tolerance.
    pub fn new(scale: f64, density: f64) -> Self {
        Self {
            scale,
            density,
            ..Default::default()
        }
    }

    /// Reject non-positive (or non-finite) scale and density, and negative tolerance.
    pub fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(SurfaceError::InvalidParameter {
                name: "scale",
                value: self.scale,
            });
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(SurfaceError::InvalidParameter {
                name: "density",
                value: self.density,
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(SurfaceError::InvalidParameter {
                name: "tolerance",
                value: self.tolerance,
            });
        }
        Ok(())
    }
}
