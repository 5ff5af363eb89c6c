//! Static description of a message list.

use fl_core::Bounds;
use fl_spatial::{GridSpec, SpatialError, SpatialResult};

/// Name, interaction radius and spatial extent of one message list.
///
/// `cell_size` defaults to `radius`, which gives the 27-cell query its
/// tightest block.  A larger cell is allowed; a smaller one is rejected by
/// [`validate`](Self::validate).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageSpec {
    pub name:      String,
    pub radius:    f32,
    pub cell_size: Option<f32>,
    pub bounds:    Bounds,
}

impl MessageSpec {
    pub fn new(name: impl Into<String>, radius: f32, bounds: Bounds) -> Self {
        Self { name: name.into(), radius, cell_size: None, bounds }
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = Some(cell_size);
        self
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size.unwrap_or(self.radius)
    }

    pub fn validate(&self) -> SpatialResult<()> {
        self.grid_spec().map(|_| ())
    }

    /// Grid geometry for this list, validated.
    pub fn grid_spec(&self) -> SpatialResult<GridSpec> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SpatialError::InvalidRadius(self.radius));
        }
        let spec = GridSpec::new(self.cell_size(), self.bounds)?;
        if self.radius > spec.cell_size {
            return Err(SpatialError::RadiusExceedsCellSize {
                radius:    self.radius,
                cell_size: spec.cell_size,
            });
        }
        Ok(spec)
    }
}
