//! The `Boid` agent row and the `Location` message it publishes.

use fl_core::{AgentId, Located, Vec3};
use fl_output::SnapshotRecord;

/// One boid: position and velocity.
///
/// Identity is the store's `AgentId`, not a field.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boid {
    pub x:  f32,
    pub y:  f32,
    pub z:  f32,
    pub fx: f32,
    pub fy: f32,
    pub fz: f32,
}

impl Boid {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            x:  position.x,
            y:  position.y,
            z:  position.z,
            fx: velocity.x,
            fy: velocity.y,
            fz: velocity.z,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        Vec3::new(self.fx, self.fy, self.fz)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity().length()
    }

    #[inline]
    pub fn set_position(&mut self, p: Vec3) {
        (self.x, self.y, self.z) = (p.x, p.y, p.z);
    }

    #[inline]
    pub fn set_velocity(&mut self, v: Vec3) {
        (self.fx, self.fy, self.fz) = (v.x, v.y, v.z);
    }
}

impl Located for Boid {
    #[inline]
    fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl SnapshotRecord for Boid {
    const COLUMNS: &'static [&'static str] = &["x", "y", "z", "fx", "fy", "fz"];

    fn write_fields(&self, out: &mut Vec<String>) {
        out.extend([self.x, self.y, self.z, self.fx, self.fy, self.fz].map(|v| v.to_string()));
    }
}

/// Publicly visible state of a boid for one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Location {
    pub id: AgentId,
    pub x:  f32,
    pub y:  f32,
    pub z:  f32,
    pub fx: f32,
    pub fy: f32,
    pub fz: f32,
}

impl Location {
    pub fn of(id: AgentId, boid: &Boid) -> Self {
        Self { id, x: boid.x, y: boid.y, z: boid.z, fx: boid.fx, fy: boid.fy, fz: boid.fz }
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        Vec3::new(self.fx, self.fy, self.fz)
    }
}

impl Located for Location {
    #[inline]
    fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}
