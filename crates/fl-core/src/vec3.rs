//! 3D vector, axis-aligned bounds, and the `Located` trait.
//!
//! `Vec3` uses `f32` like every positional field in the engine.  Only the
//! handful of operations the engine and the flocking rules need are provided;
//! this is not a general linear-algebra type.

use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// A point or direction in 3D space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Vector with all three components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared Euclidean distance; the comparison callers should use for
    /// radius filtering (no square root).
    #[inline]
    pub fn distance_squared(self, other: Vec3) -> f32 {
        (self - other).length_squared()
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Component-wise clamp of every axis into `[min, max]`.
    #[inline]
    pub fn clamp_scalar(self, min: f32, max: f32) -> Vec3 {
        Vec3::new(
            clamp_axis(self.x, min, max),
            clamp_axis(self.y, min, max),
            clamp_axis(self.z, min, max),
        )
    }

    /// Component-wise clamp into `bounds`.
    #[inline]
    pub fn clamp_to(self, bounds: &Bounds) -> Vec3 {
        Vec3::new(
            clamp_axis(self.x, bounds.min.x, bounds.max.x),
            clamp_axis(self.y, bounds.min.y, bounds.max.y),
            clamp_axis(self.z, bounds.min.z, bounds.max.z),
        )
    }

    /// Components as an array, `[x, y, z]`.
    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

// Compare-and-select; unlike `f32::clamp` this never panics on `min > max`.
#[inline]
fn clamp_axis(v: f32, min: f32, max: f32) -> f32 {
    let v = if v < min { min } else { v };
    if v > max { max } else { v }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// An axis-aligned box `[min, max]` (closed on both ends).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// A cube spanning `[min, max]` on every axis.
    #[inline]
    pub const fn cube(min: f32, max: f32) -> Self {
        Self { min: Vec3::splat(min), max: Vec3::splat(max) }
    }

    /// Edge lengths per axis.
    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// `true` if `p` lies inside the closed box.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x
            && p.y >= self.min.y && p.y <= self.max.y
            && p.z >= self.min.z && p.z <= self.max.z
    }

    /// `true` if `min < max` on every axis and all corners are finite.
    pub fn is_valid(&self) -> bool {
        let finite = self.min.to_array().iter().chain(self.max.to_array().iter()).all(|v| v.is_finite());
        finite && self.min.x < self.max.x && self.min.y < self.max.y && self.min.z < self.max.z
    }
}

// ── Located ───────────────────────────────────────────────────────────────────

/// Anything with a position in 3D space: agent rows and messages.
///
/// The spatial index buckets by this position and neighbor queries are
/// centred on the querying agent's position.
pub trait Located {
    fn position(&self) -> Vec3;
}

impl Located for Vec3 {
    #[inline]
    fn position(&self) -> Vec3 {
        *self
    }
}
