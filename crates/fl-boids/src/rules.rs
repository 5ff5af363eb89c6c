//! Flocking rules: neighbor accumulation, steering, integration.
//!
//! Per agent and step:
//!
//! 1. **Observe** every other boid strictly within `INTERACTION_RADIUS`:
//!    sum positions and velocities; those strictly within
//!    `SEPARATION_RADIUS` also add to the collision centre.
//! 2. **Steer**: cohesion + alignment + separation, scaled by
//!    `GLOBAL_SCALE`.
//! 3. **Integrate**: add the change to the velocity, cap speed at 1, move by
//!    `velocity * TIME_SCALE`, clamp each axis to
//!    `[MIN_POSITION, MAX_POSITION]`.
//!
//! All three are pure functions of their inputs so they can be tested
//! without a simulation.

use fl_core::{Environment, FlResult, Vec3};

use crate::env::{
    COLLISION_SCALE, GLOBAL_SCALE, INTERACTION_RADIUS, MATCH_SCALE, MAX_POSITION, MIN_POSITION,
    SEPARATION_RADIUS, STEER_SCALE, TIME_SCALE,
};

// ── AlignmentRule ─────────────────────────────────────────────────────────────

/// How the alignment (velocity matching) term is normalised.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AlignmentRule {
    /// Summed neighbor velocity divided by the perceived count and then by
    /// the collision count; applied only when some neighbor is inside the
    /// separation radius.  The separation term uses the summed collision
    /// centre.  Matches the reference boids model bit for bit.
    #[default]
    Legacy,
    /// Mean neighbor velocity, applied whenever any neighbor is perceived.
    /// The separation term uses the mean collision centre.
    Averaged,
}

// ── FlockParams ───────────────────────────────────────────────────────────────

/// The environment properties the rules read, fetched once per agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlockParams {
    pub interaction_radius: f32,
    pub separation_radius:  f32,
    pub time_scale:         f32,
    pub global_scale:       f32,
    pub steer_scale:        f32,
    pub collision_scale:    f32,
    pub match_scale:        f32,
    pub min_position:       f32,
    pub max_position:       f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            interaction_radius: 0.1,
            separation_radius:  0.005,
            time_scale:         0.0005,
            global_scale:       0.15,
            steer_scale:        0.65,
            collision_scale:    0.75,
            match_scale:        1.25,
            min_position:       -0.5,
            max_position:       0.5,
        }
    }
}

impl FlockParams {
    pub fn from_env(env: &Environment) -> FlResult<Self> {
        Ok(Self {
            interaction_radius: env.read(INTERACTION_RADIUS)?,
            separation_radius:  env.read(SEPARATION_RADIUS)?,
            time_scale:         env.read(TIME_SCALE)?,
            global_scale:       env.read(GLOBAL_SCALE)?,
            steer_scale:        env.read(STEER_SCALE)?,
            collision_scale:    env.read(COLLISION_SCALE)?,
            match_scale:        env.read(MATCH_SCALE)?,
            min_position:       env.read(MIN_POSITION)?,
            max_position:       env.read(MAX_POSITION)?,
        })
    }
}

// ── Neighborhood ──────────────────────────────────────────────────────────────

/// Running sums over the neighbors one boid perceives.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Neighborhood {
    pub perceived_centre: Vec3,
    pub perceived_count:  u32,
    pub global_velocity:  Vec3,
    pub collision_centre: Vec3,
    pub collision_count:  u32,
}

impl Neighborhood {
    /// Fold one neighbor (position `other`, velocity `velocity`) seen from
    /// `me`.  Self-exclusion is the caller's job.
    pub fn observe(&mut self, me: Vec3, other: Vec3, velocity: Vec3, p: &FlockParams) {
        let separation = me.distance(other);
        if separation < p.interaction_radius {
            self.perceived_centre += other;
            self.perceived_count += 1;
            self.global_velocity += velocity;

            if separation < p.separation_radius {
                self.collision_centre += other;
                self.collision_count += 1;
            }
        }
    }

    /// Total velocity change for a boid at `me`, already scaled by
    /// `GLOBAL_SCALE`.  Zero when nothing was perceived.
    pub fn velocity_change(&self, me: Vec3, p: &FlockParams, rule: AlignmentRule) -> Vec3 {
        let perceived = self.perceived_count as f32;
        let collisions = self.collision_count as f32;

        // Rule 1: cohesion.
        let steer = if self.perceived_count > 0 {
            (self.perceived_centre / perceived - me) * p.steer_scale
        } else {
            Vec3::ZERO
        };

        // Rule 2: alignment.
        let matching = match rule {
            AlignmentRule::Legacy if self.collision_count > 0 => {
                self.global_velocity / perceived / collisions * p.match_scale
            }
            AlignmentRule::Averaged if self.perceived_count > 0 => {
                self.global_velocity / perceived * p.match_scale
            }
            _ => Vec3::ZERO,
        };

        // Rule 3: separation.
        let avoid = if self.collision_count > 0 {
            let centre = match rule {
                AlignmentRule::Legacy => self.collision_centre,
                AlignmentRule::Averaged => self.collision_centre / collisions,
            };
            (me - centre) * p.collision_scale
        } else {
            Vec3::ZERO
        };

        (steer + matching + avoid) * p.global_scale
    }
}

// ── Integration ───────────────────────────────────────────────────────────────

/// Apply `change` to `velocity`, cap the speed at 1, then move and clamp.
///
/// Returns the new `(position, velocity)`.
pub fn integrate(position: Vec3, velocity: Vec3, change: Vec3, p: &FlockParams) -> (Vec3, Vec3) {
    let mut v = velocity + change;
    let speed = v.length();
    if speed > 1.0 {
        v = v / speed;
    }
    let pos = (position + v * p.time_scale).clamp_scalar(p.min_position, p.max_position);
    (pos, v)
}
