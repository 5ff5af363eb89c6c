//! Environment properties of the flocking model and their defaults.

use fl_core::{EnvKey, Environment, FlResult};

pub const POPULATION_TO_GENERATE: EnvKey<u32> = EnvKey::new("POPULATION_TO_GENERATE");

pub const MIN_POSITION: EnvKey<f32> = EnvKey::new("MIN_POSITION");
pub const MAX_POSITION: EnvKey<f32> = EnvKey::new("MAX_POSITION");

pub const MAX_INITIAL_SPEED: EnvKey<f32> = EnvKey::new("MAX_INITIAL_SPEED");
pub const MIN_INITIAL_SPEED: EnvKey<f32> = EnvKey::new("MIN_INITIAL_SPEED");

pub const INTERACTION_RADIUS: EnvKey<f32> = EnvKey::new("INTERACTION_RADIUS");
pub const SEPARATION_RADIUS: EnvKey<f32> = EnvKey::new("SEPARATION_RADIUS");

pub const TIME_SCALE: EnvKey<f32> = EnvKey::new("TIME_SCALE");
pub const GLOBAL_SCALE: EnvKey<f32> = EnvKey::new("GLOBAL_SCALE");

pub const STEER_SCALE: EnvKey<f32> = EnvKey::new("STEER_SCALE");
pub const COLLISION_SCALE: EnvKey<f32> = EnvKey::new("COLLISION_SCALE");
pub const MATCH_SCALE: EnvKey<f32> = EnvKey::new("MATCH_SCALE");

/// The model's environment with every property at its default value.
///
/// | Property                 | Default  |
/// |--------------------------|----------|
/// | `POPULATION_TO_GENERATE` | 32768    |
/// | `MIN_POSITION`           | -0.5     |
/// | `MAX_POSITION`           | 0.5      |
/// | `MAX_INITIAL_SPEED`      | 1.0      |
/// | `MIN_INITIAL_SPEED`      | 0.01     |
/// | `INTERACTION_RADIUS`     | 0.1      |
/// | `SEPARATION_RADIUS`      | 0.005    |
/// | `TIME_SCALE`             | 0.0005   |
/// | `GLOBAL_SCALE`           | 0.15     |
/// | `STEER_SCALE`            | 0.65     |
/// | `COLLISION_SCALE`        | 0.75     |
/// | `MATCH_SCALE`            | 1.25     |
pub fn default_environment() -> FlResult<Environment> {
    let mut env = Environment::new();
    env.define(POPULATION_TO_GENERATE.name(), 32_768u32)?;
    env.define(MIN_POSITION.name(), -0.5f32)?;
    env.define(MAX_POSITION.name(), 0.5f32)?;
    env.define(MAX_INITIAL_SPEED.name(), 1.0f32)?;
    env.define(MIN_INITIAL_SPEED.name(), 0.01f32)?;
    env.define(INTERACTION_RADIUS.name(), 0.1f32)?;
    env.define(SEPARATION_RADIUS.name(), 0.005f32)?;
    env.define(TIME_SCALE.name(), 0.0005f32)?;
    env.define(GLOBAL_SCALE.name(), 0.15f32)?;
    env.define(STEER_SCALE.name(), 0.65f32)?;
    env.define(COLLISION_SCALE.name(), 0.75f32)?;
    env.define(MATCH_SCALE.name(), 1.25f32)?;
    Ok(env)
}
