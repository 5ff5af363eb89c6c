//! Model wiring and population generation.

use tracing::info;

use fl_agent::{AgentStore, AgentStoreBuilder};
use fl_core::{Bounds, Environment, FlError, FlResult, SimRng};
use fl_function::FunctionDesc;
use fl_message::MessageSpec;
use fl_sim::ModelDescription;

use crate::env::{
    COLLISION_SCALE, GLOBAL_SCALE, INTERACTION_RADIUS, MATCH_SCALE, MAX_INITIAL_SPEED,
    MAX_POSITION, MIN_INITIAL_SPEED, MIN_POSITION, POPULATION_TO_GENERATE, SEPARATION_RADIUS,
    STEER_SCALE, TIME_SCALE,
};
use crate::functions::{InputData, OutputData};
use crate::rules::AlignmentRule;
use crate::{Boid, Location};

pub const MODEL_NAME: &str = "boids_spatial3d";
pub const AGENT_TYPE: &str = "Boid";
pub const LOCATION_LIST: &str = "location";

/// Build the two-layer flocking model over `env`.
///
/// The `location` list's radius is `INTERACTION_RADIUS` and its box is
/// `[MIN_POSITION, MAX_POSITION]` on every axis, both read from `env` now.
pub fn build_model(
    env:       Environment,
    alignment: AlignmentRule,
) -> FlResult<ModelDescription<Boid, Location>> {
    let radius = env.read(INTERACTION_RADIUS)?;
    let bounds = Bounds::cube(env.read(MIN_POSITION)?, env.read(MAX_POSITION)?);

    let output = FunctionDesc::new("outputdata", AGENT_TYPE, OutputData).output(LOCATION_LIST);
    let input = FunctionDesc::new("inputdata", AGENT_TYPE, InputData::new(alignment))
        .input(LOCATION_LIST)
        .requires(INTERACTION_RADIUS)
        .requires(SEPARATION_RADIUS)
        .requires(TIME_SCALE)
        .requires(GLOBAL_SCALE)
        .requires(STEER_SCALE)
        .requires(COLLISION_SCALE)
        .requires(MATCH_SCALE)
        .requires(MIN_POSITION)
        .requires(MAX_POSITION);

    Ok(ModelDescription::new(MODEL_NAME)
        .agent_type(AGENT_TYPE)
        .message_list(MessageSpec::new(LOCATION_LIST, radius, bounds))
        .function(output)
        .function(input)
        .layer(["outputdata"])
        .layer(["inputdata"])
        .environment(env))
}

/// Generate `POPULATION_TO_GENERATE` boids from `seed`.
///
/// Positions are uniform in the box.  Velocities have a uniform random
/// direction and a speed uniform in `[MIN_INITIAL_SPEED, MAX_INITIAL_SPEED]`.
pub fn generate_population(env: &Environment, seed: u64) -> FlResult<AgentStore<Boid>> {
    let count = env.read(POPULATION_TO_GENERATE)? as usize;
    let (min_pos, max_pos) = (env.read(MIN_POSITION)?, env.read(MAX_POSITION)?);
    let (min_speed, max_speed) = (env.read(MIN_INITIAL_SPEED)?, env.read(MAX_INITIAL_SPEED)?);

    let bounds = Bounds::cube(min_pos, max_pos);
    if !bounds.is_valid() {
        return Err(FlError::Config(format!(
            "MIN_POSITION {min_pos} must be below MAX_POSITION {max_pos}"
        )));
    }
    if !(min_speed.is_finite() && max_speed.is_finite() && min_speed <= max_speed) {
        return Err(FlError::Config(format!(
            "initial speed range [{min_speed}, {max_speed}] is empty"
        )));
    }

    let mut rng = SimRng::new(seed);
    let mut builder = AgentStoreBuilder::with_capacity(count, seed);
    for _ in 0..count {
        let position = rng.point_in(&bounds);
        let speed = rng.gen_range(min_speed..=max_speed);
        builder.create(Boid::new(position, rng.direction() * speed));
    }
    info!(count, seed, "population generated");
    Ok(builder.build())
}
