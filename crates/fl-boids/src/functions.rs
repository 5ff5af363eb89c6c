//! The two agent functions of the flocking model.

use fl_core::{AgentRng, Located};
use fl_function::{AgentContext, AgentFunction, FunctionResult, Outcome};

use crate::rules::{AlignmentRule, FlockParams, Neighborhood, integrate};
use crate::{Boid, Location};

/// Layer 1: publish the boid's position and velocity.
#[derive(Copy, Clone, Debug, Default)]
pub struct OutputData;

impl AgentFunction<Boid, Location> for OutputData {
    fn execute(
        &self,
        ctx:   &AgentContext<'_, Boid, Location>,
        _next: &mut Boid,
        _rng:  &mut AgentRng,
    ) -> FunctionResult<Outcome<Boid, Location>> {
        Ok(Outcome::emit(Location::of(ctx.id, ctx.agent)))
    }
}

/// Layer 2: read nearby locations and update velocity and position.
#[derive(Copy, Clone, Debug, Default)]
pub struct InputData {
    pub alignment: AlignmentRule,
}

impl InputData {
    pub fn new(alignment: AlignmentRule) -> Self {
        Self { alignment }
    }
}

impl AgentFunction<Boid, Location> for InputData {
    fn execute(
        &self,
        ctx:  &AgentContext<'_, Boid, Location>,
        next: &mut Boid,
        _rng: &mut AgentRng,
    ) -> FunctionResult<Outcome<Boid, Location>> {
        let params = FlockParams::from_env(ctx.env)?;
        let me = ctx.agent.position();

        let mut hood = Neighborhood::default();
        for msg in ctx.messages()? {
            if msg.id != ctx.id {
                hood.observe(me, msg.position(), msg.velocity(), &params);
            }
        }

        let change = hood.velocity_change(me, &params, self.alignment);
        let (position, velocity) = integrate(me, ctx.agent.velocity(), change, &params);
        next.set_position(position);
        next.set_velocity(velocity);
        Ok(Outcome::alive())
    }
}
