//! Unit tests for fl-function.

use fl_core::{AgentId, Bounds, EnvKey, Environment, Located, Step, Vec3};
use fl_message::{MessageList, MessageSpec};

use crate::AgentContext;

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
struct Dot {
    pos: Vec3,
    hits: u32,
}

impl Located for Dot {
    fn position(&self) -> Vec3 {
        self.pos
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Ping {
    from: AgentId,
    at:   Vec3,
}

impl Located for Ping {
    fn position(&self) -> Vec3 {
        self.at
    }
}

const SCALE: EnvKey<f32> = EnvKey::new("SCALE");

fn env() -> Environment {
    let mut env = Environment::new();
    env.define("SCALE", 2.0f32).unwrap();
    env
}

fn inbox(points: &[(u32, f32)]) -> MessageList<Ping> {
    let mut list = MessageList::new(MessageSpec::new("ping", 0.1, Bounds::cube(-0.5, 0.5))).unwrap();
    list.store_mut().extend(
        points.iter().map(|&(id, x)| Ping { from: AgentId(id), at: Vec3::new(x, 0.0, 0.0) }),
    );
    list.publish_and_index();
    list
}

fn ctx<'a>(
    agent: &'a Dot,
    env: &'a Environment,
    inbox: Option<&'a MessageList<Ping>>,
) -> AgentContext<'a, Dot, Ping> {
    AgentContext::new(AgentId(0), 0, agent, Step(3), env, inbox)
}

// ── Context ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod context {
    use fl_core::{AgentId, Vec3};

    use super::*;
    use crate::FunctionError;

    #[test]
    fn messages_without_input_is_an_error() {
        let me = Dot { pos: Vec3::ZERO, hits: 0 };
        let env = env();
        let c = ctx(&me, &env, None);
        assert!(matches!(c.messages().err(), Some(FunctionError::NoMessageInput)));
        assert!(c.message_radius().is_err());
    }

    #[test]
    fn messages_are_centred_on_own_position() {
        let me = Dot { pos: Vec3::new(0.3, 0.0, 0.0), hits: 0 };
        let env = env();
        let list = inbox(&[(0, 0.3), (1, 0.35), (2, -0.4)]);
        let c = ctx(&me, &env, Some(&list));

        let near: Vec<AgentId> = c
            .messages()
            .unwrap()
            .filter(|m| m.at.distance(me.pos) < 0.1)
            .map(|m| m.from)
            .collect();
        assert!(near.contains(&AgentId(0)));
        assert!(near.contains(&AgentId(1)));
        assert!(!near.contains(&AgentId(2)));
        assert_eq!(c.all_messages().unwrap().len(), 3);
        assert_eq!(c.message_radius().unwrap(), 0.1);
    }

    #[test]
    fn read_env_reports_property() {
        let me = Dot { pos: Vec3::ZERO, hits: 0 };
        let env = env();
        let c = ctx(&me, &env, None);
        assert_eq!(c.read_env(SCALE).unwrap(), 2.0);

        const MISSING: fl_core::EnvKey<f32> = fl_core::EnvKey::new("MISSING");
        assert!(matches!(c.read_env(MISSING), Err(FunctionError::Env(_))));
        assert_eq!(c.step, fl_core::Step(3));
    }
}

// ── Functions ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod functions {
    use fl_core::{AgentId, AgentRng, Vec3};

    use super::*;
    use crate::{AgentFunction, FunctionDesc, NoopFunction, Outcome, agent_fn};

    #[test]
    fn closure_is_an_agent_function() {
        let f = agent_fn::<Dot, Ping, _>(|ctx, next, _rng| {
            let scale = ctx.read_env(SCALE)?;
            next.pos = ctx.agent.pos * scale;
            Ok(Outcome::emit(Ping { from: ctx.id, at: next.pos }))
        });

        let me = Dot { pos: Vec3::splat(0.1), hits: 0 };
        let env = env();
        let c = ctx(&me, &env, None);
        let mut next = me.clone();
        let mut rng = AgentRng::new(0, AgentId(0));

        let out = f.execute(&c, &mut next, &mut rng).unwrap();
        assert_eq!(next.pos, Vec3::splat(0.2));
        assert_eq!(out.message.as_ref().map(|m| m.at), Some(Vec3::splat(0.2)));
        assert!(!out.is_dead());
    }

    #[test]
    fn counting_neighbors() {
        let f = agent_fn::<Dot, Ping, _>(|ctx, next, _rng| {
            next.hits = ctx.messages()?.filter(|m| m.from != ctx.id).count() as u32;
            Ok(Outcome::alive())
        });

        let me = Dot { pos: Vec3::ZERO, hits: 0 };
        let env = env();
        let list = inbox(&[(0, 0.0), (1, 0.01), (2, 0.02)]);
        let c = ctx(&me, &env, Some(&list));
        let mut next = me.clone();
        f.execute(&c, &mut next, &mut AgentRng::new(0, AgentId(0))).unwrap();
        assert_eq!(next.hits, 2);
    }

    #[test]
    fn noop_changes_nothing() {
        let me = Dot { pos: Vec3::ZERO, hits: 7 };
        let env = env();
        let c = ctx(&me, &env, None);
        let mut next = me.clone();
        let out = AgentFunction::<Dot, Ping>::execute(
            &NoopFunction,
            &c,
            &mut next,
            &mut AgentRng::new(0, AgentId(0)),
        )
        .unwrap();
        assert_eq!(next, me);
        assert_eq!(out, Outcome::alive());
    }

    #[test]
    fn desc_builder_records_wiring() {
        let d = FunctionDesc::<Dot, Ping>::new("move", "Dot", NoopFunction)
            .input("ping")
            .output("echo")
            .optional_output()
            .allow_death()
            .requires(SCALE);
        assert_eq!(d.message_input.as_deref(), Some("ping"));
        assert_eq!(d.message_output.as_deref(), Some("echo"));
        assert!(d.optional_output && d.allow_death && !d.allow_spawn);
        assert_eq!(d.required_env, vec![("SCALE".to_string(), fl_core::EnvType::F32)]);
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod outcome {
    use crate::{Fate, Outcome};

    #[test]
    fn builders() {
        let o: Outcome<u8, u16> = Outcome::dead().with_message(3).with_spawn(1);
        assert_eq!(o.fate, Fate::Dead);
        assert_eq!(o.message, Some(3));
        assert_eq!(o.spawn, Some(1));
        assert_eq!(Outcome::<u8, u16>::default().fate, Fate::Alive);
    }
}
