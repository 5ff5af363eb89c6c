//! Unit tests for fl-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, MessageListId, PopulationId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn narrow_ids_reject_overflow() {
        assert!(PopulationId::try_from(70_000usize).is_err());
        assert!(MessageListId::try_from(3usize).is_ok());
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(PopulationId::INVALID.0, u16::MAX);
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId#7");
    }
}

#[cfg(test)]
mod vec3 {
    use crate::{Bounds, Vec3};

    #[test]
    fn arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::splat(1.0);
        assert_eq!(a + b, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(a - b, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Vec3::new(0.5, 1.0, 1.5));
        assert_eq!(a.dot(b), 6.0);
    }

    #[test]
    fn distance() {
        let a = Vec3::ZERO;
        let b = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn clamp_per_axis() {
        let p = Vec3::new(0.7, -0.9, 0.2);
        assert_eq!(p.clamp_scalar(-0.5, 0.5), Vec3::new(0.5, -0.5, 0.2));
        let b = Bounds::cube(-0.5, 0.5);
        assert_eq!(p.clamp_to(&b), Vec3::new(0.5, -0.5, 0.2));
    }

    #[test]
    fn bounds_validity() {
        assert!(Bounds::cube(-1.0, 1.0).is_valid());
        assert!(!Bounds::cube(1.0, 1.0).is_valid());
        assert!(!Bounds::new(Vec3::ZERO, Vec3::new(1.0, f32::INFINITY, 1.0)).is_valid());
        assert_eq!(Bounds::cube(-0.5, 0.5).extent(), Vec3::splat(1.0));
    }

    #[test]
    fn bounds_contains_is_closed() {
        let b = Bounds::cube(0.0, 1.0);
        assert!(b.contains(Vec3::splat(1.0)));
        assert!(b.contains(Vec3::ZERO));
        assert!(!b.contains(Vec3::new(1.0001, 0.5, 0.5)));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimConfig, Step};

    #[test]
    fn step_arithmetic() {
        let s = Step(10);
        assert_eq!(s.next(), Step(11));
        assert_eq!(s + 5, Step(15));
        assert_eq!(Step(15) - s, 5);
        assert_eq!(Step(15).since(s), 5);
        assert_eq!(s.to_string(), "S10");
    }

    #[test]
    fn snapshot_interval() {
        let cfg = SimConfig { output_interval_steps: 5, ..SimConfig::default() };
        assert!(cfg.snapshot_due(Step(5)));
        assert!(cfg.snapshot_due(Step(10)));
        assert!(!cfg.snapshot_due(Step(7)));

        let off = SimConfig::default();
        assert!(!off.snapshot_due(Step(5)));
        assert_eq!(off.end_step(), Step(100));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, Bounds, SimRng};

    #[test]
    fn agent_rng_depends_on_id_not_row() {
        let mut a = AgentRng::new(42, AgentId(3));
        let mut b = AgentRng::new(42, AgentId(3));
        let mut c = AgentRng::new(42, AgentId(4));
        let (x, y, z): (u64, u64, u64) = (a.random(), b.random(), c.random());
        assert_eq!(x, y);
        assert_ne!(x, z);
    }

    #[test]
    fn point_in_stays_in_bounds() {
        let mut rng = SimRng::new(7);
        let b = Bounds::cube(-0.5, 0.5);
        for _ in 0..1_000 {
            assert!(b.contains(rng.point_in(&b)));
        }
    }

    #[test]
    fn direction_is_unit_length() {
        let mut rng = SimRng::new(7);
        for _ in 0..1_000 {
            let d = rng.direction();
            assert!((d.length() - 1.0).abs() < 1e-5, "got {}", d.length());
        }
    }
}

#[cfg(test)]
mod env {
    use crate::{EnvKey, EnvType, EnvValue, Environment, FlError};

    const RADIUS: EnvKey<f32> = EnvKey::new("INTERACTION_RADIUS");

    fn sample() -> Environment {
        let mut env = Environment::new();
        env.define("INTERACTION_RADIUS", 0.1f32).unwrap();
        env.define("POPULATION_TO_GENERATE", 32_768u32).unwrap();
        env
    }

    #[test]
    fn define_and_read() {
        let env = sample();
        assert_eq!(env.get::<f32>("INTERACTION_RADIUS").unwrap(), 0.1);
        assert_eq!(env.read(RADIUS).unwrap(), 0.1);
        assert_eq!(env.get::<u32>("POPULATION_TO_GENERATE").unwrap(), 32_768);
        assert_eq!(env.len(), 2);
        assert_eq!(env.type_of("INTERACTION_RADIUS"), Some(EnvType::F32));
    }

    #[test]
    fn duplicate_define_is_rejected() {
        let mut env = sample();
        let err = env.define("INTERACTION_RADIUS", 0.2f32).unwrap_err();
        assert_eq!(err, FlError::DuplicateProperty("INTERACTION_RADIUS".into()));
    }

    #[test]
    fn unknown_name_is_undefined() {
        let env = sample();
        match env.get::<f32>("NOPE") {
            Err(FlError::UndefinedProperty { name, defined: None, .. }) => assert_eq!(name, "NOPE"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn type_mismatch_is_undefined() {
        let env = sample();
        match env.get::<f64>("INTERACTION_RADIUS") {
            Err(FlError::UndefinedProperty { requested, defined, .. }) => {
                assert_eq!(requested, EnvType::F64);
                assert_eq!(defined, Some(EnvType::F32));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn set_requires_matching_type() {
        let mut env = sample();
        env.set("INTERACTION_RADIUS", 0.2f32).unwrap();
        assert_eq!(env.read(RADIUS).unwrap(), 0.2);
        assert!(env.set("INTERACTION_RADIUS", 0.2f64).is_err());
        assert!(env.set("MISSING", 1.0f32).is_err());
    }

    #[test]
    fn require_checks_type() {
        let env = sample();
        assert!(env.require("INTERACTION_RADIUS", EnvType::F32).is_ok());
        assert!(env.require("INTERACTION_RADIUS", EnvType::U32).is_err());
        assert!(env.require("MISSING", EnvType::F32).is_err());
    }

    #[test]
    fn overrides_are_converted_to_defined_type() {
        let mut env = sample();
        env.apply_overrides([("INTERACTION_RADIUS", 0.05), ("POPULATION_TO_GENERATE", 128.0)])
            .unwrap();
        assert_eq!(env.read(RADIUS).unwrap(), 0.05);
        assert_eq!(env.value("POPULATION_TO_GENERATE"), Some(EnvValue::U32(128)));
    }

    #[test]
    fn overrides_reject_fractional_integers() {
        let mut env = sample();
        let err = env.apply_overrides([("POPULATION_TO_GENERATE", 1.5)]).unwrap_err();
        assert!(matches!(err, FlError::Config(_)));
        assert!(env.apply_overrides([("POPULATION_TO_GENERATE", -1.0)]).is_err());
    }

    #[test]
    fn integer_conversion_checks_range() {
        use EnvType::{I32, I64, U32, U64};
        assert_eq!(EnvValue::from_f64(I64, 1e30), None);
        assert_eq!(EnvValue::from_f64(I64, -1e30), None);
        assert_eq!(EnvValue::from_f64(I64, -9_223_372_036_854_775_808.0), Some(EnvValue::I64(i64::MIN)));
        assert_eq!(EnvValue::from_f64(U64, 1e19), Some(EnvValue::U64(10_000_000_000_000_000_000)));
        assert_eq!(EnvValue::from_f64(U64, 18_446_744_073_709_551_616.0), None);
        assert_eq!(EnvValue::from_f64(U64, -1.0), None);
        assert_eq!(EnvValue::from_f64(I32, 2_147_483_647.0), Some(EnvValue::I32(i32::MAX)));
        assert_eq!(EnvValue::from_f64(I32, 2_147_483_648.0), None);
        assert_eq!(EnvValue::from_f64(U32, 4_294_967_295.0), Some(EnvValue::U32(u32::MAX)));
        assert_eq!(EnvValue::from_f64(U32, 4_294_967_296.0), None);
    }

    #[test]
    fn iteration_follows_definition_order() {
        let env = sample();
        let names: Vec<&str> = env.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["INTERACTION_RADIUS", "POPULATION_TO_GENERATE"]);
    }

    #[test]
    fn error_message_names_property() {
        let env = sample();
        let msg = env.get::<i32>("INTERACTION_RADIUS").unwrap_err().to_string();
        assert!(msg.contains("INTERACTION_RADIUS"), "{msg}");
        assert!(msg.contains("f32"), "{msg}");
    }
}
