//! `fl-boids` — 3D boids flocking on the rust_flock engine.
//!
//! # Model
//!
//! ```text
//! agent   Boid     { x, y, z, fx, fy, fz }
//! message location { id, x, y, z, fx, fy, fz }   radius = INTERACTION_RADIUS
//!
//! layer 1: outputdata   Boid → location
//! layer 2: inputdata    location → Boid (cohesion, alignment, separation)
//! ```
//!
//! Space is clamped, not wrapped: boids that reach a face of the
//! `[MIN_POSITION, MAX_POSITION]` cube stay on it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`agent`]     | `Boid`, `Location`                                      |
//! | [`env`]       | property keys, `default_environment()`                  |
//! | [`rules`]     | `Neighborhood`, `FlockParams`, `AlignmentRule`, `integrate` |
//! | [`functions`] | `OutputData`, `InputData`                               |
//! | [`model`]     | `build_model`, `generate_population`                    |
//! | [`stats`]     | `FlockStats` — centroid and speed summaries             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let env = fl_boids::default_environment()?;
//! let boids = fl_boids::generate_population(&env, config.seed)?;
//! let model = fl_boids::build_model(env, AlignmentRule::Legacy)?;
//! let mut sim = SimBuilder::new(config, model).population(AGENT_TYPE, boids).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod agent;
pub mod env;
pub mod functions;
pub mod model;
pub mod rules;
pub mod stats;


pub use agent::{Boid, Location};
pub use env::default_environment;
pub use functions::{InputData, OutputData};
pub use model::{AGENT_TYPE, LOCATION_LIST, MODEL_NAME, build_model, generate_population};
pub use rules::{AlignmentRule, FlockParams, Neighborhood, integrate};
pub use stats::FlockStats;
