//! Discrete-time, one-dimensional elastic-collision simulator.
//!
//! Point masses move along a single axis at constant velocity. After each
//! step's motion every pair closer than a threshold undergoes an elastic
//! collision, and the position/velocity of chosen bodies is recorded per step.
//!
//! ```
//! use blockcollide::core::{Body, HistoryRecorder, Simulation, World};
//!
//! # fn main() -> blockcollide::error::Result<()> {
//! let mut world = World::new(0.5)?;
//! let a = world.add_body(Body::new(1.0, -1.0, 0.5)?);
//! let b = world.add_body(Body::new(1.0, 1.0, -0.5)?);
//!
//! let mut history = HistoryRecorder::new();
//! history.track(&world, a)?;
//! history.track(&world, b)?;
//!
//! let mut sim = Simulation::new(world, history)?;
//! sim.run(3)?;
//! assert_eq!(sim.world().bodies()[0].velocity(), -0.5);
//! assert_eq!(sim.history().series_for(b)?.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod stats;

pub use crate::config::{BodyConfig, ScenarioConfig, SimulationConfig};
pub use crate::core::{Body, BodyId, HistoryRecorder, Sample, Series, Simulation, World};
pub use crate::error::{Error, Result};
pub use crate::stats::{Histogram, Summary};
