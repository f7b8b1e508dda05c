//! Simulation core: bodies, the world that moves and collides them, the
//! step loop, and the per-step history recorder.

pub mod body;
pub mod history;
pub mod sim;
pub mod world;

pub use body::{Body, BodyId};
pub use history::{HistoryRecorder, Sample, Series};
pub use sim::Simulation;
pub use world::{World, DEFAULT_COLLISION_THRESHOLD};
