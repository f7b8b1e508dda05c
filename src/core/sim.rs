use log::info;

use crate::core::body::BodyId;
use crate::core::history::HistoryRecorder;
use crate::core::world::World;
use crate::error::{Error, Result};

/// Fixed-step driver: records tracked bodies, then advances the world.
///
/// The world and the recorder are built by the caller and handed over here;
/// `into_parts` gives them back after the run. Every tracked body is checked
/// against the world once, in `new` and `track`, so stepping cannot fail.
#[derive(Debug, Clone)]
pub struct Simulation {
    world: World,
    history: HistoryRecorder,
    steps_taken: u64,
    collisions: u64,
}

impl Simulation {
    /// Errors: `Error::UnknownBody` if `history` tracks a body `world` does not hold.
    pub fn new(world: World, history: HistoryRecorder) -> Result<Self> {
        history.check_world(&world)?;
        Ok(Self {
            world,
            history,
            steps_taken: 0,
            collisions: 0,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn history(&self) -> &HistoryRecorder {
        &self.history
    }

    /// Start recording another body of this simulation's world.
    pub fn track(&mut self, body: BodyId) -> Result<()> {
        self.history.track(&self.world, body)
    }

    /// Steps executed since construction.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Pair collisions resolved since construction.
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// Advance exactly one time unit.
    ///
    /// The snapshot is taken first, so the entry written by this call holds the
    /// state left by the previous step (the initial state on the first call).
    pub fn step(&mut self) {
        self.history.record(&self.world);
        let resolved = self.world.step();
        self.collisions += resolved as u64;
        self.steps_taken += 1;
    }

    /// Run `steps` consecutive steps.
    ///
    /// Errors: `Error::InvalidArgument` if `steps` is negative; nothing is
    /// recorded or moved in that case.
    pub fn run(&mut self, steps: i64) -> Result<()> {
        let steps = u64::try_from(steps).map_err(|_| {
            Error::invalid(format!("step count must be >= 0, got {steps}"))
        })?;
        info!(
            "running {} steps over {} bodies (threshold {})",
            steps,
            self.world.len(),
            self.world.threshold()
        );
        let collisions_before = self.collisions;
        for _ in 0..steps {
            self.step();
        }
        info!(
            "run finished after {} steps, {} collisions",
            self.steps_taken,
            self.collisions - collisions_before
        );
        Ok(())
    }

    /// Hand back the world and the recorder.
    pub fn into_parts(self) -> (World, HistoryRecorder) {
        (self.world, self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Body;

    fn head_on() -> Result<Simulation> {
        let mut world = World::new(0.5)?;
        let a = world.add_body(Body::new(1.0, -1.0, 0.5)?);
        let b = world.add_body(Body::new(1.0, 1.0, -0.5)?);
        let mut history = HistoryRecorder::new();
        history.track(&world, a)?;
        history.track(&world, b)?;
        Simulation::new(world, history)
    }

    #[test]
    fn negative_steps_rejected_before_mutation() -> Result<()> {
        let mut sim = head_on()?;
        let err = sim.run(-1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(sim.steps_taken(), 0);
        assert_eq!(sim.history().snapshots(), 0);
        assert_eq!(sim.world().bodies()[0].position(), -1.0);
        Ok(())
    }

    #[test]
    fn zero_steps_is_a_no_op() -> Result<()> {
        let mut sim = head_on()?;
        sim.run(0)?;
        assert_eq!(sim.steps_taken(), 0);
        assert_eq!(sim.history().snapshots(), 0);
        Ok(())
    }

    #[test]
    fn first_entry_is_initial_state() -> Result<()> {
        let mut sim = head_on()?;
        sim.step();
        let id = sim.history().tracked().next().expect("tracked body");
        let s = sim.history().series_for(id)?;
        assert_eq!(s.samples[0].position, -1.0);
        assert_eq!(s.samples[0].velocity, 0.5);
        // the world itself has already moved
        assert_eq!(sim.world().bodies()[0].position(), -0.5);
        Ok(())
    }

    #[test]
    fn recorder_from_another_world_rejected() -> Result<()> {
        let mut big = World::default();
        for x in [0.0, 5.0, 10.0] {
            big.add_body(Body::new(1.0, x, 0.0)?);
        }
        let last = big.ids().last().expect("three bodies");
        let mut history = HistoryRecorder::new();
        history.track(&big, last)?;

        let mut small = World::default();
        small.add_body(Body::new(1.0, 0.0, 0.0)?);
        let err = Simulation::new(small, history.clone()).unwrap_err();
        assert!(matches!(err, Error::UnknownBody(id) if id == last));

        // the same recorder is fine with the world it was built against
        let mut sim = Simulation::new(big, history)?;
        sim.run(2)?;
        assert_eq!(sim.history().series_for(last)?.len(), 2);
        Ok(())
    }

    #[test]
    fn collisions_are_counted() -> Result<()> {
        let mut sim = head_on()?;
        // meet at the origin on the second step, then separate
        sim.run(3)?;
        assert_eq!(sim.collisions(), 1);
        assert_eq!(sim.steps_taken(), 3);
        let (world, history) = sim.into_parts();
        assert_eq!(world.len(), 2);
        assert_eq!(history.snapshots(), 3);
        Ok(())
    }
}
