use serde::{Deserialize, Serialize};

use crate::core::body::BodyId;
use crate::core::world::World;
use crate::error::{Error, Result};

/// One recorded observation of a tracked body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Index of the snapshot this sample belongs to (0 for the first snapshot).
    pub step: u64,
    pub position: f64,
    pub velocity: f64,
}

/// Recorded series of one tracked body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub body: BodyId,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn positions(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.position).collect()
    }

    pub fn velocities(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.velocity).collect()
    }
}

/// Per-step position/velocity recorder for a chosen subset of bodies.
///
/// Series are kept in registration order. A body tracked after some snapshots
/// were already taken only gets samples from then on, so its series is shorter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryRecorder {
    series: Vec<Series>,
    snapshots: u64,
}

impl HistoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `body` for recording.
    ///
    /// Errors:
    /// - `Error::UnknownBody` if `world` has no such body
    /// - `Error::AlreadyTracked` if the body is already registered
    pub fn track(&mut self, world: &World, body: BodyId) -> Result<()> {
        if !world.contains(body) {
            return Err(Error::UnknownBody(body));
        }
        if self.is_tracked(body) {
            return Err(Error::AlreadyTracked(body));
        }
        self.series.push(Series {
            body,
            samples: Vec::new(),
        });
        Ok(())
    }

    pub fn is_tracked(&self, body: BodyId) -> bool {
        self.series.iter().any(|s| s.body == body)
    }

    /// Tracked bodies in registration order.
    pub fn tracked(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.series.iter().map(|s| s.body)
    }

    /// Append the current position and velocity of every tracked body.
    ///
    /// All tracked bodies are looked up before anything is written, so a failed
    /// snapshot records nothing.
    pub fn snapshot(&mut self, world: &World) -> Result<()> {
        self.check_world(world)?;
        self.record(world);
        Ok(())
    }

    /// `Err(UnknownBody)` for the first tracked body that `world` does not hold.
    pub fn check_world(&self, world: &World) -> Result<()> {
        match self.tracked().find(|&id| !world.contains(id)) {
            Some(id) => Err(Error::UnknownBody(id)),
            None => Ok(()),
        }
    }

    /// Snapshot without the lookup check; every tracked id must be in `world`.
    pub(crate) fn record(&mut self, world: &World) {
        let step = self.snapshots;
        let bodies = world.bodies();
        for s in &mut self.series {
            let b = &bodies[s.body.index()];
            s.samples.push(Sample {
                step,
                position: b.position(),
                velocity: b.velocity(),
            });
        }
        self.snapshots += 1;
    }

    /// Full recorded sequence of `body`, in step order.
    pub fn series_for(&self, body: BodyId) -> Result<&Series> {
        self.series
            .iter()
            .find(|s| s.body == body)
            .ok_or(Error::UnknownBody(body))
    }

    /// All series, in registration order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Number of `snapshot` calls so far.
    pub fn snapshots(&self) -> u64 {
        self.snapshots
    }
}
