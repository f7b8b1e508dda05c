//! Scenario configuration loaded from YAML.
//!
//! A scenario lists the bodies in world order together with the run length and
//! collision threshold:
//!
//! ```yaml
//! simulation:
//!   steps: 500          # must be >= 0
//!   threshold: 0.5      # optional, defaults to 0.5
//!
//! bodies:
//!   - name: block1
//!     mass: 1.0
//!     position: 2.0
//!     velocity: -0.05
//!     track: true       # record this body's history
//!   - name: wall1
//!     mass: 9999999999.0
//!     position: -10.2   # velocity defaults to 0
//! ```
//!
//! [`ScenarioConfig::build`] validates the whole file before constructing the
//! [`Simulation`], so a bad entry never yields a partially built world.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::{
    Body, BodyId, HistoryRecorder, Simulation, World, DEFAULT_COLLISION_THRESHOLD,
};
use crate::error::{Error, Result};

/// Mass used for the two walls of the reference scenario.
pub const REFERENCE_WALL_MASS: f64 = 9_999_999_999.0;

fn default_threshold() -> f64 {
    DEFAULT_COLLISION_THRESHOLD
}

/// Run-level parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub steps: i64, // signed so that a negative value is reported, not a parse error
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

/// Initial state of one body.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub mass: f64,
    pub position: f64,
    #[serde(default)]
    pub velocity: f64,
    #[serde(default)]
    pub track: bool,
}

/// Top-level scenario.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub simulation: SimulationConfig,
    pub bodies: Vec<BodyConfig>,
}

impl BodyConfig {
    fn block(name: &str, mass: f64, position: f64, velocity: f64, track: bool) -> Self {
        Self {
            name: Some(name.to_string()),
            mass,
            position,
            velocity,
            track,
        }
    }
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Scenario from `path`, or the reference scenario when `path` is `None`,
    /// with the step count replaced by `steps` if given. Not validated; the
    /// override is checked by `validate`/`build` like any other value.
    pub fn load(path: Option<&Path>, steps: Option<i64>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_path(p)?,
            None => Self::reference(),
        };
        if let Some(steps) = steps {
            cfg.simulation.steps = steps;
        }
        Ok(cfg)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Ten blocks between two heavy walls at +-10.2, run for 500 steps with
    /// `block1` and `block3` tracked.
    pub fn reference() -> Self {
        let bodies = vec![
            BodyConfig::block("block1", 1.0, 2.0, -0.05, true),
            BodyConfig::block("block2", 30.0, -2.0, -0.02, false),
            BodyConfig::block("block3", 2.0, 8.0, -0.05, true),
            BodyConfig::block("block4", 40.0, -6.0, -0.1, false),
            BodyConfig::block("block5", 50.0, -9.0, -0.005, false),
            BodyConfig::block("block6", 70.0, -8.0, -0.01, false),
            BodyConfig::block("block7", 3.0, 4.0, 0.1, false),
            BodyConfig::block("block8", 4.0, 8.0, 0.06, false),
            BodyConfig::block("block9", 5.0, 10.0, -0.05, false),
            BodyConfig::block("block10", 90.0, -1.0, 0.1, false),
            BodyConfig::block("wall1", REFERENCE_WALL_MASS, -10.2, 0.0, false),
            BodyConfig::block("wall2", REFERENCE_WALL_MASS, 10.2, 0.0, false),
        ];
        Self {
            simulation: SimulationConfig {
                steps: 500,
                threshold: DEFAULT_COLLISION_THRESHOLD,
            },
            bodies,
        }
    }

    /// Check every value without building anything.
    pub fn validate(&self) -> Result<()> {
        if self.simulation.steps < 0 {
            return Err(Error::invalid(format!(
                "simulation.steps must be >= 0, got {}",
                self.simulation.steps
            )));
        }
        World::new(self.simulation.threshold)?;
        for (i, bc) in self.bodies.iter().enumerate() {
            Body::new(bc.mass, bc.position, bc.velocity).map_err(|e| {
                Error::invalid(format!("bodies[{i}] ({}): {e}", self.label(i)))
            })?;
        }
        Ok(())
    }

    /// Build the world (bodies in listed order) and a recorder tracking every
    /// body marked `track`, in listed order.
    pub fn build(&self) -> Result<Simulation> {
        self.validate()?;
        let mut world = World::new(self.simulation.threshold)?;
        for bc in &self.bodies {
            world.add_body(Body::new(bc.mass, bc.position, bc.velocity)?);
        }
        let mut history = HistoryRecorder::new();
        for (id, bc) in world.ids().zip(&self.bodies) {
            if bc.track {
                history.track(&world, id)?;
            }
        }
        if history.tracked().next().is_none() {
            warn!("scenario tracks no bodies; history will be empty");
        }
        Simulation::new(world, history)
    }

    /// Display name of the body at `index`: its configured name, or `body<index>`.
    pub fn label(&self, index: usize) -> String {
        self.bodies
            .get(index)
            .and_then(|b| b.name.clone())
            .unwrap_or_else(|| format!("body{index}"))
    }

    /// Display name for a body handle of a world built from this scenario.
    pub fn label_for(&self, id: BodyId) -> String {
        self.label(id.index())
    }
}
