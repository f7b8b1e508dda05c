use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Handle to a body owned by a [`World`](crate::core::World).
///
/// Issued by `World::add_body`; the wrapped value is the body's index in the
/// world's iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(usize);

impl BodyId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position of the body in its world's iteration order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point mass moving along a single axis.
///
/// Fields:
/// - `mass`: strictly positive; a wall is just a body with a very large mass
/// - `position`: 1D coordinate
/// - `velocity`: signed displacement per step
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    mass: f64,
    position: f64,
    velocity: f64,
}

impl Body {
    /// Create a new body after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidArgument` if `mass` is non-positive or any value is NaN/inf.
    pub fn new(mass: f64, position: f64, velocity: f64) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::invalid(format!(
                "mass must be finite and > 0, got {mass}"
            )));
        }
        if !position.is_finite() {
            return Err(Error::invalid("position must be finite"));
        }
        if !velocity.is_finite() {
            return Err(Error::invalid("velocity must be finite"));
        }
        Ok(Self {
            mass,
            position,
            velocity,
        })
    }

    /// A stationary body of the given mass, used as an immovable wall.
    pub fn wall(mass: f64, position: f64) -> Result<Self> {
        Self::new(mass, position, 0.0)
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Move by one step: `position += velocity`.
    #[inline]
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Resolve an elastic collision with `other` if the two are closer than `threshold`.
    ///
    /// Returns whether a collision was resolved. Positions are left untouched, so the
    /// pair may still overlap afterwards.
    pub fn collide(&mut self, other: &mut Body, threshold: f64) -> bool {
        if (self.position - other.position).abs() >= threshold {
            return false;
        }
        let (ma, mb) = (self.mass, other.mass);
        let total = ma + mb;
        // other's update needs the pre-collision velocity of self
        let va = self.velocity;
        let vb = other.velocity;
        self.velocity = (2.0 * mb) / total * vb + (ma - mb) / total * va;
        other.velocity = (mb - ma) / total * vb + (2.0 * ma) / total * va;
        true
    }

    /// Linear momentum `m v`.
    #[inline]
    pub fn momentum(&self) -> f64 {
        self.mass * self.velocity
    }

    /// Kinetic energy `1/2 m v^2`.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity * self.velocity
    }
}
