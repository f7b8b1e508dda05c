use log::debug;

use crate::core::body::{Body, BodyId};
use crate::error::{Error, Result};

/// Proximity below which two bodies are treated as colliding.
pub const DEFAULT_COLLISION_THRESHOLD: f64 = 0.5;

/// Owner of the body set for one run.
///
/// Bodies keep the order in which they were added. That order has no physical
/// meaning along the axis; it only fixes the pair order of the collision sweep.
#[derive(Debug, Clone)]
pub struct World {
    bodies: Vec<Body>,
    threshold: f64,
}

impl Default for World {
    fn default() -> Self {
        Self {
            bodies: Vec::new(),
            threshold: DEFAULT_COLLISION_THRESHOLD,
        }
    }
}

impl World {
    /// Create an empty world with the given collision threshold.
    ///
    /// Errors: `Error::InvalidArgument` if `threshold` is not finite and > 0.
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::invalid(format!(
                "collision threshold must be finite and > 0, got {threshold}"
            )));
        }
        Ok(Self {
            bodies: Vec::new(),
            threshold,
        })
    }

    /// Take ownership of `body` and return its handle.
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId::from_index(self.bodies.len());
        self.bodies.push(body);
        id
    }

    /// Bodies in iteration order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    /// Handles of all bodies, in iteration order.
    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        (0..self.bodies.len()).map(BodyId::from_index)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        id.index() < self.bodies.len()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Advance every body by one time unit, then resolve collisions on the
    /// post-motion positions. Returns the number of pairs resolved.
    pub fn step(&mut self) -> usize {
        for body in &mut self.bodies {
            body.advance();
        }
        self.resolve_collisions()
    }

    /// Sweep every pair `(i, j)`, `i < j`, in ascending order and resolve the
    /// ones closer than the threshold. Returns the number of pairs resolved.
    ///
    /// Pairs are resolved one after another: a velocity changed by `(i, j)` is
    /// the velocity seen by any later pair involving `i` or `j` in the same sweep.
    pub fn resolve_collisions(&mut self) -> usize {
        let n = self.bodies.len();
        let mut resolved = 0usize;
        for i in 0..n {
            // split so that bodies[i] and every bodies[j > i] can be borrowed together
            let (head, tail) = self.bodies.split_at_mut(i + 1);
            let bi = &mut head[i];
            for (k, bj) in tail.iter_mut().enumerate() {
                let j = i + 1 + k;
                if bi.collide(bj, self.threshold) {
                    resolved += 1;
                    debug!(
                        "collision ({i}, {j}) at x=({:.4}, {:.4}) -> v=({:.6}, {:.6})",
                        bi.position(),
                        bj.position(),
                        bi.velocity(),
                        bj.velocity()
                    );
                }
            }
        }
        resolved
    }

    /// Total linear momentum (diagnostic).
    pub fn total_momentum(&self) -> f64 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    /// Total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_of(bodies: &[(f64, f64, f64)]) -> Result<World> {
        let mut w = World::default();
        for &(m, x, v) in bodies {
            w.add_body(Body::new(m, x, v)?);
        }
        Ok(w)
    }

    #[test]
    fn threshold_validated() {
        assert!(World::new(0.0).is_err());
        assert!(World::new(-0.5).is_err());
        assert!(World::new(f64::NAN).is_err());
        assert!(World::new(0.5).is_ok());
    }

    #[test]
    fn add_body_issues_sequential_ids() -> Result<()> {
        let mut w = World::default();
        let a = w.add_body(Body::new(1.0, 0.0, 0.0)?);
        let b = w.add_body(Body::new(1.0, 5.0, 0.0)?);
        assert_eq!((a.index(), b.index()), (0, 1));
        assert_eq!(w.len(), 2);
        assert!(w.contains(b));
        assert!(!w.contains(BodyId::from_index(2)));
        assert_eq!(w.ids().collect::<Vec<_>>(), vec![a, b]);
        Ok(())
    }

    #[test]
    fn step_moves_then_collides() -> Result<()> {
        // 0.6 apart before motion, 0.2 apart after: the collision uses post-motion positions.
        let mut w = world_of(&[(1.0, 0.0, 0.2), (1.0, 0.6, -0.2)])?;
        assert_eq!(w.resolve_collisions(), 0);
        assert_eq!(w.step(), 1);
        let b = w.bodies();
        assert!((b[0].position() - 0.2).abs() < 1e-12);
        assert!((b[1].position() - 0.4).abs() < 1e-12);
        assert_eq!(b[0].velocity(), -0.2);
        assert_eq!(b[1].velocity(), 0.2);
        Ok(())
    }

    #[test]
    fn sweep_is_sequential_in_index_order() -> Result<()> {
        // Three coincident equal-mass bodies. Sequential resolution:
        // (0,1): v = [2, 1, 0]; (0,2): v = [0, 1, 2]; (1,2): v = [0, 2, 1]
        let mut w = world_of(&[(1.0, 0.0, 1.0), (1.0, 0.0, 2.0), (1.0, 0.0, 0.0)])?;
        assert_eq!(w.resolve_collisions(), 3);
        let v: Vec<f64> = w.bodies().iter().map(Body::velocity).collect();
        assert_eq!(v, vec![0.0, 2.0, 1.0]);
        Ok(())
    }

    #[test]
    fn distant_bodies_do_not_interact() -> Result<()> {
        let mut w = world_of(&[(1.0, -5.0, 0.1), (2.0, 5.0, -0.1)])?;
        for _ in 0..10 {
            assert_eq!(w.step(), 0);
        }
        assert_eq!(w.bodies()[0].velocity(), 0.1);
        assert_eq!(w.bodies()[1].velocity(), -0.1);
        Ok(())
    }

    #[test]
    fn empty_and_single_worlds_step() -> Result<()> {
        let mut w = World::default();
        assert_eq!(w.step(), 0);
        w.add_body(Body::new(1.0, 0.0, 1.0)?);
        assert_eq!(w.step(), 0);
        assert_eq!(w.bodies()[0].position(), 1.0);
        Ok(())
    }
}
