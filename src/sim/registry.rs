//! Peg and ball collections
//!
//! Both collections only grow; insertion order is creation order.

use crate::physics::BodyHandle;

#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    pegs: Vec<BodyHandle>,
    balls: Vec<BodyHandle>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_peg(&mut self, peg: BodyHandle) {
        self.pegs.push(peg);
    }

    pub fn add_ball(&mut self, ball: BodyHandle) {
        self.balls.push(ball);
    }

    pub fn pegs(&self) -> &[BodyHandle] {
        &self.pegs
    }

    pub fn balls(&self) -> &[BodyHandle] {
        &self.balls
    }

    /// Every registered body, balls first
    pub fn iter(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.balls.iter().chain(self.pegs.iter()).copied()
    }
}
