//! Rolling per-body position history used to draw motion tails.

use crate::error::{MovieError, MovieResult};
use crate::loader::Snapshot;
use glam::DVec3;
use std::collections::VecDeque;

pub const MIN_TAIL_LENGTH: usize = 2;

/// Last `tail_length` positions of every body, oldest first.
#[derive(Clone, Debug)]
pub struct TrajectoryWindow {
    tail_length: usize,
    trails: Vec<VecDeque<DVec3>>,
}

impl TrajectoryWindow {
    /// Fills each body's window with `tail_length` copies of its position in `initial`.
    pub fn new(initial: &Snapshot, tail_length: usize) -> MovieResult<Self> {
        if tail_length < MIN_TAIL_LENGTH {
            return Err(MovieError::InvalidTailLength(tail_length));
        }

        let trails = initial
            .bodies
            .iter()
            .map(|body| std::iter::repeat(body.position).take(tail_length).collect())
            .collect();

        Ok(Self {
            tail_length,
            trails,
        })
    }

    /// Drops the oldest slot of every body and appends its position from `snapshot`.
    pub fn advance(&mut self, snapshot: &Snapshot) -> MovieResult<()> {
        if snapshot.len() != self.trails.len() {
            return Err(MovieError::BodyCountMismatch {
                index: snapshot.index,
                expected: self.trails.len(),
                found: snapshot.len(),
            });
        }

        for (trail, body) in self.trails.iter_mut().zip(&snapshot.bodies) {
            trail.pop_front();
            trail.push_back(body.position);
        }
        Ok(())
    }

    pub fn tail_length(&self) -> usize {
        self.tail_length
    }

    pub fn num_bodies(&self) -> usize {
        self.trails.len()
    }

    /// Positions of one body, oldest to newest.
    pub fn trail(&self, body: usize) -> impl Iterator<Item = DVec3> + '_ {
        self.trails[body].iter().copied()
    }

    pub fn newest(&self, body: usize) -> DVec3 {
        // Every trail holds exactly tail_length >= 2 entries.
        self.trails[body][self.tail_length - 1]
    }

    pub fn oldest(&self, body: usize) -> DVec3 {
        self.trails[body][0]
    }
}
