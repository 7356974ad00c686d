//! One-at-a-time angle dispenser.

use std::collections::VecDeque;

use rand::Rng;

use super::{distinct_angles, AngleSpec};

/// Hands out angles from the current batch and draws a new batch only when
/// the current one is used up.
///
/// Taking an angle is two-phase: [`peek`](Self::peek) looks at the angle
/// the next image would get, and [`commit`](Self::commit) consumes it once
/// that image has been fully written. An image that fails in between leaves
/// its angle for the following one.
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use stim_transform::{AngleQueue, AngleSpec};
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let mut queue = AngleQueue::new(AngleSpec::default());
///
/// let first = queue.peek(&mut rng);
/// assert_eq!(queue.peek(&mut rng), first); // not committed yet
/// queue.commit();
/// assert_eq!(queue.remaining(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct AngleQueue {
    spec: AngleSpec,
    pending: VecDeque<f32>,
    batches: usize,
}

impl AngleQueue {
    pub fn new(spec: AngleSpec) -> Self {
        Self {
            spec,
            pending: VecDeque::with_capacity(spec.count()),
            batches: 0,
        }
    }

    pub fn spec(&self) -> &AngleSpec {
        &self.spec
    }

    /// The angle the next committed image receives. Draws a fresh batch if
    /// the current one is exhausted.
    pub fn peek<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f32 {
        if self.pending.is_empty() {
            self.pending.extend(distinct_angles(&self.spec, rng));
            self.batches += 1;
        }
        // `count` is validated non-zero, so a fresh batch is never empty.
        self.pending.front().copied().unwrap_or(self.spec.minimum())
    }

    /// Consume the angle last returned by [`peek`](Self::peek).
    pub fn commit(&mut self) -> Option<f32> {
        self.pending.pop_front()
    }

    /// Angles left in the current batch.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Batches drawn so far.
    pub fn batches_drawn(&self) -> usize {
        self.batches
    }
}
