//! Per-floor waiting queues
//!
//! One `FloorQueue` per floor, holding two FIFO queues: passengers waiting
//! to travel up and passengers waiting to travel down. Insertion order is
//! service order within a direction.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{Direction, Passenger};

/// A passenger waiting at a floor, stamped with the tick it was enqueued at
/// (the start of its wait-time measurement).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingPassenger {
    pub passenger: Passenger,
    pub enqueued_at: usize,
}

/// Two per-direction FIFO queues of passengers waiting at one floor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloorQueue {
    floor: usize,
    up: VecDeque<WaitingPassenger>,
    down: VecDeque<WaitingPassenger>,
}

impl FloorQueue {
    pub fn new(floor: usize) -> Self {
        Self {
            floor,
            up: VecDeque::new(),
            down: VecDeque::new(),
        }
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Number of passengers waiting to travel `direction` from this floor.
    /// `Idle` never queues; its count is 0.
    pub fn count(&self, direction: Direction) -> usize {
        match direction {
            Direction::Up => self.up.len(),
            Direction::Down => self.down.len(),
            Direction::Idle => 0,
        }
    }

    /// Append a passenger to the back of the direction's queue.
    pub fn enqueue(&mut self, direction: Direction, passenger: Passenger, enqueued_at: usize) {
        let waiting = WaitingPassenger {
            passenger,
            enqueued_at,
        };
        match direction {
            Direction::Up => self.up.push_back(waiting),
            Direction::Down => self.down.push_back(waiting),
            Direction::Idle => {}
        }
    }

    /// Remove and return the passenger at the front of the direction's
    /// queue, or `None` if it is empty.
    pub fn dequeue(&mut self, direction: Direction) -> Option<WaitingPassenger> {
        match direction {
            Direction::Up => self.up.pop_front(),
            Direction::Down => self.down.pop_front(),
            Direction::Idle => None,
        }
    }

    /// Put a passenger back at the front of the direction's queue, keeping
    /// FIFO order after a boarding attempt was refused.
    pub fn requeue_front(&mut self, direction: Direction, waiting: WaitingPassenger) {
        match direction {
            Direction::Up => self.up.push_front(waiting),
            Direction::Down => self.down.push_front(waiting),
            Direction::Idle => {}
        }
    }

    /// Re-stamp every waiting passenger's enqueue tick (metrics reset).
    pub fn restamp_all(&mut self, tick: usize) {
        for w in self.up.iter_mut().chain(self.down.iter_mut()) {
            w.enqueued_at = tick;
        }
    }
}
