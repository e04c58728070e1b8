//! Passenger model
//!
//! A rider created when a call is submitted and destroyed when unloaded at
//! its destination floor. Travel direction is derived from the two floors,
//! never stored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Direction;

/// A rider: origin floor, destination floor, and a unique identity.
///
/// # Example
/// ```
/// use elevator_simulator_core_rs::{Direction, Passenger};
///
/// let p = Passenger::new(2, 7);
/// assert_eq!(p.origin_floor(), 2);
/// assert_eq!(p.destination_floor(), 7);
/// assert_eq!(p.direction(), Direction::Up);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    id: Uuid,
    origin_floor: usize,
    destination_floor: usize,
}

impl Passenger {
    /// Create a passenger travelling from `origin_floor` to
    /// `destination_floor`.
    pub fn new(origin_floor: usize, destination_floor: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin_floor,
            destination_floor,
        }
    }

    /// Unique passenger identity
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Floor the passenger boards from
    pub fn origin_floor(&self) -> usize {
        self.origin_floor
    }

    /// Floor the passenger unloads at
    pub fn destination_floor(&self) -> usize {
        self.destination_floor
    }

    /// Derived travel direction.
    ///
    /// `Idle` only for the degenerate origin == destination case, which the
    /// building never synthesizes.
    pub fn direction(&self) -> Direction {
        if self.destination_floor > self.origin_floor {
            Direction::Up
        } else if self.destination_floor < self.origin_floor {
            Direction::Down
        } else {
            Direction::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_direction() {
        assert_eq!(Passenger::new(0, 5).direction(), Direction::Up);
        assert_eq!(Passenger::new(5, 0).direction(), Direction::Down);
        assert_eq!(Passenger::new(4, 4).direction(), Direction::Idle);
    }

    #[test]
    fn test_identity_is_unique() {
        let a = Passenger::new(0, 1);
        let b = Passenger::new(0, 1);
        assert_ne!(a.id(), b.id());
    }
}
