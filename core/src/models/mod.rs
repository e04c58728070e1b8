//! Domain models for the elevator simulator

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod event;
pub mod floor_queue;
pub mod passenger;
pub mod request;

// Re-exports
pub use event::{Event, EventLog};
pub use floor_queue::{FloorQueue, WaitingPassenger};
pub use passenger::Passenger;
pub use request::{Request, RequestError};

/// Travel direction of an elevator or floor call.
///
/// A discrete tag, not an arithmetic quantity: `Down < Idle < Up` carries no
/// meaning beyond identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Idle,
    Up,
}

impl Direction {
    /// The opposite travel direction. `Idle` is its own opposite.
    ///
    /// # Example
    /// ```
    /// use elevator_simulator_core_rs::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Idle.opposite(), Direction::Idle);
    /// ```
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Down => write!(f, "Down"),
            Direction::Idle => write!(f, "Idle"),
            Direction::Up => write!(f, "Up"),
        }
    }
}

/// Door-cycle phase of an elevator.
///
/// Exactly one phase is active at any tick boundary, and transitions are
/// strictly cyclic: Closed -> Opening -> Open -> Closing -> Closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElevatorState {
    DoorsClosed,
    DoorsOpening,
    DoorsOpen,
    DoorsClosing,
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorState::DoorsClosed => write!(f, "DoorsClosed"),
            ElevatorState::DoorsOpening => write!(f, "DoorsOpening"),
            ElevatorState::DoorsOpen => write!(f, "DoorsOpen"),
            ElevatorState::DoorsClosing => write!(f, "DoorsClosing"),
        }
    }
}

/// Type tag distinguishing elevator profiles.
///
/// `Freight` and `Glass` currently share the passenger profile; the tag is
/// kept distinct so hosts can render and filter by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElevatorKind {
    Passenger,
    HighSpeed,
    Freight,
    Glass,
}

impl fmt::Display for ElevatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorKind::Passenger => write!(f, "Passenger"),
            ElevatorKind::HighSpeed => write!(f, "HighSpeed"),
            ElevatorKind::Freight => write!(f, "Freight"),
            ElevatorKind::Glass => write!(f, "Glass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Idle.opposite(), Direction::Idle);
    }

    #[test]
    fn test_display_tags() {
        assert_eq!(Direction::Up.to_string(), "Up");
        assert_eq!(ElevatorState::DoorsOpen.to_string(), "DoorsOpen");
        assert_eq!(ElevatorKind::HighSpeed.to_string(), "HighSpeed");
    }
}
