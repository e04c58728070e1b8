//! Floor call request model
//!
//! A `Request` describes one hall call: the floor it was made from, the
//! direction the callers want to travel, and how many of them there are.
//! Requests are immutable once constructed and invalid ones never construct.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::Direction;

/// Errors that can occur when constructing a request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Request direction must be Up or Down")]
    IdleDirection,

    #[error("Request passenger count must be positive")]
    ZeroCount,
}

/// An immutable floor call: floor, requested direction, headcount.
///
/// # Example
/// ```
/// use elevator_simulator_core_rs::{Direction, Request};
///
/// let req = Request::new(3, Direction::Up, 2).unwrap();
/// assert_eq!(req.floor(), 3);
/// assert_eq!(req.direction(), Direction::Up);
/// assert_eq!(req.count(), 2);
///
/// // Idle calls and empty calls never construct
/// assert!(Request::new(3, Direction::Idle, 2).is_err());
/// assert!(Request::new(3, Direction::Up, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    floor: usize,
    direction: Direction,
    count: usize,
}

impl Request {
    /// Create a new request.
    ///
    /// Fails fast on direction `Idle` or a zero headcount. Floor range is
    /// not known here; the building validates it on submission.
    pub fn new(floor: usize, direction: Direction, count: usize) -> Result<Self, RequestError> {
        if direction == Direction::Idle {
            return Err(RequestError::IdleDirection);
        }
        if count == 0 {
            return Err(RequestError::ZeroCount);
        }
        Ok(Self {
            floor,
            direction,
            count,
        })
    }

    /// Floor the call was made from
    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Requested travel direction (never `Idle`)
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of waiting passengers behind the call
    pub fn count(&self) -> usize {
        self.count
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Req(F:{}, Dir:{}, P:{})", self.floor, self.direction, self.count)
    }
}
