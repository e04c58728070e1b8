//! Dispatch strategies
//!
//! A dispatch strategy is a stateless scorer: given a building snapshot and
//! a floor call, it picks the best elevator, or none. The building holds one
//! strategy as a trait object and re-runs it every tick over all outstanding
//! calls; the pass itself is the retry mechanism, so "no elevator found" is
//! never an error.

use crate::building::Building;
use crate::elevator::Elevator;
use crate::models::Request;

pub mod nearest;

pub use nearest::NearestAvailableDispatch;

/// Chooses an elevator for a floor call.
///
/// Implementations must skip elevators flagged out of service and return
/// `None` when no elevator is eligible.
pub trait DispatchStrategy {
    fn choose_elevator<'a>(&self, building: &'a Building, request: &Request)
        -> Option<&'a Elevator>;
}
