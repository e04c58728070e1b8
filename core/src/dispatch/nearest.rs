//! Greedy nearest-available scorer
//!
//! Scores every in-service elevator against the call and takes the strict
//! minimum. Not an optimal assignment solver; a cheap heuristic that favors
//! close, compatible, lightly loaded cars.

use crate::building::Building;
use crate::elevator::Elevator;
use crate::models::{Direction, Request};

/// Weight applied to the floor distance term.
const DISTANCE_WEIGHT: usize = 5;
/// Penalty for an idle car (must spin up, but never reverses).
const IDLE_PENALTY: usize = 2;
/// Penalty for a car that would have to reverse to serve the call.
const REVERSE_PENALTY: usize = 10;

/// Scoring dispatch: `distance * 5 + direction penalty + load penalty`.
///
/// - distance: absolute floor difference to the call floor
/// - direction penalty: 0 when the car is sweeping toward the call in the
///   requested direction, 2 when idle, 10 when it would have to reverse
/// - load penalty: boarded passenger count
///
/// Ties keep the first elevator in registration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestAvailableDispatch;

impl NearestAvailableDispatch {
    pub fn new() -> Self {
        Self
    }

    fn score(elevator: &Elevator, request: &Request) -> usize {
        let distance = elevator.current_floor().abs_diff(request.floor());
        let direction_penalty = match elevator.direction() {
            Direction::Idle => IDLE_PENALTY,
            dir if Self::moving_toward(elevator, request) && dir == request.direction() => 0,
            _ => REVERSE_PENALTY,
        };
        distance * DISTANCE_WEIGHT + direction_penalty + elevator.passenger_count()
    }

    /// Whether the car's current sweep passes the call floor.
    fn moving_toward(elevator: &Elevator, request: &Request) -> bool {
        match elevator.direction() {
            Direction::Up => elevator.current_floor() <= request.floor(),
            Direction::Down => elevator.current_floor() >= request.floor(),
            Direction::Idle => false,
        }
    }
}

impl super::DispatchStrategy for NearestAvailableDispatch {
    fn choose_elevator<'a>(
        &self,
        building: &'a Building,
        request: &Request,
    ) -> Option<&'a Elevator> {
        let mut best: Option<(&Elevator, usize)> = None;
        for elevator in building.elevators() {
            if building.is_out_of_service(elevator.id()) {
                continue;
            }
            let score = Self::score(elevator, request);
            match best {
                Some((_, best_score)) if score >= best_score => {}
                _ => best = Some((elevator, score)),
            }
        }
        best.map(|(e, _)| e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElevatorKind;

    fn car(id: &str, floor: usize) -> Elevator {
        Elevator::new(id, ElevatorKind::Passenger, floor, 10, 1, 1, 1, 12)
    }

    #[test]
    fn test_idle_car_scores_distance_plus_two() {
        let e = car("E1", 2);
        let req = Request::new(5, Direction::Up, 1).unwrap();
        assert_eq!(NearestAvailableDispatch::score(&e, &req), 3 * 5 + 2);
    }

    #[test]
    fn test_compatible_sweep_scores_zero_penalty() {
        let mut e = car("E1", 2);
        e.add_target(9); // moving up, below the call floor
        let req = Request::new(5, Direction::Up, 1).unwrap();
        assert_eq!(NearestAvailableDispatch::score(&e, &req), 3 * 5);
    }

    #[test]
    fn test_reversal_scores_ten() {
        let mut e = car("E1", 6);
        e.add_target(11); // moving up, already past the call floor
        let req = Request::new(5, Direction::Up, 1).unwrap();
        assert_eq!(NearestAvailableDispatch::score(&e, &req), 1 * 5 + 10);
    }
}
