//! Elevator state machine
//!
//! Owns one elevator's position, direction, door cycle and sorted target
//! sets, and advances exactly one logical step per tick. The elevator is the
//! only writer of its own physical state; the building that registered it is
//! the only writer of cross-cutting concerns (assignment, service flags).
//!
//! # Door cycle
//!
//! DoorsClosed -> DoorsOpening -> DoorsOpen -> DoorsClosing -> DoorsClosed,
//! never skipping or reversing a phase. Movement only happens while doors
//! are closed.
//!
//! # Timing
//!
//! Speed and door durations are integer tick budgets, clamped to at least 1.
//! Travelling N floors at S ticks per floor takes exactly N * S ticks of
//! pure movement, excluding door dwell at intermediate stops.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{Direction, ElevatorKind, ElevatorState, Passenger, Request};

/// Notification produced by [`Elevator::tick`] when the state machine
/// crosses an externally visible boundary.
///
/// This replaces the observer object of classic designs: the simulation is
/// single-threaded, so the building simply reacts to the returned signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorSignal {
    /// Moved one floor (doors closed)
    Arrived { floor: usize },
    /// Door cycle reached DoorsOpen; boarding/unloading happens now
    DoorsOpened { floor: usize },
    /// Door cycle completed and direction was recomputed
    DoorsClosed { floor: usize },
}

/// A single elevator car.
///
/// # Example
/// ```
/// use elevator_simulator_core_rs::{Direction, Elevator, ElevatorKind, ElevatorState};
///
/// let mut e = Elevator::new("E1", ElevatorKind::Passenger, 0, 10, 1, 1, 1, 12);
/// assert!(e.add_target(3));
/// assert_eq!(e.direction(), Direction::Up);
///
/// for _ in 0..3 {
///     e.tick();
/// }
/// assert_eq!(e.current_floor(), 3);
/// assert_eq!(e.state(), ElevatorState::DoorsOpening);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Elevator {
    id: String,
    kind: ElevatorKind,
    /// Exclusive upper floor bound; synced to the building at registration
    floor_bound: usize,
    capacity: usize,
    current_floor: usize,
    direction: Direction,
    state: ElevatorState,
    /// Pending stops above the position they were registered from, ascending
    up_targets: BTreeSet<usize>,
    /// Pending stops below, served in descending order
    down_targets: BTreeSet<usize>,
    passengers: Vec<Passenger>,
    speed_ticks_per_floor: usize,
    door_open_ticks: usize,
    door_close_ticks: usize,
    /// Counts down while moving; a floor is crossed when it reaches zero
    move_tick_budget: usize,
    /// Counts down during opening/open dwell/closing phases
    door_tick_budget: usize,
}

impl Elevator {
    /// Create an elevator.
    ///
    /// # Arguments
    /// * `id` - unique identifier (uniqueness is case-insensitive, enforced
    ///   by the building at registration)
    /// * `kind` - type tag
    /// * `start_floor` - initial position, must be below `floors`
    /// * `capacity` - maximum boarded passengers
    /// * `speed_ticks_per_floor`, `door_open_ticks`, `door_close_ticks` -
    ///   tick budgets, clamped to at least 1
    /// * `floors` - exclusive floor bound
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        kind: ElevatorKind,
        start_floor: usize,
        capacity: usize,
        speed_ticks_per_floor: usize,
        door_open_ticks: usize,
        door_close_ticks: usize,
        floors: usize,
    ) -> Self {
        assert!(start_floor < floors, "start_floor must be below the floor bound");
        let speed = speed_ticks_per_floor.max(1);
        Self {
            id: id.into(),
            kind,
            floor_bound: floors,
            capacity,
            current_floor: start_floor,
            direction: Direction::Idle,
            state: ElevatorState::DoorsClosed,
            up_targets: BTreeSet::new(),
            down_targets: BTreeSet::new(),
            passengers: Vec::new(),
            speed_ticks_per_floor: speed,
            door_open_ticks: door_open_ticks.max(1),
            door_close_ticks: door_close_ticks.max(1),
            move_tick_budget: speed,
            door_tick_budget: 0,
        }
    }

    /// Standard passenger car: capacity 10, 5 ticks per floor, doors 2/2,
    /// 12-floor bound until registration.
    pub fn passenger(id: impl Into<String>, start_floor: usize) -> Self {
        Self::new(id, ElevatorKind::Passenger, start_floor, 10, 5, 2, 2, 12)
    }

    /// Passenger profile at 3 ticks per floor.
    pub fn high_speed(id: impl Into<String>, start_floor: usize) -> Self {
        Self::new(id, ElevatorKind::HighSpeed, start_floor, 10, 3, 2, 2, 12)
    }

    /// Freight car; distinct tag, passenger profile.
    pub fn freight(id: impl Into<String>, start_floor: usize) -> Self {
        Self::new(id, ElevatorKind::Freight, start_floor, 10, 5, 2, 2, 12)
    }

    // =========================================================================
    // Read-only surface
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElevatorKind {
        self.kind
    }

    pub fn current_floor(&self) -> usize {
        self.current_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> ElevatorState {
        self.state
    }

    /// True while the car is travelling: doors closed, a direction picked,
    /// and stops pending.
    pub fn is_moving(&self) -> bool {
        self.state == ElevatorState::DoorsClosed
            && self.direction != Direction::Idle
            && self.has_targets()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn available_capacity(&self) -> usize {
        self.capacity - self.passengers.len()
    }

    pub fn speed_ticks_per_floor(&self) -> usize {
        self.speed_ticks_per_floor
    }

    pub fn has_targets(&self) -> bool {
        !self.up_targets.is_empty() || !self.down_targets.is_empty()
    }

    /// Pending stops as an ordered sequence: up targets ascending, then
    /// down targets descending.
    pub fn targets(&self) -> Vec<usize> {
        self.up_targets
            .iter()
            .copied()
            .chain(self.down_targets.iter().rev().copied())
            .collect()
    }

    /// Whether a specific floor is among the pending stops.
    pub fn has_target(&self, floor: usize) -> bool {
        self.is_target(floor)
    }

    /// Whether the car could take on a call of this size: the floor is
    /// reachable and the headcount fits the remaining capacity, unless the
    /// car is already at the floor (it may free capacity at its next stop).
    pub fn can_accept(&self, req: &Request) -> bool {
        req.floor() < self.floor_bound
            && (req.count() <= self.available_capacity() || req.floor() == self.current_floor)
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Register the call's floor as a stop.
    ///
    /// At the call floor already: begins the door cycle immediately if the
    /// doors are closed (no movement tick elapses); if a door cycle is in
    /// progress at this floor the call is already being served. Otherwise
    /// the floor joins the sorted target set on its side, and an idle car
    /// picks its initial direction.
    pub fn assign(&mut self, req: &Request) {
        self.register_stop(req.floor());
    }

    /// In-car panel button; same registration path as a hall call target.
    pub fn press_button(&mut self, floor: usize) -> bool {
        self.register_stop(floor)
    }

    /// Register a stop. Idempotent.
    ///
    /// Returns whether a new stop was actually taken on: `false` for a
    /// duplicate, a floor outside the bound, or the current floor while the
    /// doors are not closed.
    pub fn add_target(&mut self, floor: usize) -> bool {
        self.register_stop(floor)
    }

    fn register_stop(&mut self, floor: usize) -> bool {
        if floor >= self.floor_bound {
            return false;
        }
        if floor == self.current_floor {
            if self.state == ElevatorState::DoorsClosed {
                self.begin_door_open();
                return true;
            }
            // Mid-cycle at this floor; the open doors serve the call
            return false;
        }

        let added = if floor > self.current_floor {
            self.up_targets.insert(floor)
        } else {
            self.down_targets.insert(floor)
        };

        if self.direction == Direction::Idle && self.state == ElevatorState::DoorsClosed {
            self.direction = self.initial_direction();
        }
        added
    }

    /// Admit passengers up to the remaining capacity, in input order.
    /// Each boarded passenger's destination becomes a stop. Returns the
    /// count actually boarded; callers must not assume all were accepted.
    pub fn board_passengers(&mut self, incoming: Vec<Passenger>) -> usize {
        let mut boarded = 0;
        for passenger in incoming {
            if self.passengers.len() >= self.capacity {
                break;
            }
            let dest = passenger.destination_floor();
            self.passengers.push(passenger);
            boarded += 1;
            if dest != self.current_floor && dest < self.floor_bound {
                if dest > self.current_floor {
                    self.up_targets.insert(dest);
                } else {
                    self.down_targets.insert(dest);
                }
            }
        }
        boarded
    }

    /// Remove all boarded passengers whose destination is the current floor
    /// and return how many left.
    pub fn unload_at_current_floor(&mut self) -> usize {
        let before = self.passengers.len();
        let floor = self.current_floor;
        self.passengers.retain(|p| p.destination_floor() != floor);
        before - self.passengers.len()
    }

    /// Advance exactly one logical step.
    pub fn tick(&mut self) -> Option<ElevatorSignal> {
        match self.state {
            ElevatorState::DoorsClosed => self.tick_doors_closed(),
            ElevatorState::DoorsOpening => {
                self.door_tick_budget -= 1;
                if self.door_tick_budget == 0 {
                    self.state = ElevatorState::DoorsOpen;
                    self.door_tick_budget = self.door_open_ticks; // dwell
                    return Some(ElevatorSignal::DoorsOpened {
                        floor: self.current_floor,
                    });
                }
                None
            }
            ElevatorState::DoorsOpen => {
                self.door_tick_budget -= 1;
                if self.door_tick_budget == 0 {
                    self.state = ElevatorState::DoorsClosing;
                    self.door_tick_budget = self.door_close_ticks;
                }
                None
            }
            ElevatorState::DoorsClosing => {
                self.door_tick_budget -= 1;
                if self.door_tick_budget == 0 {
                    self.state = ElevatorState::DoorsClosed;
                    self.direction = self.next_direction();
                    return Some(ElevatorSignal::DoorsClosed {
                        floor: self.current_floor,
                    });
                }
                None
            }
        }
    }

    pub(crate) fn set_floor_bound(&mut self, floors: usize) {
        self.floor_bound = floors;
    }

    // =========================================================================
    // State machine internals
    // =========================================================================

    fn tick_doors_closed(&mut self) -> Option<ElevatorSignal> {
        if !self.has_targets() {
            self.direction = Direction::Idle;
            return None;
        }

        // Already at a stop: open instead of moving
        if self.is_target(self.current_floor) {
            self.begin_door_open();
            return None;
        }

        if self.direction == Direction::Idle {
            self.direction = self.initial_direction();
        }

        self.move_tick_budget -= 1;
        if self.move_tick_budget > 0 {
            return None;
        }
        self.move_tick_budget = self.speed_ticks_per_floor;

        match self.direction {
            Direction::Up => self.current_floor += 1,
            Direction::Down => self.current_floor = self.current_floor.saturating_sub(1),
            Direction::Idle => {}
        }

        if self.is_target(self.current_floor) {
            self.begin_door_open();
        } else {
            self.resweep_direction();
        }
        Some(ElevatorSignal::Arrived {
            floor: self.current_floor,
        })
    }

    /// Begin a door cycle at the current floor, consuming any pending stop
    /// here. A target equal to the current floor is never left pending.
    fn begin_door_open(&mut self) {
        self.state = ElevatorState::DoorsOpening;
        self.door_tick_budget = self.door_open_ticks;
        self.move_tick_budget = self.speed_ticks_per_floor;
        self.up_targets.remove(&self.current_floor);
        self.down_targets.remove(&self.current_floor);
    }

    /// Flip direction mid-travel when nothing remains ahead but the other
    /// side still has stops.
    fn resweep_direction(&mut self) {
        match self.direction {
            Direction::Up => {
                let ahead = self.up_targets.range(self.current_floor..).next().is_some();
                if !ahead && !self.down_targets.is_empty() {
                    self.direction = Direction::Down;
                }
            }
            Direction::Down => {
                let ahead = self.down_targets.range(..=self.current_floor).next().is_some();
                if !ahead && !self.up_targets.is_empty() {
                    self.direction = Direction::Up;
                }
            }
            Direction::Idle => {}
        }
    }

    /// Idle selection: the side with the nearer pending stop, ties favor Up.
    fn initial_direction(&self) -> Direction {
        let nearest_up = self.up_targets.iter().next().copied();
        let nearest_down = self.down_targets.iter().next_back().copied();
        match (nearest_up, nearest_down) {
            (None, None) => Direction::Idle,
            (Some(_), None) => Direction::Up,
            (None, Some(_)) => Direction::Down,
            (Some(up), Some(down)) => {
                let d_up = up.abs_diff(self.current_floor);
                let d_down = self.current_floor.abs_diff(down);
                if d_up <= d_down {
                    Direction::Up
                } else {
                    Direction::Down
                }
            }
        }
    }

    /// End-of-cycle selection: keep sweeping in the same direction while a
    /// qualifying stop remains on that side, otherwise fall back to the
    /// idle selection.
    fn next_direction(&self) -> Direction {
        if !self.has_targets() {
            return Direction::Idle;
        }
        if self.direction == Direction::Up
            && self.up_targets.range(self.current_floor..).next().is_some()
        {
            return Direction::Up;
        }
        if self.direction == Direction::Down
            && self.down_targets.range(..=self.current_floor).next().is_some()
        {
            return Direction::Down;
        }
        self.initial_direction()
    }

    fn is_target(&self, floor: usize) -> bool {
        self.up_targets.contains(&floor) || self.down_targets.contains(&floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick(id: &str, start: usize) -> Elevator {
        Elevator::new(id, ElevatorKind::Passenger, start, 10, 1, 1, 1, 12)
    }

    #[test]
    fn test_idle_tie_favors_up() {
        let mut e = quick("E1", 5);
        e.add_target(7);
        e.add_target(3);
        // Both two floors away
        assert_eq!(e.direction(), Direction::Up);
    }

    #[test]
    fn test_budget_clamped_to_one() {
        let e = Elevator::new("E1", ElevatorKind::Passenger, 0, 10, 0, 0, 0, 12);
        assert_eq!(e.speed_ticks_per_floor(), 1);
    }

    #[test]
    fn test_targets_snapshot_ordering() {
        let mut e = quick("E1", 5);
        e.add_target(8);
        e.add_target(6);
        e.add_target(1);
        e.add_target(3);
        assert_eq!(e.targets(), vec![6, 8, 3, 1]);
    }

    #[test]
    fn test_add_target_rejects_out_of_range_and_duplicates() {
        let mut e = quick("E1", 0);
        assert!(!e.add_target(12));
        assert!(e.add_target(4));
        assert!(!e.add_target(4));
    }
}
