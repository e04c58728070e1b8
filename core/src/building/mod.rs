//! Building scheduler - main simulation loop
//!
//! The building owns every elevator, the per-floor waiting queues, the
//! reservation table and the wait-time accumulators, and drives one atomic
//! `tick_all` step at a time:
//!
//! 1. advance every elevator (registration order); an elevator whose doors
//!    reach DoorsOpen triggers the boarding/unloading sequence, at most one
//!    boarding per floor per tick
//! 2. run the dispatch pass over every floor/direction with waiting
//!    passengers, re-validating reservations and assigning new ones
//! 3. advance the logical clock
//!
//! The building owns no wall clock and no threads; hosts call `tick_all` at
//! whatever cadence they choose.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::dispatch::DispatchStrategy;
use crate::elevator::{Elevator, ElevatorSignal};
use crate::models::{Direction, ElevatorState, Event, EventLog, FloorQueue, Passenger, Request};

/// Floors a synthesized passenger travels beyond its origin, clamped to the
/// building bounds. The exact hop is a modelling choice, not a contract;
/// only "strictly beyond the origin, in the call direction" is.
const DESTINATION_HOP: usize = 3;

/// Errors raised by building operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildingError {
    #[error("Floor {floor} out of range [0..{floors})")]
    FloorOutOfRange { floor: usize, floors: usize },

    #[error("No floor lies {direction} of floor {floor}; call cannot be served")]
    UnservableCall { floor: usize, direction: Direction },
}

/// Wait-time metrics accumulated since the last reset.
///
/// A passenger is counted as served when it boards; its wait is the tick
/// span between enqueue and boarding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaitMetrics {
    pub served: usize,
    pub average_wait: f64,
    pub max_wait: usize,
}

/// A multi-elevator building advancing in discrete ticks.
///
/// # Example
/// ```
/// use elevator_simulator_core_rs::{
///     Building, Direction, Elevator, ElevatorKind, NearestAvailableDispatch, Request,
/// };
///
/// let mut building = Building::new(12, Box::new(NearestAvailableDispatch::new()));
/// let e1 = Elevator::new("E1", ElevatorKind::Passenger, 0, 4, 1, 1, 1, 12);
/// assert!(building.add_elevator(e1));
///
/// building
///     .submit_call(&Request::new(0, Direction::Up, 2).unwrap())
///     .unwrap();
/// assert_eq!(building.waiting_count(0, Direction::Up), 2);
///
/// building.tick_all();
/// assert_eq!(building.current_tick(), 1);
/// ```
pub struct Building {
    floors: usize,
    elevators: Vec<Elevator>,
    floor_queues: Vec<FloorQueue>,
    strategy: Box<dyn DispatchStrategy>,
    /// (floor, direction) -> id of the elevator already bound to the call.
    /// At most one in-service elevator per pair; re-validated every pass.
    reservations: HashMap<(usize, Direction), String>,
    /// Canonical (lowercased) ids of elevators excluded from dispatch
    out_of_service: HashSet<String>,
    events: EventLog,
    current_tick: usize,
    served_count: usize,
    total_wait_ticks: usize,
    max_wait_ticks: usize,
    total_delivered: usize,
}

impl Building {
    /// Create a building.
    ///
    /// # Panics
    /// Panics if `floors < 2`.
    pub fn new(floors: usize, strategy: Box<dyn DispatchStrategy>) -> Self {
        assert!(floors >= 2, "building must have at least 2 floors");
        Self {
            floors,
            elevators: Vec::new(),
            floor_queues: (0..floors).map(FloorQueue::new).collect(),
            strategy,
            reservations: HashMap::new(),
            out_of_service: HashSet::new(),
            events: EventLog::new(),
            current_tick: 0,
            served_count: 0,
            total_wait_ticks: 0,
            max_wait_ticks: 0,
            total_delivered: 0,
        }
    }

    // =========================================================================
    // Registration and service toggling
    // =========================================================================

    /// Register an elevator. Its floor bound is synced to the building's.
    ///
    /// Returns false (and registers nothing) for a duplicate id
    /// (case-insensitive) or an elevator positioned outside the building.
    pub fn add_elevator(&mut self, mut elevator: Elevator) -> bool {
        if self.index_of(elevator.id()).is_some() {
            return false;
        }
        if elevator.current_floor() >= self.floors {
            return false;
        }
        elevator.set_floor_bound(self.floors);
        self.elevators.push(elevator);
        true
    }

    /// Mark an elevator ineligible for new dispatch, or restore it.
    ///
    /// Existing targets are unaffected; the car keeps serving floors it
    /// already committed to. Taking a car out of service releases every
    /// reservation it holds so the calls can be re-dispatched. Returns
    /// false if the id is unknown.
    pub fn set_out_of_service(&mut self, id: &str, out_of_service: bool) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let canonical = self.elevators[idx].id().to_ascii_lowercase();
        let changed = if out_of_service {
            self.out_of_service.insert(canonical)
        } else {
            self.out_of_service.remove(&canonical)
        };
        if out_of_service {
            let held_by = self.elevators[idx].id().to_string();
            self.reservations
                .retain(|_, holder| !holder.eq_ignore_ascii_case(&held_by));
        }
        if changed {
            self.events.log(Event::ServiceChanged {
                tick: self.current_tick,
                elevator_id: self.elevators[idx].id().to_string(),
                out_of_service,
            });
        }
        true
    }

    /// Press an in-car panel button. Returns false for an unknown elevator
    /// or a stop the car did not take on (duplicate or out of range).
    pub fn press_button(&mut self, id: &str, floor: usize) -> bool {
        match self.index_of(id) {
            Some(idx) => self.elevators[idx].press_button(floor),
            None => false,
        }
    }

    // =========================================================================
    // Calls
    // =========================================================================

    /// Accept a hall call: synthesize its passengers and enqueue them at the
    /// call floor, stamped with the current tick.
    ///
    /// Assignment does not happen here; the next dispatch pass picks the
    /// call up from the queue sizes. Fails before any enqueue on a floor
    /// outside the building or a call no destination can satisfy.
    pub fn submit_call(&mut self, req: &Request) -> Result<(), BuildingError> {
        if req.floor() >= self.floors {
            return Err(BuildingError::FloorOutOfRange {
                floor: req.floor(),
                floors: self.floors,
            });
        }
        let destination = self.destination_for(req.floor(), req.direction())?;

        for _ in 0..req.count() {
            self.floor_queues[req.floor()].enqueue(
                req.direction(),
                Passenger::new(req.floor(), destination),
                self.current_tick,
            );
        }
        self.events.log(Event::CallSubmitted {
            tick: self.current_tick,
            floor: req.floor(),
            direction: req.direction(),
            count: req.count(),
        });
        Ok(())
    }

    /// Destination for a synthesized passenger: [`DESTINATION_HOP`] floors
    /// beyond the origin in the call direction, clamped to bounds. A call
    /// whose clamp collapses onto the origin (Up at the top floor, Down at
    /// floor 0) is unservable.
    fn destination_for(&self, floor: usize, direction: Direction) -> Result<usize, BuildingError> {
        let destination = match direction {
            Direction::Up => (floor + DESTINATION_HOP).min(self.floors - 1),
            Direction::Down => floor.saturating_sub(DESTINATION_HOP),
            Direction::Idle => floor,
        };
        if destination == floor {
            return Err(BuildingError::UnservableCall { floor, direction });
        }
        Ok(destination)
    }

    // =========================================================================
    // Tick loop
    // =========================================================================

    /// Advance the whole building one logical step.
    pub fn tick_all(&mut self) {
        // Elevators advance in registration order; the first door-open at a
        // floor this tick performs boarding, later ones only unload.
        let mut boarded_floors: HashSet<usize> = HashSet::new();
        for idx in 0..self.elevators.len() {
            if let Some(ElevatorSignal::DoorsOpened { floor }) = self.elevators[idx].tick() {
                self.serve_floor(idx, floor, &mut boarded_floors);
            }
        }

        self.dispatch_pass();
        self.current_tick += 1;
    }

    /// Boarding/unloading sequence for one door-open.
    fn serve_floor(&mut self, idx: usize, floor: usize, boarded_floors: &mut HashSet<usize>) {
        let unloaded = self.elevators[idx].unload_at_current_floor();
        self.total_delivered += unloaded;

        let mut boarded = 0;
        if boarded_floors.insert(floor) {
            // Load in the travel direction; an idle car takes the busier
            // side (ties favor Up), and an empty side flips to the other.
            let mut load_dir = match self.elevators[idx].direction() {
                Direction::Idle => {
                    let up = self.floor_queues[floor].count(Direction::Up);
                    let down = self.floor_queues[floor].count(Direction::Down);
                    if down > up {
                        Direction::Down
                    } else {
                        Direction::Up
                    }
                }
                dir => dir,
            };
            if self.floor_queues[floor].count(load_dir) == 0 {
                load_dir = load_dir.opposite();
            }

            boarded = self.board_from(idx, floor, load_dir);
            if boarded == 0 {
                boarded = self.board_from(idx, floor, load_dir.opposite());
            }

            // A call whose queue emptied is done; release its reservation
            for dir in [Direction::Up, Direction::Down] {
                if self.floor_queues[floor].count(dir) == 0 {
                    self.reservations.remove(&(floor, dir));
                }
            }
        }

        self.events.log(Event::Stop {
            tick: self.current_tick,
            elevator_id: self.elevators[idx].id().to_string(),
            floor,
            unloaded,
            boarded,
            waiting_up: self.floor_queues[floor].count(Direction::Up),
            waiting_down: self.floor_queues[floor].count(Direction::Down),
        });
    }

    /// Board from one direction's queue, FIFO, up to the remaining capacity.
    /// Updates the wait accumulators for every passenger boarded.
    fn board_from(&mut self, idx: usize, floor: usize, direction: Direction) -> usize {
        let mut boarded = 0;
        loop {
            if self.elevators[idx].available_capacity() == 0 {
                break;
            }
            let Some(waiting) = self.floor_queues[floor].dequeue(direction) else {
                break;
            };
            if self.elevators[idx].board_passengers(vec![waiting.passenger.clone()]) == 0 {
                self.floor_queues[floor].requeue_front(direction, waiting);
                break;
            }
            let wait_ticks = self.current_tick.saturating_sub(waiting.enqueued_at);
            self.served_count += 1;
            self.total_wait_ticks += wait_ticks;
            self.max_wait_ticks = self.max_wait_ticks.max(wait_ticks);
            boarded += 1;
        }
        boarded
    }

    /// One evaluation of the dispatch strategy against every outstanding
    /// floor/direction queue.
    fn dispatch_pass(&mut self) {
        let mut stale: Vec<(usize, Direction)> = Vec::new();
        let mut plans: Vec<(usize, Direction, String, usize)> = Vec::new();

        for floor in 0..self.floors {
            for direction in [Direction::Up, Direction::Down] {
                let waiting = self.floor_queues[floor].count(direction);
                if waiting == 0 {
                    continue;
                }
                if let Some(holder) = self.reservations.get(&(floor, direction)) {
                    if self.reservation_valid(holder, floor) {
                        // Work already en route; never double-assign
                        continue;
                    }
                    stale.push((floor, direction));
                }
                let Ok(probe) = Request::new(floor, direction, waiting) else {
                    continue;
                };
                if let Some(chosen) = self.strategy.choose_elevator(self, &probe) {
                    plans.push((floor, direction, chosen.id().to_string(), waiting));
                }
            }
        }

        for key in stale {
            self.reservations.remove(&key);
        }

        for (floor, direction, id, waiting) in plans {
            let Some(idx) = self.index_of(&id) else {
                continue;
            };
            let available = self.elevators[idx].available_capacity();
            // A full car already at the floor may free capacity at its next
            // door-open, so a unit call keeps the claim alive.
            let achievable = if available == 0 && self.elevators[idx].current_floor() == floor {
                1
            } else {
                waiting.min(available)
            };
            if achievable == 0 {
                continue;
            }
            let Ok(req) = Request::new(floor, direction, achievable) else {
                continue;
            };
            if !self.elevators[idx].can_accept(&req) {
                continue;
            }
            self.elevators[idx].assign(&req);
            let elevator_id = self.elevators[idx].id().to_string();
            self.reservations
                .insert((floor, direction), elevator_id.clone());
            self.events.log(Event::Dispatched {
                tick: self.current_tick,
                elevator_id,
                floor,
                direction,
                count: achievable,
            });
        }
    }

    /// A reservation stands while its holder is registered, in service and
    /// still committed to the floor: it targets the floor, or it is at the
    /// floor with its door cycle running or a departure pending. A car
    /// parked idle at the floor serves nobody and its claim is stale.
    fn reservation_valid(&self, holder: &str, floor: usize) -> bool {
        let Some(idx) = self.index_of(holder) else {
            return false;
        };
        if self.is_out_of_service(holder) {
            return false;
        }
        let elevator = &self.elevators[idx];
        if elevator.has_target(floor) {
            return true;
        }
        elevator.current_floor() == floor
            && (elevator.state() != ElevatorState::DoorsClosed || elevator.has_targets())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn floors(&self) -> usize {
        self.floors
    }

    /// Registered elevators, in registration order (dispatch tie order).
    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn is_out_of_service(&self, id: &str) -> bool {
        self.out_of_service.contains(&id.to_ascii_lowercase())
    }

    /// Passengers currently waiting at a floor for a direction. Out-of-range
    /// floors hold nobody.
    pub fn waiting_count(&self, floor: usize, direction: Direction) -> usize {
        self.floor_queues
            .get(floor)
            .map_or(0, |q| q.count(direction))
    }

    /// Logical ticks elapsed since construction
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Passengers unloaded at their destination since construction
    pub fn total_delivered(&self) -> usize {
        self.total_delivered
    }

    /// The most recent `n` events, in chronological order
    pub fn recent_events(&self, n: usize) -> Vec<Event> {
        self.events.recent(n)
    }

    /// Return and clear the buffered event log
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    /// Wait-time metrics accumulated since the last reset
    pub fn wait_metrics(&self) -> WaitMetrics {
        let average_wait = if self.served_count == 0 {
            0.0
        } else {
            self.total_wait_ticks as f64 / self.served_count as f64
        };
        WaitMetrics {
            served: self.served_count,
            average_wait,
            max_wait: self.max_wait_ticks,
        }
    }

    /// Zero the wait accumulators, drop all reservations and restart the
    /// wait measurement of everyone still queued.
    pub fn reset_wait_metrics(&mut self) {
        self.served_count = 0;
        self.total_wait_ticks = 0;
        self.max_wait_ticks = 0;
        self.reservations.clear();
        for queue in &mut self.floor_queues {
            queue.restamp_all(self.current_tick);
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.elevators
            .iter()
            .position(|e| e.id().eq_ignore_ascii_case(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::NearestAvailableDispatch;
    use crate::models::ElevatorKind;

    fn quick_building() -> Building {
        Building::new(12, Box::new(NearestAvailableDispatch::new()))
    }

    fn quick_car(id: &str, floor: usize) -> Elevator {
        Elevator::new(id, ElevatorKind::Passenger, floor, 10, 1, 1, 1, 12)
    }

    #[test]
    #[should_panic(expected = "at least 2 floors")]
    fn test_single_floor_building_panics() {
        Building::new(1, Box::new(NearestAvailableDispatch::new()));
    }

    #[test]
    fn test_duplicate_id_is_case_insensitive() {
        let mut b = quick_building();
        assert!(b.add_elevator(quick_car("E1", 0)));
        assert!(!b.add_elevator(quick_car("e1", 3)));
        assert_eq!(b.elevators().len(), 1);
    }

    #[test]
    fn test_elevator_outside_building_is_rejected() {
        let mut b = quick_building();
        let stray = Elevator::new("E9", ElevatorKind::Passenger, 20, 10, 1, 1, 1, 30);
        assert!(!b.add_elevator(stray));
    }

    #[test]
    fn test_destination_is_strictly_beyond_origin() {
        let b = quick_building();
        assert_eq!(b.destination_for(0, Direction::Up).unwrap(), 3);
        assert_eq!(b.destination_for(10, Direction::Up).unwrap(), 11);
        assert_eq!(b.destination_for(11, Direction::Down).unwrap(), 8);
        assert_eq!(b.destination_for(1, Direction::Down).unwrap(), 0);
        assert!(b.destination_for(11, Direction::Up).is_err());
        assert!(b.destination_for(0, Direction::Down).is_err());
    }

    #[test]
    fn test_unknown_id_toggles_nothing() {
        let mut b = quick_building();
        assert!(!b.set_out_of_service("ghost", true));
    }
}
