//! Tests for the elevator state machine: movement timing, the door cycle,
//! sweep ordering and boarding bounds.

use elevator_simulator_core_rs::{
    Direction, Elevator, ElevatorKind, ElevatorSignal, ElevatorState, Passenger, Request,
};

fn car(id: &str, start: usize) -> Elevator {
    Elevator::new(id, ElevatorKind::Passenger, start, 10, 1, 1, 1, 12)
}

#[test]
fn test_travel_takes_speed_ticks_per_floor() {
    let mut e = Elevator::new("E1", ElevatorKind::Passenger, 0, 10, 2, 1, 1, 12);
    assert!(e.add_target(2));

    // 2 floors at 2 ticks each: the first three ticks leave the car short
    assert_eq!(e.tick(), None);
    assert_eq!(e.tick(), Some(ElevatorSignal::Arrived { floor: 1 }));
    assert_eq!(e.tick(), None);
    assert_eq!(e.tick(), Some(ElevatorSignal::Arrived { floor: 2 }));

    assert_eq!(e.current_floor(), 2);
    assert_eq!(e.state(), ElevatorState::DoorsOpening);
}

#[test]
fn test_door_cycle_phases_and_signals() {
    let mut e = Elevator::new("E1", ElevatorKind::Passenger, 0, 10, 1, 2, 2, 12);

    // Call at the current floor: the cycle starts without a movement tick
    assert!(e.add_target(0));
    assert_eq!(e.state(), ElevatorState::DoorsOpening);
    assert_eq!(e.current_floor(), 0);

    assert_eq!(e.tick(), None); // opening, 1 of 2
    assert_eq!(e.tick(), Some(ElevatorSignal::DoorsOpened { floor: 0 }));
    assert_eq!(e.state(), ElevatorState::DoorsOpen);

    assert_eq!(e.tick(), None); // dwell, 1 of 2
    assert_eq!(e.tick(), None);
    assert_eq!(e.state(), ElevatorState::DoorsClosing);

    assert_eq!(e.tick(), None); // closing, 1 of 2
    assert_eq!(e.tick(), Some(ElevatorSignal::DoorsClosed { floor: 0 }));
    assert_eq!(e.state(), ElevatorState::DoorsClosed);
    assert_eq!(e.direction(), Direction::Idle);
}

#[test]
fn test_door_cycle_never_skips_or_reverses() {
    let mut e = Elevator::new("E1", ElevatorKind::Passenger, 0, 10, 1, 3, 3, 12);
    e.add_target(4);

    let mut prev = e.state();
    for _ in 0..60 {
        e.tick();
        let cur = e.state();
        let legal = cur == prev
            || matches!(
                (prev, cur),
                (ElevatorState::DoorsClosed, ElevatorState::DoorsOpening)
                    | (ElevatorState::DoorsOpening, ElevatorState::DoorsOpen)
                    | (ElevatorState::DoorsOpen, ElevatorState::DoorsClosing)
                    | (ElevatorState::DoorsClosing, ElevatorState::DoorsClosed)
            );
        assert!(legal, "illegal door transition {prev:?} -> {cur:?}");
        prev = cur;
    }
}

#[test]
fn test_assign_at_current_floor_opens_without_moving() {
    let mut e = car("E1", 5);
    let req = Request::new(5, Direction::Up, 1).unwrap();
    e.assign(&req);

    assert_eq!(e.state(), ElevatorState::DoorsOpening);
    assert_eq!(e.tick(), Some(ElevatorSignal::DoorsOpened { floor: 5 }));
    assert_eq!(e.current_floor(), 5);
}

#[test]
fn test_current_floor_mid_cycle_is_not_a_new_stop() {
    let mut e = car("E1", 5);
    assert!(e.press_button(5)); // begins the cycle
    assert!(!e.press_button(5)); // open doors already serve the call
    e.tick(); // DoorsOpen
    assert!(!e.press_button(5));
}

#[test]
fn test_sweep_serves_up_side_then_down_side() {
    let mut e = car("E1", 5);
    e.add_target(7);
    e.add_target(3);
    assert_eq!(e.direction(), Direction::Up); // tie, two floors each way

    let mut opened_at = Vec::new();
    for _ in 0..20 {
        if let Some(ElevatorSignal::DoorsOpened { floor }) = e.tick() {
            opened_at.push(floor);
        }
    }
    assert_eq!(opened_at, vec![7, 3]);
    assert_eq!(e.direction(), Direction::Idle);
}

#[test]
fn test_sweep_keeps_direction_past_intermediate_stops() {
    let mut e = car("E1", 0);
    e.add_target(2);
    e.add_target(6);
    e.add_target(4);

    let mut opened_at = Vec::new();
    for _ in 0..30 {
        if let Some(ElevatorSignal::DoorsOpened { floor }) = e.tick() {
            opened_at.push(floor);
        }
    }
    assert_eq!(opened_at, vec![2, 4, 6]);
}

#[test]
fn test_boarding_is_capped_at_capacity() {
    let mut e = Elevator::new("E1", ElevatorKind::Passenger, 0, 3, 1, 1, 1, 12);
    let incoming: Vec<Passenger> = (0..5).map(|_| Passenger::new(0, 4)).collect();

    assert_eq!(e.board_passengers(incoming), 3);
    assert_eq!(e.passenger_count(), 3);
    assert_eq!(e.available_capacity(), 0);
    assert_eq!(e.targets(), vec![4]);
}

#[test]
fn test_unload_removes_only_arrivals() {
    let mut e = car("E1", 0);
    e.board_passengers(vec![
        Passenger::new(0, 4),
        Passenger::new(0, 7),
        Passenger::new(0, 4),
    ]);

    for _ in 0..4 {
        e.tick();
    }
    assert_eq!(e.current_floor(), 4);
    assert_eq!(e.unload_at_current_floor(), 2);
    assert_eq!(e.passenger_count(), 1);
}

#[test]
fn test_can_accept_full_car_at_call_floor() {
    let mut e = Elevator::new("E1", ElevatorKind::Passenger, 2, 2, 1, 1, 1, 12);
    e.board_passengers(vec![Passenger::new(2, 5), Passenger::new(2, 5)]);
    assert_eq!(e.available_capacity(), 0);

    // Full and elsewhere: refuse. Full but at the floor: the next door-open
    // may free capacity, so the call is still acceptable.
    assert!(!e.can_accept(&Request::new(6, Direction::Up, 1).unwrap()));
    assert!(e.can_accept(&Request::new(2, Direction::Up, 1).unwrap()));
    assert!(!e.can_accept(&Request::new(12, Direction::Up, 1).unwrap()));
}

#[test]
fn test_idle_car_without_targets_stays_put() {
    let mut e = car("E1", 4);
    for _ in 0..10 {
        assert_eq!(e.tick(), None);
    }
    assert_eq!(e.current_floor(), 4);
    assert_eq!(e.direction(), Direction::Idle);
    assert!(!e.is_moving());
}
