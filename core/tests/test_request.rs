//! Tests for request construction and passenger derivation

use elevator_simulator_core_rs::{Direction, Passenger, Request, RequestError};

#[test]
fn test_valid_request() {
    let req = Request::new(4, Direction::Down, 3).unwrap();
    assert_eq!(req.floor(), 4);
    assert_eq!(req.direction(), Direction::Down);
    assert_eq!(req.count(), 3);
}

#[test]
fn test_idle_direction_is_rejected() {
    assert_eq!(
        Request::new(4, Direction::Idle, 1).unwrap_err(),
        RequestError::IdleDirection
    );
}

#[test]
fn test_zero_count_is_rejected() {
    assert_eq!(
        Request::new(4, Direction::Up, 0).unwrap_err(),
        RequestError::ZeroCount
    );
}

#[test]
fn test_request_display() {
    let req = Request::new(2, Direction::Up, 5).unwrap();
    assert_eq!(req.to_string(), "Req(F:2, Dir:Up, P:5)");
}

#[test]
fn test_passenger_direction_is_derived() {
    assert_eq!(Passenger::new(1, 9).direction(), Direction::Up);
    assert_eq!(Passenger::new(9, 1).direction(), Direction::Down);
    assert_eq!(Passenger::new(6, 6).direction(), Direction::Idle);
}
