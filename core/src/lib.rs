//! Elevator Simulator Core - Rust Engine
//!
//! Multi-elevator building simulation with deterministic, discrete-tick
//! execution.
//!
//! # Architecture
//!
//! - **models**: Domain types (Direction, Request, Passenger, FloorQueue, Event)
//! - **elevator**: Per-elevator movement and door state machine
//! - **dispatch**: Dispatch strategies (floor-call scoring)
//! - **building**: Building scheduler - owns elevators, queues, reservations
//!   and wait-time metrics, and drives the tick loop
//!
//! # Critical Invariants
//!
//! 1. One `tick_all` is one atomic step; nothing suspends or overlaps
//! 2. Boarded passenger count never exceeds elevator capacity
//! 3. Door transitions are strictly cyclic:
//!    Closed -> Opening -> Open -> Closing -> Closed
//! 4. At most one in-service elevator holds a reservation for a given
//!    (floor, direction) call

// Module declarations
pub mod building;
pub mod dispatch;
pub mod elevator;
pub mod models;

// Re-exports for convenience
pub use building::{Building, BuildingError, WaitMetrics};
pub use dispatch::{DispatchStrategy, NearestAvailableDispatch};
pub use elevator::{Elevator, ElevatorSignal};
pub use models::{
    event::{Event, EventLog},
    floor_queue::FloorQueue,
    passenger::Passenger,
    request::{Request, RequestError},
    Direction, ElevatorKind, ElevatorState,
};
