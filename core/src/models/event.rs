//! Event logging for simulation observation and replay.
//!
//! The building records significant state changes as `Event`s in a rolling
//! log. The core only produces this feed; formatting and display belong to
//! the host (console, tests, analysis).
//!
//! # Event Types
//!
//! - **CallSubmitted**: a hall call entered the floor queues
//! - **Dispatched**: the dispatch pass bound an elevator to a call
//! - **Stop**: an elevator opened its doors and unloaded/boarded
//! - **ServiceChanged**: an elevator was taken out of or returned to service

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use super::Direction;

/// Maximum number of events retained by the rolling log.
pub const EVENT_LOG_CAPACITY: usize = 256;

/// Simulation event capturing a state change.
///
/// All events include the tick at which they occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A hall call was accepted and its passengers enqueued
    CallSubmitted {
        tick: usize,
        floor: usize,
        direction: Direction,
        count: usize,
    },

    /// The dispatch pass assigned an elevator to a (floor, direction) call
    Dispatched {
        tick: usize,
        elevator_id: String,
        floor: usize,
        direction: Direction,
        count: usize,
    },

    /// An elevator opened its doors at a floor; summarizes the exchange
    Stop {
        tick: usize,
        elevator_id: String,
        floor: usize,
        unloaded: usize,
        boarded: usize,
        waiting_up: usize,
        waiting_down: usize,
    },

    /// An elevator was toggled out of or back into service
    ServiceChanged {
        tick: usize,
        elevator_id: String,
        out_of_service: bool,
    },
}

impl Event {
    /// Tick at which the event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::CallSubmitted { tick, .. }
            | Event::Dispatched { tick, .. }
            | Event::Stop { tick, .. }
            | Event::ServiceChanged { tick, .. } => *tick,
        }
    }

    /// Short tag naming the event variant
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::CallSubmitted { .. } => "CallSubmitted",
            Event::Dispatched { .. } => "Dispatched",
            Event::Stop { .. } => "Stop",
            Event::ServiceChanged { .. } => "ServiceChanged",
        }
    }

    /// Elevator involved in the event, if any
    pub fn elevator_id(&self) -> Option<&str> {
        match self {
            Event::CallSubmitted { .. } => None,
            Event::Dispatched { elevator_id, .. }
            | Event::Stop { elevator_id, .. }
            | Event::ServiceChanged { elevator_id, .. } => Some(elevator_id),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::CallSubmitted {
                tick,
                floor,
                direction,
                count,
            } => write!(f, "[t{tick}] Call F:{floor} {direction} x{count}"),
            Event::Dispatched {
                tick,
                elevator_id,
                floor,
                direction,
                count,
            } => write!(
                f,
                "[t{tick}] Dispatch {elevator_id} -> F:{floor} {direction} x{count}"
            ),
            Event::Stop {
                tick,
                elevator_id,
                floor,
                unloaded,
                boarded,
                waiting_up,
                waiting_down,
            } => write!(
                f,
                "Stop F:{floor} | {elevator_id} | t{tick} | out:{unloaded} in:{boarded} | waitUp:{waiting_up} waitDown:{waiting_down}"
            ),
            Event::ServiceChanged {
                tick,
                elevator_id,
                out_of_service,
            } => {
                if *out_of_service {
                    write!(f, "[t{tick}] {elevator_id} out of service")
                } else {
                    write!(f, "[t{tick}] {elevator_id} back in service")
                }
            }
        }
    }
}

/// Rolling event log bounded at [`EVENT_LOG_CAPACITY`] entries.
///
/// Oldest entries fall off the front once the bound is reached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: VecDeque<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Append an event, evicting the oldest if the log is at capacity.
    pub fn log(&mut self, event: Event) {
        if self.events.len() == EVENT_LOG_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// The most recent `n` events, in chronological order.
    pub fn recent(&self, n: usize) -> Vec<Event> {
        let skip = self.events.len().saturating_sub(n);
        self.events.iter().skip(skip).cloned().collect()
    }

    /// Remove and return all buffered events, in chronological order.
    pub fn drain(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(tick: usize) -> Event {
        Event::Stop {
            tick,
            elevator_id: "E1".to_string(),
            floor: 0,
            unloaded: 0,
            boarded: 2,
            waiting_up: 1,
            waiting_down: 0,
        }
    }

    #[test]
    fn test_event_accessors() {
        let ev = stop(42);
        assert_eq!(ev.tick(), 42);
        assert_eq!(ev.event_type(), "Stop");
        assert_eq!(ev.elevator_id(), Some("E1"));
    }

    #[test]
    fn test_stop_display_names_floor() {
        let ev = stop(3);
        assert!(ev.to_string().starts_with("Stop F:0"));
    }

    #[test]
    fn test_log_recent_and_drain() {
        let mut log = EventLog::new();
        for t in 0..5 {
            log.log(stop(t));
        }

        let recent = log.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].tick(), 3);
        assert_eq!(recent[1].tick(), 4);

        let drained = log.drain();
        assert_eq!(drained.len(), 5);
        assert!(log.is_empty());
    }

    #[test]
    fn test_log_is_bounded() {
        let mut log = EventLog::new();
        for t in 0..(EVENT_LOG_CAPACITY + 10) {
            log.log(stop(t));
        }
        assert_eq!(log.len(), EVENT_LOG_CAPACITY);
        // Oldest entries were evicted
        assert_eq!(log.recent(EVENT_LOG_CAPACITY)[0].tick(), 10);
    }
}
