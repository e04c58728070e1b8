//! Interactive console for the elevator simulator core.
//!
//! A thin stdin/stdout shell: parses commands, forwards them to the
//! building, and prints the event feed. The core owns no clock; the `auto`
//! command is the external driver, ticking at a fixed cadence from here.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use elevator_simulator_core_rs::{
    Building, Direction, Elevator, NearestAvailableDispatch, Request,
};

const AUTO_TICK_DELAY: Duration = Duration::from_millis(300);

fn main() {
    let mut building = Building::new(12, Box::new(NearestAvailableDispatch::new()));
    building.add_elevator(Elevator::passenger("E1", 0));
    building.add_elevator(Elevator::high_speed("E2", 5));
    building.add_elevator(Elevator::freight("F1", 0));

    println!("Elevator Simulator - Console");
    println!("Commands: status | status waiting | call <floor> <up|down> <count> | press <id> <floor> | tick [n] | auto <n> | oos <id> <on|off> | events [n] | metrics | reset | quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&cmd) = parts.first() else {
            continue;
        };

        match cmd.to_ascii_lowercase().as_str() {
            "quit" | "exit" => {
                println!("Goodbye.");
                return;
            }
            "help" => print_help(),
            "status" => print_status(&building, parts.get(1).copied()),
            "tick" => {
                let repeat = parts
                    .get(1)
                    .and_then(|s| s.parse::<usize>().ok())
                    .filter(|&n| n > 0)
                    .unwrap_or(1);
                for _ in 0..repeat {
                    building.tick_all();
                }
                println!("(manual) tick x{repeat}");
            }
            "auto" => match parts.get(1).and_then(|s| s.parse::<usize>().ok()) {
                Some(count) if count > 0 => run_auto(&mut building, count),
                _ => println!("Usage: auto <ticks>"),
            },
            "call" => submit_call(&mut building, &parts),
            "press" => press_button(&mut building, &parts),
            "oos" => toggle_service(&mut building, &parts),
            "events" => {
                let take = parts
                    .get(1)
                    .and_then(|s| s.parse::<usize>().ok())
                    .filter(|&n| n > 0)
                    .unwrap_or(20);
                for event in building.recent_events(take) {
                    println!("{event}");
                }
            }
            "metrics" => {
                let m = building.wait_metrics();
                println!(
                    "served:{} avgWait:{:.2} maxWait:{}",
                    m.served, m.average_wait, m.max_wait
                );
            }
            "reset" => {
                building.reset_wait_metrics();
                println!("Wait metrics reset.");
            }
            _ => println!("Unknown command. Try: status | call <floor> <up|down> <count> | tick | quit"),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  status");
    println!("  status waiting");
    println!("  call <floor> <up|down> <count>");
    println!("  press <elevatorId> <floor>");
    println!("  tick [N]");
    println!("  auto <N>");
    println!("  oos <elevatorId> <on|off>");
    println!("  events [N]");
    println!("  metrics");
    println!("  reset");
    println!("  quit");
}

fn print_status(building: &Building, arg: Option<&str>) {
    if arg.is_some_and(|a| a.eq_ignore_ascii_case("waiting")) {
        println!("Waiting (non-zero only):");
        for floor in 0..building.floors() {
            let up = building.waiting_count(floor, Direction::Up);
            let down = building.waiting_count(floor, Direction::Down);
            if up > 0 || down > 0 {
                println!("F:{floor} | Up:{up} Down:{down}");
            }
        }
        return;
    }
    println!("Floors: {} | Tick: {}", building.floors(), building.current_tick());
    for e in building.elevators() {
        println!(
            "{} ({}) | F:{} | Dir:{} | State:{} | Moving:{} | Pax:{}/{}{}",
            e.id(),
            e.kind(),
            e.current_floor(),
            e.direction(),
            e.state(),
            e.is_moving(),
            e.passenger_count(),
            e.capacity(),
            if building.is_out_of_service(e.id()) {
                " | OUT OF SERVICE"
            } else {
                ""
            }
        );
    }
}

fn run_auto(building: &mut Building, count: usize) {
    println!("Auto-tick: {count} ticks at {}ms", AUTO_TICK_DELAY.as_millis());
    for i in 1..=count {
        building.tick_all();
        for event in building.drain_events() {
            println!("{event}");
        }
        if i % 5 == 0 {
            println!("(auto) tick x{i}");
        }
        thread::sleep(AUTO_TICK_DELAY);
    }
    println!("Auto-tick: done");
}

fn submit_call(building: &mut Building, parts: &[&str]) {
    let usage = "Usage: call <floor:int> <up|down> <count:int>";
    let (Some(floor), Some(dir), Some(count)) = (
        parts.get(1).and_then(|s| s.parse::<usize>().ok()),
        parts.get(2).and_then(|s| parse_direction(s)),
        parts.get(3).and_then(|s| s.parse::<usize>().ok()),
    ) else {
        println!("{usage}");
        return;
    };

    match Request::new(floor, dir, count) {
        Ok(req) => match building.submit_call(&req) {
            Ok(()) => println!("Registered call: floor {floor}, {dir}, {count} pax."),
            Err(e) => println!("Error: {e}"),
        },
        Err(e) => println!("Error: {e}"),
    }
}

fn press_button(building: &mut Building, parts: &[&str]) {
    let (Some(&id), Some(floor)) = (
        parts.get(1),
        parts.get(2).and_then(|s| s.parse::<usize>().ok()),
    ) else {
        println!("Usage: press <elevatorId> <floor>");
        return;
    };
    if !building
        .elevators()
        .iter()
        .any(|e| e.id().eq_ignore_ascii_case(id))
    {
        println!("No elevator '{id}'");
        return;
    }
    if building.press_button(id, floor) {
        println!("Pressed {floor} in {id}");
    } else {
        println!("Floor {floor} already pending or out of range for {id}");
    }
}

fn toggle_service(building: &mut Building, parts: &[&str]) {
    let (Some(&id), Some(&flag)) = (parts.get(1), parts.get(2)) else {
        println!("Usage: oos <elevatorId> <on|off>");
        return;
    };
    let out = flag.eq_ignore_ascii_case("on");
    if building.set_out_of_service(id, out) {
        println!(
            "Out-of-service {} for {id}",
            if out { "enabled" } else { "disabled" }
        );
    } else {
        println!("No elevator with Id '{id}'");
    }
}

fn parse_direction(s: &str) -> Option<Direction> {
    match s.to_ascii_lowercase().as_str() {
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        _ => None,
    }
}
