//! Traffic Light State Machine
//!
//! This example drives a cyclic state machine with timers and events.
//!
//! Key concepts:
//! - Timer states that request their own transition
//! - A pedestrian button handled through event dispatch
//! - Behaviours shared between states
//! - Transition history
//!
//! Run with: RUST_LOG=statecraft=debug cargo run --example traffic_light

use statecraft::{
    shared, transitions, Behaviour, EventDispatcherStateMachine, SharedBehaviour, State,
    StateMachine, StateMachineBuilder, TimerState,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Light {
    Red,
    Green,
    Yellow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Signal {
    Elapsed,
    Button,
}

/// Counts how often the lamp it is attached to was switched on.
#[derive(Default)]
struct Lamp {
    switched_on: u32,
}

impl Behaviour for Lamp {
    fn on_enter(&mut self) {
        self.switched_on += 1;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Traffic Light State Machine ===\n");

    // Timers cannot reach the machine, so they raise a flag the loop polls.
    let elapsed = Rc::new(RefCell::new(false));
    let timer = |millis| {
        let flag = Rc::clone(&elapsed);
        TimerState::new(Duration::from_millis(millis), move || *flag.borrow_mut() = true)
    };

    let machine = StateMachineBuilder::<Light, Signal>::new()
        .state(Light::Red, timer(30))
        .state(Light::Green, timer(50))
        .state(Light::Yellow, timer(10))
        .transitions(transitions![
            Light::Red => Signal::Elapsed => Light::Green,
            Light::Green => Signal::Elapsed => Light::Yellow,
            Light::Green => Signal::Button => Light::Yellow,
            Light::Yellow => Signal::Elapsed => Light::Red,
        ])
        .initial(Light::Red)
        .build_checked()
        .unwrap();

    let mut light: EventDispatcherStateMachine<Light, Signal, &str> = machine.into();
    light
        .subscribe_handler(&Light::Green, |event, fsm| {
            *event == "button" && fsm.trigger(Signal::Button).is_ok()
        })
        .unwrap();

    // The initial state counts as entered without its hook running.
    light.get_state_mut(&Light::Red).unwrap().enter();

    // A separate behavioural lamp counter, driven in lockstep with the light.
    let lamp = Rc::new(RefCell::new(Lamp::default()));
    let mut counter: StateMachine<Light, Light> = StateMachine::new();
    counter
        .add_with_behaviours(Light::Green, [lamp.clone() as SharedBehaviour])
        .unwrap();
    counter
        .add_with_behaviours(Light::Red, [shared(Lamp::default())])
        .unwrap();
    counter.add_empty(Light::Yellow).unwrap();
    counter.configure_with_states_as_triggers_with_no_reentrant().unwrap();
    counter.set_initial_state(Light::Red).unwrap();

    for tick in 0..40 {
        light.update();
        if std::mem::take(&mut *elapsed.borrow_mut()) {
            light.trigger(Signal::Elapsed).unwrap();
        }
        if tick == 25 && light.dispatch(&"button") {
            println!("  tick {tick:>2}: pedestrian button cut green short");
        }
        if let Some(&active) = light.active_state() {
            if !counter.is_in_state(&active) {
                counter.trigger(active).unwrap();
                println!("  tick {tick:>2}: {active:?}");
            }
        }
        std::thread::sleep(Duration::from_millis(5));
    }

    println!("\nPath: {:?}", light.history().path());
    println!("Green lamp switched on {} time(s)", lamp.borrow().switched_on);

    println!("\n=== Example Complete ===");
}
