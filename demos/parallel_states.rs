//! Parallel States
//!
//! This example drives an orthogonal composite the way an engine would.
//!
//! Key concepts:
//! - Entry is outside-in, exit is inside-out
//! - Composite ids are read live from regions
//! - Failing actions report node, phase and position
//!
//! Run with: RUST_LOG=debug cargo run --example parallel_states

use std::error::Error;
use stratum::action::ActionError;
use stratum::builder::{region_of, StateNodeBuilder};
use stratum::core::{PseudoStateKind, StateContext};
use stratum::node::StateNode;
use stratum::{event_enum, state_enum};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum PlayerState {
        Player,
        Audio,
        Video,
        Buffering,
        Start,
    }
}

event_enum! {
    enum PlayerEvent {
        Play,
        Stop,
        Seek,
    }
}

fn announce(
    message: &'static str,
) -> impl Fn(&StateContext<PlayerState, PlayerEvent>) -> Result<(), ActionError> {
    move |_| {
        println!("  {message}");
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Parallel States Example ===\n");

    let audio = StateNodeBuilder::new()
        .id(PlayerState::Audio)
        .entry(announce("enter Audio"))
        .exit(announce("exit Audio"))
        .build()
        .unwrap();
    let video = StateNodeBuilder::new()
        .id(PlayerState::Video)
        .entry(announce("enter Video"))
        .exit(announce("exit Video"))
        .build()
        .unwrap();

    let player = StateNodeBuilder::new()
        .id(PlayerState::Player)
        .defer(PlayerEvent::Seek)
        .entry(announce("enter Player"))
        .exit(announce("exit Player"))
        .regions([region_of("audio", audio), region_of("video", video)])
        .build()
        .unwrap();

    println!("Node: {player}");
    println!("Orthogonal: {}", player.is_orthogonal());
    println!("Defers Seek: {}", player.should_defer(&PlayerEvent::Seek));
    println!("Ids while inactive: {:?}\n", player.ids());

    let ctx = StateContext::for_event(PlayerEvent::Play);
    println!("Activating:");
    player.activate(&PlayerEvent::Play, &ctx).unwrap();
    println!("Ids while active: {:?}\n", player.ids());

    println!("Deactivating:");
    player.deactivate(&PlayerEvent::Stop, &ctx).unwrap();
    println!("Ids after exit: {:?}\n", player.ids());

    let start: StateNode<PlayerState, PlayerEvent> =
        StateNode::pseudo(PlayerState::Start, PseudoStateKind::Initial);
    println!("Pseudostate: {start}");

    let buffering = StateNodeBuilder::new()
        .id(PlayerState::Buffering)
        .entry(announce("enter Buffering"))
        .entry(|_: &StateContext<PlayerState, PlayerEvent>| -> Result<(), ActionError> {
            Err(ActionError::new("network unavailable"))
        })
        .build()
        .unwrap();

    println!("\nEntering Buffering:");
    if let Err(err) = buffering.entry(&PlayerEvent::Play, &ctx) {
        let cause = err.source().map(|s| s.to_string()).unwrap_or_default();
        println!("Entry failed: {err} ({cause})");
    }

    println!("\n=== Example Complete ===");
}
