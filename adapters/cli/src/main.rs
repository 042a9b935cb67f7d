#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Signal Maze session.
//!
//! The session drives the world the same way an interactive frontend would:
//! sweep the current perimeter ring open, let the training system ripen the
//! rooms, connect what finished, and tick until the ring completes.

use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;

use signal_maze_core::{Command, Event, GridConfig, WELCOME_BANNER};
use signal_maze_system_training::{Config as TrainingConfig, Training};
use signal_maze_world::{apply, query, World};

const TICK: Duration = Duration::from_millis(100);
const MAX_ROUNDS_PER_RING: u32 = 64;

/// Arguments accepted by the Signal Maze session runner.
#[derive(Debug, Parser)]
#[command(name = "signal-maze", about = "Runs a headless Signal Maze session")]
struct Args {
    /// Perimeter rings to complete before exiting.
    #[arg(long, default_value_t = 3)]
    rings: u32,

    /// Rooms along each axis of the square world grid.
    #[arg(long, default_value_t = 20)]
    rooms_per_axis: i32,

    /// Training progress gained per simulated second.
    #[arg(long, default_value_t = 0.5)]
    training_rate: f32,

    /// Seed for deterministic door placement.
    #[arg(long)]
    door_seed: Option<u64>,
}

/// Entry point for the Signal Maze command-line session.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = GridConfig {
        rooms_per_axis: args.rooms_per_axis,
        ..GridConfig::default()
    };
    if let Some(seed) = args.door_seed {
        config.door_seed = seed;
    }
    let mut world = World::new(config).context("invalid grid configuration")?;
    if args.rings as i32 >= args.rooms_per_axis / 2 {
        bail!(
            "{} rings do not fit in a {} room grid",
            args.rings,
            args.rooms_per_axis
        );
    }
    let mut training = Training::new(TrainingConfig::new(args.training_rate));

    println!("{WELCOME_BANNER}");
    println!(
        "grid {}x{} rooms, completing {} rings",
        config.rooms_per_axis, config.rooms_per_axis, args.rings
    );

    for ring in 0..args.rings {
        let rounds = complete_ring(&mut world, &mut training, ring)?;
        println!(
            "ring {ring} completed after {rounds} rounds, signal {:.1}, next ring {}",
            query::signal_strength(&world),
            query::current_ring(&world),
        );
    }

    println!(
        "session finished inside ring {} with signal {:.1}",
        query::current_ring(&world),
        query::signal_strength(&world),
    );
    Ok(())
}

/// Runs generate/train/connect rounds until the given ring completes.
fn complete_ring(world: &mut World, training: &mut Training, ring: u32) -> anyhow::Result<u32> {
    for round in 1..=MAX_ROUNDS_PER_RING {
        let mut events = Vec::new();
        let mut cursor = 0;
        apply(world, Command::GeneratePerimeterRooms, &mut events);
        run_round(world, training, &mut events, &mut cursor);
        apply(world, Command::ConnectPerimeterRooms, &mut events);
        run_round(world, training, &mut events, &mut cursor);
        if events.contains(&Event::PerimeterCompleted { ring }) {
            return Ok(round);
        }
    }
    bail!("ring {ring} did not complete within {MAX_ROUNDS_PER_RING} rounds")
}

/// Advances the clock one tick, then feeds every event not yet seen through
/// the training system and applies whatever commands it produces.
fn run_round(
    world: &mut World,
    training: &mut Training,
    events: &mut Vec<Event>,
    cursor: &mut usize,
) {
    apply(world, Command::Tick { dt: TICK }, events);
    let mut commands = Vec::new();
    training.handle(&events[*cursor..], &mut commands);
    *cursor = events.len();
    for command in commands {
        apply(world, command, events);
    }
}
