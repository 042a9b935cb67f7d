//! Drives the training system against a live world the way a session loop
//! does: tick, feed events to the system, apply the commands it emits.

use std::time::Duration;

use signal_maze_core::{Command, Direction, Event, GridConfig, RoomCoords};
use signal_maze_system_training::{Config, Training};
use signal_maze_world::{apply, query, World};

fn run_rounds(world: &mut World, training: &mut Training, rounds: u32, dt: Duration) {
    for _ in 0..rounds {
        let mut events = Vec::new();
        apply(world, Command::Tick { dt }, &mut events);
        let mut commands = Vec::new();
        training.handle(&events, &mut commands);
        for command in commands {
            apply(world, command, &mut events);
        }
    }
}

#[test]
fn enabled_rooms_train_to_completion() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let mut training = Training::new(Config::new(0.5));
    let origin = RoomCoords::new(0, 0);

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::EnableRoom {
            coords: origin,
            complexity: 0.5,
            density: 0.5,
        },
        &mut events,
    );
    training.handle(&events, &mut Vec::new());
    assert_eq!(training.rooms_in_training(), 1);

    run_rounds(&mut world, &mut training, 4, Duration::from_millis(500));

    assert!(query::is_room_trained(&world, origin));
    assert_eq!(query::room_training_progress(&world, origin), 1.0);
    assert_eq!(training.rooms_in_training(), 0);
}

#[test]
fn two_trained_neighbours_open_their_shared_wall() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let mut training = Training::new(Config::new(1.0));
    let a = RoomCoords::new(0, 0);
    let b = RoomCoords::new(1, 0);

    let mut events = Vec::new();
    for coords in [a, b] {
        apply(
            &mut world,
            Command::EnableRoom {
                coords,
                complexity: 0.5,
                density: 0.5,
            },
            &mut events,
        );
    }
    training.handle(&events, &mut Vec::new());

    run_rounds(&mut world, &mut training, 3, Duration::from_secs(1));

    assert!(query::is_room_trained(&world, a));
    assert!(query::is_room_trained(&world, b));
    assert!(query::does_wall_exist(&world, a, Direction::North));
    assert!(!query::does_door_exist(&world, a, Direction::North));
}

#[test]
fn progress_updates_reach_the_world() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let mut training = Training::new(Config::new(0.25));
    let origin = RoomCoords::new(0, 0);

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::EnableRoom {
            coords: origin,
            complexity: 0.5,
            density: 0.5,
        },
        &mut events,
    );
    training.handle(&events, &mut Vec::new());

    run_rounds(&mut world, &mut training, 1, Duration::from_secs(1));

    assert_eq!(query::room_training_progress(&world, origin), 0.25);
    assert!(!query::is_room_trained(&world, origin));
}

#[test]
fn connected_rooms_stop_generating_progress_commands() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let mut training = Training::new(Config::new(0.1));
    let origin = RoomCoords::new(0, 0);

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::EnableRoom {
            coords: origin,
            complexity: 0.5,
            density: 0.5,
        },
        &mut events,
    );
    apply(
        &mut world,
        Command::SetRoomConnected { coords: origin },
        &mut events,
    );
    training.handle(&events, &mut Vec::new());
    assert_eq!(training.rooms_in_training(), 0);

    let mut commands = Vec::new();
    training.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_secs(5),
        }],
        &mut commands,
    );
    assert!(commands.is_empty());
}
