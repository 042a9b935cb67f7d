//! Builder callback dispatch observed through recording collaborators.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use signal_maze_core::{Command, Direction, Event, GridConfig, RoomBuilder, RoomCoords, WallBuilder};
use signal_maze_world::{apply, query, World};

#[derive(Default)]
struct RecordingRoomBuilder {
    built: Vec<([u32; 4], f32, f32)>,
    destroyed: u32,
    health_reports: Vec<f32>,
    progress_reports: Vec<f32>,
    connected: u32,
}

impl RoomBuilder for RecordingRoomBuilder {
    fn build_room(&mut self, door_positions: [u32; 4], complexity: f32, density: f32) {
        self.built.push((door_positions, complexity, density));
    }

    fn destroy_room(&mut self) {
        self.destroyed += 1;
    }

    fn health_changed(&mut self, health: f32) {
        self.health_reports.push(health);
    }

    fn training_progress_updated(&mut self, progress: f32) {
        self.progress_reports.push(progress);
    }

    fn room_was_connected(&mut self) {
        self.connected += 1;
    }
}

#[derive(Default)]
struct RecordingWallBuilder {
    calls: Vec<&'static str>,
    door_progress: Vec<(Direction, f32)>,
}

impl WallBuilder for RecordingWallBuilder {
    fn build_south_wall(&mut self) {
        self.calls.push("build_south_wall");
    }
    fn build_west_wall(&mut self) {
        self.calls.push("build_west_wall");
    }
    fn destroy_south_wall(&mut self) {
        self.calls.push("destroy_south_wall");
    }
    fn destroy_west_wall(&mut self) {
        self.calls.push("destroy_west_wall");
    }
    fn spawn_south_door(&mut self) {
        self.calls.push("spawn_south_door");
    }
    fn spawn_west_door(&mut self) {
        self.calls.push("spawn_west_door");
    }
    fn destroy_south_door(&mut self) {
        self.calls.push("destroy_south_door");
    }
    fn destroy_west_door(&mut self) {
        self.calls.push("destroy_west_door");
    }
    fn lock_south_door(&mut self) {
        self.calls.push("lock_south_door");
    }
    fn lock_west_door(&mut self) {
        self.calls.push("lock_west_door");
    }
    fn unlock_south_door(&mut self) {
        self.calls.push("unlock_south_door");
    }
    fn unlock_west_door(&mut self) {
        self.calls.push("unlock_west_door");
    }

    fn training_progress_updated_for_door(&mut self, relative_direction: Direction, progress: f32) {
        self.door_progress.push((relative_direction, progress));
    }
}

fn register_room_builder(
    world: &mut World,
    coords: RoomCoords,
) -> Rc<RefCell<RecordingRoomBuilder>> {
    let builder = Rc::new(RefCell::new(RecordingRoomBuilder::default()));
    let dynamic: Rc<RefCell<dyn RoomBuilder>> = builder.clone();
    world.set_room_builder(coords, Rc::downgrade(&dynamic));
    builder
}

fn register_wall_builder(
    world: &mut World,
    coords: RoomCoords,
) -> Rc<RefCell<RecordingWallBuilder>> {
    let builder = Rc::new(RefCell::new(RecordingWallBuilder::default()));
    let dynamic: Rc<RefCell<dyn WallBuilder>> = builder.clone();
    world.set_wall_builder(coords, Rc::downgrade(&dynamic));
    builder
}

fn enable(world: &mut World, coords: RoomCoords, events: &mut Vec<Event>) {
    apply(
        world,
        Command::EnableRoom {
            coords,
            complexity: 0.7,
            density: 0.3,
        },
        events,
    );
}

fn tick(world: &mut World, events: &mut Vec<Event>) {
    apply(
        world,
        Command::Tick {
            dt: Duration::from_millis(16),
        },
        events,
    );
}

#[test]
fn build_room_fires_once_with_generated_door_positions() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let origin = RoomCoords::new(0, 0);
    let builder = register_room_builder(&mut world, origin);
    let mut events = Vec::new();

    enable(&mut world, origin, &mut events);
    enable(&mut world, origin, &mut events);

    let recorded = builder.borrow();
    assert_eq!(recorded.built.len(), 1);
    let (positions, complexity, density) = recorded.built[0];
    for position in positions {
        assert!(position <= 8);
    }
    assert_eq!(complexity, 0.7);
    assert_eq!(density, 0.3);
}

#[test]
fn health_reports_are_clamped_and_death_tears_down_once() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let origin = RoomCoords::new(0, 0);
    let builder = register_room_builder(&mut world, origin);
    let mut events = Vec::new();

    enable(&mut world, origin, &mut events);
    apply(
        &mut world,
        Command::UpdateRoomHealth {
            coords: origin,
            delta: -20.0,
        },
        &mut events,
    );
    apply(
        &mut world,
        Command::SetRoomHealth {
            coords: origin,
            health: -999.0,
        },
        &mut events,
    );
    apply(
        &mut world,
        Command::SetRoomHealth {
            coords: origin,
            health: 10.0,
        },
        &mut events,
    );

    let recorded = builder.borrow();
    assert_eq!(recorded.health_reports, vec![80.0, 0.0]);
    assert_eq!(recorded.destroyed, 1);
}

#[test]
fn north_wall_callbacks_route_to_the_neighbouring_couple() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let origin = RoomCoords::new(0, 0);
    // The couple at (1, 0) owns the origin's north wall as its south slot.
    let own_couple = register_wall_builder(&mut world, origin);
    let north_couple = register_wall_builder(&mut world, RoomCoords::new(1, 0));
    let mut events = Vec::new();

    enable(&mut world, origin, &mut events);
    tick(&mut world, &mut events);

    let north = north_couple.borrow();
    assert!(north.calls.contains(&"build_south_wall"));
    assert!(north.calls.contains(&"spawn_south_door"));
    assert!(!north.calls.contains(&"build_west_wall"));

    let own = own_couple.borrow();
    assert!(own.calls.contains(&"build_south_wall"));
    assert!(own.calls.contains(&"build_west_wall"));
}

#[test]
fn reconciliation_callbacks_are_not_repeated() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let origin = RoomCoords::new(0, 0);
    let couple = register_wall_builder(&mut world, origin);
    let mut events = Vec::new();

    enable(&mut world, origin, &mut events);
    tick(&mut world, &mut events);
    let calls_after_first = couple.borrow().calls.len();

    let feed = world.wall_update_feed();
    assert!(feed.request(origin, Direction::South));
    assert!(feed.request(origin, Direction::West));
    tick(&mut world, &mut events);

    assert_eq!(couple.borrow().calls.len(), calls_after_first);
}

#[test]
fn training_progress_reaches_room_and_door_builders() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let origin = RoomCoords::new(0, 0);
    let neighbour = RoomCoords::new(1, 0);
    let room = register_room_builder(&mut world, origin);
    let north_couple = register_wall_builder(&mut world, neighbour);
    let mut events = Vec::new();

    enable(&mut world, origin, &mut events);
    enable(&mut world, neighbour, &mut events);
    apply(
        &mut world,
        Command::SetRoomTrainingProgress {
            coords: origin,
            progress: 0.4,
        },
        &mut events,
    );

    assert_eq!(room.borrow().progress_reports, vec![0.4]);
    // The origin's north door lives in the neighbouring couple's south slot.
    assert_eq!(
        north_couple.borrow().door_progress,
        vec![(Direction::South, 0.4)]
    );
}

#[test]
fn connection_notifies_the_room_builder() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let origin = RoomCoords::new(0, 0);
    let builder = register_room_builder(&mut world, origin);
    let mut events = Vec::new();

    enable(&mut world, origin, &mut events);
    apply(
        &mut world,
        Command::SetRoomConnected { coords: origin },
        &mut events,
    );
    apply(
        &mut world,
        Command::SetRoomConnected { coords: origin },
        &mut events,
    );

    assert_eq!(builder.borrow().connected, 1);
}

#[test]
fn perimeter_locks_reach_the_wall_builders() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let origin = RoomCoords::new(0, 0);
    let couple = register_wall_builder(&mut world, origin);
    let mut events = Vec::new();

    enable(&mut world, origin, &mut events);
    tick(&mut world, &mut events);
    {
        let recorded = couple.borrow();
        assert!(recorded.calls.contains(&"lock_south_door"));
        assert!(recorded.calls.contains(&"lock_west_door"));
    }

    apply(
        &mut world,
        Command::SetRoomConnected { coords: origin },
        &mut events,
    );
    tick(&mut world, &mut events);
    let recorded = couple.borrow();
    assert!(recorded.calls.contains(&"unlock_south_door"));
    assert!(recorded.calls.contains(&"unlock_west_door"));
}

#[test]
fn destroying_neighbouring_doors_targets_selected_sides() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let origin = RoomCoords::new(0, 0);
    let north_couple = register_wall_builder(&mut world, RoomCoords::new(1, 0));
    let own_couple = register_wall_builder(&mut world, origin);
    let mut events = Vec::new();

    enable(&mut world, origin, &mut events);
    tick(&mut world, &mut events);
    apply(
        &mut world,
        Command::DestroyNeighbouringDoors {
            coords: origin,
            sides: [true, false, false, true],
        },
        &mut events,
    );

    assert!(north_couple.borrow().calls.contains(&"destroy_south_door"));
    assert!(own_couple.borrow().calls.contains(&"destroy_west_door"));
    assert!(!own_couple.borrow().calls.contains(&"destroy_south_door"));
}

#[test]
fn dropped_builders_are_skipped_silently() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let origin = RoomCoords::new(0, 0);
    let builder = register_room_builder(&mut world, origin);
    drop(builder);
    let mut events = Vec::new();

    enable(&mut world, origin, &mut events);
    assert!(query::does_room_exist(&world, origin));
    assert_eq!(events, vec![Event::RoomEnabled { coords: origin }]);
}

#[test]
fn dead_room_walls_tear_down_through_the_builders() {
    let mut world = World::new(GridConfig::default()).expect("config");
    let origin = RoomCoords::new(0, 0);
    let couple = register_wall_builder(&mut world, origin);
    let mut events = Vec::new();

    enable(&mut world, origin, &mut events);
    tick(&mut world, &mut events);
    apply(&mut world, Command::DisableRoom { coords: origin }, &mut events);
    tick(&mut world, &mut events);

    let recorded = couple.borrow();
    assert!(recorded.calls.contains(&"destroy_south_door"));
    assert!(recorded.calls.contains(&"destroy_south_wall"));
    assert!(recorded.calls.contains(&"destroy_west_wall"));
}
