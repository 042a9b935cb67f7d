#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze world state.
//!
//! The [`World`] owns every room, wall, and gauge. All mutation flows through
//! [`apply`], which executes one [`Command`] and appends the resulting
//! [`Event`]s; reads go through the [`query`] module. Geometry side effects
//! are routed to externally-registered [`RoomBuilder`] and [`WallBuilder`]
//! collaborators at the exact point of each transition, and wall
//! reconciliation is deferred onto a deduplicated queue drained by the next
//! `Tick`.

use std::cell::RefCell;
use std::rc::Weak;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use signal_maze_core::{
    grid, Command, Direction, DoorState, Event, GridConfig, GridConfigError, RoomBuilder,
    RoomCoords, TilePoint, WallBuilder,
};

mod builders;
mod rooms;
mod walls;

pub use walls::WallUpdate;

use builders::BuilderRegistry;
use rooms::RoomGrid;
use walls::{WallArena, WallFace, WallKey, WallUpdateQueue};

/// Complexity and density handed to rooms materialised by the perimeter
/// sweep rather than by explicit exploration.
const PERIMETER_COMPLEXITY: f32 = 0.2;
const PERIMETER_DENSITY: f32 = 0.2;

/// Cloneable handle for requesting wall reconciliation from other threads.
///
/// Requests are buffered in a channel and folded into the deduplicated
/// wall-update queue at the start of the next `Tick`.
#[derive(Clone, Debug)]
pub struct WallUpdateFeed {
    sender: Sender<WallUpdate>,
}

impl WallUpdateFeed {
    /// Requests reconciliation of one wall. Returns `false` once the world
    /// has been dropped.
    pub fn request(&self, coords: RoomCoords, direction: Direction) -> bool {
        self.sender.send(WallUpdate { coords, direction }).is_ok()
    }
}

/// The complete simulation state.
#[derive(Debug)]
pub struct World {
    config: GridConfig,
    rooms: RoomGrid,
    walls: WallArena,
    registry: BuilderRegistry,
    queue: WallUpdateQueue,
    feed_tx: Sender<WallUpdate>,
    feed_rx: Receiver<WallUpdate>,
    current_ring: u32,
    rooms_connected_on_ring: u32,
    ring_advance_pending: bool,
    signal_strength: f32,
    door_rng: ChaCha8Rng,
}

impl World {
    /// Creates a blank world from a validated configuration.
    pub fn new(config: GridConfig) -> Result<Self, GridConfigError> {
        config.validate()?;
        let (feed_tx, feed_rx) = channel();
        Ok(Self {
            rooms: RoomGrid::new(config.rooms_per_axis),
            walls: WallArena::new(config.rooms_per_axis),
            registry: BuilderRegistry::new(config.rooms_per_axis),
            queue: WallUpdateQueue::default(),
            feed_tx,
            feed_rx,
            current_ring: 0,
            rooms_connected_on_ring: 0,
            ring_advance_pending: false,
            signal_strength: config.max_signal_strength,
            door_rng: ChaCha8Rng::seed_from_u64(config.door_seed),
            config,
        })
    }

    /// Registers the builder collaborator for one room.
    ///
    /// The world keeps only a weak reference; dropping the builder's owner
    /// silently unregisters it.
    pub fn set_room_builder(
        &mut self,
        coords: RoomCoords,
        builder: Weak<RefCell<dyn RoomBuilder>>,
    ) {
        self.registry.set_room_builder(coords, builder);
    }

    /// Registers the builder collaborator for the wall couple owned by the
    /// given cell, including the phantom row past the grid edge.
    pub fn set_wall_builder(
        &mut self,
        coords: RoomCoords,
        builder: Weak<RefCell<dyn WallBuilder>>,
    ) {
        self.registry.set_wall_builder(coords, builder);
    }

    /// Hands out a thread-safe feed for requesting wall reconciliation.
    pub fn wall_update_feed(&self) -> WallUpdateFeed {
        WallUpdateFeed {
            sender: self.feed_tx.clone(),
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });

        while let Ok(request) = self.feed_rx.try_recv() {
            self.queue.push(request);
        }
        let pending = self.queue.drain();
        for update in &pending {
            self.reconcile_wall(update.coords, update.direction);
        }

        if self.ring_advance_pending {
            self.unlock_perimeter_doors();
            let completed = self.current_ring;
            self.current_ring += 1;
            self.rooms_connected_on_ring = 0;
            self.ring_advance_pending = false;
            self.update_signal_strength(self.config.signal_replenish, out_events);
            out_events.push(Event::PerimeterCompleted { ring: completed });
        }
    }

    /// Recomputes one wall from the state of its two adjoining rooms.
    fn reconcile_wall(&mut self, coords: RoomCoords, direction: Direction) {
        let neighbour = grid::neighbour_coords(coords, direction);
        let room_exists = self.rooms.exists_lenient(coords);
        let neighbour_exists = self.rooms.exists_lenient(neighbour);

        if !room_exists && !neighbour_exists {
            self.disable_wall(coords, direction);
            return;
        }
        self.enable_wall(coords, direction);

        // Trained rooms pass freely between each other; everything else keeps
        // a door in the shared wall.
        if self.rooms.trained_lenient(coords) && self.rooms.trained_lenient(neighbour) {
            self.disable_door(coords, direction);
        } else {
            self.enable_door(coords, direction);
        }

        self.reconcile_door_lock(coords, neighbour, room_exists, neighbour_exists, direction);
        self.lock_doors_on_perimeter_edge(coords);
    }

    fn reconcile_door_lock(
        &mut self,
        coords: RoomCoords,
        neighbour: RoomCoords,
        room_exists: bool,
        neighbour_exists: bool,
        direction: Direction,
    ) {
        let room_connected = self.rooms.connected_lenient(coords);
        let neighbour_connected = self.rooms.connected_lenient(neighbour);
        let key = WallKey::canonical(coords, direction, self.config.rooms_per_axis);
        let locked = self.walls.wall(key).door_state == DoorState::Locked;

        if room_connected || neighbour_connected {
            if locked && !self.door_is_on_perimeter(coords, direction) {
                self.unlock_door(coords, direction);
            }
            return;
        }
        // A door from an unconnected room into empty space is the frontier;
        // it stays locked until the perimeter advances past it.
        let frontier = (room_exists && !room_connected && !neighbour_exists)
            || (!room_exists && neighbour_exists && !neighbour_connected);
        if frontier && !locked {
            self.lock_door(coords, direction);
        }
    }

    fn enable_wall(&mut self, coords: RoomCoords, direction: Direction) {
        let key = WallKey::canonical(coords, direction, self.config.rooms_per_axis);
        if self.walls.wall(key).exists {
            return;
        }
        self.walls.wall_mut(key).exists = true;
        if let Some(builder) = self.registry.wall_builder(coords, direction) {
            match key.face {
                WallFace::South => builder.borrow_mut().build_south_wall(),
                WallFace::West => builder.borrow_mut().build_west_wall(),
            }
        }
    }

    fn disable_wall(&mut self, coords: RoomCoords, direction: Direction) {
        let key = WallKey::canonical(coords, direction, self.config.rooms_per_axis);
        if !self.walls.wall(key).exists {
            return;
        }
        // The door comes down before the wall so the invariant that doors
        // only exist on walls holds at every observable point.
        self.disable_door(coords, direction);
        self.walls.wall_mut(key).exists = false;
        if let Some(builder) = self.registry.wall_builder(coords, direction) {
            match key.face {
                WallFace::South => builder.borrow_mut().destroy_south_wall(),
                WallFace::West => builder.borrow_mut().destroy_west_wall(),
            }
        }
    }

    fn enable_door(&mut self, coords: RoomCoords, direction: Direction) {
        let key = WallKey::canonical(coords, direction, self.config.rooms_per_axis);
        let wall = self.walls.wall(key);
        wall.assert_door_invariant();
        if wall.door_exists {
            return;
        }
        assert!(wall.exists, "cannot spawn a door on a non-existent wall");
        self.walls.wall_mut(key).door_exists = true;
        if let Some(builder) = self.registry.wall_builder(coords, direction) {
            match key.face {
                WallFace::South => builder.borrow_mut().spawn_south_door(),
                WallFace::West => builder.borrow_mut().spawn_west_door(),
            }
        }
    }

    fn disable_door(&mut self, coords: RoomCoords, direction: Direction) {
        let key = WallKey::canonical(coords, direction, self.config.rooms_per_axis);
        let wall = self.walls.wall(key);
        wall.assert_door_invariant();
        if !wall.door_exists {
            return;
        }
        self.walls.wall_mut(key).door_exists = false;
        if let Some(builder) = self.registry.wall_builder(coords, direction) {
            match key.face {
                WallFace::South => builder.borrow_mut().destroy_south_door(),
                WallFace::West => builder.borrow_mut().destroy_west_door(),
            }
        }
    }

    fn lock_door(&mut self, coords: RoomCoords, direction: Direction) {
        let key = WallKey::canonical(coords, direction, self.config.rooms_per_axis);
        if self.walls.wall(key).door_state == DoorState::Locked {
            return;
        }
        self.walls.wall_mut(key).door_state = DoorState::Locked;
        if let Some(builder) = self.registry.wall_builder(coords, direction) {
            match key.face {
                WallFace::South => builder.borrow_mut().lock_south_door(),
                WallFace::West => builder.borrow_mut().lock_west_door(),
            }
        }
    }

    fn unlock_door(&mut self, coords: RoomCoords, direction: Direction) {
        let key = WallKey::canonical(coords, direction, self.config.rooms_per_axis);
        if self.walls.wall(key).door_state == DoorState::Unlocked {
            return;
        }
        self.walls.wall_mut(key).door_state = DoorState::Unlocked;
        if let Some(builder) = self.registry.wall_builder(coords, direction) {
            match key.face {
                WallFace::South => builder.borrow_mut().unlock_south_door(),
                WallFace::West => builder.borrow_mut().unlock_west_door(),
            }
        }
    }

    fn is_door_unlocked(&self, coords: RoomCoords, direction: Direction) -> bool {
        let key = WallKey::canonical(coords, direction, self.config.rooms_per_axis);
        self.walls.wall(key).door_state == DoorState::Unlocked
    }

    /// Reports whether a door sits on the outward edge of the current ring,
    /// where it must stay locked until the ring completes.
    fn door_is_on_perimeter(&self, coords: RoomCoords, direction: Direction) -> bool {
        let ring = self.current_ring as i32;
        let outer = ring + 1;
        match direction {
            Direction::North => coords.x() == ring || coords.x() == -outer,
            Direction::South => coords.x() == outer || coords.x() == -ring,
            Direction::East => coords.y() == ring || coords.y() == -outer,
            Direction::West => coords.y() == outer || coords.y() == -ring,
        }
    }

    /// Locks whichever of the room's doors face outward from the current
    /// ring. Walls past the phantom row are skipped rather than addressed.
    fn lock_doors_on_perimeter_edge(&mut self, coords: RoomCoords) {
        let ring = self.current_ring as i32;
        let lock_facing = |world: &mut Self, direction: Direction| {
            let key = WallKey::canonical(coords, direction, world.config.rooms_per_axis);
            if world.walls.couple_index_valid(key.index) {
                world.lock_door(coords, direction);
            }
        };
        if coords.x() == ring {
            lock_facing(self, Direction::North);
        }
        if coords.y() == ring {
            lock_facing(self, Direction::East);
        }
        if coords.x() == -ring {
            lock_facing(self, Direction::South);
        }
        if coords.y() == -ring {
            lock_facing(self, Direction::West);
        }
    }

    /// Unlocks the outward-facing doors of every room on the current ring.
    fn unlock_perimeter_doors(&mut self) {
        let ring = self.current_ring as i32;
        for p in -ring..=ring {
            self.unlock_door(RoomCoords::new(ring, p), Direction::North);
            self.unlock_door(RoomCoords::new(p, ring), Direction::East);
            self.unlock_door(RoomCoords::new(-ring, p), Direction::South);
            self.unlock_door(RoomCoords::new(p, -ring), Direction::West);
        }
    }

    /// Enqueues the four walls surrounding a room for reconciliation.
    fn flag_walls_for_update(&mut self, coords: RoomCoords) {
        self.queue.push(WallUpdate {
            coords,
            direction: Direction::South,
        });
        self.queue.push(WallUpdate {
            coords,
            direction: Direction::West,
        });
        self.queue.push(WallUpdate {
            coords: grid::neighbour_coords(coords, Direction::North),
            direction: Direction::South,
        });
        self.queue.push(WallUpdate {
            coords: grid::neighbour_coords(coords, Direction::East),
            direction: Direction::West,
        });
    }

    /// Generates any missing door positions on the room's four walls and
    /// returns all four, ordered North, East, South, West.
    fn ensure_door_positions(&mut self, coords: RoomCoords) -> [u32; 4] {
        let mut positions = [0u32; 4];
        for direction in Direction::ALL {
            let key = WallKey::canonical(coords, direction, self.config.rooms_per_axis);
            let max = match direction {
                Direction::North | Direction::South => (self.config.room_units_y - 2) as u32,
                Direction::East | Direction::West => (self.config.room_units_x - 2) as u32,
            };
            let wall = self.walls.wall_mut(key);
            let position = match wall.door_position {
                Some(position) => position,
                None => {
                    let position = self.door_rng.gen_range(0..=max);
                    wall.door_position = Some(position);
                    position
                }
            };
            positions[direction.index()] = position;
        }
        positions
    }

    fn enable_room(
        &mut self,
        coords: RoomCoords,
        complexity: f32,
        density: f32,
        out_events: &mut Vec<Event>,
    ) {
        if self.rooms.room(coords).exists() {
            return;
        }
        let door_positions = self.ensure_door_positions(coords);
        self.rooms
            .room_mut(coords)
            .initialize(self.config.max_room_health);
        if let Some(builder) = self.registry.room_builder(coords) {
            builder
                .borrow_mut()
                .build_room(door_positions, complexity, density);
        }
        self.flag_walls_for_update(coords);
        out_events.push(Event::RoomEnabled { coords });
    }

    fn disable_room(&mut self, coords: RoomCoords, out_events: &mut Vec<Event>) {
        if !self.rooms.room(coords).exists() {
            return;
        }
        self.rooms.room_mut(coords).disable();
        if let Some(builder) = self.registry.room_builder(coords) {
            builder.borrow_mut().destroy_room();
        }
        self.flag_walls_for_update(coords);
        out_events.push(Event::RoomDisabled { coords });
    }

    fn set_room_health(&mut self, coords: RoomCoords, health: f32, out_events: &mut Vec<Event>) {
        if !self.rooms.room(coords).exists() {
            return;
        }
        let clamped = health.clamp(0.0, self.config.max_room_health);
        self.rooms.room_mut(coords).health = clamped;
        if let Some(builder) = self.registry.room_builder(coords) {
            builder.borrow_mut().health_changed(clamped);
        }
        if clamped <= 0.0 {
            self.disable_room(coords, out_events);
        }
    }

    fn update_room_health(&mut self, coords: RoomCoords, delta: f32, out_events: &mut Vec<Event>) {
        if !self.rooms.room(coords).exists() {
            return;
        }
        let health = self.rooms.room(coords).health + delta;
        self.set_room_health(coords, health, out_events);
    }

    fn set_room_trained(&mut self, coords: RoomCoords) {
        if !self.rooms.room(coords).exists() {
            return;
        }
        self.rooms.room_mut(coords).set_trained();
        self.flag_walls_for_update(coords);
    }

    fn set_room_connected(&mut self, coords: RoomCoords, out_events: &mut Vec<Event>) {
        if !self.rooms.room(coords).exists() {
            return;
        }
        if self.rooms.room(coords).status.is_connected() {
            return;
        }
        self.rooms.room_mut(coords).set_connected();
        self.note_room_connected(coords);
        if let Some(builder) = self.registry.room_builder(coords) {
            builder.borrow_mut().room_was_connected();
        }
        out_events.push(Event::RoomConnected { coords });
    }

    /// Advances the ring bookkeeping after a room joins the progression.
    ///
    /// Connecting past the current ring jumps the perimeter outward;
    /// completing the ring's full complement arms the advance that the next
    /// tick performs.
    fn note_room_connected(&mut self, coords: RoomCoords) {
        let ring = grid::ring_of(coords);
        if ring > self.current_ring {
            self.current_ring = ring;
            self.rooms_connected_on_ring = 1;
        } else if ring == self.current_ring {
            self.rooms_connected_on_ring += 1;
            if self.rooms_connected_on_ring >= grid::rooms_on_ring(self.current_ring) {
                self.ring_advance_pending = true;
            }
        }
        self.flag_walls_for_update(coords);
    }

    fn set_room_training_progress(&mut self, coords: RoomCoords, progress: f32) {
        if !self.rooms.room(coords).exists() {
            return;
        }
        self.rooms.room_mut(coords).training_progress = progress;
        if let Some(builder) = self.registry.room_builder(coords) {
            builder.borrow_mut().training_progress_updated(progress);
        }
        // Doors shared with existing neighbours display the far room's
        // progress, addressed in the owning couple's frame.
        for direction in Direction::ALL {
            if !self
                .rooms
                .exists_lenient(grid::neighbour_coords(coords, direction))
            {
                continue;
            }
            if let Some(builder) = self.registry.wall_builder(coords, direction) {
                builder
                    .borrow_mut()
                    .training_progress_updated_for_door(
                        direction.relative_to_wall_owner(),
                        progress,
                    );
            }
        }
    }

    fn door_opened(
        &mut self,
        coords: RoomCoords,
        direction: Direction,
        complexity: f32,
        density: f32,
        out_events: &mut Vec<Event>,
    ) {
        if !self.is_door_unlocked(coords, direction) {
            return;
        }
        if !self.rooms.room(coords).exists() {
            self.enable_room(coords, complexity, density, out_events);
        }
        let neighbour = grid::neighbour_coords(coords, direction);
        if !self.rooms.room(neighbour).exists() {
            self.enable_room(neighbour, complexity, density, out_events);
        }
    }

    fn destroy_neighbouring_doors(&mut self, coords: RoomCoords, sides: [bool; 4]) {
        for direction in Direction::ALL {
            if !sides[direction.index()] {
                continue;
            }
            if let Some(builder) = self.registry.wall_builder(coords, direction) {
                match direction.relative_to_wall_owner() {
                    Direction::South => builder.borrow_mut().destroy_south_door(),
                    _ => builder.borrow_mut().destroy_west_door(),
                }
            }
        }
    }

    /// Opens the inward door of every room on the current ring, lazily
    /// materialising the ring. Doors still locked from the frontier are
    /// skipped; they open on a later sweep once a neighbour connects.
    fn generate_perimeter_rooms(&mut self, out_events: &mut Vec<Event>) {
        self.unlock_perimeter_doors();
        let corner = self.current_ring as i32;
        for i in -corner..=corner {
            self.door_opened(
                RoomCoords::new(i, -corner),
                Direction::East,
                PERIMETER_COMPLEXITY,
                PERIMETER_DENSITY,
                out_events,
            );
            self.door_opened(
                RoomCoords::new(i, corner),
                Direction::West,
                PERIMETER_COMPLEXITY,
                PERIMETER_DENSITY,
                out_events,
            );
            self.door_opened(
                RoomCoords::new(-corner, i),
                Direction::North,
                PERIMETER_COMPLEXITY,
                PERIMETER_DENSITY,
                out_events,
            );
            self.door_opened(
                RoomCoords::new(corner, i),
                Direction::South,
                PERIMETER_COMPLEXITY,
                PERIMETER_DENSITY,
                out_events,
            );
        }
    }

    fn connect_perimeter_rooms(&mut self, out_events: &mut Vec<Event>) {
        let corner = self.current_ring as i32;
        for i in -corner..=corner {
            self.set_room_connected(RoomCoords::new(i, -corner), out_events);
            self.set_room_connected(RoomCoords::new(i, corner), out_events);
            self.set_room_connected(RoomCoords::new(-corner, i), out_events);
            self.set_room_connected(RoomCoords::new(corner, i), out_events);
        }
    }

    fn update_signal_strength(&mut self, delta: f32, out_events: &mut Vec<Event>) {
        let previous = self.signal_strength;
        self.signal_strength = (previous + delta).clamp(0.0, self.config.max_signal_strength);
        if previous > 0.0 && self.signal_strength <= 0.0 {
            out_events.push(Event::SignalLost);
        }
    }

    fn set_room_tile_dimensions(
        &mut self,
        units_x: i32,
        units_y: i32,
        out_events: &mut Vec<Event>,
    ) {
        assert!(
            units_x >= 2 && units_y >= 2,
            "room tile dimensions must be at least 2x2, got {units_x}x{units_y}"
        );
        self.config.room_units_x = units_x;
        self.config.room_units_y = units_y;
        out_events.push(Event::MazeDimensionsChanged);
    }

    fn set_tile_unit_lengths(&mut self, x_cm: f32, y_cm: f32, out_events: &mut Vec<Event>) {
        assert!(
            x_cm > 0.0 && y_cm > 0.0,
            "tile unit lengths must be positive, got {x_cm}cm x {y_cm}cm"
        );
        self.config.unit_length_x_cm = x_cm;
        self.config.unit_length_y_cm = y_cm;
        out_events.push(Event::MazeDimensionsChanged);
    }
}

/// Executes one command against the world, appending resulting events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::EnableRoom {
            coords,
            complexity,
            density,
        } => world.enable_room(coords, complexity, density, out_events),
        Command::DisableRoom { coords } => world.disable_room(coords, out_events),
        Command::SetRoomHealth { coords, health } => {
            world.set_room_health(coords, health, out_events);
        }
        Command::UpdateRoomHealth { coords, delta } => {
            world.update_room_health(coords, delta, out_events);
        }
        Command::SetRoomTrained { coords } => world.set_room_trained(coords),
        Command::SetRoomConnected { coords } => world.set_room_connected(coords, out_events),
        Command::SetRoomTrainingProgress { coords, progress } => {
            world.set_room_training_progress(coords, progress);
        }
        Command::SetSignalPoint { coords, tile } => {
            world.rooms.room_mut(coords).signal_point = tile;
        }
        Command::ActorEnteredTile { coords, tile } => {
            world.rooms.room_mut(coords).actor_entered_tile(tile);
        }
        Command::ActorExitedTile { coords, tile } => {
            world.rooms.room_mut(coords).actor_exited_tile(tile);
        }
        Command::DoorOpened {
            coords,
            direction,
            complexity,
            density,
        } => world.door_opened(coords, direction, complexity, density, out_events),
        Command::DestroyNeighbouringDoors { coords, sides } => {
            world.destroy_neighbouring_doors(coords, sides);
        }
        Command::GeneratePerimeterRooms => world.generate_perimeter_rooms(out_events),
        Command::ConnectPerimeterRooms => world.connect_perimeter_rooms(out_events),
        Command::UpdateSignalStrength { delta } => {
            world.update_signal_strength(delta, out_events);
        }
        Command::SetRoomTileDimensions { units_x, units_y } => {
            world.set_room_tile_dimensions(units_x, units_y, out_events);
        }
        Command::SetTileUnitLengths { x_cm, y_cm } => {
            world.set_tile_unit_lengths(x_cm, y_cm, out_events);
        }
    }
}

/// Read-only views over the world.
pub mod query {
    use super::{grid, Direction, GridConfig, RoomCoords, TilePoint, WallKey, World};
    use signal_maze_core::{Quadrant, RoomIndex, RoomPosition};

    /// Current grid configuration.
    pub fn grid_config(world: &World) -> &GridConfig {
        &world.config
    }

    /// Whether the room exists. Fatal outside the grid.
    pub fn does_room_exist(world: &World, coords: RoomCoords) -> bool {
        world.rooms.room(coords).exists()
    }

    /// Whether the room has completed training.
    pub fn is_room_trained(world: &World, coords: RoomCoords) -> bool {
        world.rooms.room(coords).status.is_trained()
    }

    /// Whether the room has joined the connected progression.
    pub fn is_room_connected(world: &World, coords: RoomCoords) -> bool {
        world.rooms.room(coords).status.is_connected()
    }

    /// Current health of the room.
    pub fn room_health(world: &World, coords: RoomCoords) -> f32 {
        world.rooms.room(coords).health
    }

    /// Last published training progress of the room.
    pub fn room_training_progress(world: &World, coords: RoomCoords) -> f32 {
        world.rooms.room(coords).training_progress
    }

    /// Signal point tile recorded for the room.
    pub fn signal_point(world: &World, coords: RoomCoords) -> TilePoint {
        world.rooms.room(coords).signal_point
    }

    /// Whether the wall on the given side of the room exists.
    pub fn does_wall_exist(world: &World, coords: RoomCoords, direction: Direction) -> bool {
        let key = WallKey::canonical(coords, direction, world.config.rooms_per_axis);
        world.walls.wall(key).exists
    }

    /// Whether the door on the given side of the room exists. Fatal if a
    /// door is recorded on a non-existent wall.
    pub fn does_door_exist(world: &World, coords: RoomCoords, direction: Direction) -> bool {
        let key = WallKey::canonical(coords, direction, world.config.rooms_per_axis);
        let wall = world.walls.wall(key);
        wall.assert_door_invariant();
        wall.exists && wall.door_exists
    }

    /// Door offset assigned to the wall, if one was ever generated.
    pub fn door_position_on_wall(
        world: &World,
        coords: RoomCoords,
        direction: Direction,
    ) -> Option<u32> {
        let key = WallKey::canonical(coords, direction, world.config.rooms_per_axis);
        world.walls.wall(key).door_position
    }

    /// Whether the door on the given side of the room is unlocked.
    pub fn is_door_unlocked(world: &World, coords: RoomCoords, direction: Direction) -> bool {
        world.is_door_unlocked(coords, direction)
    }

    /// Door offsets toward each existing neighbour, ordered North, East,
    /// South, West; `None` where the neighbour does not exist.
    pub fn door_positions_for_existing_neighbours(
        world: &World,
        coords: RoomCoords,
    ) -> [Option<u32>; 4] {
        let mut positions = [None; 4];
        for direction in Direction::ALL {
            if !world
                .rooms
                .exists_lenient(grid::neighbour_coords(coords, direction))
            {
                continue;
            }
            positions[direction.index()] = door_position_on_wall(world, coords, direction);
        }
        positions
    }

    /// Existence of each neighbouring room, ordered North, East, South,
    /// West; neighbours past the grid edge report `false`.
    pub fn neighbouring_room_states(world: &World, coords: RoomCoords) -> [bool; 4] {
        let mut states = [false; 4];
        for direction in Direction::ALL {
            states[direction.index()] = world
                .rooms
                .exists_lenient(grid::neighbour_coords(coords, direction));
        }
        states
    }

    /// Whether no actor occupies the tile in the given room.
    pub fn tile_position_is_empty(world: &World, coords: RoomCoords, tile: TilePoint) -> bool {
        world.rooms.room(coords).tile_is_empty(tile)
    }

    /// Whether a room/tile position, renormalised onto the grid, addresses
    /// an existing room with an unoccupied, in-bounds tile.
    pub fn room_tile_position_is_empty(world: &World, position: RoomPosition) -> bool {
        let wrapped = grid::wrap_room_position(
            position,
            world.config.room_units_x,
            world.config.room_units_y,
        );
        // Wrapping can carry the position off the grid entirely; that is
        // empty space, not a caller error.
        let index = RoomIndex::new(
            wrapped.coords.x() + world.config.rooms_per_axis / 2,
            wrapped.coords.y() + world.config.rooms_per_axis / 2,
        );
        if !index.contained_in(world.config.rooms_per_axis) {
            return false;
        }
        does_room_exist(world, wrapped.coords)
            && grid::inner_room_position_valid(
                wrapped.tile,
                world.config.room_units_x,
                world.config.room_units_y,
            )
            && tile_position_is_empty(world, wrapped.coords, wrapped.tile)
    }

    /// Quadrant of the grid the room falls in.
    pub fn quadrant_for_room(world: &World, coords: RoomCoords) -> Quadrant {
        grid::quadrant_for_index(
            grid::room_index(coords, world.config.rooms_per_axis),
            world.config.rooms_per_axis,
        )
    }

    /// Ring the perimeter progression is currently working on.
    pub fn current_ring(world: &World) -> u32 {
        world.current_ring
    }

    /// Rooms connected so far on the current ring.
    pub fn rooms_connected_on_ring(world: &World) -> u32 {
        world.rooms_connected_on_ring
    }

    /// Whether the room lies strictly inside the current perimeter ring.
    pub fn room_is_within_perimeter(world: &World, coords: RoomCoords) -> bool {
        grid::within_ring(coords, world.current_ring)
    }

    /// Current value of the signal strength gauge.
    pub fn signal_strength(world: &World) -> f32 {
        world.signal_strength
    }

    /// Wall updates waiting for the next tick.
    pub fn pending_wall_updates(world: &World) -> usize {
        world.queue.len()
    }

    /// Whether the door on the given side of the room may lock or unlock
    /// during the current ring without waiting for a perimeter advance.
    pub fn door_is_on_perimeter(world: &World, coords: RoomCoords, direction: Direction) -> bool {
        world.door_is_on_perimeter(coords, direction)
    }
}
