#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Signal Maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for observers to react to deterministically. Builder collaborators that
//! physically construct room and wall geometry implement the [`RoomBuilder`]
//! and [`WallBuilder`] traits and are notified synchronously at the exact
//! point of each state transition.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod grid;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Signal Maze.";

/// Cardinal directions used for walls, doors, and neighbouring rooms.
///
/// The x axis runs north/south and the y axis runs east/west: moving North
/// increments x, moving East increments y. Arrays indexed by direction are
/// always ordered North, East, South, West.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward increasing x.
    North,
    /// Toward increasing y.
    East,
    /// Toward decreasing x.
    South,
    /// Toward decreasing y.
    West,
}

impl Direction {
    /// All directions in canonical North, East, South, West order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Position of the direction within canonically ordered arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Re-expresses a wall direction in the frame of the couple that owns
    /// the wall.
    ///
    /// Each room owns only its South and West walls; a room's North wall is
    /// the north neighbour's South wall and its East wall is the east
    /// neighbour's West wall. Callbacks addressed to the owning wall couple
    /// therefore see North as South and East as West.
    #[must_use]
    pub const fn relative_to_wall_owner(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            other => other,
        }
    }
}

/// Signed room coordinate centred on the origin room `(0, 0)`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RoomCoords {
    x: i32,
    y: i32,
}

impl RoomCoords {
    /// Creates a new origin-centred room coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// North/south component of the coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// East/west component of the coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
}

/// Non-negative index into the dense room grid.
///
/// Indices are kept signed so that the phantom wall row and column one step
/// outside the room grid remain representable; validity is checked where a
/// room array access actually happens.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RoomIndex {
    x: i32,
    y: i32,
}

impl RoomIndex {
    /// Creates a new grid index.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Row component of the index.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Column component of the index.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Reports whether the index addresses a room inside a grid with
    /// `rooms_per_axis` rooms along each axis.
    #[must_use]
    pub const fn contained_in(&self, rooms_per_axis: i32) -> bool {
        self.x >= 0 && self.x < rooms_per_axis && self.y >= 0 && self.y < rooms_per_axis
    }
}

/// Tile coordinate inside a single room's inner grid.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TilePoint {
    x: i32,
    y: i32,
}

impl TilePoint {
    /// Creates a new in-room tile coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// North/south component of the tile coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// East/west component of the tile coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
}

/// A room coordinate paired with a tile position inside that room.
///
/// This is the unit of position used by mobile agents; tile positions that
/// stray outside the room's inner grid are renormalised with
/// [`grid::wrap_room_position`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomPosition {
    /// Room containing the tile.
    pub coords: RoomCoords,
    /// Tile position expressed in the room's own frame.
    pub tile: TilePoint,
}

impl RoomPosition {
    /// Creates a new room/tile position pair.
    #[must_use]
    pub const fn new(coords: RoomCoords, tile: TilePoint) -> Self {
        Self { coords, tile }
    }
}

/// Floating-point world-space position measured in centimetres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPoint {
    /// North/south world coordinate.
    pub x: f32,
    /// East/west world coordinate.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a new world-space position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Lifecycle status of a room.
///
/// Status only ever advances (Enabled → Trained → Connected); the sole
/// exception is [`Command::DisableRoom`], which forces Dead regardless of
/// prior status. A room "exists" while Enabled, Trained, or Connected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    /// Created blank at world initialisation; never yet enabled.
    #[default]
    Disabled,
    /// Enabled and explorable, not yet trained.
    Enabled,
    /// Validated by the training process.
    Trained,
    /// Connected into the progression; terminal forward state.
    Connected,
    /// Destroyed by damage or an explicit disable.
    Dead,
}

impl RoomStatus {
    /// Reports whether a room with this status exists in the maze.
    #[must_use]
    pub const fn exists(self) -> bool {
        matches!(self, Self::Enabled | Self::Trained | Self::Connected)
    }

    /// Reports whether the room has completed training (Connected rooms
    /// remain trained).
    #[must_use]
    pub const fn is_trained(self) -> bool {
        matches!(self, Self::Trained | Self::Connected)
    }

    /// Reports whether the room has been connected.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Lock state of a door.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorState {
    /// The door can be opened and traversed.
    #[default]
    Unlocked,
    /// The door refuses to open.
    Locked,
}

/// Quadrant of the room grid relative to its centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// High x, high y.
    NorthEast,
    /// High x, low y.
    NorthWest,
    /// Low x, high y.
    SouthEast,
    /// Low x, low y.
    SouthWest,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock and drains the wall-update queue.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Enables a room, generating door positions for its surrounding walls.
    EnableRoom {
        /// Room to enable.
        coords: RoomCoords,
        /// Maze-generation complexity tunable passed through to the builder.
        complexity: f32,
        /// Maze-generation density tunable passed through to the builder.
        density: f32,
    },
    /// Forces a room dead and tears down its geometry.
    DisableRoom {
        /// Room to disable.
        coords: RoomCoords,
    },
    /// Sets a room's health to an absolute value.
    SetRoomHealth {
        /// Room whose health changes.
        coords: RoomCoords,
        /// New health value; clamped into `[0, max_room_health]`.
        health: f32,
    },
    /// Applies a health delta to a room.
    UpdateRoomHealth {
        /// Room whose health changes.
        coords: RoomCoords,
        /// Signed health delta; the stored result is clamped.
        delta: f32,
    },
    /// Marks a room as trained by the training process.
    SetRoomTrained {
        /// Room that finished training.
        coords: RoomCoords,
    },
    /// Connects a trained room into the perimeter progression.
    SetRoomConnected {
        /// Room that was validated.
        coords: RoomCoords,
    },
    /// Publishes intermediate training progress for a room.
    SetRoomTrainingProgress {
        /// Room being trained.
        coords: RoomCoords,
        /// Progress in `[0, 1]`.
        progress: f32,
    },
    /// Records the signal point tile inside a room.
    SetSignalPoint {
        /// Room owning the signal point.
        coords: RoomCoords,
        /// Tile position of the signal point in the room's frame.
        tile: TilePoint,
    },
    /// Marks a tile as occupied by an actor.
    ActorEnteredTile {
        /// Room containing the tile.
        coords: RoomCoords,
        /// Tile the actor now occupies.
        tile: TilePoint,
    },
    /// Clears an actor's occupation of a tile.
    ActorExitedTile {
        /// Room containing the tile.
        coords: RoomCoords,
        /// Tile the actor vacated.
        tile: TilePoint,
    },
    /// Reports that a door was opened, lazily enabling both adjoining rooms.
    DoorOpened {
        /// Room the door was opened from.
        coords: RoomCoords,
        /// Wall holding the opened door.
        direction: Direction,
        /// Complexity tunable for any room enabled as a result.
        complexity: f32,
        /// Density tunable for any room enabled as a result.
        density: f32,
    },
    /// Tears down the door geometry on selected adjoining walls.
    DestroyNeighbouringDoors {
        /// Room whose adjoining doors are torn down.
        coords: RoomCoords,
        /// Which doors to destroy, ordered North, East, South, West.
        sides: [bool; 4],
    },
    /// Materialises the current ring of perimeter rooms.
    GeneratePerimeterRooms,
    /// Connects every room on the current ring.
    ConnectPerimeterRooms,
    /// Applies a delta to the global signal strength gauge.
    UpdateSignalStrength {
        /// Signed delta; the stored value is clamped to `[0, max]`.
        delta: f32,
    },
    /// Reconfigures the inner tile dimensions of every room.
    SetRoomTileDimensions {
        /// Tiles per room along the x axis.
        units_x: i32,
        /// Tiles per room along the y axis.
        units_y: i32,
    },
    /// Reconfigures the world-space edge lengths of a single tile.
    SetTileUnitLengths {
        /// Tile edge length along x, in centimetres.
        x_cm: f32,
        /// Tile edge length along y, in centimetres.
        y_cm: f32,
    },
}

/// Events broadcast by the world after processing commands.
///
/// Events are emitted in the order the underlying state changes happen and
/// are the world's only observer surface; the signal-lost and
/// perimeter-complete notifications fire exactly once per transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a room came into existence.
    RoomEnabled {
        /// Room that was enabled.
        coords: RoomCoords,
    },
    /// Confirms that a room was destroyed.
    RoomDisabled {
        /// Room that was disabled.
        coords: RoomCoords,
    },
    /// Confirms that a room joined the connected progression.
    RoomConnected {
        /// Room that was connected.
        coords: RoomCoords,
    },
    /// Announces that a full ring of rooms completed and the perimeter
    /// advanced outward.
    PerimeterCompleted {
        /// Ring that was completed.
        ring: u32,
    },
    /// Fired once when the signal strength gauge reaches zero.
    SignalLost,
    /// Announces that the maze tile dimensions or unit lengths changed.
    MazeDimensionsChanged,
}

/// Callback interface implemented by per-room builder collaborators.
///
/// Builders physically construct geometry; the world only tracks state. All
/// methods default to no-ops so builders may implement the subset they care
/// about, mirroring unset builders being tolerated entirely.
pub trait RoomBuilder {
    /// Constructs the room using the door positions on its four walls
    /// (ordered North, East, South, West) plus maze-generation tunables.
    fn build_room(&mut self, door_positions: [u32; 4], complexity: f32, density: f32) {
        let _ = (door_positions, complexity, density);
    }

    /// Tears the room's geometry down.
    fn destroy_room(&mut self) {}

    /// Reports the room's new health value.
    fn health_changed(&mut self, health: f32) {
        let _ = health;
    }

    /// Reports intermediate training progress for the room.
    fn training_progress_updated(&mut self, progress: f32) {
        let _ = progress;
    }

    /// Signals that the room was connected into the progression.
    fn room_was_connected(&mut self) {}
}

/// Callback interface implemented by per-wall-couple builder collaborators.
///
/// A wall couple owns one South and one West wall; transitions on a room's
/// North or East wall are routed to the neighbouring couple's South or West
/// callbacks. All methods default to no-ops.
pub trait WallBuilder {
    /// Constructs the couple's south wall.
    fn build_south_wall(&mut self) {}
    /// Constructs the couple's west wall.
    fn build_west_wall(&mut self) {}
    /// Tears down the couple's south wall.
    fn destroy_south_wall(&mut self) {}
    /// Tears down the couple's west wall.
    fn destroy_west_wall(&mut self) {}
    /// Spawns the door in the couple's south wall.
    fn spawn_south_door(&mut self) {}
    /// Spawns the door in the couple's west wall.
    fn spawn_west_door(&mut self) {}
    /// Removes the door from the couple's south wall.
    fn destroy_south_door(&mut self) {}
    /// Removes the door from the couple's west wall.
    fn destroy_west_door(&mut self) {}
    /// Locks the door in the couple's south wall.
    fn lock_south_door(&mut self) {}
    /// Locks the door in the couple's west wall.
    fn lock_west_door(&mut self) {}
    /// Unlocks the door in the couple's south wall.
    fn unlock_south_door(&mut self) {}
    /// Unlocks the door in the couple's west wall.
    fn unlock_west_door(&mut self) {}

    /// Reports training progress for the room on the far side of a door,
    /// with `relative_direction` expressed in the couple's own frame.
    fn training_progress_updated_for_door(&mut self, relative_direction: Direction, progress: f32) {
        let _ = (relative_direction, progress);
    }
}

/// Static configuration describing the maze grid and progression gauges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Rooms along each axis of the square world grid.
    pub rooms_per_axis: i32,
    /// Tiles per room along the x axis.
    pub room_units_x: i32,
    /// Tiles per room along the y axis.
    pub room_units_y: i32,
    /// World-space edge length of one tile along x, in centimetres.
    pub unit_length_x_cm: f32,
    /// World-space edge length of one tile along y, in centimetres.
    pub unit_length_y_cm: f32,
    /// Health assigned to a room when it is enabled.
    pub max_room_health: f32,
    /// Upper clamp of the signal strength gauge.
    pub max_signal_strength: f32,
    /// Amount of signal strength restored on each ring advance.
    pub signal_replenish: f32,
    /// Seed for the deterministic door-position generator.
    pub door_seed: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rooms_per_axis: 20,
            room_units_x: 10,
            room_units_y: 10,
            unit_length_x_cm: 100.0,
            unit_length_y_cm: 100.0,
            max_room_health: 100.0,
            max_signal_strength: 100.0,
            signal_replenish: 25.0,
            door_seed: 0x5197_a1c6_90d3_b8e4,
        }
    }
}

impl GridConfig {
    /// Validates the configuration, returning the first violated constraint.
    ///
    /// Room tile dimensions must be at least 2 so that the shared-edge
    /// wraparound divisor `units - 1` stays positive and every wall can
    /// carry a door position.
    pub fn validate(&self) -> Result<(), GridConfigError> {
        if self.rooms_per_axis < 1 {
            return Err(GridConfigError::GridTooSmall {
                rooms_per_axis: self.rooms_per_axis,
            });
        }
        if self.room_units_x < 2 || self.room_units_y < 2 {
            return Err(GridConfigError::RoomTooSmall {
                units_x: self.room_units_x,
                units_y: self.room_units_y,
            });
        }
        if self.unit_length_x_cm <= 0.0 || self.unit_length_y_cm <= 0.0 {
            return Err(GridConfigError::NonPositiveUnitLength {
                x_cm: self.unit_length_x_cm,
                y_cm: self.unit_length_y_cm,
            });
        }
        if self.max_room_health <= 0.0 {
            return Err(GridConfigError::NonPositiveRoomHealth {
                max_room_health: self.max_room_health,
            });
        }
        if self.max_signal_strength < 0.0 || self.signal_replenish < 0.0 {
            return Err(GridConfigError::NegativeSignalGauge {
                max_signal_strength: self.max_signal_strength,
                signal_replenish: self.signal_replenish,
            });
        }
        Ok(())
    }
}

/// Reasons a [`GridConfig`] may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum GridConfigError {
    /// The world grid needs at least one room per axis.
    #[error("grid needs at least one room per axis, got {rooms_per_axis}")]
    GridTooSmall {
        /// Rejected rooms-per-axis value.
        rooms_per_axis: i32,
    },
    /// Room tile dimensions must be at least 2x2.
    #[error("room tile dimensions must be at least 2x2, got {units_x}x{units_y}")]
    RoomTooSmall {
        /// Rejected x dimension.
        units_x: i32,
        /// Rejected y dimension.
        units_y: i32,
    },
    /// Tile edge lengths must be positive.
    #[error("tile unit lengths must be positive, got {x_cm}cm x {y_cm}cm")]
    NonPositiveUnitLength {
        /// Rejected x edge length.
        x_cm: f32,
        /// Rejected y edge length.
        y_cm: f32,
    },
    /// Maximum room health must be positive.
    #[error("max room health must be positive, got {max_room_health}")]
    NonPositiveRoomHealth {
        /// Rejected health ceiling.
        max_room_health: f32,
    },
    /// Signal gauge parameters must be non-negative.
    #[error(
        "signal gauge values must be non-negative, got max {max_signal_strength} / replenish {signal_replenish}"
    )]
    NegativeSignalGauge {
        /// Rejected gauge ceiling.
        max_signal_strength: f32,
        /// Rejected replenish amount.
        signal_replenish: f32,
    },
}
