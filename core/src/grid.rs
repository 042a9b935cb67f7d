//! Pure coordinate mapping between room coordinates, grid indices, in-room
//! tile positions, and world-space positions.
//!
//! The maze is a square grid of rooms centred on room `(0, 0)`; each room
//! contains its own inner tile grid. Adjacent rooms share one edge row or
//! column of tiles, so the effective stride between room origins is
//! `units - 1` tiles. All functions here are pure and deterministic.

use crate::{
    Direction, GridConfig, Quadrant, RoomCoords, RoomIndex, RoomPosition, TilePoint, WorldPoint,
};

/// Converts an origin-centred room coordinate into a dense grid index.
///
/// # Panics
///
/// Panics when the coordinate falls outside the allocated grid; such a
/// coordinate is a logic error, never a recoverable condition.
#[must_use]
pub fn room_index(coords: RoomCoords, rooms_per_axis: i32) -> RoomIndex {
    let index = RoomIndex::new(
        coords.x() + rooms_per_axis / 2,
        coords.y() + rooms_per_axis / 2,
    );
    assert!(
        index.contained_in(rooms_per_axis),
        "room coords ({}, {}) outside the {rooms_per_axis}x{rooms_per_axis} grid",
        coords.x(),
        coords.y(),
    );
    index
}

/// Converts a dense grid index back into an origin-centred room coordinate.
#[must_use]
pub fn room_coords(index: RoomIndex, rooms_per_axis: i32) -> RoomCoords {
    RoomCoords::new(
        index.x() - rooms_per_axis / 2,
        index.y() - rooms_per_axis / 2,
    )
}

/// Room coordinate of the neighbour in the given direction.
#[must_use]
pub fn neighbour_coords(coords: RoomCoords, direction: Direction) -> RoomCoords {
    match direction {
        Direction::North => RoomCoords::new(coords.x() + 1, coords.y()),
        Direction::East => RoomCoords::new(coords.x(), coords.y() + 1),
        Direction::South => RoomCoords::new(coords.x() - 1, coords.y()),
        Direction::West => RoomCoords::new(coords.x(), coords.y() - 1),
    }
}

/// Grid index of the neighbour in the given direction.
///
/// The returned index may sit one step outside the room grid; the extra wall
/// row and column at the grid boundary make that index valid for wall
/// lookups even though no room lives there. Callers check bounds before any
/// room-array access.
#[must_use]
pub fn neighbour_index(coords: RoomCoords, direction: Direction, rooms_per_axis: i32) -> RoomIndex {
    let index = room_index(coords, rooms_per_axis);
    match direction {
        Direction::North => RoomIndex::new(index.x() + 1, index.y()),
        Direction::East => RoomIndex::new(index.x(), index.y() + 1),
        Direction::South => RoomIndex::new(index.x() - 1, index.y()),
        Direction::West => RoomIndex::new(index.x(), index.y() - 1),
    }
}

/// Renormalises a room/tile pair whose tile position strayed outside the
/// room's inner grid.
///
/// Overflow along an axis moves the position into the adjacent room: the
/// room offset is the Euclidean quotient of the tile position by
/// `units - 1` and the wrapped tile is the always-non-negative remainder.
/// Positions already inside `[0, units - 1)` are returned unchanged, which
/// makes the function idempotent once normalised. The shared edge tile
/// `units - 1` is addressable from either adjoining room and normalises to
/// tile `0` of the next room.
#[must_use]
pub fn wrap_room_position(position: RoomPosition, units_x: i32, units_y: i32) -> RoomPosition {
    debug_assert!(units_x > 1 && units_y > 1, "degenerate room dimensions");
    let stride_x = units_x - 1;
    let stride_y = units_y - 1;
    let coords = RoomCoords::new(
        position.coords.x() + position.tile.x().div_euclid(stride_x),
        position.coords.y() + position.tile.y().div_euclid(stride_y),
    );
    let tile = TilePoint::new(
        position.tile.x().rem_euclid(stride_x),
        position.tile.y().rem_euclid(stride_y),
    );
    RoomPosition::new(coords, tile)
}

/// Room/tile pair one step away in the given direction, renormalised across
/// room boundaries.
#[must_use]
pub fn neighbouring_cell(
    position: RoomPosition,
    direction: Direction,
    units_x: i32,
    units_y: i32,
) -> RoomPosition {
    let tile = position.tile;
    let shifted = match direction {
        Direction::North => TilePoint::new(tile.x() + 1, tile.y()),
        Direction::East => TilePoint::new(tile.x(), tile.y() + 1),
        Direction::South => TilePoint::new(tile.x() - 1, tile.y()),
        Direction::West => TilePoint::new(tile.x(), tile.y() - 1),
    };
    wrap_room_position(RoomPosition::new(position.coords, shifted), units_x, units_y)
}

/// Reports whether a tile position lies inside a room's inner grid.
#[must_use]
pub fn inner_room_position_valid(tile: TilePoint, units_x: i32, units_y: i32) -> bool {
    tile.x() >= 0 && tile.x() < units_x && tile.y() >= 0 && tile.y() < units_y
}

/// World-space position of a tile in the room at the given room offset.
///
/// The map is affine: the tile is shifted so that the room's centre tile
/// sits at the room origin (integer halving, matching the constructed
/// geometry), optionally offset to the tile centre, scaled by the tile edge
/// length, and translated by the room offset times the shared-edge stride
/// `units - 1`.
#[must_use]
pub fn cell_world_position(
    tile: TilePoint,
    room_offset: RoomCoords,
    centred: bool,
    config: &GridConfig,
) -> WorldPoint {
    let centre_offset = if centred { 0.5 } else { 0.0 };
    let x = ((tile.x() - config.room_units_x / 2) as f32 + centre_offset)
        * config.unit_length_x_cm
        + (room_offset.x() * (config.room_units_x - 1)) as f32 * config.unit_length_x_cm;
    let y = ((tile.y() - config.room_units_y / 2) as f32 + centre_offset)
        * config.unit_length_y_cm
        + (room_offset.y() * (config.room_units_y - 1)) as f32 * config.unit_length_y_cm;
    WorldPoint::new(x, y)
}

/// Centred world-space position for a mobile agent's room/tile pair.
#[must_use]
pub fn world_position_for_room_and_tile(position: RoomPosition, config: &GridConfig) -> WorldPoint {
    cell_world_position(position.tile, position.coords, true, config)
}

/// Recovers the room/tile pair whose centred world position is `point`.
///
/// Inverse of [`cell_world_position`] with `centred = true`; the result is
/// normalised, so a shared-edge tile comes back as tile `0` of the next
/// room.
#[must_use]
pub fn cell_at_world_position(point: WorldPoint, config: &GridConfig) -> RoomPosition {
    let stride_x = config.room_units_x - 1;
    let stride_y = config.room_units_y - 1;
    let global_x = (point.x / config.unit_length_x_cm - 0.5).round() as i32
        + config.room_units_x / 2;
    let global_y = (point.y / config.unit_length_y_cm - 0.5).round() as i32
        + config.room_units_y / 2;
    RoomPosition::new(
        RoomCoords::new(global_x.div_euclid(stride_x), global_y.div_euclid(stride_y)),
        TilePoint::new(global_x.rem_euclid(stride_x), global_y.rem_euclid(stride_y)),
    )
}

/// Quadrant of the grid a room index falls into.
#[must_use]
pub fn quadrant_for_index(index: RoomIndex, rooms_per_axis: i32) -> Quadrant {
    let half = rooms_per_axis / 2;
    if index.x() >= half {
        if index.y() >= half {
            Quadrant::NorthEast
        } else {
            Quadrant::NorthWest
        }
    } else if index.y() < half {
        Quadrant::SouthWest
    } else {
        Quadrant::SouthEast
    }
}

/// Ring a room coordinate sits on: its Chebyshev distance from the origin.
#[must_use]
pub fn ring_of(coords: RoomCoords) -> u32 {
    coords.x().unsigned_abs().max(coords.y().unsigned_abs())
}

/// Number of rooms on a square ring.
///
/// Ring 0 is degenerate and contains exactly the origin room; treating it
/// as zero would either advance the perimeter before anything connects or
/// never advance it at all.
#[must_use]
pub const fn rooms_on_ring(ring: u32) -> u32 {
    if ring == 0 {
        1
    } else {
        8 * ring
    }
}

/// Reports whether a room lies strictly inside the given ring.
#[must_use]
pub fn within_ring(coords: RoomCoords, ring: u32) -> bool {
    coords.x().unsigned_abs() < ring && coords.y().unsigned_abs() < ring
}
