//! Per-room state storage.

use std::collections::HashSet;

use signal_maze_core::{grid, RoomCoords, RoomIndex, RoomStatus, TilePoint};

/// Authoritative state of a single room.
#[derive(Clone, Debug, Default)]
pub(crate) struct RoomState {
    pub(crate) status: RoomStatus,
    pub(crate) health: f32,
    pub(crate) training_progress: f32,
    pub(crate) signal_point: TilePoint,
    occupied_tiles: HashSet<TilePoint>,
}

impl RoomState {
    pub(crate) fn exists(&self) -> bool {
        self.status.exists()
    }

    pub(crate) fn initialize(&mut self, max_health: f32) {
        self.status = RoomStatus::Enabled;
        self.health = max_health;
        self.training_progress = 0.0;
    }

    pub(crate) fn disable(&mut self) {
        self.status = RoomStatus::Dead;
    }

    /// Forward-only transition into Trained; Connected rooms stay Connected.
    pub(crate) fn set_trained(&mut self) {
        if self.status == RoomStatus::Enabled {
            self.status = RoomStatus::Trained;
        }
    }

    pub(crate) fn set_connected(&mut self) {
        self.status = RoomStatus::Connected;
    }

    pub(crate) fn tile_is_empty(&self, tile: TilePoint) -> bool {
        !self.occupied_tiles.contains(&tile)
    }

    pub(crate) fn actor_entered_tile(&mut self, tile: TilePoint) {
        let _ = self.occupied_tiles.insert(tile);
    }

    pub(crate) fn actor_exited_tile(&mut self, tile: TilePoint) {
        let _ = self.occupied_tiles.remove(&tile);
    }
}

/// Dense grid of room states sized `rooms_per_axis²`, created blank at
/// world initialisation.
#[derive(Debug)]
pub(crate) struct RoomGrid {
    rooms_per_axis: i32,
    rooms: Vec<RoomState>,
}

impl RoomGrid {
    pub(crate) fn new(rooms_per_axis: i32) -> Self {
        let side = rooms_per_axis as usize;
        Self {
            rooms_per_axis,
            rooms: vec![RoomState::default(); side * side],
        }
    }

    fn slot(&self, index: RoomIndex) -> usize {
        assert!(
            index.contained_in(self.rooms_per_axis),
            "room index ({}, {}) outside the {}x{} grid",
            index.x(),
            index.y(),
            self.rooms_per_axis,
            self.rooms_per_axis,
        );
        index.x() as usize * self.rooms_per_axis as usize + index.y() as usize
    }

    /// Room state addressed by origin-centred coordinates; fatal when the
    /// coordinate falls outside the grid.
    pub(crate) fn room(&self, coords: RoomCoords) -> &RoomState {
        &self.rooms[self.slot(grid::room_index(coords, self.rooms_per_axis))]
    }

    pub(crate) fn room_mut(&mut self, coords: RoomCoords) -> &mut RoomState {
        let slot = self.slot(grid::room_index(coords, self.rooms_per_axis));
        &mut self.rooms[slot]
    }

    /// Existence check that treats coordinates outside the grid as empty
    /// space instead of failing; wall reconciliation reaches one step past
    /// the grid through the phantom wall row.
    pub(crate) fn exists_lenient(&self, coords: RoomCoords) -> bool {
        let index = RoomIndex::new(
            coords.x() + self.rooms_per_axis / 2,
            coords.y() + self.rooms_per_axis / 2,
        );
        index.contained_in(self.rooms_per_axis) && self.rooms[self.slot(index)].exists()
    }

    /// Trained check with the same out-of-grid tolerance.
    pub(crate) fn trained_lenient(&self, coords: RoomCoords) -> bool {
        let index = RoomIndex::new(
            coords.x() + self.rooms_per_axis / 2,
            coords.y() + self.rooms_per_axis / 2,
        );
        index.contained_in(self.rooms_per_axis) && self.rooms[self.slot(index)].status.is_trained()
    }

    /// Connected check with the same out-of-grid tolerance.
    pub(crate) fn connected_lenient(&self, coords: RoomCoords) -> bool {
        let index = RoomIndex::new(
            coords.x() + self.rooms_per_axis / 2,
            coords.y() + self.rooms_per_axis / 2,
        );
        index.contained_in(self.rooms_per_axis)
            && self.rooms[self.slot(index)].status.is_connected()
    }
}
