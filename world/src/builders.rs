//! Registration of externally-owned builder collaborators.
//!
//! Builders are held as weak references set from outside; the world never
//! owns them. A registration whose owner has been dropped, or a cell with no
//! registration at all, is treated the same way: the callback is skipped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use signal_maze_core::{grid, Direction, RoomBuilder, RoomCoords, WallBuilder};

use crate::walls::couple_index;

#[derive(Debug)]
pub(crate) struct BuilderRegistry {
    rooms_per_axis: i32,
    room_builders: Vec<Option<Weak<RefCell<dyn RoomBuilder>>>>,
    wall_builders: Vec<Option<Weak<RefCell<dyn WallBuilder>>>>,
}

impl BuilderRegistry {
    pub(crate) fn new(rooms_per_axis: i32) -> Self {
        let rooms = rooms_per_axis as usize;
        let couples = (rooms_per_axis + 1) as usize;
        Self {
            rooms_per_axis,
            room_builders: vec![None; rooms * rooms],
            wall_builders: vec![None; couples * couples],
        }
    }

    fn room_slot(&self, coords: RoomCoords) -> usize {
        let index = grid::room_index(coords, self.rooms_per_axis);
        index.x() as usize * self.rooms_per_axis as usize + index.y() as usize
    }

    fn couple_slot(&self, coords: RoomCoords) -> Option<usize> {
        let index = couple_index(coords, self.rooms_per_axis);
        let side = self.rooms_per_axis + 1;
        if index.x() < 0 || index.x() >= side || index.y() < 0 || index.y() >= side {
            return None;
        }
        Some(index.x() as usize * side as usize + index.y() as usize)
    }

    pub(crate) fn set_room_builder(
        &mut self,
        coords: RoomCoords,
        builder: Weak<RefCell<dyn RoomBuilder>>,
    ) {
        let slot = self.room_slot(coords);
        self.room_builders[slot] = Some(builder);
    }

    pub(crate) fn set_wall_builder(
        &mut self,
        coords: RoomCoords,
        builder: Weak<RefCell<dyn WallBuilder>>,
    ) {
        let slot = self
            .couple_slot(coords)
            .expect("wall builder coords outside the wall arena");
        self.wall_builders[slot] = Some(builder);
    }

    pub(crate) fn room_builder(&self, coords: RoomCoords) -> Option<Rc<RefCell<dyn RoomBuilder>>> {
        self.room_builders[self.room_slot(coords)]
            .as_ref()?
            .upgrade()
    }

    /// Builder responsible for the wall couple that owns the given wall.
    ///
    /// South and West walls belong to the room's own couple; North and East
    /// walls belong to the neighbouring couple, including the phantom row
    /// past the grid edge.
    pub(crate) fn wall_builder(
        &self,
        coords: RoomCoords,
        direction: Direction,
    ) -> Option<Rc<RefCell<dyn WallBuilder>>> {
        let owner = match direction {
            Direction::South | Direction::West => coords,
            Direction::North | Direction::East => grid::neighbour_coords(coords, direction),
        };
        self.wall_builders[self.couple_slot(owner)?].as_ref()?.upgrade()
    }
}
