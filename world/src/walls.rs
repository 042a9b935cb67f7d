//! Deduplicated storage for the walls shared between adjacent rooms.
//!
//! Every wall is owned exactly once: each grid cell owns a [`WallCouple`]
//! holding the room's South and West walls, and a room's North or East wall
//! resolves to the neighbouring couple's South or West slot. The arena keeps
//! one extra row and column of couples past the room grid so that rooms on
//! the outer edge still have somewhere to keep their North and East walls;
//! removing that phantom row would change edge-room wall semantics.

use signal_maze_core::{Direction, DoorState, RoomCoords, RoomIndex};

/// State of a single wall between two rooms.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct WallState {
    pub(crate) exists: bool,
    pub(crate) door_exists: bool,
    /// Offset of the door along the wall; fixed for the wall's lifetime
    /// once generated, so maze topology is stable across room rebuilds.
    pub(crate) door_position: Option<u32>,
    pub(crate) door_state: DoorState,
}

impl WallState {
    /// A door may only exist on an existing wall; a violation is a corrupt
    /// invariant and fatal.
    pub(crate) fn assert_door_invariant(&self) {
        assert!(
            self.exists || !self.door_exists,
            "door exists on a non-existent wall"
        );
    }
}

/// The two walls owned by one grid cell.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct WallCouple {
    pub(crate) south: WallState,
    pub(crate) west: WallState,
}

/// Which slot of a couple a canonical wall key addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WallFace {
    South,
    West,
}

/// Canonical address of a wall: the couple index that owns it plus the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WallKey {
    pub(crate) index: RoomIndex,
    pub(crate) face: WallFace,
}

impl WallKey {
    /// Canonicalises a room-relative wall reference.
    ///
    /// North and East resolve through the neighbouring couple; South and
    /// West stay with the room's own couple.
    pub(crate) fn canonical(
        coords: RoomCoords,
        direction: Direction,
        rooms_per_axis: i32,
    ) -> Self {
        let index = couple_index(coords, rooms_per_axis);
        match direction {
            Direction::North => Self {
                index: RoomIndex::new(index.x() + 1, index.y()),
                face: WallFace::South,
            },
            Direction::East => Self {
                index: RoomIndex::new(index.x(), index.y() + 1),
                face: WallFace::West,
            },
            Direction::South => Self {
                index,
                face: WallFace::South,
            },
            Direction::West => Self {
                index,
                face: WallFace::West,
            },
        }
    }
}

/// Grid index of the couple owned by a room coordinate.
///
/// Unlike room lookups this tolerates coordinates one step past the room
/// grid, because the phantom couple row and column are addressed through
/// the out-of-grid neighbours of edge rooms.
pub(crate) fn couple_index(coords: RoomCoords, rooms_per_axis: i32) -> RoomIndex {
    RoomIndex::new(
        coords.x() + rooms_per_axis / 2,
        coords.y() + rooms_per_axis / 2,
    )
}

/// Dense arena of wall couples sized `(rooms_per_axis + 1)²`.
#[derive(Debug)]
pub(crate) struct WallArena {
    rooms_per_axis: i32,
    couples: Vec<WallCouple>,
}

impl WallArena {
    pub(crate) fn new(rooms_per_axis: i32) -> Self {
        let side = (rooms_per_axis + 1) as usize;
        Self {
            rooms_per_axis,
            couples: vec![WallCouple::default(); side * side],
        }
    }

    pub(crate) fn couple_index_valid(&self, index: RoomIndex) -> bool {
        index.x() >= 0
            && index.x() <= self.rooms_per_axis
            && index.y() >= 0
            && index.y() <= self.rooms_per_axis
    }

    fn slot(&self, index: RoomIndex) -> usize {
        assert!(
            self.couple_index_valid(index),
            "wall couple index ({}, {}) outside the arena",
            index.x(),
            index.y(),
        );
        let side = (self.rooms_per_axis + 1) as usize;
        index.x() as usize * side + index.y() as usize
    }

    pub(crate) fn wall(&self, key: WallKey) -> &WallState {
        let couple = &self.couples[self.slot(key.index)];
        match key.face {
            WallFace::South => &couple.south,
            WallFace::West => &couple.west,
        }
    }

    pub(crate) fn wall_mut(&mut self, key: WallKey) -> &mut WallState {
        let slot = self.slot(key.index);
        let couple = &mut self.couples[slot];
        match key.face {
            WallFace::South => &mut couple.south,
            WallFace::West => &mut couple.west,
        }
    }
}

/// Descriptor of a wall awaiting reconciliation on the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallUpdate {
    /// Room coordinate the wall is addressed from.
    pub coords: RoomCoords,
    /// Wall of that room to reconcile.
    pub direction: Direction,
}

/// Ordered, deduplicated set of pending wall updates.
///
/// The same descriptor never enqueues twice before being drained; the queue
/// is small enough that a linear membership scan matches the access
/// pattern.
#[derive(Debug, Default)]
pub(crate) struct WallUpdateQueue {
    pending: Vec<WallUpdate>,
}

impl WallUpdateQueue {
    pub(crate) fn push(&mut self, update: WallUpdate) {
        if !self.pending.contains(&update) {
            self.pending.push(update);
        }
    }

    pub(crate) fn drain(&mut self) -> Vec<WallUpdate> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn north_and_east_resolve_through_the_neighbour() {
        let coords = RoomCoords::new(0, 0);
        let own = couple_index(coords, 20);

        let north = WallKey::canonical(coords, Direction::North, 20);
        assert_eq!(north.face, WallFace::South);
        assert_eq!(north.index, RoomIndex::new(own.x() + 1, own.y()));

        let east = WallKey::canonical(coords, Direction::East, 20);
        assert_eq!(east.face, WallFace::West);
        assert_eq!(east.index, RoomIndex::new(own.x(), own.y() + 1));

        let south = WallKey::canonical(coords, Direction::South, 20);
        assert_eq!(south.index, own);
        assert_eq!(south.face, WallFace::South);
    }

    #[test]
    fn a_room_and_its_neighbour_share_one_wall_record() {
        let mut arena = WallArena::new(20);
        let key_from_south_room = WallKey::canonical(RoomCoords::new(0, 0), Direction::North, 20);
        let key_from_north_room = WallKey::canonical(RoomCoords::new(1, 0), Direction::South, 20);
        assert_eq!(key_from_south_room, key_from_north_room);

        arena.wall_mut(key_from_south_room).exists = true;
        assert!(arena.wall(key_from_north_room).exists);
    }

    #[test]
    fn edge_rooms_keep_their_outer_walls_in_the_phantom_row() {
        let mut arena = WallArena::new(20);
        let edge = RoomCoords::new(9, 9);
        let north = WallKey::canonical(edge, Direction::North, 20);
        let east = WallKey::canonical(edge, Direction::East, 20);
        assert_eq!(north.index, RoomIndex::new(20, 19));
        assert_eq!(east.index, RoomIndex::new(19, 20));
        arena.wall_mut(north).exists = true;
        arena.wall_mut(east).exists = true;
        assert!(arena.wall(north).exists);
        assert!(arena.wall(east).exists);
    }

    #[test]
    #[should_panic(expected = "outside the arena")]
    fn walls_beyond_the_phantom_row_are_fatal() {
        let arena = WallArena::new(20);
        let _ = arena.wall(WallKey {
            index: RoomIndex::new(21, 0),
            face: WallFace::South,
        });
    }

    #[test]
    fn queue_deduplicates_pending_descriptors() {
        let mut queue = WallUpdateQueue::default();
        let update = WallUpdate {
            coords: RoomCoords::new(0, 0),
            direction: Direction::South,
        };
        queue.push(update);
        queue.push(update);
        queue.push(WallUpdate {
            coords: RoomCoords::new(0, 0),
            direction: Direction::West,
        });
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain().len(), 2);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    #[should_panic(expected = "door exists on a non-existent wall")]
    fn door_without_wall_is_a_corrupt_invariant() {
        let wall = WallState {
            exists: false,
            door_exists: true,
            door_position: None,
            door_state: DoorState::Unlocked,
        };
        wall.assert_door_invariant();
    }
}
