//! Mutable collection of named rooms for one editing session


use super::rooms_errors::RoomError;
use super::rooms_model::{room_label, Room};
use super::Result;

/// What to do when a move targets a room that is already at capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovePolicy {
    /// Fail the move with `RoomFull`; the caller must ask for an explicit
    /// swap instead
    #[default]
    Reject,
    /// Displace the destination's last member back into the source room
    /// (legacy drag-and-drop behavior)
    SwapWithLast,
}

/// In-memory authoritative state of one flight's rooms while staff edit
/// them. After every mutation each traveler belongs to exactly one room
/// and no room exceeds its capacity.
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    capacity: usize,
    rooms: Vec<Room>,
    next_label: usize,
}

impl RoomRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            rooms: Vec::new(),
            next_label: 0,
        }
    }

    /// Wraps rooms produced by the partitioner or restored from storage
    pub fn from_rooms(rooms: Vec<Room>, capacity: usize) -> Self {
        let next_label = rooms.len();
        Self {
            capacity,
            rooms,
            next_label,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn find_room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    pub fn total_members(&self) -> usize {
        self.rooms.iter().map(|r| r.members.len()).sum()
    }

    fn index_of(&self, room_id: &str) -> Result<usize> {
        self.rooms
            .iter()
            .position(|r| r.id == room_id)
            .ok_or_else(|| RoomError::RoomNotFound(room_id.to_string()))
    }

    fn fresh_label(&mut self) -> String {
        // Labels stay unique even after deletions re-shuffle indices
        loop {
            let label = room_label(self.next_label);
            self.next_label += 1;
            if self.rooms.iter().all(|r| r.id != label) {
                return label;
            }
        }
    }

    /// Appends an empty room and returns its id
    pub fn create_room(&mut self) -> String {
        let label = self.fresh_label();
        self.rooms.push(Room::new(label.clone(), self.capacity));
        label
    }

    /// Removes a room. Its members are reassigned starting at the first
    /// remaining room, spilling into later rooms (new ones if needed) so
    /// that nobody is dropped and no room ends above capacity.
    pub fn delete_room(&mut self, room_id: &str) -> Result<()> {
        let index = self.index_of(room_id)?;
        let displaced = self.rooms.remove(index).members;

        if self.rooms.is_empty() && !displaced.is_empty() {
            self.create_room();
        }

        for member in displaced {
            match self.rooms.iter_mut().find(|r| !r.is_full()) {
                Some(room) => room.members.push(member),
                None => {
                    let label = self.fresh_label();
                    let mut room = Room::new(label, self.capacity);
                    room.members.push(member);
                    self.rooms.push(room);
                }
            }
        }
        Ok(())
    }

    /// Moves one traveler between rooms. A move into a full room either
    /// fails or displaces the destination's last member, per `policy`.
    pub fn move_member(
        &mut self,
        traveler_id: &str,
        from_room_id: &str,
        to_room_id: &str,
        policy: MovePolicy,
    ) -> Result<()> {
        let from = self.index_of(from_room_id)?;
        let to = self.index_of(to_room_id)?;

        let position = self.rooms[from]
            .members
            .iter()
            .position(|m| m.id == traveler_id)
            .ok_or_else(|| RoomError::MemberNotFound {
                traveler: traveler_id.to_string(),
                room: from_room_id.to_string(),
            })?;

        if from == to {
            return Ok(());
        }
        if self.rooms[to].contains(traveler_id) {
            return Err(RoomError::DuplicateMember {
                traveler: traveler_id.to_string(),
                room: to_room_id.to_string(),
            });
        }

        if self.rooms[to].is_full() {
            match policy {
                MovePolicy::Reject => {
                    return Err(RoomError::RoomFull(to_room_id.to_string()));
                }
                MovePolicy::SwapWithLast => {
                    // A zero-capacity room is "full" while empty; nothing
                    // can be displaced out of it
                    let displaced = match self.rooms[to].members.pop() {
                        Some(member) => member,
                        None => return Err(RoomError::RoomFull(to_room_id.to_string())),
                    };
                    let moved = self.rooms[from].members.remove(position);
                    self.rooms[from].members.push(displaced);
                    self.rooms[to].members.push(moved);
                    return Ok(());
                }
            }
        }

        let moved = self.rooms[from].members.remove(position);
        self.rooms[to].members.push(moved);
        Ok(())
    }

    /// Exchanges two travelers between two rooms atomically; member counts
    /// do not change, so capacity is necessarily preserved.
    pub fn swap_members(
        &mut self,
        traveler_a: &str,
        room_a_id: &str,
        traveler_b: &str,
        room_b_id: &str,
    ) -> Result<()> {
        let a = self.index_of(room_a_id)?;
        let b = self.index_of(room_b_id)?;

        let pos_a = self.rooms[a]
            .members
            .iter()
            .position(|m| m.id == traveler_a)
            .ok_or_else(|| RoomError::MemberNotFound {
                traveler: traveler_a.to_string(),
                room: room_a_id.to_string(),
            })?;
        let pos_b = self.rooms[b]
            .members
            .iter()
            .position(|m| m.id == traveler_b)
            .ok_or_else(|| RoomError::MemberNotFound {
                traveler: traveler_b.to_string(),
                room: room_b_id.to_string(),
            })?;

        if a == b {
            self.rooms[a].members.swap(pos_a, pos_b);
            return Ok(());
        }

        let (low, high, pos_low, pos_high) = if a < b {
            (a, b, pos_a, pos_b)
        } else {
            (b, a, pos_b, pos_a)
        };
        let (left, right) = self.rooms.split_at_mut(high);
        std::mem::swap(
            &mut left[low].members[pos_low],
            &mut right[0].members[pos_high],
        );
        Ok(())
    }

    /// Verifies capacity and unique membership across all rooms
    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for room in &self.rooms {
            if room.members.len() > room.capacity {
                return Err(RoomError::RoomFull(room.id.clone()));
            }
            for member in &room.members {
                if !seen.insert(member.id.clone()) {
                    return Err(RoomError::DuplicateMember {
                        traveler: member.id.clone(),
                        room: room.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
