use thiserror::Error;

/// Custom error type for room operations. These are invariant violations
/// raised by pure in-memory logic, never I/O failures.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Room {0} not found")]
    RoomNotFound(String),

    #[error("Traveler {traveler} is not in room {room}")]
    MemberNotFound { traveler: String, room: String },

    #[error("Room {0} is at capacity")]
    RoomFull(String),

    #[error("Traveler {traveler} is already in room {room}")]
    DuplicateMember { traveler: String, room: String },
}
