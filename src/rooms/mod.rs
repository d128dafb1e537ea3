mod partitioner;
mod registry;
mod rooms_errors;
mod rooms_model;

pub use partitioner::partition;
pub use registry::{MovePolicy, RoomRegistry};
pub use rooms_errors::RoomError;
pub use rooms_model::Room;

/// Result type for room operations
pub type Result<T> = std::result::Result<T, RoomError>;
