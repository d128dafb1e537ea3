//! Shared constants

/// Root collection of client (traveler) documents
pub const CLIENTS_COLLECTION: &str = "clients";

/// Root collection of flight/session documents
pub const FLIGHTS_COLLECTION: &str = "flights";

/// Root collection of staff user documents
pub const USERS_COLLECTION: &str = "users";

/// Root collection of persisted room distributions, one per flight
pub const ROOM_DISTRIBUTION_COLLECTION: &str = "roomDistribution";

/// Per-client subcollection of flight memberships
pub const FLIGHTS_SUBCOLLECTION: &str = "flights";

/// Per-client subcollection of payments
pub const PAYMENTS_SUBCOLLECTION: &str = "payments";

/// Default number of travelers per room
pub const DEFAULT_ROOM_CAPACITY: usize = 4;
