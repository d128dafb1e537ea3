mod clients_errors;
mod clients_model;
mod clients_repository;
mod clients_traits;

pub use clients_errors::ClientError;
pub use clients_model::{Gender, PaymentStatus, Traveler, TravelerFlight, TravelerRecord, VisaStatus};
pub use clients_repository::ClientDirectory;
pub use clients_traits::ClientDirectoryTrait;

/// Result type for client-directory operations
pub type Result<T> = std::result::Result<T, ClientError>;
