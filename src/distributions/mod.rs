mod distributions_errors;
mod distributions_model;
mod distributions_repository;
mod distributions_service;
mod distributions_traits;

pub use distributions_errors::DistributionError;
pub use distributions_model::{AgeDetails, LoadedDistribution, RoomDistribution, StoredRoom};
pub use distributions_repository::DistributionRepository;
pub use distributions_service::DistributionService;
pub use distributions_traits::{DistributionRepositoryTrait, DistributionServiceTrait};

/// Result type for distribution operations
pub type Result<T> = std::result::Result<T, DistributionError>;
