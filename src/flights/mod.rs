mod flights_model;
mod flights_repository;
mod flights_traits;

pub use flights_model::{Flight, FlightRecord};
pub use flights_repository::FlightRepository;
pub use flights_traits::FlightRepositoryTrait;

/// Flight reads and writes fail only on store access
pub type Result<T> = std::result::Result<T, crate::store::StoreError>;
