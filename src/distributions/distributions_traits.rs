use async_trait::async_trait;
use chrono::NaiveDate;

use crate::rooms::RoomRegistry;

use super::distributions_model::{LoadedDistribution, RoomDistribution};
use super::Result;

/// Trait defining the contract for distribution persistence.
#[async_trait]
pub trait DistributionRepositoryTrait: Send + Sync {
    /// Stored distribution for a flight, with its document id
    async fn find_by_flight(
        &self,
        flight_date: NaiveDate,
        flight_type: &str,
    ) -> Result<Option<(String, RoomDistribution)>>;

    /// Persists a distribution. With `existing_id` this is an update in
    /// place; without it the flight is looked up first so a flight never
    /// accumulates duplicate distributions.
    async fn save(
        &self,
        distribution: &RoomDistribution,
        existing_id: Option<&str>,
    ) -> Result<String>;
}

/// Trait defining the contract for distribution workflows.
#[async_trait]
pub trait DistributionServiceTrait: Send + Sync {
    /// Restores the stored distribution for a flight as an editable
    /// registry, or `None` when the flight was never saved
    async fn load(
        &self,
        flight_date: NaiveDate,
        flight_type: &str,
    ) -> Result<Option<LoadedDistribution>>;

    /// Restores the stored distribution, falling back to an automatic
    /// partition of the flight's travelers
    async fn load_or_group(
        &self,
        flight_date: NaiveDate,
        flight_type: &str,
    ) -> Result<LoadedDistribution>;

    /// Flattens and persists the registry, returning the distribution id
    async fn save_registry(
        &self,
        flight_date: NaiveDate,
        flight_type: &str,
        registry: &RoomRegistry,
        existing_id: Option<&str>,
    ) -> Result<String>;
}
