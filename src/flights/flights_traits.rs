use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::flights_model::Flight;
use super::Result;

/// Trait defining the contract for flight data access.
#[async_trait]
pub trait FlightRepositoryTrait: Send + Sync {
    async fn list_flights(&self) -> Result<Vec<Flight>>;
    async fn flights_by_type(&self, flight_type: &str) -> Result<Vec<Flight>>;
    async fn find_by_date_and_type(
        &self,
        date: NaiveDate,
        flight_type: &str,
    ) -> Result<Option<Flight>>;
    /// Adds a validated payment value to the flight's running total
    async fn add_payment(&self, flight_id: &str, value: Decimal) -> Result<()>;
}
