use async_trait::async_trait;
use chrono::NaiveDate;

use super::clients_model::{PaymentStatus, Traveler};
use super::Result;

/// Trait defining the contract for the Client Directory.
#[async_trait]
pub trait ClientDirectoryTrait: Send + Sync {
    /// All travelers with their flight memberships resolved
    async fn list_travelers(&self) -> Result<Vec<Traveler>>;

    /// Single traveler by id
    async fn get_traveler(&self, traveler_id: &str) -> Result<Traveler>;

    /// Travelers booked on the flight departing that day
    async fn travelers_for_flight(&self, flight_date: NaiveDate) -> Result<Vec<Traveler>>;

    /// Flips the explicit payment status on the client document
    async fn set_payment_status(&self, traveler_id: &str, status: PaymentStatus) -> Result<()>;
}
