use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::clients::TravelerFlight;
use crate::store::Document;

use super::payments_model::{PaymentRecord, PendingPayment};
use super::Result;

/// A payment document located in some client's subcollection
#[derive(Debug, Clone)]
pub struct LocatedPayment {
    pub client_id: String,
    pub payment_id: String,
    pub record: PaymentRecord,
}

/// A flight-membership document located in some client's subcollection
#[derive(Debug, Clone)]
pub struct LocatedFlight {
    pub client_id: String,
    pub flight_id: String,
    pub record: TravelerFlight,
}

/// Trait defining the contract for payment data access.
#[async_trait]
pub trait PaymentRepositoryTrait: Send + Sync {
    /// Every client document together with its unvalidated payments
    async fn pending_by_client(&self) -> Result<Vec<(Document, Vec<Document>)>>;

    /// All payment documents of one logical transaction, across clients
    async fn payments_matching(&self, group_id: &str, value: Decimal)
        -> Result<Vec<LocatedPayment>>;

    /// Flips the validation flag on all given documents in one batch
    async fn set_validation(&self, payments: &[LocatedPayment], validated: bool) -> Result<()>;

    /// All validated payment records sharing a group id, across clients
    async fn validated_payments(&self, group_id: &str) -> Result<Vec<PaymentRecord>>;

    /// All flight memberships sharing a group id, across clients
    async fn flights_by_group(&self, group_id: &str) -> Result<Vec<LocatedFlight>>;

    /// Applies one validation as a single atomic batch: flips the
    /// validation flag on the payment documents, adds the value to every
    /// flight's running total, and marks the listed clients paid
    async fn commit_validation(
        &self,
        payments: &[LocatedPayment],
        flights: &[LocatedFlight],
        value: Decimal,
        mark_paid: &[String],
    ) -> Result<()>;
}

/// Trait defining the contract for payment reconciliation.
#[async_trait]
pub trait PaymentServiceTrait: Send + Sync {
    /// Pending payments across all clients, one row per logical
    /// transaction
    async fn list_pending(&self) -> Result<Vec<PendingPayment>>;

    /// Validates a logical transaction and reconciles the owning booking.
    /// Safe to retry: re-validating an already-validated transaction is a
    /// no-op.
    async fn set_validated(&self, group_id: &str, value: Decimal) -> Result<()>;

    /// Clears the validation flag; flight totals are not reversed
    async fn set_unvalidated(&self, group_id: &str, value: Decimal) -> Result<()>;
}
