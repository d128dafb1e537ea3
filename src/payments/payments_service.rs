use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

use crate::clients::TravelerRecord;
use crate::store::DocumentStore;
use crate::users::{UserRepository, UserRepositoryTrait};

use super::payments_model::{PaymentRecord, PendingPayment};
use super::payments_repository::PaymentRepository;
use super::payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait};
use super::{PaymentError, Result};

/// Service reconciling payments against multi-party flight bookings
pub struct PaymentService {
    repository: Arc<dyn PaymentRepositoryTrait>,
    users: Arc<dyn UserRepositoryTrait>,
}

impl PaymentService {
    /// Creates a service with store-backed collaborators
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repository: Arc::new(PaymentRepository::new(store.clone())),
            users: Arc::new(UserRepository::new(store)),
        }
    }

    /// Creates a service from explicit collaborators, for tests
    pub fn with_collaborators(
        repository: Arc<dyn PaymentRepositoryTrait>,
        users: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        Self { repository, users }
    }

    /// A referrer that cannot be resolved degrades to a placeholder;
    /// listing must survive partial referential integrity
    async fn resolve_referrer(&self, email: Option<&str>) -> String {
        let Some(email) = email else {
            return "Unknown".to_string();
        };
        match self.users.find_by_email(email).await {
            Ok(Some(user)) => user.name,
            Ok(None) => {
                warn!("No user found with email {}", email);
                "Unknown".to_string()
            }
            Err(e) => {
                warn!("Referrer lookup failed for {}: {}", email, e);
                "Unknown".to_string()
            }
        }
    }
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    async fn list_pending(&self) -> Result<Vec<PendingPayment>> {
        let pending = self.repository.pending_by_client().await?;

        let mut rows = Vec::new();
        let mut seen: HashSet<(String, Decimal)> = HashSet::new();
        for (client_doc, payment_docs) in pending {
            if payment_docs.is_empty() {
                continue;
            }
            let client: TravelerRecord = client_doc.deserialize()?;
            let referrer = self.resolve_referrer(client.from.as_deref()).await;

            for doc in payment_docs {
                let payment: PaymentRecord = doc.deserialize()?;
                // Split payments share (group, value); only the first
                // document of a logical transaction becomes a row
                if !seen.insert(payment.transaction_key()) {
                    debug!(
                        "Collapsing duplicate payment ({}, {}) on client {}",
                        payment.group_id, payment.value, client_doc.id
                    );
                    continue;
                }
                rows.push(PendingPayment {
                    payment_id: doc.id,
                    client_id: client_doc.id.clone(),
                    client_name: format!("{} {}", client.first_name, client.last_name),
                    passport_number: client.passport_number.clone(),
                    referrer: referrer.clone(),
                    group_id: payment.group_id,
                    value: payment.value,
                    method: payment.method,
                    proof_url: payment.proof_url,
                    date: payment.date,
                });
            }
        }
        Ok(rows)
    }

    async fn set_validated(&self, group_id: &str, value: Decimal) -> Result<()> {
        let matches = self.repository.payments_matching(group_id, value).await?;
        if matches.is_empty() {
            return Err(PaymentError::NotFound(format!(
                "payment ({}, {})",
                group_id, value
            )));
        }
        if matches.iter().all(|p| p.record.validation) {
            debug!(
                "Transaction ({}, {}) already validated, nothing to do",
                group_id, value
            );
            return Ok(());
        }

        let flights = self.repository.flights_by_group(group_id).await?;

        // Cumulative validated total of the booking, counting each logical
        // transaction once and including the one being validated now
        let mut counted: HashSet<(String, Decimal)> = HashSet::new();
        counted.insert((group_id.to_string(), value.normalize()));
        let mut cumulative = value;
        for prior in self.repository.validated_payments(group_id).await? {
            if counted.insert(prior.transaction_key()) {
                cumulative += prior.value;
            }
        }
        let owed: Decimal = flights.iter().map(|f| f.record.total_price).sum();

        let mark_paid: Vec<String> = if !flights.is_empty() && cumulative >= owed {
            let owners: HashSet<&str> = flights.iter().map(|f| f.client_id.as_str()).collect();
            owners.into_iter().map(String::from).collect()
        } else {
            Vec::new()
        };

        debug!(
            "Validating ({}, {}): {} payment docs, {} flights, cumulative {} / owed {}",
            group_id,
            value,
            matches.len(),
            flights.len(),
            cumulative,
            owed
        );
        // One batch: flags, flight credits and status flips land together
        // or not at all, so a retry can never double-credit
        self.repository
            .commit_validation(&matches, &flights, value, &mark_paid)
            .await
    }

    async fn set_unvalidated(&self, group_id: &str, value: Decimal) -> Result<()> {
        let matches = self.repository.payments_matching(group_id, value).await?;
        if matches.is_empty() {
            return Err(PaymentError::NotFound(format!(
                "payment ({}, {})",
                group_id, value
            )));
        }
        self.repository.set_validation(&matches, false).await
    }
}
