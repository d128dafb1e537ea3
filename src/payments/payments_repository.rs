use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

use crate::clients::TravelerFlight;
use crate::constants::{CLIENTS_COLLECTION, FLIGHTS_SUBCOLLECTION, PAYMENTS_SUBCOLLECTION};
use crate::store::{CollectionPath, Document, DocumentStore, Filter, WriteBatch};

use super::payments_model::PaymentRecord;
use super::payments_traits::{LocatedFlight, LocatedPayment, PaymentRepositoryTrait};
use super::Result;

/// Store-backed repository over the per-client `payments` and `flights`
/// subcollections
pub struct PaymentRepository {
    store: Arc<dyn DocumentStore>,
}

impl PaymentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn clients_path() -> CollectionPath {
        CollectionPath::root(CLIENTS_COLLECTION)
    }

    fn payments_path(client_id: &str) -> CollectionPath {
        Self::clients_path().child(client_id, PAYMENTS_SUBCOLLECTION)
    }

    fn flights_path(client_id: &str) -> CollectionPath {
        Self::clients_path().child(client_id, FLIGHTS_SUBCOLLECTION)
    }
}

#[async_trait]
impl PaymentRepositoryTrait for PaymentRepository {
    async fn pending_by_client(&self) -> Result<Vec<(Document, Vec<Document>)>> {
        let clients = self.store.list(&Self::clients_path()).await?;
        let futures = clients.into_iter().map(|client| async move {
            let payments = self
                .store
                .query(
                    &Self::payments_path(&client.id),
                    &[Filter::eq("validation", false)],
                )
                .await?;
            Ok((client, payments))
        });
        futures::future::join_all(futures)
            .await
            .into_iter()
            .collect()
    }

    async fn payments_matching(
        &self,
        group_id: &str,
        value: Decimal,
    ) -> Result<Vec<LocatedPayment>> {
        let clients = self.store.list(&Self::clients_path()).await?;
        let mut matching = Vec::new();
        for client in clients {
            let docs = self
                .store
                .query(
                    &Self::payments_path(&client.id),
                    &[Filter::eq("groupId", group_id)],
                )
                .await?;
            for doc in docs {
                let record: PaymentRecord = doc.deserialize()?;
                // Numeric equality is decided on decoded decimals, not on
                // raw JSON numbers
                if record.value.normalize() == value.normalize() {
                    matching.push(LocatedPayment {
                        client_id: client.id.clone(),
                        payment_id: doc.id,
                        record,
                    });
                }
            }
        }
        Ok(matching)
    }

    async fn set_validation(&self, payments: &[LocatedPayment], validated: bool) -> Result<()> {
        let mut batch = WriteBatch::new();
        for payment in payments {
            batch.update(
                Self::payments_path(&payment.client_id),
                payment.payment_id.clone(),
                json!({ "validation": validated }),
            );
        }
        self.store.commit(batch).await?;
        Ok(())
    }

    async fn validated_payments(&self, group_id: &str) -> Result<Vec<PaymentRecord>> {
        let clients = self.store.list(&Self::clients_path()).await?;
        let mut validated = Vec::new();
        for client in clients {
            let docs = self
                .store
                .query(
                    &Self::payments_path(&client.id),
                    &[Filter::eq("groupId", group_id), Filter::eq("validation", true)],
                )
                .await?;
            for doc in docs {
                validated.push(doc.deserialize::<PaymentRecord>()?);
            }
        }
        Ok(validated)
    }

    async fn flights_by_group(&self, group_id: &str) -> Result<Vec<LocatedFlight>> {
        let clients = self.store.list(&Self::clients_path()).await?;
        let mut flights = Vec::new();
        for client in clients {
            let docs = self
                .store
                .query(
                    &Self::flights_path(&client.id),
                    &[Filter::eq("groupId", group_id)],
                )
                .await?;
            for doc in docs {
                flights.push(LocatedFlight {
                    client_id: client.id.clone(),
                    record: doc.deserialize::<TravelerFlight>()?,
                    flight_id: doc.id,
                });
            }
        }
        Ok(flights)
    }

    async fn commit_validation(
        &self,
        payments: &[LocatedPayment],
        flights: &[LocatedFlight],
        value: Decimal,
        mark_paid: &[String],
    ) -> Result<()> {
        let mut batch = WriteBatch::new();
        for payment in payments {
            batch.update(
                Self::payments_path(&payment.client_id),
                payment.payment_id.clone(),
                json!({ "validation": true }),
            );
        }
        for flight in flights {
            let updated = flight.record.payment + value;
            batch.update(
                Self::flights_path(&flight.client_id),
                flight.flight_id.clone(),
                json!({ "payment": updated }),
            );
        }
        for client_id in mark_paid {
            batch.update(
                Self::clients_path(),
                client_id.clone(),
                json!({ "paymentStatus": crate::clients::PaymentStatus::Paid }),
            );
        }
        self.store.commit(batch).await?;
        Ok(())
    }
}
