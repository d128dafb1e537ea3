use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use serde_json::json;
use std::sync::Arc;

use crate::constants::{CLIENTS_COLLECTION, FLIGHTS_SUBCOLLECTION};
use crate::store::{CollectionPath, Document, DocumentStore};

use super::clients_model::{PaymentStatus, Traveler, TravelerFlight, TravelerRecord};
use super::clients_traits::ClientDirectoryTrait;
use super::{ClientError, Result};

/// Store-backed Client Directory
pub struct ClientDirectory {
    store: Arc<dyn DocumentStore>,
}

impl ClientDirectory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn clients_path() -> CollectionPath {
        CollectionPath::root(CLIENTS_COLLECTION)
    }

    async fn resolve_traveler(&self, doc: &Document) -> Result<Traveler> {
        let record: TravelerRecord = doc.deserialize()?;
        let flights_path = Self::clients_path().child(&doc.id, FLIGHTS_SUBCOLLECTION);
        let flights = self
            .store
            .list(&flights_path)
            .await?
            .iter()
            .map(|d| d.deserialize::<TravelerFlight>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Traveler::from_record(doc.id.clone(), record, flights))
    }
}

#[async_trait]
impl ClientDirectoryTrait for ClientDirectory {
    async fn list_travelers(&self) -> Result<Vec<Traveler>> {
        let docs = self.store.list(&Self::clients_path()).await?;
        debug!("Resolving {} client documents", docs.len());

        // The per-client subcollection reads are independent, issue them
        // together and await the lot.
        let futures = docs.iter().map(|doc| self.resolve_traveler(doc));
        futures::future::join_all(futures)
            .await
            .into_iter()
            .collect()
    }

    async fn get_traveler(&self, traveler_id: &str) -> Result<Traveler> {
        let doc = self
            .store
            .get(&Self::clients_path(), traveler_id)
            .await?
            .ok_or_else(|| ClientError::NotFound(format!("client {}", traveler_id)))?;
        self.resolve_traveler(&doc).await
    }

    async fn travelers_for_flight(&self, flight_date: NaiveDate) -> Result<Vec<Traveler>> {
        let travelers = self.list_travelers().await?;
        Ok(travelers
            .into_iter()
            .filter(|t| t.is_on_flight(flight_date))
            .collect())
    }

    async fn set_payment_status(&self, traveler_id: &str, status: PaymentStatus) -> Result<()> {
        self.store
            .update(
                &Self::clients_path(),
                traveler_id,
                json!({ "paymentStatus": status }),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    async fn seed_client(store: &MemoryStore, id: &str) {
        store
            .set(
                &ClientDirectory::clients_path(),
                id,
                json!({
                    "firstName": id,
                    "lastName": "Test",
                    "birthday": "1990-01-01",
                    "sex": "female",
                    "passportNumber": format!("P{}", id),
                }),
            )
            .await
            .unwrap();
        store
            .set(
                &ClientDirectory::clients_path().child(id, FLIGHTS_SUBCOLLECTION),
                &format!("{}-f", id),
                json!({
                    "flightDate": "2024-03-01",
                    "groupId": format!("G-{}", id),
                    "totalPrice": 1000.0,
                }),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn get_traveler_resolves_flight_memberships() {
        let store = Arc::new(MemoryStore::new());
        seed_client(&store, "c1").await;

        let directory = ClientDirectory::new(store);
        let traveler = directory.get_traveler("c1").await.unwrap();
        assert_eq!(traveler.full_name(), "c1 Test");
        assert_eq!(traveler.flights.len(), 1);
        assert!(traveler.is_on_flight("2024-03-01".parse().unwrap()));
    }

    #[tokio::test]
    async fn get_of_missing_traveler_fails() {
        let store = Arc::new(MemoryStore::new());
        let directory = ClientDirectory::new(store);
        let err = directory.get_traveler("ghost").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[tokio::test]
    async fn set_payment_status_patches_the_client_document() {
        let store = Arc::new(MemoryStore::new());
        seed_client(&store, "c1").await;

        let directory = ClientDirectory::new(store.clone());
        directory
            .set_payment_status("c1", PaymentStatus::Paid)
            .await
            .unwrap();

        let traveler = directory.get_traveler("c1").await.unwrap();
        assert_eq!(traveler.payment_status, PaymentStatus::Paid);
        // The patch merges; the rest of the document survives
        let doc = store
            .get(&ClientDirectory::clients_path(), "c1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.data["firstName"], "c1");
    }
}
