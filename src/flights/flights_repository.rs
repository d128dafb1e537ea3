use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

use crate::constants::FLIGHTS_COLLECTION;
use crate::store::{CollectionPath, DocumentStore, Filter, StoreError};

use super::flights_model::{Flight, FlightRecord};
use super::flights_traits::FlightRepositoryTrait;
use super::Result;

/// Store-backed repository over the top-level `flights` collection
pub struct FlightRepository {
    store: Arc<dyn DocumentStore>,
}

impl FlightRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn flights_path() -> CollectionPath {
        CollectionPath::root(FLIGHTS_COLLECTION)
    }
}

#[async_trait]
impl FlightRepositoryTrait for FlightRepository {
    async fn list_flights(&self) -> Result<Vec<Flight>> {
        let docs = self.store.list(&Self::flights_path()).await?;
        docs.iter()
            .map(|d| Ok(Flight::from_record(d.id.clone(), d.deserialize::<FlightRecord>()?)))
            .collect()
    }

    async fn flights_by_type(&self, flight_type: &str) -> Result<Vec<Flight>> {
        let docs = self
            .store
            .query(&Self::flights_path(), &[Filter::eq("type", flight_type)])
            .await?;
        docs.iter()
            .map(|d| Ok(Flight::from_record(d.id.clone(), d.deserialize::<FlightRecord>()?)))
            .collect()
    }

    async fn find_by_date_and_type(
        &self,
        date: NaiveDate,
        flight_type: &str,
    ) -> Result<Option<Flight>> {
        let docs = self
            .store
            .query(
                &Self::flights_path(),
                &[
                    Filter::eq("date", date.to_string()),
                    Filter::eq("type", flight_type),
                ],
            )
            .await?;
        docs.first()
            .map(|d| Ok(Flight::from_record(d.id.clone(), d.deserialize::<FlightRecord>()?)))
            .transpose()
    }

    async fn add_payment(&self, flight_id: &str, value: Decimal) -> Result<()> {
        let doc = self
            .store
            .get(&Self::flights_path(), flight_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("flight {}", flight_id)))?;
        let record: FlightRecord = doc.deserialize()?;
        let updated = record.payment + value;
        self.store
            .update(&Self::flights_path(), flight_id, json!({ "payment": updated }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;
    use serde_json::json;

    async fn seed_flight(store: &MemoryStore, id: &str, flight_type: &str, date: &str) {
        store
            .set(
                &CollectionPath::root(FLIGHTS_COLLECTION),
                id,
                json!({
                    "type": flight_type,
                    "date": date,
                    "returnDate": "2024-03-15",
                    "emptySeats": 20,
                    "flightCompany": "Tunisair",
                    "totalPrice": 1500.0,
                    "groupId": format!("G-{}", id),
                }),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn list_carries_document_ids_and_defaults() {
        let store = Arc::new(MemoryStore::new());
        seed_flight(&store, "f1", "omra", "2024-03-01").await;
        seed_flight(&store, "f2", "hajj", "2024-06-10").await;

        let repo = FlightRepository::new(store);
        let flights = repo.list_flights().await.unwrap();
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].id, "f1");
        // No payment recorded yet
        assert_eq!(flights[0].payment, dec!(0));
    }

    #[tokio::test]
    async fn by_type_filters_out_other_sessions() {
        let store = Arc::new(MemoryStore::new());
        seed_flight(&store, "f1", "omra", "2024-03-01").await;
        seed_flight(&store, "f2", "hajj", "2024-06-10").await;

        let repo = FlightRepository::new(store);
        let omra = repo.flights_by_type("omra").await.unwrap();
        assert_eq!(omra.len(), 1);
        assert_eq!(omra[0].flight_type, "omra");
    }

    #[tokio::test]
    async fn date_and_type_must_both_match() {
        let store = Arc::new(MemoryStore::new());
        seed_flight(&store, "f1", "omra", "2024-03-01").await;
        seed_flight(&store, "f2", "hajj", "2024-03-01").await;

        let repo = FlightRepository::new(store);
        let date: NaiveDate = "2024-03-01".parse().unwrap();

        let hit = repo.find_by_date_and_type(date, "hajj").await.unwrap().unwrap();
        assert_eq!(hit.id, "f2");
        assert!(repo
            .find_by_date_and_type("2024-03-02".parse().unwrap(), "hajj")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn add_payment_accumulates_on_the_running_total() {
        let store = Arc::new(MemoryStore::new());
        seed_flight(&store, "f1", "omra", "2024-03-01").await;

        let repo = FlightRepository::new(store);
        repo.add_payment("f1", dec!(600)).await.unwrap();
        repo.add_payment("f1", dec!(900)).await.unwrap();

        let flights = repo.list_flights().await.unwrap();
        assert_eq!(flights[0].payment, dec!(1500));
    }

    #[tokio::test]
    async fn add_payment_to_missing_flight_fails() {
        let store = Arc::new(MemoryStore::new());
        let repo = FlightRepository::new(store);
        let err = repo.add_payment("ghost", dec!(10)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
