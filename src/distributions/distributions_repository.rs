use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::constants::ROOM_DISTRIBUTION_COLLECTION;
use crate::store::{CollectionPath, DocumentStore, Filter, WriteBatch};

use super::distributions_model::RoomDistribution;
use super::distributions_traits::DistributionRepositoryTrait;
use super::Result;

/// Store-backed repository over the `roomDistribution` collection
pub struct DistributionRepository {
    store: Arc<dyn DocumentStore>,
}

impl DistributionRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn distributions_path() -> CollectionPath {
        CollectionPath::root(ROOM_DISTRIBUTION_COLLECTION)
    }

    fn flight_filters(flight_date: NaiveDate, flight_type: &str) -> [Filter; 2] {
        [
            Filter::eq("flightDate", flight_date.to_string()),
            Filter::eq("flightType", flight_type),
        ]
    }
}

#[async_trait]
impl DistributionRepositoryTrait for DistributionRepository {
    async fn find_by_flight(
        &self,
        flight_date: NaiveDate,
        flight_type: &str,
    ) -> Result<Option<(String, RoomDistribution)>> {
        let docs = self
            .store
            .query(
                &Self::distributions_path(),
                &Self::flight_filters(flight_date, flight_type),
            )
            .await?;
        docs.first()
            .map(|doc| Ok((doc.id.clone(), doc.deserialize::<RoomDistribution>()?)))
            .transpose()
    }

    async fn save(
        &self,
        distribution: &RoomDistribution,
        existing_id: Option<&str>,
    ) -> Result<String> {
        // Callers without an id may still race an earlier save of the same
        // flight; look it up so the flight keeps exactly one distribution.
        let target_id = match existing_id {
            Some(id) => Some(id.to_string()),
            None => self
                .find_by_flight(distribution.flight_date, &distribution.flight_type)
                .await?
                .map(|(id, _)| id),
        };

        let mut batch = WriteBatch::new();
        let id = match target_id {
            Some(id) => {
                debug!("Updating room distribution {}", id);
                batch.update(
                    Self::distributions_path(),
                    id.clone(),
                    json!({ "rooms": distribution.rooms }),
                );
                id
            }
            None => {
                let id = Uuid::new_v4().to_string();
                debug!("Creating room distribution {}", id);
                batch.set(
                    Self::distributions_path(),
                    id.clone(),
                    serde_json::to_value(distribution)
                        .map_err(crate::store::StoreError::from)?,
                );
                id
            }
        };
        self.store.commit(batch).await?;
        Ok(id)
    }
}
