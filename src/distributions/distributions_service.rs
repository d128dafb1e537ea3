use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::ClientDirectoryTrait;
use crate::constants::DEFAULT_ROOM_CAPACITY;
use crate::rooms::{partition, Room, RoomRegistry};
use crate::store::DocumentStore;

use super::distributions_model::{LoadedDistribution, RoomDistribution, StoredRoom};
use super::distributions_repository::DistributionRepository;
use super::distributions_traits::{DistributionRepositoryTrait, DistributionServiceTrait};
use super::Result;

/// Service for loading, grouping and saving room distributions
pub struct DistributionService {
    repository: DistributionRepository,
    directory: Arc<dyn ClientDirectoryTrait>,
    capacity: usize,
}

impl DistributionService {
    /// Creates a service with the default room capacity
    pub fn new(store: Arc<dyn DocumentStore>, directory: Arc<dyn ClientDirectoryTrait>) -> Self {
        Self::with_capacity(store, directory, DEFAULT_ROOM_CAPACITY)
    }

    pub fn with_capacity(
        store: Arc<dyn DocumentStore>,
        directory: Arc<dyn ClientDirectoryTrait>,
        capacity: usize,
    ) -> Self {
        Self {
            repository: DistributionRepository::new(store),
            directory,
            capacity,
        }
    }

    /// Rebuilds rooms from stored member ids. Ids that no longer resolve
    /// to a traveler are dropped with a warning; a stale reference must
    /// not make the whole flight unloadable.
    async fn reconstruct(&self, distribution: &RoomDistribution) -> Result<RoomRegistry> {
        let travelers = self.directory.list_travelers().await?;
        let by_id: HashMap<&str, _> = travelers.iter().map(|t| (t.id.as_str(), t)).collect();

        let rooms = distribution
            .rooms
            .iter()
            .map(|stored| {
                let mut room = Room::new(stored.room_id.clone(), self.capacity);
                for client_id in &stored.clients {
                    match by_id.get(client_id.as_str()) {
                        Some(traveler) => room.members.push((*traveler).clone()),
                        None => warn!(
                            "Client {} referenced by room {} no longer exists, dropping",
                            client_id, stored.room_id
                        ),
                    }
                }
                room
            })
            .collect();
        Ok(RoomRegistry::from_rooms(rooms, self.capacity))
    }
}

#[async_trait]
impl DistributionServiceTrait for DistributionService {
    async fn load(
        &self,
        flight_date: NaiveDate,
        flight_type: &str,
    ) -> Result<Option<LoadedDistribution>> {
        let found = self.repository.find_by_flight(flight_date, flight_type).await?;
        match found {
            Some((id, distribution)) => {
                debug!("Existing distribution {} found for {} {}", id, flight_type, flight_date);
                let registry = self.reconstruct(&distribution).await?;
                Ok(Some(LoadedDistribution {
                    id: Some(id),
                    registry,
                }))
            }
            None => Ok(None),
        }
    }

    async fn load_or_group(
        &self,
        flight_date: NaiveDate,
        flight_type: &str,
    ) -> Result<LoadedDistribution> {
        if let Some(loaded) = self.load(flight_date, flight_type).await? {
            return Ok(loaded);
        }

        debug!(
            "No stored distribution for {} {}, grouping automatically",
            flight_type, flight_date
        );
        let travelers = self.directory.travelers_for_flight(flight_date).await?;
        let rooms = partition(&travelers, self.capacity);
        Ok(LoadedDistribution {
            id: None,
            registry: RoomRegistry::from_rooms(rooms, self.capacity),
        })
    }

    async fn save_registry(
        &self,
        flight_date: NaiveDate,
        flight_type: &str,
        registry: &RoomRegistry,
        existing_id: Option<&str>,
    ) -> Result<String> {
        let today = Utc::now().date_naive();
        let distribution = RoomDistribution {
            flight_date,
            flight_type: flight_type.to_string(),
            rooms: registry
                .rooms()
                .iter()
                .map(|room| StoredRoom::from_room(room, today))
                .collect(),
        };
        let id = self.repository.save(&distribution, existing_id).await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ClientDirectory;
    use crate::constants::{CLIENTS_COLLECTION, FLIGHTS_SUBCOLLECTION, ROOM_DISTRIBUTION_COLLECTION};
    use crate::store::{CollectionPath, MemoryStore};
    use serde_json::json;

    const FLIGHT_TYPE: &str = "omra";

    fn flight_date() -> NaiveDate {
        "2024-03-01".parse().unwrap()
    }

    async fn seed_client(store: &MemoryStore, id: &str, sex: &str, birthday: &str) {
        let clients = CollectionPath::root(CLIENTS_COLLECTION);
        store
            .set(
                &clients,
                id,
                json!({
                    "firstName": id,
                    "lastName": "Test",
                    "birthday": birthday,
                    "sex": sex,
                    "passportNumber": format!("P{}", id),
                }),
            )
            .await
            .unwrap();
        store
            .set(
                &clients.child(id, FLIGHTS_SUBCOLLECTION),
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

    async fn service(store: Arc<MemoryStore>) -> DistributionService {
        let directory = Arc::new(ClientDirectory::new(store.clone()));
        DistributionService::new(store, directory)
    }

    #[tokio::test]
    async fn load_or_group_falls_back_to_partitioner() {
        let store = Arc::new(MemoryStore::new());
        for (id, birthday) in [("m1", "1980-01-01"), ("m2", "1985-01-01"), ("f1", "1990-01-01")] {
            let sex = if id.starts_with('m') { "male" } else { "female" };
            seed_client(&store, id, sex, birthday).await;
        }

        let svc = service(store).await;
        let loaded = svc.load_or_group(flight_date(), FLIGHT_TYPE).await.unwrap();
        assert!(loaded.id.is_none());
        let rooms = loaded.registry.rooms();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].member_ids(), ["m1", "m2"]);
        assert_eq!(rooms[1].member_ids(), ["f1"]);
    }

    #[tokio::test]
    async fn saving_twice_keeps_a_single_distribution() {
        let store = Arc::new(MemoryStore::new());
        seed_client(&store, "m1", "male", "1980-01-01").await;

        let svc = service(store.clone()).await;
        let loaded = svc.load_or_group(flight_date(), FLIGHT_TYPE).await.unwrap();

        // Neither call carries an id; the second must find the first's doc
        svc.save_registry(flight_date(), FLIGHT_TYPE, &loaded.registry, None)
            .await
            .unwrap();
        svc.save_registry(flight_date(), FLIGHT_TYPE, &loaded.registry, None)
            .await
            .unwrap();

        let stored = store
            .list(&CollectionPath::root(ROOM_DISTRIBUTION_COLLECTION))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn save_then_load_roundtrips_member_sets() {
        let store = Arc::new(MemoryStore::new());
        for id in ["m1", "m2", "m3"] {
            seed_client(&store, id, "male", "1980-01-01").await;
        }

        let svc = service(store).await;
        let grouped = svc.load_or_group(flight_date(), FLIGHT_TYPE).await.unwrap();
        let id = svc
            .save_registry(flight_date(), FLIGHT_TYPE, &grouped.registry, None)
            .await
            .unwrap();

        let reloaded = svc.load(flight_date(), FLIGHT_TYPE).await.unwrap().unwrap();
        assert_eq!(reloaded.id.as_deref(), Some(id.as_str()));
        let before: Vec<Vec<String>> = grouped.registry.rooms().iter().map(|r| r.member_ids()).collect();
        let after: Vec<Vec<String>> = reloaded.registry.rooms().iter().map(|r| r.member_ids()).collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn stale_member_ids_are_dropped_on_load() {
        let store = Arc::new(MemoryStore::new());
        seed_client(&store, "m1", "male", "1980-01-01").await;

        store
            .set(
                &CollectionPath::root(ROOM_DISTRIBUTION_COLLECTION),
                "d1",
                json!({
                    "flightDate": "2024-03-01",
                    "flightType": FLIGHT_TYPE,
                    "rooms": [{
                        "roomId": "Room-1",
                        "clients": ["m1", "ghost"],
                        "gender": "male",
                        "ageDetails": {"minAge": 0, "maxAge": 0, "averageAge": 0.0},
                    }],
                }),
            )
            .await
            .unwrap();

        let svc = service(store).await;
        let loaded = svc.load(flight_date(), FLIGHT_TYPE).await.unwrap().unwrap();
        assert_eq!(loaded.registry.rooms()[0].member_ids(), ["m1"]);
    }

    #[tokio::test]
    async fn load_of_unsaved_flight_is_none() {
        let store = Arc::new(MemoryStore::new());
        let svc = service(store).await;
        assert!(svc.load(flight_date(), FLIGHT_TYPE).await.unwrap().is_none());
    }
}
