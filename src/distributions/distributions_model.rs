use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rooms::{Room, RoomRegistry};

/// Aggregate age statistics persisted per room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeDetails {
    pub min_age: i32,
    pub max_age: i32,
    pub average_age: f64,
}

/// Flattened room shape inside a stored distribution document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRoom {
    pub room_id: String,
    /// Member ids, resolved against the client directory on load
    pub clients: Vec<String>,
    /// Label of the first member's gender; "Unknown" for an empty room.
    /// Lossy by design, kept for continuity with existing documents.
    pub gender: String,
    pub age_details: AgeDetails,
}

impl StoredRoom {
    /// Flattens a room, computing ages as of the given date
    pub fn from_room(room: &Room, on: NaiveDate) -> Self {
        let ages: Vec<i32> = room.members.iter().map(|m| m.age_on(on)).collect();
        let age_details = if ages.is_empty() {
            AgeDetails {
                min_age: 0,
                max_age: 0,
                average_age: 0.0,
            }
        } else {
            AgeDetails {
                min_age: *ages.iter().min().unwrap_or(&0),
                max_age: *ages.iter().max().unwrap_or(&0),
                average_age: ages.iter().sum::<i32>() as f64 / ages.len() as f64,
            }
        };
        Self {
            room_id: room.id.clone(),
            clients: room.member_ids(),
            gender: room
                .members
                .first()
                .map(|m| m.sex.label().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            age_details,
        }
    }
}

/// Persisted snapshot of all rooms for one flight, keyed by
/// (flight date, flight type)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDistribution {
    pub flight_date: NaiveDate,
    pub flight_type: String,
    pub rooms: Vec<StoredRoom>,
}

/// A distribution materialized into an editable registry. `id` is `None`
/// when the rooms came from the partitioner and were never saved.
#[derive(Debug, Clone)]
pub struct LoadedDistribution {
    pub id: Option<String>,
    pub registry: RoomRegistry,
}
