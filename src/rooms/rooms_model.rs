use crate::clients::Traveler;

/// A fixed-capacity bucket of travelers sharing lodging for one flight
#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub capacity: usize,
    pub members: Vec<Traveler>,
}

impl Room {
    pub fn new(id: impl Into<String>, capacity: usize) -> Self {
        Self {
            id: id.into(),
            capacity,
            members: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    pub fn contains(&self, traveler_id: &str) -> bool {
        self.members.iter().any(|m| m.id == traveler_id)
    }

    pub fn member_ids(&self) -> Vec<String> {
        self.members.iter().map(|m| m.id.clone()).collect()
    }
}

/// Sequential room label, 1-based to match what staff see on screen
pub(crate) fn room_label(index: usize) -> String {
    format!("Room-{}", index + 1)
}
