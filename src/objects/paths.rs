//! Deterministic object paths derived from domain keys

/// Path of a traveler's visa document
pub fn visa_path(passport_number: &str) -> String {
    format!("visas/{}.pdf", passport_number)
}

/// Path of an offer's cover image
pub fn offer_path(title: &str) -> String {
    format!("offers/{}.jpg", title)
}
