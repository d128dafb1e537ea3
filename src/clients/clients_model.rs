use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Traveler gender, open to extension beyond the two values the
/// legacy data carries
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[serde(untagged)]
    Other(String),
}

impl Gender {
    pub fn label(&self) -> &str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other(label) => label,
        }
    }
}

/// Explicit payment status, replacing the legacy free-text
/// "paye"/"non paye" tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
}

/// Explicit visa status, replacing the legacy "visa dispo" tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisaStatus {
    Available,
    Pending,
    #[default]
    Missing,
}

/// One flight membership in a client's `flights` subcollection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerFlight {
    pub flight_date: NaiveDate,
    /// Links the flights of one logical booking across travelers
    pub group_id: String,
    /// Running total of validated payments credited to this flight
    #[serde(default)]
    pub payment: Decimal,
    /// Declared price owed for this flight
    pub total_price: Decimal,
}

/// Stored shape of a client document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerRecord {
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub sex: Gender,
    pub passport_number: String,
    /// Referrer email, resolved to a display name when listing payments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub visa_status: VisaStatus,
}

/// Domain model of a traveler, with flight memberships resolved
#[derive(Debug, Clone)]
pub struct Traveler {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub sex: Gender,
    pub passport_number: String,
    pub from: Option<String>,
    pub payment_status: PaymentStatus,
    pub visa_status: VisaStatus,
    pub flights: Vec<TravelerFlight>,
}

impl Traveler {
    pub fn from_record(id: impl Into<String>, record: TravelerRecord, flights: Vec<TravelerFlight>) -> Self {
        Self {
            id: id.into(),
            first_name: record.first_name,
            last_name: record.last_name,
            birthday: record.birthday,
            sex: record.sex,
            passport_number: record.passport_number,
            from: record.from,
            payment_status: record.payment_status,
            visa_status: record.visa_status,
            flights,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on the given date
    pub fn age_on(&self, on: NaiveDate) -> i32 {
        let mut age = on.year() - self.birthday.year();
        if (on.month(), on.day()) < (self.birthday.month(), self.birthday.day()) {
            age -= 1;
        }
        age
    }

    /// Whether the traveler is booked on the flight departing that day
    pub fn is_on_flight(&self, flight_date: NaiveDate) -> bool {
        self.flights.iter().any(|f| f.flight_date == flight_date)
    }
}
