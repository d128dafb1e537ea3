use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stored shape of a flight document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    /// Session category shared by recurring flights (e.g. a travel package)
    #[serde(rename = "type")]
    pub flight_type: String,
    pub date: NaiveDate,
    pub return_date: NaiveDate,
    pub empty_seats: i32,
    pub flight_company: String,
    /// Running total of validated payments credited to this flight
    #[serde(default)]
    pub payment: Decimal,
    /// Declared price owed for this flight
    pub total_price: Decimal,
    /// Links the flights of one logical booking
    pub group_id: String,
}

/// Domain model of a flight, carrying its stable document id
#[derive(Debug, Clone)]
pub struct Flight {
    pub id: String,
    pub flight_type: String,
    pub date: NaiveDate,
    pub return_date: NaiveDate,
    pub empty_seats: i32,
    pub flight_company: String,
    pub payment: Decimal,
    pub total_price: Decimal,
    pub group_id: String,
}

impl Flight {
    pub fn from_record(id: impl Into<String>, record: FlightRecord) -> Self {
        Self {
            id: id.into(),
            flight_type: record.flight_type,
            date: record.date,
            return_date: record.return_date,
            empty_seats: record.empty_seats,
            flight_company: record.flight_company,
            payment: record.payment,
            total_price: record.total_price,
            group_id: record.group_id,
        }
    }
}
