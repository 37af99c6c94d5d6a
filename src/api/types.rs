// API types module
// Wire-format request bodies for the booking endpoints

use serde::{Deserialize, Serialize};

/// Credential pair for signup and signin
///
/// Absent or non-string fields deserialize to empty strings; the handlers
/// treat empty as missing.
#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Restaurant table document
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: u32,
    /// Table number shown to clients; reservations reference it
    pub number: u32,
    pub places: u32,
    pub is_vip: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order: Option<f64>,
}

/// Reservation request body
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub table_number: u32,
    pub client_name: String,
    pub phone_number: String,
    /// Reservation date, `YYYY-MM-DD`
    pub date: String,
    /// Slot start, `HH:MM`
    pub slot_time_start: String,
    /// Slot end, `HH:MM`
    pub slot_time_end: String,
}
