//! Placeholder hotel-booking functions.
//!
//! Nothing here looks anything up or stores anything: both functions echo the
//! request back with a fixed verdict.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const RESERVATION_STATUS: &str = "confirmed";
pub const RESERVATION_ID: &str = "123456";

/// Arguments shared by both booking tools. Every field is optional so that
/// whatever the model sends still produces an answer.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
}

impl ReservationRequest {
    /// Lenient extraction: non-string values and unknown keys are dropped.
    pub fn from_args(args: &Value) -> Self {
        let field = |key: &str| args.get(key).and_then(|v| v.as_str()).map(str::to_string);
        Self {
            hotel_name: field("hotelName"),
            check_in_date: field("checkInDate"),
            check_out_date: field("checkOutDate"),
            room_type: field("roomType"),
            guest_name: field("guestName"),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Availability<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    hotel_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    check_in_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    check_out_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    room_type: Option<&'a str>,
    available: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Reservation<'a> {
    #[serde(flatten)]
    request: &'a ReservationRequest,
    reservation_status: &'static str,
    reservation_id: &'static str,
}

pub fn check_room_availability(request: &ReservationRequest) -> Result<String, String> {
    let availability = Availability {
        hotel_name: request.hotel_name.as_deref(),
        check_in_date: request.check_in_date.as_deref(),
        check_out_date: request.check_out_date.as_deref(),
        room_type: request.room_type.as_deref(),
        available: true,
    };
    serde_json::to_string(&availability).map_err(|e| format!("Failed to encode availability: {}", e))
}

pub fn make_reservation(request: &ReservationRequest) -> Result<String, String> {
    let reservation = Reservation {
        request,
        reservation_status: RESERVATION_STATUS,
        reservation_id: RESERVATION_ID,
    };
    serde_json::to_string(&reservation).map_err(|e| format!("Failed to encode reservation: {}", e))
}

// Tool handlers

pub fn handle_check_room_availability(args: &Value) -> Result<String, String> {
    check_room_availability(&ReservationRequest::from_args(args))
}

pub fn handle_make_reservation(args: &Value) -> Result<String, String> {
    make_reservation(&ReservationRequest::from_args(args))
}
