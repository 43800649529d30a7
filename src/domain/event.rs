use serde::{Deserialize, Serialize};

/// Organizer-controlled lifecycle of an event. Only `Ongoing` admits new
/// bookings; `Closed` additionally invalidates previously issued tickets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    #[serde(rename = "Booking Stopped")]
    BookingStopped,
    Closed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Ongoing => "Ongoing",
            EventStatus::BookingStopped => "Booking Stopped",
            EventStatus::Closed => "Closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Upcoming" => Some(EventStatus::Upcoming),
            "Ongoing" => Some(EventStatus::Ongoing),
            "Booking Stopped" => Some(EventStatus::BookingStopped),
            "Closed" => Some(EventStatus::Closed),
            _ => None,
        }
    }

    /// Single step forward along the organizer-facing cycle. The store does
    /// not enforce adjacency; this is the only transition the API offers.
    pub fn next(self) -> Self {
        match self {
            EventStatus::Upcoming => EventStatus::Ongoing,
            EventStatus::Ongoing => EventStatus::BookingStopped,
            EventStatus::BookingStopped => EventStatus::Closed,
            EventStatus::Closed => EventStatus::Upcoming,
        }
    }

    pub fn allows_booking(self) -> bool {
        matches!(self, EventStatus::Ongoing)
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub organizer_id: String,
    pub name: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub venue: String,
    pub venue_map_link: Option<String>,
    pub description: String,
    pub image: String,
    pub status: EventStatus,
    /// Ticket price in whole rupees, shown to attendees. Display only; the
    /// paid/free split hangs on `upi_id`.
    pub price: Option<i64>,
    #[serde(default)]
    pub requires_entry_number: bool,
    pub upi_id: Option<String>,
    pub upi_link: Option<String>,
    pub qr_code_image: Option<String>,
}

impl Event {
    /// An event with no UPI rail configured takes free bookings; one with a
    /// rail takes paid bookings with proof of payment.
    pub fn is_free(&self) -> bool {
        self.upi_id.is_none()
    }

    pub fn booking_category(&self) -> crate::domain::booking::BookingCategory {
        if self.is_free() {
            crate::domain::booking::BookingCategory::Free
        } else {
            crate::domain::booking::BookingCategory::Paid
        }
    }
}
