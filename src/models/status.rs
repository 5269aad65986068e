use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle of a reservation as the console understands it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    /// A code outside both vocabularies, kept verbatim and shown as-is.
    Other(String),
}

/// The one translation table between the backend vocabularies and the console.
///
/// Columns: status, backend code, legacy French code, display label.
static STATUS_TABLE: [(ReservationStatus, &str, &str, &str); 4] = [
    (ReservationStatus::Pending, "PENDING", "EN_ATTENTE", "En attente"),
    (ReservationStatus::Confirmed, "CONFIRMED", "CONFIRMEE", "Confirmée"),
    (ReservationStatus::Completed, "COMPLETED", "TERMINEE", "Terminée"),
    (ReservationStatus::Cancelled, "CANCELLED", "ANNULEE", "Annulée"),
];

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Completed,
        ReservationStatus::Cancelled,
    ];

    fn row(&self) -> Option<&'static (ReservationStatus, &'static str, &'static str, &'static str)> {
        STATUS_TABLE.iter().find(|row| row.0 == *self)
    }

    /// Code sent to the backend.
    pub fn code(&self) -> &str {
        match (self, self.row()) {
            (ReservationStatus::Other(raw), _) => raw.as_str(),
            (_, Some(row)) => row.1,
            (_, None) => "",
        }
    }

    /// Badge text shown in tables; unknown codes show up raw.
    pub fn label(&self) -> &str {
        match (self, self.row()) {
            (ReservationStatus::Other(raw), _) => raw.as_str(),
            (_, Some(row)) => row.3,
            (_, None) => "",
        }
    }

    /// Accepts either vocabulary, case-insensitively. Only the four known statuses come back.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        STATUS_TABLE
            .iter()
            .find(|(_, backend, legacy, _)| {
                backend.eq_ignore_ascii_case(code) || legacy.eq_ignore_ascii_case(code)
            })
            .map(|row| row.0.clone())
    }

    /// Reservations still occupying a vehicle.
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ReservationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// One row with an unexpected code must not fail the whole list.
impl<'de> Deserialize<'de> for ReservationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ReservationStatus::from_code(&raw).unwrap_or_else(|| {
            tracing::warn!(code = %raw, "unknown reservation status");
            ReservationStatus::Other(raw)
        }))
    }
}
