use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Client, ReservationStatus, Vehicle};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i64,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(rename = "vehicule", default)]
    pub vehicle: Option<Vehicle>,
    #[serde(rename = "dateDebut")]
    pub start_date: NaiveDate,
    #[serde(rename = "dateFin")]
    pub end_date: NaiveDate,
    #[serde(rename = "statusReservation")]
    pub status: ReservationStatus,
    #[serde(rename = "montantTotal", default)]
    pub total_amount: Option<f64>,
}

impl Reservation {
    pub fn client_name(&self) -> Option<&str> {
        self.client.as_ref().map(|c| c.name.as_str())
    }

    pub fn vehicle_label(&self) -> Option<String> {
        self.vehicle
            .as_ref()
            .map(Vehicle::label)
            .filter(|label| !label.is_empty())
    }
}

/// Creation body. Client, vehicle and dates are fixed once the backend accepts it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewReservation {
    #[serde(rename = "clientId")]
    pub client_id: i64,
    #[serde(rename = "vehiculeId")]
    pub vehicle_id: i64,
    #[serde(rename = "dateDebut")]
    pub start_date: NaiveDate,
    #[serde(rename = "dateFin")]
    pub end_date: NaiveDate,
    #[serde(rename = "statusReservation")]
    pub status: ReservationStatus,
}
