use reqwest::Method;

use super::{Api, ApiError};
use crate::models::{NewReservation, Reservation, ReservationStatus};

const RESOURCE: &str = "reservation";

/// Message the backend sends with a 500 when the reservation table is empty.
const EMPTY_LIST_MESSAGE: &str = "Aucune réservation trouvée";

impl Api {
    /// All reservations. The backend reports an empty table as a 500, which
    /// is read back as an empty list.
    pub async fn reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        match self.get_json(RESOURCE).await {
            Err(ApiError::Http { status: 500, message: Some(message) })
                if message.contains(EMPTY_LIST_MESSAGE) =>
            {
                Ok(Vec::new())
            }
            other => other,
        }
    }

    pub async fn reservation(&self, id: i64) -> Result<Reservation, ApiError> {
        self.get_json(&format!("{RESOURCE}/{id}")).await
    }

    pub async fn reservations_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>, ApiError> {
        self.get_json(&format!("{RESOURCE}/status/{}", status.code())).await
    }

    pub async fn create_reservation(&self, reservation: &NewReservation) -> Result<Reservation, ApiError> {
        self.send_json(Method::POST, RESOURCE, reservation).await
    }

    pub async fn cancel_reservation(&self, id: i64) -> Result<(), ApiError> {
        self.send_empty(Method::PUT, &format!("{RESOURCE}/{id}/cancel"), &[]).await
    }

    pub async fn delete_reservation(&self, id: i64) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("{RESOURCE}/{id}"), &[]).await
    }
}
