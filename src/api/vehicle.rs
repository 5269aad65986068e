use reqwest::Method;

use super::{Api, ApiError};
use crate::models::{Vehicle, VehiclePayload};

const RESOURCE: &str = "vehicule";

impl Api {
    pub async fn vehicles(&self) -> Result<Vec<Vehicle>, ApiError> {
        self.get_json(RESOURCE).await
    }

    pub async fn vehicle(&self, id: i64) -> Result<Vehicle, ApiError> {
        self.get_json(&format!("{RESOURCE}/{id}")).await
    }

    pub async fn available_vehicles(&self) -> Result<Vec<Vehicle>, ApiError> {
        self.get_json(&format!("{RESOURCE}/disponibles")).await
    }

    pub async fn create_vehicle(&self, vehicle: &VehiclePayload) -> Result<Vehicle, ApiError> {
        self.send_json(Method::POST, RESOURCE, vehicle).await
    }

    pub async fn update_vehicle(&self, id: i64, vehicle: &VehiclePayload) -> Result<Vehicle, ApiError> {
        self.send_json(Method::PUT, &format!("{RESOURCE}/{id}"), vehicle).await
    }

    pub async fn delete_vehicle(&self, id: i64) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("{RESOURCE}/{id}"), &[]).await
    }

    pub async fn set_vehicle_availability(&self, id: i64, available: bool) -> Result<(), ApiError> {
        self.send_empty(
            Method::PUT,
            &format!("{RESOURCE}/{id}/disponibilite"),
            &[("disponible", available.to_string())],
        )
        .await
    }
}
