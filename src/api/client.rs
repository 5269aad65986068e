use reqwest::Method;

use super::{Api, ApiError};
use crate::models::{Client, ClientPayload};

const RESOURCE: &str = "client";

impl Api {
    pub async fn clients(&self) -> Result<Vec<Client>, ApiError> {
        self.get_json(RESOURCE).await
    }

    pub async fn create_client(&self, client: &ClientPayload) -> Result<Client, ApiError> {
        self.send_json(Method::POST, RESOURCE, client).await
    }

    pub async fn update_client(&self, id: i64, client: &ClientPayload) -> Result<Client, ApiError> {
        self.send_json(Method::PUT, &format!("{RESOURCE}/{id}"), client).await
    }

    pub async fn delete_client(&self, id: i64) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("{RESOURCE}/{id}"), &[]).await
    }
}
