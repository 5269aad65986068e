use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Client {
    pub id: i64,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telephone", default)]
    pub phone: String,
}

/// Body sent on create and update; the backend assigns the id.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClientPayload {
    #[serde(rename = "nom")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telephone")]
    pub phone: String,
}
