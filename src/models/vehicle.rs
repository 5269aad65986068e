use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    #[serde(rename = "marque")]
    pub make: String,
    #[serde(rename = "modele")]
    pub model: String,
    #[serde(rename = "prixParJour", default)]
    pub price_per_day: f64,
    #[serde(rename = "disponible", default)]
    pub available: bool,
}

impl Vehicle {
    /// "Make Model", trimmed when either half is blank.
    pub fn label(&self) -> String {
        format!("{} {}", self.make, self.model).trim().to_string()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VehiclePayload {
    #[serde(rename = "marque")]
    pub make: String,
    #[serde(rename = "modele")]
    pub model: String,
    #[serde(rename = "prixParJour")]
    pub price_per_day: f64,
    #[serde(rename = "disponible")]
    pub available: bool,
}
