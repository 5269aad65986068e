use thiserror::Error;

/// Failure of a backend call, as seen by the console.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// The request never got a response.
    #[error("no response from {url}: {reason}")]
    Network { url: String, reason: String },

    /// The backend answered with a non-success status.
    #[error("HTTP {status}")]
    Http { status: u16, message: Option<String> },

    /// The request could not be built locally (bad base URL, bad client setup).
    #[error("configuration error: {0}")]
    Config(String),

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}

/// Turns a failed call into the sentence shown to the operator.
pub fn user_message(error: &ApiError) -> String {
    tracing::debug!(%error, "translating API error");

    match error {
        ApiError::Network { url, .. } => format!(
            "Impossible de se connecter au serveur. Vérifiez que le backend est démarré ({url})."
        ),
        ApiError::Http { status, message } => match status {
            400 => "Données invalides. Vérifiez votre saisie.".to_string(),
            401 => "Authentification requise. Vérifiez la configuration de sécurité du backend."
                .to_string(),
            403 => "Accès refusé. Permissions insuffisantes.".to_string(),
            404 => "Ressource non trouvée.".to_string(),
            500 => "Erreur serveur interne. Consultez les logs du backend.".to_string(),
            other => format!(
                "Erreur HTTP {}: {}",
                other,
                message.as_deref().unwrap_or("Erreur inconnue")
            ),
        },
        ApiError::Config(detail) => format!("Erreur de configuration: {detail}"),
        ApiError::Decode(detail) => format!("Réponse inattendue du serveur: {detail}"),
    }
}
