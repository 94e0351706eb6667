use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("Falta la clave de Google Maps (SGR_GOOGLE_MAPS_API_KEY)")]
    MissingApiKey,

    #[error("No se pudo cargar Google Maps: {0}")]
    ScriptFailed(String),

    #[error("No se encontró la dirección: {0}")]
    Geocode(String),
}
