use serde_json::Value;
use thiserror::Error;

/// Errors returned by the REST service layer.
///
/// `Display` is what the UI shows, so messages are in Spanish.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("No hay una sesión activa")]
    NotAuthenticated,

    #[error("La sesión expiró, vuelva a iniciar sesión")]
    Unauthorized,

    #[error("Error de red: {0}")]
    Network(String),

    #[error("El servidor respondió {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Respuesta inválida del servidor: {0}")]
    Parse(String),

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Build a `Status` error from an HTTP status and the raw response body.
    ///
    /// The backend reports errors as `{"message": ..}`, `{"mensaje": ..}` or
    /// `{"error": ..}`; anything else falls back to the status reason.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let message = extract_error_message(body).unwrap_or_else(|| default_reason(status));
        ApiError::Status { status, message }
    }

    /// Like [`ApiError::from_status`] but for the login call, where a 401
    /// means bad credentials rather than an expired session.
    pub fn from_login_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => ApiError::Status {
                status,
                message: extract_error_message(body)
                    .unwrap_or_else(|| "correo o contraseña incorrectos".to_string()),
            },
            _ => Self::from_status(status, body),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Keys a backend error body may carry its message under, in priority order.
const MESSAGE_KEYS: [&str; 4] = ["message", "mensaje", "error", "detail"];

fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => MESSAGE_KEYS
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|m| !m.is_empty())
            .map(str::to_string),
        Ok(Value::String(text)) => Some(text).filter(|m| !m.trim().is_empty()),
        Ok(_) => None,
        // plain-text bodies are shown as-is when short enough
        Err(_) if trimmed.len() <= 200 && !trimmed.starts_with('<') => Some(trimmed.to_string()),
        Err(_) => None,
    }
}

fn default_reason(status: u16) -> String {
    match status {
        400 => "solicitud inválida",
        403 => "acceso denegado",
        404 => "recurso no encontrado",
        409 => "conflicto con datos existentes",
        422 => "datos no válidos",
        500..=599 => "error interno del servidor",
        _ => "error inesperado",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_uses_backend_message() {
        let err = ApiError::from_status(409, r#"{"mensaje":"El correo ya está registrado"}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 409,
                message: "El correo ya está registrado".to_string()
            }
        );
    }

    #[test]
    fn test_status_message_aliases() {
        let a = ApiError::from_status(400, r#"{"message":"bad"}"#);
        let b = ApiError::from_status(400, r#"{"error":"bad"}"#);
        assert_eq!(a, b);
    }

    #[test]
    fn test_status_message_with_several_keys() {
        let err = ApiError::from_status(400, r#"{"message":"Título requerido","error":"Bad Request"}"#);
        assert_eq!(err.to_string(), "El servidor respondió 400: Título requerido");

        let err = ApiError::from_status(422, r#"{"error":{"code":7},"mensaje":"Fecha inválida"}"#);
        assert_eq!(err.to_string(), "El servidor respondió 422: Fecha inválida");

        let err = ApiError::from_status(500, r#"{"error":true}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                message: "error interno del servidor".to_string()
            }
        );
    }

    #[test]
    fn test_status_falls_back_to_reason() {
        let err = ApiError::from_status(404, "");
        assert_eq!(err.to_string(), "El servidor respondió 404: recurso no encontrado");

        let html = ApiError::from_status(502, "<html>Bad gateway</html>");
        assert_eq!(
            html,
            ApiError::Status {
                status: 502,
                message: "error interno del servidor".to_string()
            }
        );
    }

    #[test]
    fn test_401_is_unauthorized() {
        assert!(ApiError::from_status(401, r#"{"message":"jwt expired"}"#).is_unauthorized());
    }

    #[test]
    fn test_login_401_is_not_session_expiry() {
        let err = ApiError::from_login_status(401, "");
        assert!(!err.is_unauthorized());
        assert_eq!(
            err,
            ApiError::Status {
                status: 401,
                message: "correo o contraseña incorrectos".into()
            }
        );
        let err = ApiError::from_login_status(401, r#"{"mensaje":"Usuario inactivo"}"#);
        assert_eq!(err.to_string(), "El servidor respondió 401: Usuario inactivo");
    }
}
