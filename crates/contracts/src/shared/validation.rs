//! Field checks shared by the draft validators. Messages are user-facing.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()-]{7,20}$").expect("valid phone regex"));

pub fn require_text(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("El campo «{field}» es obligatorio"));
    }
    Ok(())
}

pub fn max_len(value: &str, field: &str, max: usize) -> Result<(), String> {
    if value.trim().chars().count() > max {
        return Err(format!("El campo «{field}» admite como máximo {max} caracteres"));
    }
    Ok(())
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn email(value: &str) -> Result<(), String> {
    if !is_valid_email(value) {
        return Err("El correo electrónico no es válido".to_string());
    }
    Ok(())
}

pub fn optional_email(value: Option<&str>) -> Result<(), String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => email(v),
        _ => Ok(()),
    }
}

pub fn optional_phone(value: Option<&str>) -> Result<(), String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() && !PHONE_RE.is_match(v) => {
            Err("El teléfono no es válido".to_string())
        }
        _ => Ok(()),
    }
}

/// Latitude and longitude must be both set or both empty, and in range.
pub fn coordinates(lat: Option<f64>, lng: Option<f64>) -> Result<(), String> {
    match (lat, lng) {
        (None, None) => Ok(()),
        (Some(lat), Some(lng)) => {
            if !(-90.0..=90.0).contains(&lat) {
                return Err("La latitud debe estar entre -90 y 90".to_string());
            }
            if !(-180.0..=180.0).contains(&lng) {
                return Err("La longitud debe estar entre -180 y 180".to_string());
            }
            Ok(())
        }
        _ => Err("Indique latitud y longitud, o deje ambas vacías".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text("  ", "Nombre").is_err());
        assert!(require_text("Centro", "Nombre").is_ok());
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("ana@sgr.com"));
        assert!(!is_valid_email("ana@sgr"));
        assert!(!is_valid_email("ana sgr@x.com"));
        assert!(optional_email(None).is_ok());
        assert!(optional_email(Some("")).is_ok());
        assert!(optional_email(Some("x")).is_err());
    }

    #[test]
    fn test_phone() {
        assert!(optional_phone(Some("+57 300 123 4567")).is_ok());
        assert!(optional_phone(Some("abc")).is_err());
        assert!(optional_phone(None).is_ok());
    }

    #[test]
    fn test_coordinates() {
        assert!(coordinates(None, None).is_ok());
        assert!(coordinates(Some(4.7), Some(-74.0)).is_ok());
        assert!(coordinates(Some(4.7), None).is_err());
        assert!(coordinates(Some(91.0), Some(0.0)).is_err());
        assert!(coordinates(Some(0.0), Some(-181.0)).is_err());
    }

    #[test]
    fn test_max_len() {
        assert!(max_len("abc", "x", 3).is_ok());
        assert!(max_len("abcd", "x", 3).is_err());
    }
}
