//! Lenient decoding helpers for the backend's JSON.
//!
//! The backend is not strict about scalar types: coordinates come back as
//! numeric strings (`"4.7110"`) when they are stored as DECIMAL, booleans as
//! `0/1`, and optional text as `""`. These helpers normalise that at the
//! serde boundary so the rest of the app sees clean types.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Float(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// `null`, `""`, a number or a numeric string into `Option<f64>`.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(NumberOrString::Float(v)) => Ok(Some(v)),
        Some(NumberOrString::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.replace(',', ".")
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid number: {s}")))
        }
    }
}

/// Like [`opt_f64`] but missing values become `0.0`.
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    opt_f64(deserializer).map(|v| v.unwrap_or(0.0))
}

/// Counts that may arrive as numbers, numeric strings or `null`.
pub fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = opt_f64(deserializer)?.unwrap_or(0.0);
    if v < 0.0 {
        return Err(serde::de::Error::custom(format!("negative count: {v}")));
    }
    Ok(v.round() as u32)
}

/// `true/false`, `0/1`, `"0"/"1"`, `"true"/"false"`, `"si"/"no"`; `null` is `false`.
pub fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BoolLike>::deserialize(deserializer)?;
    match raw {
        None => Ok(false),
        Some(BoolLike::Bool(b)) => Ok(b),
        Some(BoolLike::Int(i)) => Ok(i != 0),
        Some(BoolLike::Text(s)) => match s.trim().to_lowercase().as_str() {
            "1" | "true" | "si" | "sí" | "activo" => Ok(true),
            "0" | "false" | "no" | "inactivo" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid boolean: {other}"))),
        },
    }
}

/// Optional text where `""` means "not set".
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let t = s.trim();
        if t.is_empty() {
            None
        } else {
            Some(t.to_string())
        }
    }))
}

/// Id references that may come back as numbers, numeric strings or `null`.
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdLike {
        Int(i64),
        Text(String),
    }

    match Option::<IdLike>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdLike::Int(v)) => Ok(Some(v)),
        Some(IdLike::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(IdLike::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid id: {s}"))),
    }
}

/// Serialise `Option<String>` sending blank text as `null`.
pub fn blank_as_null<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => serializer.serialize_some(s),
        _ => serializer.serialize_none(),
    }
}

/// Response body that is either the payload itself or `{ "data": payload }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// Decode a response body accepting both envelope shapes.
pub fn decode_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str::<Envelope<T>>(body).map(Envelope::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_f64")]
        lat: Option<f64>,
        #[serde(default, deserialize_with = "flexible_bool")]
        activo: bool,
        #[serde(default, deserialize_with = "opt_string")]
        telefono: Option<String>,
        #[serde(default, deserialize_with = "opt_id")]
        id_sucursal: Option<i64>,
        #[serde(default, deserialize_with = "u32_or_zero")]
        total: u32,
    }

    #[test]
    fn test_numeric_strings_and_numbers() {
        let p: Probe = serde_json::from_value(json!({"lat": "4.7110"})).unwrap();
        assert_eq!(p.lat, Some(4.711));
        let p: Probe = serde_json::from_value(json!({"lat": -74.07})).unwrap();
        assert_eq!(p.lat, Some(-74.07));
        let p: Probe = serde_json::from_value(json!({"lat": "4,5"})).unwrap();
        assert_eq!(p.lat, Some(4.5));
    }

    #[test]
    fn test_empty_and_missing_are_none() {
        let p: Probe = serde_json::from_value(json!({"lat": "", "telefono": "  "})).unwrap();
        assert_eq!(p.lat, None);
        assert_eq!(p.telefono, None);
        let p: Probe = serde_json::from_value(json!({"lat": null})).unwrap();
        assert_eq!(p.lat, None);
        assert!(!p.activo);
        assert_eq!(p.total, 0);
    }

    #[test]
    fn test_invalid_number_is_error() {
        let res: Result<Probe, _> = serde_json::from_value(json!({"lat": "abc"}));
        assert!(res.is_err());
    }

    #[test]
    fn test_bool_variants() {
        for (raw, expected) in [
            (json!(true), true),
            (json!(0), false),
            (json!(1), true),
            (json!("1"), true),
            (json!("false"), false),
            (json!("Sí"), true),
        ] {
            let p: Probe = serde_json::from_value(json!({ "activo": raw })).unwrap();
            assert_eq!(p.activo, expected);
        }
    }

    #[test]
    fn test_id_and_count_strings() {
        let p: Probe =
            serde_json::from_value(json!({"id_sucursal": "7", "total": "12"})).unwrap();
        assert_eq!(p.id_sucursal, Some(7));
        assert_eq!(p.total, 12);
        let p: Probe = serde_json::from_value(json!({"id_sucursal": ""})).unwrap();
        assert_eq!(p.id_sucursal, None);
    }

    #[test]
    fn test_blank_as_null() {
        #[derive(Serialize)]
        struct Out {
            #[serde(serialize_with = "blank_as_null")]
            v: Option<String>,
        }
        assert_eq!(
            serde_json::to_value(Out { v: Some("  ".into()) }).unwrap(),
            json!({"v": null})
        );
        assert_eq!(
            serde_json::to_value(Out { v: Some(" x ".into()) }).unwrap(),
            json!({"v": "x"})
        );
    }

    #[test]
    fn test_decode_body_envelopes() {
        let bare: Vec<i64> = decode_body("[1,2]").unwrap();
        assert_eq!(bare, vec![1, 2]);
        let wrapped: Vec<i64> = decode_body(r#"{"data":[3],"total":1}"#).unwrap();
        assert_eq!(wrapped, vec![3]);
        assert!(decode_body::<Vec<i64>>(r#"{"ok":true}"#).is_err());
    }
}
