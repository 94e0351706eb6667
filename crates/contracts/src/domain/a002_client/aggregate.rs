use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::shared::resource::Resource;
use crate::shared::{validation, wire};

/// Cliente: the sender or receiver a task is done for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "id_cliente")]
    pub id: i64,
    #[serde(rename = "nombre_cliente", alias = "nombre")]
    pub name: String,
    /// NIT / cédula.
    #[serde(rename = "documento", default, deserialize_with = "wire::opt_string")]
    pub document: Option<String>,
    #[serde(rename = "telefono", default, deserialize_with = "wire::opt_string")]
    pub phone: Option<String>,
    #[serde(rename = "correo", default, deserialize_with = "wire::opt_string")]
    pub email: Option<String>,
    #[serde(rename = "direccion", default, deserialize_with = "wire::opt_string")]
    pub address: Option<String>,
    #[serde(rename = "latitud", default, deserialize_with = "wire::opt_f64")]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud", default, deserialize_with = "wire::opt_f64")]
    pub longitude: Option<f64>,
    #[serde(rename = "id_sucursal", default, deserialize_with = "wire::opt_id")]
    pub branch_id: Option<i64>,
    #[serde(rename = "observaciones", default, deserialize_with = "wire::opt_string")]
    pub notes: Option<String>,
    #[serde(rename = "activo", default = "active_by_default", deserialize_with = "wire::flexible_bool")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientDraft {
    #[serde(rename = "nombre_cliente")]
    pub name: String,
    #[serde(rename = "documento", serialize_with = "wire::blank_as_null")]
    pub document: Option<String>,
    #[serde(rename = "telefono", serialize_with = "wire::blank_as_null")]
    pub phone: Option<String>,
    #[serde(rename = "correo", serialize_with = "wire::blank_as_null")]
    pub email: Option<String>,
    #[serde(rename = "direccion", serialize_with = "wire::blank_as_null")]
    pub address: Option<String>,
    #[serde(rename = "latitud")]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud")]
    pub longitude: Option<f64>,
    #[serde(rename = "id_sucursal")]
    pub branch_id: Option<i64>,
    #[serde(rename = "observaciones", serialize_with = "wire::blank_as_null")]
    pub notes: Option<String>,
    #[serde(rename = "activo")]
    pub active: bool,
}

impl Default for ClientDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            document: None,
            phone: None,
            email: None,
            address: None,
            latitude: None,
            longitude: None,
            branch_id: None,
            notes: None,
            active: true,
        }
    }
}

impl From<&Client> for ClientDraft {
    fn from(c: &Client) -> Self {
        Self {
            name: c.name.clone(),
            document: c.document.clone(),
            phone: c.phone.clone(),
            email: c.email.clone(),
            address: c.address.clone(),
            latitude: c.latitude,
            longitude: c.longitude,
            branch_id: c.branch_id,
            notes: c.notes.clone(),
            active: c.active,
        }
    }
}

impl ClientDraft {
    pub fn set_location(&mut self, point: Option<Coordinates>) {
        self.latitude = point.map(|p| p.lat);
        self.longitude = point.map(|p| p.lng);
    }

    pub fn location(&self) -> Option<Coordinates> {
        Coordinates::from_pair(self.latitude, self.longitude)
    }
}

impl Client {
    pub fn location(&self) -> Option<Coordinates> {
        Coordinates::from_pair(self.latitude, self.longitude)
    }

    /// Case-insensitive match on name, document, phone and address.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        [
            Some(self.name.as_str()),
            self.document.as_deref(),
            self.phone.as_deref(),
            self.address.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&q))
    }
}

impl Resource for Client {
    type Draft = ClientDraft;
    const ENDPOINT: &'static str = "/clientes";
    const LABEL: &'static str = "cliente";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: &ClientDraft) -> Self {
        Self {
            id,
            name: d.name.trim().to_string(),
            document: d.document.clone(),
            phone: d.phone.clone(),
            email: d.email.clone(),
            address: d.address.clone(),
            latitude: d.latitude,
            longitude: d.longitude,
            branch_id: d.branch_id,
            notes: d.notes.clone(),
            active: d.active,
        }
    }

    fn validate(d: &ClientDraft) -> Result<(), String> {
        validation::require_text(&d.name, "Nombre")?;
        validation::max_len(&d.name, "Nombre", 150)?;
        validation::optional_email(d.email.as_deref())?;
        validation::optional_phone(d.phone.as_deref())?;
        validation::coordinates(d.latitude, d.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> Client {
        serde_json::from_value(json!({
            "id_cliente": 11,
            "nombre_cliente": "Ferretería El Tornillo",
            "documento": "900123456-7",
            "telefono": "6011234567",
            "correo": null,
            "direccion": "Calle 80 # 20-10",
            "latitud": 4.667,
            "longitud": "-74.06",
            "id_sucursal": 2,
            "activo": true
        }))
        .unwrap()
    }

    #[test]
    fn test_mapping() {
        let c = client();
        assert_eq!(c.id, 11);
        assert_eq!(c.email, None);
        assert_eq!(c.branch_id, Some(2));
        assert_eq!(c.location(), Some(Coordinates { lat: 4.667, lng: -74.06 }));
    }

    #[test]
    fn test_matches() {
        let c = client();
        assert!(c.matches("tornillo"));
        assert!(c.matches("900123"));
        assert!(c.matches("calle 80"));
        assert!(c.matches(""));
        assert!(!c.matches("martillo"));
    }

    #[test]
    fn test_draft_from_client_and_location() {
        let mut d = ClientDraft::from(&client());
        assert_eq!(d.name, "Ferretería El Tornillo");
        d.set_location(None);
        assert_eq!((d.latitude, d.longitude), (None, None));
        d.set_location(Coordinates::new(4.0, -74.0));
        assert_eq!(d.latitude, Some(4.0));
        assert!(Client::validate(&d).is_ok());
    }

    #[test]
    fn test_validate_email() {
        let d = ClientDraft {
            name: "X".into(),
            email: Some("malo".into()),
            ..ClientDraft::default()
        };
        assert_eq!(
            Client::validate(&d),
            Err("El correo electrónico no es válido".to_string())
        );
    }
}
