use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::shared::resource::Resource;
use crate::shared::{validation, wire};

/// Sucursal: a physical office couriers and advisors belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(rename = "id_sucursal")]
    pub id: i64,
    #[serde(rename = "nombre_sucursal", alias = "nombre")]
    pub name: String,
    #[serde(rename = "direccion", default, deserialize_with = "wire::opt_string")]
    pub address: Option<String>,
    #[serde(rename = "telefono", default, deserialize_with = "wire::opt_string")]
    pub phone: Option<String>,
    #[serde(rename = "latitud", default, deserialize_with = "wire::opt_f64")]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud", default, deserialize_with = "wire::opt_f64")]
    pub longitude: Option<f64>,
    #[serde(rename = "activo", default = "active_by_default", deserialize_with = "wire::flexible_bool")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchDraft {
    #[serde(rename = "nombre_sucursal")]
    pub name: String,
    #[serde(rename = "direccion", serialize_with = "wire::blank_as_null")]
    pub address: Option<String>,
    #[serde(rename = "telefono", serialize_with = "wire::blank_as_null")]
    pub phone: Option<String>,
    #[serde(rename = "latitud")]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud")]
    pub longitude: Option<f64>,
    #[serde(rename = "activo")]
    pub active: bool,
}

impl Default for BranchDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: None,
            phone: None,
            latitude: None,
            longitude: None,
            active: true,
        }
    }
}

impl From<&Branch> for BranchDraft {
    fn from(b: &Branch) -> Self {
        Self {
            name: b.name.clone(),
            address: b.address.clone(),
            phone: b.phone.clone(),
            latitude: b.latitude,
            longitude: b.longitude,
            active: b.active,
        }
    }
}

impl BranchDraft {
    pub fn set_location(&mut self, point: Option<Coordinates>) {
        self.latitude = point.map(|p| p.lat);
        self.longitude = point.map(|p| p.lng);
    }

    pub fn location(&self) -> Option<Coordinates> {
        Coordinates::from_pair(self.latitude, self.longitude)
    }
}

impl Branch {
    pub fn location(&self) -> Option<Coordinates> {
        Coordinates::from_pair(self.latitude, self.longitude)
    }
}

impl Resource for Branch {
    type Draft = BranchDraft;
    const ENDPOINT: &'static str = "/sucursales";
    const LABEL: &'static str = "sucursal";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: &BranchDraft) -> Self {
        Self {
            id,
            name: d.name.trim().to_string(),
            address: d.address.clone(),
            phone: d.phone.clone(),
            latitude: d.latitude,
            longitude: d.longitude,
            active: d.active,
        }
    }

    fn validate(d: &BranchDraft) -> Result<(), String> {
        validation::require_text(&d.name, "Nombre")?;
        validation::max_len(&d.name, "Nombre", 100)?;
        validation::optional_phone(d.phone.as_deref())?;
        validation::coordinates(d.latitude, d.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_backend_row() {
        let b: Branch = serde_json::from_value(json!({
            "id_sucursal": 2,
            "nombre_sucursal": "Norte",
            "direccion": "Cra 15 # 93-40",
            "telefono": "",
            "latitud": "4.6768",
            "longitud": "-74.0485"
        }))
        .unwrap();
        assert_eq!(b.name, "Norte");
        assert_eq!(b.phone, None);
        assert!(b.active);
        assert_eq!(b.location(), Some(Coordinates { lat: 4.6768, lng: -74.0485 }));
    }

    #[test]
    fn test_name_alias() {
        let b: Branch =
            serde_json::from_value(json!({"id_sucursal": 1, "nombre": "Centro", "activo": 0}))
                .unwrap();
        assert_eq!(b.name, "Centro");
        assert!(!b.active);
        assert_eq!(b.location(), None);
    }

    #[test]
    fn test_draft_roundtrip_to_payload() {
        let draft = BranchDraft {
            name: "Sur".into(),
            latitude: Some(4.58),
            longitude: Some(-74.1),
            ..BranchDraft::default()
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "nombre_sucursal": "Sur",
                "direccion": null,
                "telefono": null,
                "latitud": 4.58,
                "longitud": -74.1,
                "activo": true
            })
        );
    }

    #[test]
    fn test_validate() {
        let mut d = BranchDraft { name: "Sur".into(), ..BranchDraft::default() };
        assert!(Branch::validate(&d).is_ok());
        d.latitude = Some(4.0);
        assert!(Branch::validate(&d).is_err());
        d.name = " ".into();
        assert!(Branch::validate(&d).is_err());
    }
}
