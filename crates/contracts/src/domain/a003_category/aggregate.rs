use serde::{Deserialize, Serialize};

use crate::shared::resource::Resource;
use crate::shared::{validation, wire};

/// Categoría: groups task types (mensajería, trámites, cobros...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "id_categoria")]
    pub id: i64,
    #[serde(rename = "nombre_categoria", alias = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, deserialize_with = "wire::opt_string")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryDraft {
    #[serde(rename = "nombre_categoria")]
    pub name: String,
    #[serde(rename = "descripcion", serialize_with = "wire::blank_as_null")]
    pub description: Option<String>,
}

impl From<&Category> for CategoryDraft {
    fn from(c: &Category) -> Self {
        Self {
            name: c.name.clone(),
            description: c.description.clone(),
        }
    }
}

impl Resource for Category {
    type Draft = CategoryDraft;
    const ENDPOINT: &'static str = "/categorias";
    const LABEL: &'static str = "categoría";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: &CategoryDraft) -> Self {
        Self {
            id,
            name: d.name.trim().to_string(),
            description: d.description.clone(),
        }
    }

    fn validate(d: &CategoryDraft) -> Result<(), String> {
        validation::require_text(&d.name, "Nombre")?;
        validation::max_len(&d.name, "Nombre", 80)?;
        if let Some(desc) = d.description.as_deref() {
            validation::max_len(desc, "Descripción", 255)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping() {
        let c: Category = serde_json::from_value(json!({
            "id_categoria": 3, "nombre_categoria": "Trámites", "descripcion": ""
        }))
        .unwrap();
        assert_eq!(c.name, "Trámites");
        assert_eq!(c.description, None);

        let payload = serde_json::to_value(CategoryDraft::from(&c)).unwrap();
        assert_eq!(payload, json!({"nombre_categoria": "Trámites", "descripcion": null}));
    }

    #[test]
    fn test_validate() {
        assert!(Category::validate(&CategoryDraft::default()).is_err());
        let long = CategoryDraft {
            name: "x".repeat(81),
            description: None,
        };
        assert!(Category::validate(&long).is_err());
    }
}
