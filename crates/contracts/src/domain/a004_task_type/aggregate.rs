use serde::{Deserialize, Serialize};

use crate::shared::resource::Resource;
use crate::shared::{validation, wire};

/// Tipo de tarea: entrega, recogida, consignación...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskType {
    #[serde(rename = "id_tipo_tarea")]
    pub id: i64,
    #[serde(rename = "nombre_tipo", alias = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, deserialize_with = "wire::opt_string")]
    pub description: Option<String>,
    #[serde(rename = "id_categoria", default, deserialize_with = "wire::opt_id")]
    pub category_id: Option<i64>,
    /// Expected duration, used as a hint when scheduling.
    #[serde(rename = "tiempo_estimado_min", default, deserialize_with = "wire::opt_f64")]
    pub estimated_minutes: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskTypeDraft {
    #[serde(rename = "nombre_tipo")]
    pub name: String,
    #[serde(rename = "descripcion", serialize_with = "wire::blank_as_null")]
    pub description: Option<String>,
    #[serde(rename = "id_categoria")]
    pub category_id: Option<i64>,
    #[serde(rename = "tiempo_estimado_min")]
    pub estimated_minutes: Option<f64>,
}

impl From<&TaskType> for TaskTypeDraft {
    fn from(t: &TaskType) -> Self {
        Self {
            name: t.name.clone(),
            description: t.description.clone(),
            category_id: t.category_id,
            estimated_minutes: t.estimated_minutes,
        }
    }
}

impl Resource for TaskType {
    type Draft = TaskTypeDraft;
    const ENDPOINT: &'static str = "/tipos-tarea";
    const LABEL: &'static str = "tipo de tarea";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: &TaskTypeDraft) -> Self {
        Self {
            id,
            name: d.name.trim().to_string(),
            description: d.description.clone(),
            category_id: d.category_id,
            estimated_minutes: d.estimated_minutes,
        }
    }

    fn validate(d: &TaskTypeDraft) -> Result<(), String> {
        validation::require_text(&d.name, "Nombre")?;
        if d.category_id.is_none() {
            return Err("Seleccione una categoría".to_string());
        }
        match d.estimated_minutes {
            Some(m) if !(m > 0.0) => Err("El tiempo estimado debe ser mayor que cero".to_string()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping() {
        let t: TaskType = serde_json::from_value(json!({
            "id_tipo_tarea": 4,
            "nombre_tipo": "Entrega",
            "id_categoria": "1",
            "tiempo_estimado_min": "45"
        }))
        .unwrap();
        assert_eq!(t.category_id, Some(1));
        assert_eq!(t.estimated_minutes, Some(45.0));
        assert_eq!(t.description, None);
    }

    #[test]
    fn test_validate() {
        let mut d = TaskTypeDraft {
            name: "Recogida".into(),
            category_id: Some(1),
            ..TaskTypeDraft::default()
        };
        assert!(TaskType::validate(&d).is_ok());
        d.estimated_minutes = Some(0.0);
        assert!(TaskType::validate(&d).is_err());
        d.estimated_minutes = None;
        d.category_id = None;
        assert_eq!(
            TaskType::validate(&d),
            Err("Seleccione una categoría".to_string())
        );
    }
}
