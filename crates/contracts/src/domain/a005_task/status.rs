use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Row of `/estados-tarea`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    #[serde(rename = "id_estado")]
    pub id: i64,
    #[serde(rename = "nombre_estado", alias = "nombre")]
    pub name: String,
}

impl TaskStatus {
    pub fn state(&self) -> Option<TaskState> {
        self.name.parse().ok()
    }
}

/// Well-known status names. The catalog may hold others; those are shown
/// but have no special behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    Pendiente,
    Asignada,
    EnProgreso,
    Completada,
    Cancelada,
}

impl TaskState {
    pub fn label(&self) -> &'static str {
        match self {
            TaskState::Pendiente => "Pendiente",
            TaskState::Asignada => "Asignada",
            TaskState::EnProgreso => "En progreso",
            TaskState::Completada => "Completada",
            TaskState::Cancelada => "Cancelada",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Completada | TaskState::Cancelada)
    }

    /// CSS modifier for status badges.
    pub fn css_class(&self) -> &'static str {
        match self {
            TaskState::Pendiente => "badge--pending",
            TaskState::Asignada => "badge--assigned",
            TaskState::EnProgreso => "badge--progress",
            TaskState::Completada => "badge--done",
            TaskState::Cancelada => "badge--cancelled",
        }
    }

    /// States a courier may move their own task to.
    pub fn courier_next(&self) -> &'static [TaskState] {
        match self {
            TaskState::Pendiente | TaskState::Asignada => &[TaskState::EnProgreso],
            TaskState::EnProgreso => &[TaskState::Completada],
            TaskState::Completada | TaskState::Cancelada => &[],
        }
    }
}

impl FromStr for TaskState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "pendiente" => Ok(TaskState::Pendiente),
            "asignada" | "asignado" => Ok(TaskState::Asignada),
            "en progreso" | "en curso" | "en proceso" | "en ruta" => Ok(TaskState::EnProgreso),
            "completada" | "completado" | "finalizada" | "entregada" => Ok(TaskState::Completada),
            "cancelada" | "cancelado" => Ok(TaskState::Cancelada),
            _ => Err(format!("Estado desconocido: {s}")),
        }
    }
}

/// Catalog id for a well-known state.
pub fn status_id_for(catalog: &[TaskStatus], state: TaskState) -> Option<i64> {
    catalog.iter().find(|s| s.state() == Some(state)).map(|s| s.id)
}

pub fn status_by_id(catalog: &[TaskStatus], id: i64) -> Option<&TaskStatus> {
    catalog.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Vec<TaskStatus> {
        serde_json::from_value(json!([
            {"id_estado": 1, "nombre_estado": "Pendiente"},
            {"id_estado": 2, "nombre_estado": "Asignada"},
            {"id_estado": 3, "nombre_estado": "EN_PROGRESO"},
            {"id_estado": 4, "nombre_estado": "Completada"},
            {"id_estado": 5, "nombre": "Cancelada"},
            {"id_estado": 6, "nombre_estado": "Reprogramada"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_catalog_states() {
        let c = catalog();
        assert_eq!(c[2].state(), Some(TaskState::EnProgreso));
        assert_eq!(c[5].state(), None);
        assert_eq!(status_id_for(&c, TaskState::Completada), Some(4));
        assert_eq!(status_by_id(&c, 5).map(|s| s.name.as_str()), Some("Cancelada"));
    }

    #[test]
    fn test_courier_flow() {
        assert_eq!(TaskState::Asignada.courier_next(), &[TaskState::EnProgreso]);
        assert_eq!(TaskState::EnProgreso.courier_next(), &[TaskState::Completada]);
        assert!(TaskState::Completada.courier_next().is_empty());
        assert!(TaskState::Cancelada.is_terminal());
        assert!(!TaskState::Pendiente.is_terminal());
    }
}
