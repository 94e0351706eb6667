use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::status::{self, TaskState, TaskStatus};
use crate::geo::Coordinates;
use crate::shared::resource::Resource;
use crate::shared::{dates, validation, wire};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Baja,
    #[default]
    Media,
    Alta,
    Urgente,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Baja, Priority::Media, Priority::Alta, Priority::Urgente];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Baja => "baja",
            Priority::Media => "media",
            Priority::Alta => "alta",
            Priority::Urgente => "urgente",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Baja => "Baja",
            Priority::Media => "Media",
            Priority::Alta => "Alta",
            Priority::Urgente => "Urgente",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baja" | "1" => Ok(Priority::Baja),
            "media" | "normal" | "2" => Ok(Priority::Media),
            "alta" | "3" => Ok(Priority::Alta),
            "urgente" | "4" => Ok(Priority::Urgente),
            other => Err(format!("Prioridad desconocida: {other}")),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Unknown or missing priorities degrade to the default instead of
        // rejecting the whole task row.
        let parsed = match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => s.parse().ok(),
            serde_json::Value::Number(n) => n.to_string().parse().ok(),
            _ => None,
        };
        Ok(parsed.unwrap_or_default())
    }
}

/// Tarea: one pickup/delivery job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "id_tarea")]
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default, deserialize_with = "wire::opt_string")]
    pub description: Option<String>,
    #[serde(rename = "id_cliente", default, deserialize_with = "wire::opt_id")]
    pub client_id: Option<i64>,
    #[serde(rename = "id_tipo_tarea", default, deserialize_with = "wire::opt_id")]
    pub task_type_id: Option<i64>,
    #[serde(rename = "id_mensajero", default, deserialize_with = "wire::opt_id")]
    pub courier_id: Option<i64>,
    #[serde(rename = "id_asesor", default, deserialize_with = "wire::opt_id")]
    pub advisor_id: Option<i64>,
    #[serde(rename = "id_sucursal", default, deserialize_with = "wire::opt_id")]
    pub branch_id: Option<i64>,
    #[serde(rename = "id_estado", default, deserialize_with = "wire::opt_id")]
    pub status_id: Option<i64>,
    /// Joined status name, when the backend includes it.
    #[serde(rename = "estado", alias = "nombre_estado", default, deserialize_with = "wire::opt_string", skip_serializing)]
    pub status_name: Option<String>,
    #[serde(rename = "prioridad", default)]
    pub priority: Priority,
    #[serde(rename = "fecha_programada", default, deserialize_with = "wire::opt_string")]
    pub scheduled_date: Option<String>,
    #[serde(rename = "fecha_limite", default, deserialize_with = "wire::opt_string")]
    pub due_date: Option<String>,
    #[serde(rename = "direccion_destino", default, deserialize_with = "wire::opt_string")]
    pub destination_address: Option<String>,
    #[serde(rename = "latitud_destino", default, deserialize_with = "wire::opt_f64")]
    pub destination_lat: Option<f64>,
    #[serde(rename = "longitud_destino", default, deserialize_with = "wire::opt_f64")]
    pub destination_lng: Option<f64>,
    #[serde(rename = "observaciones", default, deserialize_with = "wire::opt_string")]
    pub notes: Option<String>,
    #[serde(rename = "fecha_creacion", default, deserialize_with = "wire::opt_string")]
    pub created_at: Option<String>,
    #[serde(rename = "fecha_completada", default, deserialize_with = "wire::opt_string")]
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskDraft {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", serialize_with = "wire::blank_as_null")]
    pub description: Option<String>,
    #[serde(rename = "id_cliente")]
    pub client_id: Option<i64>,
    #[serde(rename = "id_tipo_tarea")]
    pub task_type_id: Option<i64>,
    #[serde(rename = "id_mensajero")]
    pub courier_id: Option<i64>,
    #[serde(rename = "id_asesor")]
    pub advisor_id: Option<i64>,
    #[serde(rename = "id_sucursal")]
    pub branch_id: Option<i64>,
    #[serde(rename = "id_estado")]
    pub status_id: Option<i64>,
    #[serde(rename = "prioridad")]
    pub priority: Priority,
    #[serde(rename = "fecha_programada", serialize_with = "wire::blank_as_null")]
    pub scheduled_date: Option<String>,
    #[serde(rename = "fecha_limite", serialize_with = "wire::blank_as_null")]
    pub due_date: Option<String>,
    #[serde(rename = "direccion_destino", serialize_with = "wire::blank_as_null")]
    pub destination_address: Option<String>,
    #[serde(rename = "latitud_destino")]
    pub destination_lat: Option<f64>,
    #[serde(rename = "longitud_destino")]
    pub destination_lng: Option<f64>,
    #[serde(rename = "observaciones", serialize_with = "wire::blank_as_null")]
    pub notes: Option<String>,
}

/// Body of `PATCH /tareas/{id}/estado`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusChange {
    #[serde(rename = "id_estado")]
    pub status_id: i64,
}

impl From<&Task> for TaskDraft {
    fn from(t: &Task) -> Self {
        Self {
            title: t.title.clone(),
            description: t.description.clone(),
            client_id: t.client_id,
            task_type_id: t.task_type_id,
            courier_id: t.courier_id,
            advisor_id: t.advisor_id,
            branch_id: t.branch_id,
            status_id: t.status_id,
            priority: t.priority,
            scheduled_date: t.scheduled_date.clone(),
            due_date: t.due_date.clone(),
            destination_address: t.destination_address.clone(),
            destination_lat: t.destination_lat,
            destination_lng: t.destination_lng,
            notes: t.notes.clone(),
        }
    }
}

impl TaskDraft {
    pub fn set_destination(&mut self, point: Option<Coordinates>) {
        self.destination_lat = point.map(|p| p.lat);
        self.destination_lng = point.map(|p| p.lng);
    }

    pub fn destination(&self) -> Option<Coordinates> {
        Coordinates::from_pair(self.destination_lat, self.destination_lng)
    }
}

impl Task {
    pub fn destination(&self) -> Option<Coordinates> {
        Coordinates::from_pair(self.destination_lat, self.destination_lng)
    }

    /// Well-known state, from the joined name or the status catalog.
    pub fn state(&self, catalog: &[TaskStatus]) -> Option<TaskState> {
        if let Some(state) = self.status_name.as_deref().and_then(|n| n.parse().ok()) {
            return Some(state);
        }
        self.status_id
            .and_then(|id| status::status_by_id(catalog, id))
            .and_then(TaskStatus::state)
    }

    pub fn status_label(&self, catalog: &[TaskStatus]) -> String {
        if let Some(name) = &self.status_name {
            return name.clone();
        }
        self.status_id
            .and_then(|id| status::status_by_id(catalog, id))
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "Sin estado".to_string())
    }

    /// Past its due date and still open.
    pub fn is_overdue(&self, catalog: &[TaskStatus], today: NaiveDate) -> bool {
        let due = match self.due_date.as_deref().and_then(dates::parse_date) {
            Some(d) => d,
            None => return false,
        };
        let open = self.state(catalog).map(|s| !s.is_terminal()).unwrap_or(true);
        open && due < today
    }
}

impl Resource for Task {
    type Draft = TaskDraft;
    const ENDPOINT: &'static str = "/tareas";
    const LABEL: &'static str = "tarea";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: &TaskDraft) -> Self {
        Self {
            id,
            title: d.title.trim().to_string(),
            description: d.description.clone(),
            client_id: d.client_id,
            task_type_id: d.task_type_id,
            courier_id: d.courier_id,
            advisor_id: d.advisor_id,
            branch_id: d.branch_id,
            status_id: d.status_id,
            status_name: None,
            priority: d.priority,
            scheduled_date: d.scheduled_date.clone(),
            due_date: d.due_date.clone(),
            destination_address: d.destination_address.clone(),
            destination_lat: d.destination_lat,
            destination_lng: d.destination_lng,
            notes: d.notes.clone(),
            created_at: None,
            completed_at: None,
        }
    }

    fn validate(d: &TaskDraft) -> Result<(), String> {
        validation::require_text(&d.title, "Título")?;
        validation::max_len(&d.title, "Título", 150)?;
        if d.client_id.is_none() {
            return Err("Seleccione un cliente".to_string());
        }
        if d.task_type_id.is_none() {
            return Err("Seleccione un tipo de tarea".to_string());
        }
        validation::coordinates(d.destination_lat, d.destination_lng)?;

        let parse = |value: &Option<String>, field: &str| -> Result<Option<NaiveDate>, String> {
            match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                None => Ok(None),
                Some(v) => dates::parse_date(v)
                    .map(Some)
                    .ok_or_else(|| format!("La fecha «{field}» no es válida")),
            }
        };
        let scheduled = parse(&d.scheduled_date, "Fecha programada")?;
        let due = parse(&d.due_date, "Fecha límite")?;
        if let (Some(s), Some(l)) = (scheduled, due) {
            if l < s {
                return Err("La fecha límite no puede ser anterior a la fecha programada".to_string());
            }
        }
        Ok(())
    }
}

/// Task list filters. Empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub query: String,
    pub status_id: Option<i64>,
    pub courier_id: Option<i64>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.status_id.is_none()
            && self.courier_id.is_none()
            && self.priority.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if self.status_id.is_some() && task.status_id != self.status_id {
            return false;
        }
        if self.courier_id.is_some() && task.courier_id != self.courier_id {
            return false;
        }
        if let Some(p) = self.priority {
            if task.priority != p {
                return false;
            }
        }
        let q = self.query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        [
            Some(task.title.as_str()),
            task.description.as_deref(),
            task.destination_address.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|f| f.to_lowercase().contains(&q))
            || task.id.to_string() == q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Vec<TaskStatus> {
        vec![
            TaskStatus { id: 1, name: "Pendiente".into() },
            TaskStatus { id: 4, name: "Completada".into() },
        ]
    }

    fn task() -> Task {
        serde_json::from_value(json!({
            "id_tarea": 100,
            "titulo": "Entregar sobre",
            "descripcion": "Documentos firmados",
            "id_cliente": 11,
            "id_tipo_tarea": "2",
            "id_mensajero": 5,
            "id_estado": 1,
            "prioridad": "ALTA",
            "fecha_programada": "2024-05-01",
            "fecha_limite": "2024-05-02T18:00:00Z",
            "direccion_destino": "Calle 26 # 59-51",
            "latitud_destino": "4.6473",
            "longitud_destino": "-74.1006"
        }))
        .unwrap()
    }

    #[test]
    fn test_mapping() {
        let t = task();
        assert_eq!(t.task_type_id, Some(2));
        assert_eq!(t.priority, Priority::Alta);
        assert_eq!(t.destination(), Some(Coordinates { lat: 4.6473, lng: -74.1006 }));
        assert_eq!(t.status_label(&catalog()), "Pendiente");
    }

    #[test]
    fn test_unknown_priority_defaults() {
        let t: Task = serde_json::from_value(json!({
            "id_tarea": 1, "titulo": "x", "prioridad": "altísima"
        }))
        .unwrap();
        assert_eq!(t.priority, Priority::Media);
        let t: Task = serde_json::from_value(json!({"id_tarea": 1, "titulo": "x", "prioridad": null})).unwrap();
        assert_eq!(t.priority, Priority::Media);
        let t: Task = serde_json::from_value(json!({"id_tarea": 1, "titulo": "x", "prioridad": {}})).unwrap();
        assert_eq!(t.priority, Priority::Media);
    }

    #[test]
    fn test_numeric_priority() {
        let t: Task = serde_json::from_value(json!({"id_tarea": 1, "titulo": "x", "prioridad": 3})).unwrap();
        assert_eq!(t.priority, Priority::Alta);
        let rows: Vec<Task> = serde_json::from_value(json!([
            {"id_tarea": 1, "titulo": "a", "prioridad": 4},
            {"id_tarea": 2, "titulo": "b", "prioridad": 9}
        ]))
        .unwrap();
        assert_eq!(rows[0].priority, Priority::Urgente);
        assert_eq!(rows[1].priority, Priority::Media);
    }

    #[test]
    fn test_state_prefers_joined_name() {
        let mut t = task();
        assert_eq!(t.state(&catalog()), Some(TaskState::Pendiente));
        t.status_name = Some("Completada".into());
        assert_eq!(t.state(&catalog()), Some(TaskState::Completada));
    }

    #[test]
    fn test_overdue() {
        let t = task();
        let c = catalog();
        let before = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        assert!(!t.is_overdue(&c, before));
        assert!(t.is_overdue(&c, after));

        let mut done = t.clone();
        done.status_id = Some(4);
        assert!(!done.is_overdue(&c, after));
    }

    #[test]
    fn test_draft_payload() {
        let draft = TaskDraft::from(&task());
        let v = serde_json::to_value(&draft).unwrap();
        assert_eq!(v["titulo"], json!("Entregar sobre"));
        assert_eq!(v["prioridad"], json!("alta"));
        assert_eq!(v["id_tipo_tarea"], json!(2));
        assert_eq!(v["observaciones"], json!(null));
        assert!(v.get("estado").is_none());
    }

    #[test]
    fn test_validate() {
        let mut d = TaskDraft::from(&task());
        assert!(Task::validate(&d).is_ok());

        d.due_date = Some("2024-04-30".into());
        assert!(Task::validate(&d).is_err());

        d.due_date = Some("mañana".into());
        assert_eq!(
            Task::validate(&d),
            Err("La fecha «Fecha límite» no es válida".to_string())
        );

        let mut d = TaskDraft::from(&task());
        d.client_id = None;
        assert_eq!(Task::validate(&d), Err("Seleccione un cliente".to_string()));
    }

    #[test]
    fn test_filter() {
        let t = task();
        assert!(TaskFilter::default().matches(&t));
        assert!(TaskFilter { query: "sobre".into(), ..Default::default() }.matches(&t));
        assert!(TaskFilter { query: "100".into(), ..Default::default() }.matches(&t));
        assert!(!TaskFilter { courier_id: Some(9), ..Default::default() }.matches(&t));
        assert!(TaskFilter { priority: Some(Priority::Alta), status_id: Some(1), ..Default::default() }
            .matches(&t));
        assert!(!TaskFilter { priority: Some(Priority::Baja), ..Default::default() }.matches(&t));
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::Urgente > Priority::Alta);
        assert!(Priority::Baja < Priority::Media);
    }
}
