//! Live courier positions and marker reconciliation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::geo::Coordinates;
use crate::shared::{dates, wire};

/// Row of `/seguimiento/mensajeros`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierLocation {
    #[serde(rename = "id_mensajero")]
    pub courier_id: i64,
    #[serde(rename = "nombre", alias = "nombre_mensajero")]
    pub name: String,
    #[serde(rename = "latitud", default, deserialize_with = "wire::opt_f64")]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud", default, deserialize_with = "wire::opt_f64")]
    pub longitude: Option<f64>,
    #[serde(rename = "ultima_actualizacion", default, deserialize_with = "wire::opt_string")]
    pub updated_at: Option<String>,
    #[serde(rename = "id_tarea_actual", default, deserialize_with = "wire::opt_id")]
    pub current_task_id: Option<i64>,
    #[serde(rename = "tareas_pendientes", default, deserialize_with = "wire::u32_or_zero")]
    pub pending_tasks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Live,
    Stale,
    Unknown,
}

impl Freshness {
    pub fn label(&self) -> &'static str {
        match self {
            Freshness::Live => "En línea",
            Freshness::Stale => "Sin señal reciente",
            Freshness::Unknown => "Sin datos",
        }
    }
}

impl CourierLocation {
    pub fn position(&self) -> Option<Coordinates> {
        Coordinates::from_pair(self.latitude, self.longitude)
    }

    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(dates::parse_timestamp)
    }

    pub fn freshness(&self, now: DateTime<Utc>, stale_after: Duration) -> Freshness {
        match self.last_seen() {
            None => Freshness::Unknown,
            Some(seen) if now - seen > stale_after => Freshness::Stale,
            Some(_) => Freshness::Live,
        }
    }
}

/// Marker positions for the couriers that reported a valid location.
pub fn positions(locations: &[CourierLocation]) -> Vec<(i64, Coordinates)> {
    locations
        .iter()
        .filter_map(|l| l.position().map(|p| (l.courier_id, p)))
        .collect()
}

/// What to do with the map markers after a refresh.
///
/// Markers are keyed by id; the first occurrence of an id wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerDiff {
    pub added: Vec<(i64, Coordinates)>,
    pub moved: Vec<(i64, Coordinates)>,
    pub removed: Vec<i64>,
}

impl MarkerDiff {
    pub fn compute(current: &HashMap<i64, Coordinates>, incoming: &[(i64, Coordinates)]) -> Self {
        let mut diff = MarkerDiff::default();
        let mut seen = BTreeSet::new();

        for &(id, pos) in incoming {
            if !seen.insert(id) {
                continue;
            }
            match current.get(&id) {
                None => diff.added.push((id, pos)),
                Some(prev) if *prev != pos => diff.moved.push((id, pos)),
                Some(_) => {}
            }
        }

        let mut removed: Vec<i64> = current
            .keys()
            .filter(|id| !seen.contains(*id))
            .copied()
            .collect();
        removed.sort_unstable();
        diff.removed = removed;
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.moved.is_empty() && self.removed.is_empty()
    }

    /// Apply the diff to a marker-position index.
    pub fn apply(&self, current: &mut HashMap<i64, Coordinates>) {
        for id in &self.removed {
            current.remove(id);
        }
        for (id, pos) in self.added.iter().chain(self.moved.iter()) {
            current.insert(*id, *pos);
        }
    }
}

/// Keep the selected courier while it is still listed, with or without a position.
pub fn retain_selection(selected: Option<i64>, incoming: &[CourierLocation]) -> Option<i64> {
    selected.filter(|id| incoming.iter().any(|l| l.courier_id == *id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loc(id: i64, lat: f64, lng: f64) -> CourierLocation {
        CourierLocation {
            courier_id: id,
            name: format!("M{id}"),
            latitude: Some(lat),
            longitude: Some(lng),
            updated_at: None,
            current_task_id: None,
            pending_tasks: 0,
        }
    }

    fn c(lat: f64, lng: f64) -> Coordinates {
        Coordinates { lat, lng }
    }

    #[test]
    fn test_mapping() {
        let l: CourierLocation = serde_json::from_value(json!({
            "id_mensajero": 5,
            "nombre_mensajero": "Pedro",
            "latitud": "4.65",
            "longitud": "-74.05",
            "ultima_actualizacion": "2024-05-01 10:00:00",
            "tareas_pendientes": "3"
        }))
        .unwrap();
        assert_eq!(l.name, "Pedro");
        assert_eq!(l.pending_tasks, 3);
        assert_eq!(l.position(), Some(c(4.65, -74.05)));
    }

    #[test]
    fn test_freshness() {
        let mut l = loc(1, 4.0, -74.0);
        let now = dates::parse_timestamp("2024-05-01T10:20:00Z").unwrap();
        let ten = Duration::minutes(10);
        assert_eq!(l.freshness(now, ten), Freshness::Unknown);
        l.updated_at = Some("2024-05-01T10:15:00Z".into());
        assert_eq!(l.freshness(now, ten), Freshness::Live);
        l.updated_at = Some("2024-05-01T10:00:00Z".into());
        assert_eq!(l.freshness(now, ten), Freshness::Stale);
    }

    #[test]
    fn test_diff_add_move_remove() {
        let mut current = HashMap::from([(1, c(4.0, -74.0)), (2, c(4.1, -74.1)), (3, c(4.2, -74.2))]);
        let incoming = vec![loc(1, 4.0, -74.0), loc(2, 4.15, -74.1), loc(4, 4.3, -74.3)];

        let diff = MarkerDiff::compute(&current, &positions(&incoming));
        assert_eq!(diff.added, vec![(4, c(4.3, -74.3))]);
        assert_eq!(diff.moved, vec![(2, c(4.15, -74.1))]);
        assert_eq!(diff.removed, vec![3]);

        diff.apply(&mut current);
        assert_eq!(current.len(), 3);
        assert_eq!(current[&2], c(4.15, -74.1));
        assert!(MarkerDiff::compute(&current, &positions(&incoming)).is_empty());
    }

    #[test]
    fn test_diff_drops_couriers_without_position_and_duplicates() {
        let current = HashMap::from([(1, c(4.0, -74.0))]);
        let mut gone = loc(1, 0.0, 0.0);
        gone.latitude = None;
        let incoming = vec![gone, loc(2, 4.0, -74.0), loc(2, 5.0, -75.0)];
        let diff = MarkerDiff::compute(&current, &positions(&incoming));
        assert_eq!(diff.removed, vec![1]);
        assert_eq!(diff.added, vec![(2, c(4.0, -74.0))]);
    }

    #[test]
    fn test_retain_selection() {
        let incoming = vec![loc(1, 4.0, -74.0)];
        assert_eq!(retain_selection(Some(1), &incoming), Some(1));
        assert_eq!(retain_selection(Some(2), &incoming), None);
        assert_eq!(retain_selection(None, &incoming), None);
    }

    #[test]
    fn test_retain_selection_without_position() {
        let incoming: Vec<CourierLocation> = serde_json::from_value(json!([
            {"id_mensajero": 7, "nombre": "Pedro", "latitud": null, "longitud": null}
        ]))
        .unwrap();
        assert_eq!(retain_selection(Some(7), &incoming), Some(7));
    }
}
