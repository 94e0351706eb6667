//! Client-side aggregation of the backend's precomputed courier metrics.
//!
//! The backend returns one row per courier and day. Everything here is
//! reshaping for display; no metric is derived from raw task data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::shared::wire;

/// Row of `/rendimiento`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRow {
    #[serde(rename = "id_mensajero")]
    pub courier_id: i64,
    #[serde(rename = "nombre_mensajero", alias = "nombre")]
    pub courier_name: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "tareas_asignadas", default, deserialize_with = "wire::u32_or_zero")]
    pub assigned: u32,
    #[serde(rename = "tareas_completadas", default, deserialize_with = "wire::u32_or_zero")]
    pub completed: u32,
    #[serde(rename = "tareas_a_tiempo", default, deserialize_with = "wire::u32_or_zero")]
    pub on_time: u32,
    /// Average minutes from assignment to start, over the day's completed tasks.
    #[serde(rename = "tiempo_respuesta_promedio_min", default, deserialize_with = "wire::opt_f64")]
    pub avg_response_minutes: Option<f64>,
}

/// Query string of `/rendimiento`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceQuery {
    #[serde(rename = "desde")]
    pub from: NaiveDate,
    #[serde(rename = "hasta")]
    pub to: NaiveDate,
}

impl PerformanceQuery {
    /// The `days` days ending on `today` (inclusive).
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let span = chrono::Days::new(u64::from(days.saturating_sub(1)));
        Self {
            from: today.checked_sub_days(span).unwrap_or(today),
            to: today,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.from <= self.to
    }
}

/// Running totals shared by the summary, per-courier and per-day views.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub assigned: u32,
    pub completed: u32,
    pub on_time: u32,
    response_weighted_sum: f64,
    response_weight: u32,
}

impl Totals {
    fn add(&mut self, row: &PerformanceRow) {
        self.assigned += row.assigned;
        self.completed += row.completed;
        self.on_time += row.on_time;
        if let Some(avg) = row.avg_response_minutes {
            if row.completed > 0 {
                self.response_weighted_sum += avg * f64::from(row.completed);
                self.response_weight += row.completed;
            }
        }
    }

    /// Completed / assigned, as a percentage. 0 with nothing assigned.
    pub fn completion_rate(&self) -> f64 {
        percentage(self.completed, self.assigned)
    }

    /// On-time / completed, as a percentage. 0 with nothing completed.
    pub fn on_time_rate(&self) -> f64 {
        percentage(self.on_time, self.completed)
    }

    /// Response time averaged across days, weighted by completed tasks.
    pub fn avg_response_minutes(&self) -> Option<f64> {
        if self.response_weight == 0 {
            None
        } else {
            Some(self.response_weighted_sum / f64::from(self.response_weight))
        }
    }
}

fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) * 100.0 / f64::from(whole)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourierPerformance {
    pub courier_id: i64,
    pub courier_name: String,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub summary: Totals,
    pub couriers: Vec<CourierPerformance>,
    pub daily: Vec<DailyPoint>,
}

impl PerformanceReport {
    pub fn build(rows: &[PerformanceRow]) -> Self {
        Self {
            summary: summarize(rows),
            couriers: by_courier(rows),
            daily: daily_series(rows),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.assigned == 0 && self.couriers.is_empty()
    }

    /// The `n` best couriers by the ranking in [`by_courier`].
    pub fn top(&self, n: usize) -> &[CourierPerformance] {
        &self.couriers[..n.min(self.couriers.len())]
    }
}

pub fn summarize(rows: &[PerformanceRow]) -> Totals {
    let mut totals = Totals::default();
    for row in rows {
        totals.add(row);
    }
    totals
}

/// Per-courier totals ranked by completion %, then on-time %, then name.
pub fn by_courier(rows: &[PerformanceRow]) -> Vec<CourierPerformance> {
    let mut index: HashMap<i64, CourierPerformance> = HashMap::new();
    for row in rows {
        index
            .entry(row.courier_id)
            .or_insert_with(|| CourierPerformance {
                courier_id: row.courier_id,
                courier_name: row.courier_name.clone(),
                totals: Totals::default(),
            })
            .totals
            .add(row);
    }

    let mut out: Vec<CourierPerformance> = index.into_values().collect();
    out.sort_by(|a, b| {
        b.totals
            .completion_rate()
            .total_cmp(&a.totals.completion_rate())
            .then_with(|| b.totals.on_time_rate().total_cmp(&a.totals.on_time_rate()))
            .then_with(|| a.courier_name.to_lowercase().cmp(&b.courier_name.to_lowercase()))
            .then_with(|| a.courier_id.cmp(&b.courier_id))
    });
    out
}

/// Totals per day, oldest first. Days without rows are absent.
pub fn daily_series(rows: &[PerformanceRow]) -> Vec<DailyPoint> {
    let mut by_day: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
    for row in rows {
        by_day.entry(row.date).or_default().add(row);
    }
    by_day
        .into_iter()
        .map(|(date, totals)| DailyPoint { date, totals })
        .collect()
}

/// Largest value in a series, used to scale chart bars. Never 0.
pub fn chart_max(points: &[DailyPoint]) -> u32 {
    points
        .iter()
        .map(|p| p.totals.assigned.max(p.totals.completed))
        .max()
        .unwrap_or(0)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn row(id: i64, name: &str, day: u32, assigned: u32, completed: u32, on_time: u32, avg: Option<f64>) -> PerformanceRow {
        PerformanceRow {
            courier_id: id,
            courier_name: name.to_string(),
            date: d(day),
            assigned,
            completed,
            on_time,
            avg_response_minutes: avg,
        }
    }

    #[test]
    fn test_mapping() {
        let r: PerformanceRow = serde_json::from_value(json!({
            "id_mensajero": 5,
            "nombre_mensajero": "Pedro",
            "fecha": "2024-05-01",
            "tareas_asignadas": 10,
            "tareas_completadas": "8",
            "tareas_a_tiempo": 6,
            "tiempo_respuesta_promedio_min": "12.5"
        }))
        .unwrap();
        assert_eq!(r.completed, 8);
        assert_eq!(r.avg_response_minutes, Some(12.5));
    }

    #[test]
    fn test_query_params() {
        let q = PerformanceQuery::last_days(d(30), 30);
        assert_eq!(q.from, d(1));
        assert!(q.is_valid());
        assert_eq!(
            serde_json::to_value(q).unwrap(),
            json!({"desde": "2024-05-01", "hasta": "2024-05-30"})
        );
    }

    #[test]
    fn test_summary_rates_and_weighted_response() {
        let rows = vec![
            row(1, "Ana", 1, 10, 8, 6, Some(10.0)),
            row(1, "Ana", 2, 10, 2, 2, Some(40.0)),
        ];
        let s = summarize(&rows);
        assert_eq!((s.assigned, s.completed, s.on_time), (20, 10, 8));
        assert_eq!(s.completion_rate(), 50.0);
        assert_eq!(s.on_time_rate(), 80.0);
        // (10*8 + 40*2) / 10
        assert_eq!(s.avg_response_minutes(), Some(16.0));
    }

    #[test]
    fn test_zero_denominators() {
        let s = summarize(&[row(1, "Ana", 1, 0, 0, 0, Some(5.0))]);
        assert_eq!(s.completion_rate(), 0.0);
        assert_eq!(s.on_time_rate(), 0.0);
        assert_eq!(s.avg_response_minutes(), None);
        assert!(PerformanceReport::build(&[]).is_empty());
    }

    #[test]
    fn test_ranking() {
        let rows = vec![
            row(1, "Zoe", 1, 10, 9, 9, None),
            row(2, "Ana", 1, 10, 9, 9, None),
            row(3, "Beto", 1, 10, 10, 5, None),
            row(4, "Carla", 1, 10, 9, 7, None),
        ];
        let ranked: Vec<i64> = by_courier(&rows).iter().map(|c| c.courier_id).collect();
        assert_eq!(ranked, vec![3, 2, 1, 4]);
        let report = PerformanceReport::build(&rows);
        assert_eq!(report.top(2).len(), 2);
        assert_eq!(report.top(10).len(), 4);
    }

    #[test]
    fn test_daily_series_sorted() {
        let rows = vec![
            row(1, "Ana", 3, 4, 4, 4, None),
            row(2, "Beto", 1, 2, 1, 1, None),
            row(1, "Ana", 1, 3, 3, 2, None),
        ];
        let series = daily_series(&rows);
        assert_eq!(series.iter().map(|p| p.date).collect::<Vec<_>>(), vec![d(1), d(3)]);
        assert_eq!(series[0].totals.assigned, 5);
        assert_eq!(series[0].totals.completed, 4);
        assert_eq!(chart_max(&series), 5);
        assert_eq!(chart_max(&[]), 1);
    }
}
