//! Coordinates and Google Maps link parsing.

mod maps_link;

pub use maps_link::{parse_maps_link, GeoParseError};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// `None` when either value is out of range or not finite.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }

    pub fn from_pair(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Self::new(lat, lng),
            _ => None,
        }
    }

    /// Six decimals is ~10 cm, plenty for a delivery address.
    pub fn rounded(&self) -> Self {
        let r = |v: f64| (v * 1_000_000.0).round() / 1_000_000.0;
        Self {
            lat: r(self.lat),
            lng: r(self.lng),
        }
    }

    pub fn to_display(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }

    /// Link that opens the point in Google Maps.
    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={:.6},{:.6}",
            self.lat, self.lng
        )
    }
}

/// Smallest box containing all points, as `(south_west, north_east)`.
pub fn bounds(points: &[Coordinates]) -> Option<(Coordinates, Coordinates)> {
    let first = points.first()?;
    let mut sw = *first;
    let mut ne = *first;
    for p in &points[1..] {
        sw.lat = sw.lat.min(p.lat);
        sw.lng = sw.lng.min(p.lng);
        ne.lat = ne.lat.max(p.lat);
        ne.lng = ne.lng.max(p.lng);
    }
    Some((sw, ne))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Coordinates::new(4.7, -74.0).is_some());
        assert!(Coordinates::new(90.1, 0.0).is_none());
        assert!(Coordinates::new(0.0, 180.5).is_none());
        assert!(Coordinates::new(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn test_from_pair() {
        assert!(Coordinates::from_pair(Some(1.0), None).is_none());
        assert_eq!(
            Coordinates::from_pair(Some(1.0), Some(2.0)),
            Some(Coordinates { lat: 1.0, lng: 2.0 })
        );
    }

    #[test]
    fn test_rounded_and_display() {
        let c = Coordinates { lat: 4.711_012_345, lng: -74.072_099_9 }.rounded();
        assert_eq!(c.to_display(), "4.711012, -74.072100");
        assert!(c.maps_url().ends_with("query=4.711012,-74.072100"));
    }

    #[test]
    fn test_bounds() {
        assert!(bounds(&[]).is_none());
        let (sw, ne) = bounds(&[
            Coordinates { lat: 4.0, lng: -74.0 },
            Coordinates { lat: 5.0, lng: -75.0 },
            Coordinates { lat: 4.5, lng: -73.5 },
        ])
        .unwrap();
        assert_eq!(sw, Coordinates { lat: 4.0, lng: -75.0 });
        assert_eq!(ne, Coordinates { lat: 5.0, lng: -73.5 });
    }
}
