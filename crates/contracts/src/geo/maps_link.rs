use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::Coordinates;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoParseError {
    #[error("Pegue un enlace de Google Maps o unas coordenadas")]
    Empty,
    #[error("Los enlaces cortos de Google Maps no se pueden leer; abra el enlace y copie la dirección completa")]
    ShortLink,
    #[error("No se encontraron coordenadas en el enlace")]
    NoCoordinates,
    #[error("Coordenadas fuera de rango: {lat}, {lng}")]
    OutOfRange { lat: f64, lng: f64 },
}

const NUM: &str = r"(-?\d{1,3}(?:\.\d+)?)";

// Place pin inside the `data=` blob: `!3d4.7110!4d-74.0721`.
static PIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"!3d{NUM}!4d{NUM}")).expect("valid pin regex"));

// Viewport centre: `/@4.7110,-74.0721,15z`.
static AT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"@{NUM},\s*{NUM}")).expect("valid @ regex"));

static QUERY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"[?&](?:q|query|ll|sll|destination|center|daddr)=(?:loc:)?\s*{NUM}\s*,\s*{NUM}"
    ))
    .expect("valid query regex")
});

// Coordinates as a path segment: `/place/4.7110,-74.0721/` or `/dir//4.7,-74.0`.
static PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/(-?\d{1,3}\.\d+),\s*(-?\d{1,3}\.\d+)(?:[/?#]|$)").expect("valid path regex")
});

static BARE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\(?\s*{NUM}\s*[,;]\s*{NUM}\s*\)?$")).expect("valid bare regex")
});

fn is_short_link(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.contains("maps.app.goo.gl") || lower.contains("goo.gl/maps")
}

/// Extract coordinates from a pasted Google Maps URL or a bare `lat, lng`.
///
/// Patterns are tried in order: place pin, `@` viewport, query parameter,
/// path segment, bare text. The first pattern that matches decides the
/// result, so a link whose pin is out of range is rejected rather than
/// falling back to the viewport.
pub fn parse_maps_link(input: &str) -> Result<Coordinates, GeoParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GeoParseError::Empty);
    }
    if is_short_link(trimmed) {
        return Err(GeoParseError::ShortLink);
    }

    let plus_as_space = trimmed.replace('+', " ");
    let decoded = urlencoding::decode(&plus_as_space)
        .map(|s| s.into_owned())
        .unwrap_or(plus_as_space);

    for re in [&*PIN_RE, &*AT_RE, &*QUERY_RE, &*PATH_RE, &*BARE_RE] {
        if let Some(caps) = re.captures(&decoded) {
            let lat: f64 = caps[1].parse().map_err(|_| GeoParseError::NoCoordinates)?;
            let lng: f64 = caps[2].parse().map_err(|_| GeoParseError::NoCoordinates)?;
            return Coordinates::new(lat, lng)
                .map(|c| c.rounded())
                .ok_or(GeoParseError::OutOfRange { lat, lng });
        }
    }

    Err(GeoParseError::NoCoordinates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(lat: f64, lng: f64) -> Result<Coordinates, GeoParseError> {
        Ok(Coordinates { lat, lng })
    }

    #[test]
    fn test_place_pin_wins_over_viewport() {
        let url = "https://www.google.com/maps/place/Parque+93/@4.6765,-74.0480,17z/data=!3m1!4b1!4m6!3m5!1s0x0:0x0!8m2!3d4.6768!4d-74.0485";
        assert_eq!(parse_maps_link(url), ok(4.6768, -74.0485));
    }

    #[test]
    fn test_viewport_only() {
        let url = "https://www.google.com/maps/@4.7110,-74.0721,15z";
        assert_eq!(parse_maps_link(url), ok(4.711, -74.0721));
    }

    #[test]
    fn test_query_parameters() {
        assert_eq!(
            parse_maps_link("https://maps.google.com/?q=4.60971,-74.08175"),
            ok(4.60971, -74.08175)
        );
        assert_eq!(
            parse_maps_link("https://www.google.com/maps/search/?api=1&query=6.2442%2C-75.5812"),
            ok(6.2442, -75.5812)
        );
        assert_eq!(
            parse_maps_link("https://www.google.com/maps/dir/?api=1&destination=3.4516,+-76.5320"),
            ok(3.4516, -76.532)
        );
        assert_eq!(
            parse_maps_link("https://maps.google.com/maps?ll=10.391,-75.4794&z=14"),
            ok(10.391, -75.4794)
        );
    }

    #[test]
    fn test_path_segment() {
        assert_eq!(
            parse_maps_link("https://www.google.com/maps/place/4.7110,-74.0721/"),
            ok(4.711, -74.0721)
        );
    }

    #[test]
    fn test_bare_text() {
        assert_eq!(parse_maps_link(" 4.7110, -74.0721 "), ok(4.711, -74.0721));
        assert_eq!(parse_maps_link("(4.7110; -74.0721)"), ok(4.711, -74.0721));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_maps_link("   "), Err(GeoParseError::Empty));
        assert_eq!(
            parse_maps_link("https://maps.app.goo.gl/AbCdEf123"),
            Err(GeoParseError::ShortLink)
        );
        assert_eq!(
            parse_maps_link("https://www.google.com/maps/place/Bogota"),
            Err(GeoParseError::NoCoordinates)
        );
        assert_eq!(
            parse_maps_link("95.0, 10.0"),
            Err(GeoParseError::OutOfRange { lat: 95.0, lng: 10.0 })
        );
    }
}
