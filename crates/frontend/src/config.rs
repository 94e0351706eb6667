//! Build-time configuration.
//!
//! Values are baked in with `option_env!` when the wasm bundle is compiled
//! (e.g. `SGR_API_URL=https://api.example.com trunk build --release`).
//! Anything missing or unparsable falls back to the default.

use once_cell::sync::Lazy;

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";
pub const DEFAULT_TRACKING_INTERVAL_SECS: u32 = 15;
pub const MIN_TRACKING_INTERVAL_SECS: u32 = 5;
pub const DEFAULT_STALE_AFTER_MINUTES: i64 = 10;
pub const DEFAULT_MAP_CENTER: (f64, f64) = (4.7110, -74.0721);
pub const DEFAULT_MAP_ZOOM: f64 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub api_key: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub tracking_interval_secs: u32,
    pub stale_after_minutes: i64,
    pub log_level: log::Level,
    pub map: MapConfig,
}

/// Raw string values as read from the environment.
#[derive(Debug, Clone, Default)]
pub struct RawConfig<'a> {
    pub api_url: Option<&'a str>,
    pub maps_api_key: Option<&'a str>,
    pub tracking_interval_secs: Option<&'a str>,
    pub stale_after_minutes: Option<&'a str>,
    pub map_center_lat: Option<&'a str>,
    pub map_center_lng: Option<&'a str>,
    pub map_zoom: Option<&'a str>,
    pub log_level: Option<&'a str>,
}

fn parse_or<T: std::str::FromStr>(value: Option<&str>, default: T) -> T {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn parse(raw: &RawConfig<'_>) -> Self {
        let api_url = raw
            .api_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let tracking_interval_secs = parse_or(raw.tracking_interval_secs, DEFAULT_TRACKING_INTERVAL_SECS)
            .max(MIN_TRACKING_INTERVAL_SECS);

        let stale_after_minutes = parse_or(raw.stale_after_minutes, DEFAULT_STALE_AFTER_MINUTES);
        let stale_after_minutes = if stale_after_minutes > 0 {
            stale_after_minutes
        } else {
            DEFAULT_STALE_AFTER_MINUTES
        };

        let center_lat = parse_or(raw.map_center_lat, DEFAULT_MAP_CENTER.0);
        let center_lng = parse_or(raw.map_center_lng, DEFAULT_MAP_CENTER.1);
        let (center_lat, center_lng) =
            if (-90.0..=90.0).contains(&center_lat) && (-180.0..=180.0).contains(&center_lng) {
                (center_lat, center_lng)
            } else {
                DEFAULT_MAP_CENTER
            };

        let zoom = parse_or(raw.map_zoom, DEFAULT_MAP_ZOOM);
        let zoom = if (1.0..=21.0).contains(&zoom) { zoom } else { DEFAULT_MAP_ZOOM };

        Self {
            api_url,
            tracking_interval_secs,
            stale_after_minutes,
            log_level: parse_or(raw.log_level, log::Level::Info),
            map: MapConfig {
                api_key: raw.maps_api_key.unwrap_or_default().trim().to_string(),
                center_lat,
                center_lng,
                zoom,
            },
        }
    }

    /// Values baked in at compile time.
    pub fn from_env() -> Self {
        Self::parse(&RawConfig {
            api_url: option_env!("SGR_API_URL"),
            maps_api_key: option_env!("SGR_GOOGLE_MAPS_API_KEY"),
            tracking_interval_secs: option_env!("SGR_TRACKING_INTERVAL_SECS"),
            stale_after_minutes: option_env!("SGR_STALE_AFTER_MINUTES"),
            map_center_lat: option_env!("SGR_MAP_CENTER_LAT"),
            map_center_lng: option_env!("SGR_MAP_CENTER_LNG"),
            map_zoom: option_env!("SGR_MAP_ZOOM"),
            log_level: option_env!("SGR_LOG_LEVEL"),
        })
    }

    pub fn stale_after(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.stale_after_minutes)
    }
}

pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let cfg = AppConfig::parse(&RawConfig::default());
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.tracking_interval_secs, 15);
        assert_eq!(cfg.stale_after_minutes, 10);
        assert_eq!(cfg.log_level, log::Level::Info);
        assert_eq!(cfg.map.api_key, "");
        assert_eq!((cfg.map.center_lat, cfg.map.center_lng), DEFAULT_MAP_CENTER);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let cfg = AppConfig::parse(&RawConfig {
            api_url: Some("https://api.sgr.co/api/"),
            maps_api_key: Some(" abc123 "),
            tracking_interval_secs: Some("30"),
            log_level: Some("debug"),
            map_zoom: Some("14"),
            ..Default::default()
        });
        assert_eq!(cfg.api_url, "https://api.sgr.co/api");
        assert_eq!(cfg.map.api_key, "abc123");
        assert_eq!(cfg.tracking_interval_secs, 30);
        assert_eq!(cfg.log_level, log::Level::Debug);
        assert_eq!(cfg.map.zoom, 14.0);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = AppConfig::parse(&RawConfig {
            tracking_interval_secs: Some("1"),
            stale_after_minutes: Some("-3"),
            map_center_lat: Some("200"),
            map_zoom: Some("abc"),
            log_level: Some("loud"),
            ..Default::default()
        });
        assert_eq!(cfg.tracking_interval_secs, MIN_TRACKING_INTERVAL_SECS);
        assert_eq!(cfg.stale_after_minutes, DEFAULT_STALE_AFTER_MINUTES);
        assert_eq!((cfg.map.center_lat, cfg.map.center_lng), DEFAULT_MAP_CENTER);
        assert_eq!(cfg.map.zoom, DEFAULT_MAP_ZOOM);
        assert_eq!(cfg.log_level, log::Level::Info);
    }
}
