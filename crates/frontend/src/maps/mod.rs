//! Google Maps integration: script loader, JS bindings, map widget,
//! geocoding and the location picker used by the forms.

pub mod bindings;
pub mod error;
pub mod geocoder;
pub mod loader;
pub mod picker;
pub mod widget;

pub use error::MapError;
pub use picker::LocationPicker;
pub use widget::{MapMarker, MapView, MarkerTone};
