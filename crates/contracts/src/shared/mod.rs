pub mod dates;
pub mod error;
pub mod indicators;
pub mod resource;
pub mod validation;
pub mod wire;
