//! Shared types for the SGR dashboard: backend wire models with their
//! Spanish field mapping, the route/role table and the pure logic behind the
//! pages (link parsing, metric aggregation, marker diffing).

pub mod dashboards;
pub mod domain;
pub mod geo;
pub mod shared;
pub mod system;
