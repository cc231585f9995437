//! Translation between the outside world and the application services.

pub mod csv;
pub mod json;
