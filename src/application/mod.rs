//! Services that own persisted state and orchestrate slip emission.
//!
//! Each service keeps its state behind a `tokio` mutex held across the whole
//! load-mutate-persist cycle, so they can be shared freely behind an `Arc`.

pub mod config;
pub mod emission;
pub mod registry;
