//! Adapters behind the domain ports.

pub mod artifacts;
pub mod in_memory;
pub mod json_file;
pub mod json_renderer;
