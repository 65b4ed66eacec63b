// src/api/handlers/mod.rs
mod essays;
mod health;
pub mod ws;

pub use essays::{export_results, get_levels, grade_batch, grade_essay};
pub use health::health_check;
pub use ws::{WsBroker, ws_handler};
