//! `recibos-compare` — voucher receipt comparison engine.
//!
//! Pure engine crate: receives two pre-loaded tabular datasets (extracted
//! and reference), returns joined, classified rows plus a presentation-ready
//! report. No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod join;
pub mod model;
pub mod normalize;
pub mod report;

pub use config::CompareConfig;
pub use engine::run;
pub use error::CompareError;
pub use model::{CompareResult, Dataset, JoinedRow, Report};
