//! Application layer: pipeline steps and per-language orchestration

pub mod data_dir;
pub mod error;
pub mod update;

pub use data_dir::{DataDir, PathProvider};
pub use error::{ApplicationError, ApplicationResult};
pub use update::{update, update_all};
