pub mod common;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod progress;

pub use common::{EtlError, Result};
pub use config::EtlConfig;
pub use pipeline::{Pipeline, RunSummary};
