pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::LayoutConfig;
pub use crate::core::{engine::SplitEngine, pipeline::SplitPipeline};
pub use utils::error::{Result, SplitError};
