pub mod aggregator;
pub mod engine;
pub mod markers;
pub mod pipeline;

pub use crate::domain::model::{RunReport, SectionSpec};
pub use crate::domain::ports::{LayoutProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
