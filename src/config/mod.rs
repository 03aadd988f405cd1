#[cfg(feature = "cli")]
pub mod cli;
pub mod layout;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, LogFormat};
pub use layout::{LayoutConfig, SectionEntry};
