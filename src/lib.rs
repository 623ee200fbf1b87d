pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::{ListingConfig, ScraperConfig, TemplateConfig};
pub use core::{engine::Engine, ScrapePipeline};
pub use utils::error::{FlipError, Result};
