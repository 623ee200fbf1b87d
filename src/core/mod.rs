pub mod engine;
pub mod export;
pub mod generator;
pub mod listing;
pub mod template;

pub use crate::app::pipelines::scrape_pipeline::ScrapePipeline;
pub use crate::domain::model::{SampleDomainRecord, ScrapeResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
