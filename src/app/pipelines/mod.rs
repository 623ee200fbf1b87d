pub mod scrape_pipeline;
