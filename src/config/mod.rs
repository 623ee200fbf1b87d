pub mod cli;
pub mod toml_config;

use crate::core::listing::ListingOptions;
use crate::core::template::{DEFAULT_FORMULA_ROWS, DEFAULT_OUTPUT};
use crate::domain::model::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::FileConfig;

pub const DEFAULT_SCRAPER_OUTPUT: &str = "domains.csv";
pub const DEFAULT_LISTING_OUTPUT: &str = "flippa_listings.txt";
pub const LISTING_TEMPLATE_CSV: &str = "domains_template.csv";
pub const MAX_FORMULA_ROWS: u32 = 10_000;
pub const MAX_PAGES: usize = 1_000;

/// 範例資料產生器的最終設定（內建預設 < 設定檔 < 命令列）
#[derive(Debug, Clone, PartialEq)]
pub struct ScraperConfig {
    pub max_price: f64,
    pub pages: usize,
    pub keyword: String,
    pub output: String,
    pub format: OutputFormat,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_price: 5.0,
            pages: 3,
            keyword: String::new(),
            output: DEFAULT_SCRAPER_OUTPUT.to_string(),
            format: OutputFormat::Csv,
        }
    }
}

impl ScraperConfig {
    pub fn from_file_config(file: Option<&FileConfig>) -> Self {
        let mut config = Self::default();
        if let Some(section) = file.and_then(|f| f.scraper.as_ref()) {
            if let Some(max_price) = section.max_price {
                config.max_price = max_price;
            }
            if let Some(pages) = section.pages {
                config.pages = pages;
            }
            if let Some(keyword) = &section.keyword {
                config.keyword = keyword.clone();
            }
            if let Some(format) = section.format {
                config.format = format;
            }
            if let Some(output) = &section.output {
                config.output = output.clone();
            }
        }
        config
    }
}

impl ConfigProvider for ScraperConfig {
    fn max_price(&self) -> f64 {
        self.max_price
    }

    fn pages(&self) -> usize {
        self.pages
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }
}

impl Validate for ScraperConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output", &self.output)?;
        validation::validate_positive_number("pages", self.pages, 1)?;
        validation::validate_range("pages", self.pages, 1, MAX_PAGES)?;
        validation::validate_non_negative_price("max_price", self.max_price)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingConfig {
    pub options: ListingOptions,
    pub output: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            options: ListingOptions::default(),
            output: DEFAULT_LISTING_OUTPUT.to_string(),
        }
    }
}

impl ListingConfig {
    pub fn from_file_config(file: Option<&FileConfig>) -> Self {
        let mut config = Self::default();
        if let Some(section) = file.and_then(|f| f.listing.as_ref()) {
            if let Some(multiplier) = section.markup_multiplier {
                config.options.markup_multiplier = multiplier;
            }
            if let Some(keywords) = &section.premium_keywords {
                config.options.premium_keywords =
                    keywords.iter().map(|k| k.to_lowercase()).collect();
            }
            if let Some(tlds) = &section.popular_tlds {
                // 允許寫成 ".io"
                config.options.popular_tlds = tlds
                    .iter()
                    .map(|t| t.trim_start_matches('.').to_string())
                    .collect();
            }
            if let Some(output) = &section.output {
                config.output = output.clone();
            }
        }
        config
    }
}

impl Validate for ListingConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output", &self.output)?;
        validation::validate_range(
            "listing.markup_multiplier",
            self.options.markup_multiplier,
            f64::MIN_POSITIVE,
            f64::MAX,
        )?;
        for keyword in &self.options.premium_keywords {
            validation::validate_non_empty_string("listing.premium_keywords", keyword)?;
        }
        for tld in &self.options.popular_tlds {
            validation::validate_non_empty_string("listing.popular_tlds", tld)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateConfig {
    pub output: String,
    pub formula_rows: u32,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT.to_string(),
            formula_rows: DEFAULT_FORMULA_ROWS,
        }
    }
}

impl TemplateConfig {
    pub fn from_file_config(file: Option<&FileConfig>) -> Self {
        let mut config = Self::default();
        if let Some(section) = file.and_then(|f| f.template.as_ref()) {
            if let Some(output) = &section.output {
                config.output = output.clone();
            }
            if let Some(rows) = section.formula_rows {
                config.formula_rows = rows;
            }
        }
        config
    }
}

impl Validate for TemplateConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output", &self.output)?;
        validation::validate_file_extension("output", &self.output, &["xlsx"])?;
        validation::validate_range("formula_rows", self.formula_rows, 1, MAX_FORMULA_ROWS)?;
        Ok(())
    }
}
