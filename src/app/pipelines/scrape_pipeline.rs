use crate::core::export;
use crate::core::generator::{DomainScraper, RECORDS_PER_PAGE};
use crate::domain::model::{SampleDomainRecord, ScrapeResult};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;

pub struct ScrapePipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) scraper: DomainScraper,
}

impl<S: Storage, C: ConfigProvider> ScrapePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let scraper = DomainScraper::new(config.max_price());
        Self {
            storage,
            config,
            scraper,
        }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ScrapePipeline<S, C> {
    /// 逐頁搜尋，價格上限在每頁搜尋時就已套用
    fn extract(&self) -> Result<Vec<SampleDomainRecord>> {
        Ok(self
            .scraper
            .get_expired_domains(self.config.pages(), self.config.keyword()))
    }

    fn transform(&self, data: Vec<SampleDomainRecord>) -> Result<ScrapeResult> {
        let generated = self.config.pages().saturating_mul(RECORDS_PER_PAGE);
        let records: Vec<SampleDomainRecord> =
            data.into_iter().filter(|d| self.scraper.accepts(d)).collect();

        Ok(ScrapeResult {
            discarded: generated.saturating_sub(records.len()),
            records,
        })
    }

    fn load(&self, result: &ScrapeResult) -> Result<Option<String>> {
        if result.records.is_empty() {
            tracing::warn!("No domains to save");
            return Ok(None);
        }

        let data = export::encode(&result.records, self.config.output_format())?;
        tracing::debug!(
            "Writing {} bytes of {} to storage",
            data.len(),
            self.config.output_format()
        );
        self.storage.write_file(self.config.output_path(), &data)?;

        tracing::info!(
            "Saved {} domains to {}",
            result.records.len(),
            self.config.output_path()
        );
        Ok(Some(self.config.output_path().to_string()))
    }
}
