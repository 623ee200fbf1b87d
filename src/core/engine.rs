use crate::domain::model::{SampleDomainRecord, ScrapeResult};
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// 一次執行的結果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: Option<String>,
    pub result: ScrapeResult,
}

/// 價格統計：平均、範圍、最便宜的幾筆
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub total: usize,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub cheapest: Vec<SampleDomainRecord>,
}

impl PriceSummary {
    pub const CHEAPEST_COUNT: usize = 5;

    pub fn from_records(records: &[SampleDomainRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let total = records.len();
        let prices = records.iter().map(|r| r.price);
        let average_price = prices.clone().sum::<f64>() / total as f64;
        let min_price = prices.clone().fold(f64::INFINITY, f64::min);
        let max_price = prices.fold(f64::NEG_INFINITY, f64::max);

        // 穩定排序，同價時保留原順序
        let mut cheapest = records.to_vec();
        cheapest.sort_by(|a, b| a.price.total_cmp(&b.price));
        cheapest.truncate(Self::CHEAPEST_COUNT);

        Some(Self {
            total,
            average_price,
            min_price,
            max_price,
            cheapest,
        })
    }

    pub fn log(&self) {
        let rule = "=".repeat(60);
        tracing::info!("{}", rule);
        tracing::info!("SUMMARY");
        tracing::info!("{}", rule);
        tracing::info!("Total domains found: {}", self.total);
        tracing::info!("Average price: ${:.2}", self.average_price);
        tracing::info!("Price range: ${:.2} - ${:.2}", self.min_price, self.max_price);
        tracing::info!("{}", rule);
        tracing::info!("Top {} cheapest domains:", Self::CHEAPEST_COUNT);
        for domain in &self.cheapest {
            tracing::info!("  {:30} ${:.2}", domain.domain, domain.price);
        }
    }
}

pub struct Engine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> Engine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting sample domain run...");

        // Extract
        tracing::debug!("Generating sample records...");
        let raw_data = self.pipeline.extract()?;
        tracing::debug!("Generated {} records", raw_data.len());

        // Transform
        let result = self.pipeline.transform(raw_data)?;
        tracing::debug!(
            "Kept {} records, discarded {} above the price ceiling",
            result.records.len(),
            result.discarded
        );

        // Load
        let output_path = self.pipeline.load(&result)?;

        match PriceSummary::from_records(&result.records) {
            Some(summary) => summary.log(),
            None => tracing::warn!("No domains found matching criteria"),
        }

        Ok(RunReport {
            output_path,
            result,
        })
    }
}
