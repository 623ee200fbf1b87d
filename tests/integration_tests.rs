use anyhow::Result;
use flip_kit::core::export;
use flip_kit::domain::model::OutputFormat;
use flip_kit::{Engine, LocalStorage, ScrapePipeline, ScraperConfig};
use tempfile::TempDir;

fn config(max_price: f64, pages: usize, output: &str, format: OutputFormat) -> ScraperConfig {
    ScraperConfig {
        max_price,
        pages,
        keyword: String::new(),
        output: output.to_string(),
        format,
    }
}

#[test]
fn test_end_to_end_csv_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ScrapePipeline::new(storage, config(5.0, 3, "domains.csv", OutputFormat::Csv));
    let report = Engine::new(pipeline).run()?;

    assert_eq!(report.output_path.as_deref(), Some("domains.csv"));
    assert!(report.result.records.iter().all(|r| r.price <= 5.0));

    let full_path = temp_dir.path().join("domains.csv");
    let csv_content = std::fs::read_to_string(&full_path)?;
    let mut lines = csv_content.lines();
    assert_eq!(
        lines.next(),
        Some("domain,price,registrar,status,expiry_date,searched_at")
    );
    assert_eq!(lines.count(), report.result.records.len());

    // 讀回的欄位值應與寫出的一致
    let read_back = export::from_csv_bytes(csv_content.as_bytes())?;
    assert_eq!(read_back, report.result.records);
    Ok(())
}

#[test]
fn test_end_to_end_json_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = ScrapePipeline::new(
        storage,
        config(f64::INFINITY, 2, "out/domains.json", OutputFormat::Json),
    );
    let report = Engine::new(pipeline).run()?;

    assert_eq!(report.result.records.len(), 20);
    assert_eq!(report.result.discarded, 0);

    let data = std::fs::read(temp_dir.path().join("out/domains.json"))?;
    let value: serde_json::Value = serde_json::from_slice(&data)?;
    let items = value.as_array().expect("top-level array");
    assert_eq!(items.len(), 20);
    assert!(items[0]["price"].is_number());
    assert_eq!(items[0]["domain"], "quickhub.com");

    assert_eq!(export::from_json_bytes(&data)?, report.result.records);
    Ok(())
}

#[test]
fn test_zero_ceiling_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = ScrapePipeline::new(storage, config(0.0, 3, "domains.csv", OutputFormat::Csv));
    let report = Engine::new(pipeline).run()?;

    assert!(report.result.records.is_empty());
    assert_eq!(report.result.discarded, 30);
    assert_eq!(report.output_path, None);
    assert!(!temp_dir.path().join("domains.csv").exists());
    Ok(())
}

#[test]
fn test_keyword_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let mut scraper_config = config(2.0, 1, "kw.csv", OutputFormat::Csv);
    scraper_config.keyword = "crypto".to_string();

    let report = Engine::new(ScrapePipeline::new(storage, scraper_config)).run()?;

    let domains: Vec<&str> = report
        .result
        .records
        .iter()
        .map(|r| r.domain.as_str())
        .collect();
    assert_eq!(domains, vec!["cryptohub.com", "cryptozone.net", "cryptospace.io"]);
    Ok(())
}
