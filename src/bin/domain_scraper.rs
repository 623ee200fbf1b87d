use anyhow::Context;
use clap::Parser;
use flip_kit::config::toml_config::FileConfig;
use flip_kit::domain::model::OutputFormat;
use flip_kit::utils::{logger, validation::Validate};
use flip_kit::{Engine, LocalStorage, ScrapePipeline, ScraperConfig};

#[derive(Parser)]
#[command(name = "domain-scraper")]
#[command(about = "Generate sample expiring-domain data and save it as CSV or JSON")]
struct Args {
    /// Maximum price to consider (default: 5.0 USD)
    #[arg(long)]
    max_price: Option<f64>,

    /// Number of pages to generate (default: 3)
    #[arg(long)]
    pages: Option<usize>,

    /// Output filename (default: domains.csv)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format (default: csv)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Search keyword used in place of the name prefix
    #[arg(long)]
    keyword: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    let file_config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            Some(FileConfig::from_file(path).with_context(|| format!("loading config '{}'", path))?)
        }
        None => None,
    };

    // 應用命令列覆蓋設定
    let mut config = ScraperConfig::from_file_config(file_config.as_ref());
    if let Some(max_price) = args.max_price {
        config.max_price = max_price;
    }
    if let Some(pages) = args.pages {
        config.pages = pages;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(keyword) = args.keyword {
        config.keyword = keyword;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let rule = "=".repeat(60);
    tracing::info!("{}", rule);
    tracing::info!("Sample Expiring Domain Generator");
    tracing::info!("{}", rule);
    tracing::info!("Max price: ${}", config.max_price);
    tracing::info!("Pages to generate: {}", config.pages);
    tracing::info!("Output file: {} ({})", config.output, config.format);
    tracing::info!("{}", rule);
    tracing::warn!("Records are synthesized locally; no marketplace is contacted");

    let storage = LocalStorage::current_dir();
    let pipeline = ScrapePipeline::new(storage, config);
    let engine = Engine::new(pipeline);

    match engine.run() {
        Ok(report) => {
            if let Some(output_path) = report.output_path {
                println!("✅ Saved {} domains", report.result.records.len());
                println!("📁 Output saved to: {}", output_path);
            }
        }
        Err(e) => std::process::exit(e.report()),
    }

    Ok(())
}
