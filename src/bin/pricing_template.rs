use anyhow::Context;
use clap::Parser;
use flip_kit::config::toml_config::FileConfig;
use flip_kit::core::template::TemplateBuilder;
use flip_kit::domain::ports::Storage;
use flip_kit::utils::{logger, validation::Validate};
use flip_kit::{LocalStorage, TemplateConfig};

#[derive(Parser)]
#[command(name = "pricing-template")]
#[command(about = "Create domain pricing spreadsheet template")]
struct Args {
    /// Output filename (default: domain_pricing_template.xlsx)
    #[arg(short, long)]
    output: Option<String>,

    /// Number of Sold Domains rows to pre-fill with formulas (default: 10)
    #[arg(long)]
    formula_rows: Option<u32>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let file_config = match &args.config {
        Some(path) => Some(FileConfig::from_file(path).with_context(|| format!("loading config '{}'", path))?),
        None => None,
    };

    let mut config = TemplateConfig::from_file_config(file_config.as_ref());
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(rows) = args.formula_rows {
        config.formula_rows = rows;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let builder = TemplateBuilder::new().with_formula_rows(config.formula_rows);
    tracing::debug!("Building workbook with {} formula rows", builder.formula_rows());

    // 輸出失敗依錯誤嚴重度退出
    let saved = builder
        .to_bytes()
        .and_then(|data| LocalStorage::current_dir().write_file(&config.output, &data));
    if let Err(e) = saved {
        std::process::exit(e.report());
    }

    println!("✓ Created pricing template: {}", config.output);
    println!("\nTemplate includes:");
    println!("  - Domain Inventory: Track purchased domains and target prices");
    println!("  - Sold Domains: Record sales and calculate profits");
    println!("  - Summary: Overview of portfolio performance");

    Ok(())
}
