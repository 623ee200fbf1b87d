use anyhow::Context;
use clap::{CommandFactory, Parser};
use flip_kit::config::toml_config::FileConfig;
use flip_kit::config::LISTING_TEMPLATE_CSV;
use flip_kit::core::listing;
use flip_kit::domain::ports::Storage;
use flip_kit::utils::{logger, validation::Validate};
use flip_kit::{FlipError, ListingConfig, LocalStorage};

#[derive(Parser)]
#[command(name = "listing-generator")]
#[command(about = "Generate Flippa domain listings")]
#[command(after_help = "Examples:
  # Generate single listing
  listing-generator --domain example.com --price 50

  # Generate listings from CSV
  listing-generator --from-csv domains.csv

  # Create template CSV
  listing-generator --create-template")]
struct Args {
    /// Domain name for single listing
    #[arg(long)]
    domain: Option<String>,

    /// Asking price for single listing
    #[arg(long)]
    price: Option<f64>,

    /// Custom description for single listing
    #[arg(long, default_value = "")]
    description: String,

    /// Generate listings from CSV file
    #[arg(long, value_name = "FILE")]
    from_csv: Option<String>,

    /// Output filename (default: flippa_listings.txt)
    #[arg(short, long)]
    output: Option<String>,

    /// Create a template CSV file
    #[arg(long)]
    create_template: bool,

    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn fail(e: FlipError) -> ! {
    std::process::exit(e.report());
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let file_config = match &args.config {
        Some(path) => Some(FileConfig::from_file(path).with_context(|| format!("loading config '{}'", path))?),
        None => None,
    };

    let mut config = ListingConfig::from_file_config(file_config.as_ref());
    if let Some(output) = &args.output {
        config.output = output.clone();
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::current_dir();

    if args.create_template {
        listing::template_csv()
            .and_then(|data| storage.write_file(LISTING_TEMPLATE_CSV, &data))
            .unwrap_or_else(|e| fail(e));

        println!("✓ Created template CSV: {}", LISTING_TEMPLATE_CSV);
        println!("  Fill in your domains and run:");
        println!("  listing-generator --from-csv {}", LISTING_TEMPLATE_CSV);
        return Ok(());
    }

    if let Some(path) = &args.from_csv {
        let rows = listing::load_batch_rows(path).unwrap_or_else(|e| fail(e));
        let total = rows.len();
        let document = listing::generate_bulk_listings(&config.options, rows);

        storage
            .write_file(&config.output, document.as_bytes())
            .unwrap_or_else(|e| fail(e));
        println!("✓ Generated {} listings in {}", total, config.output);
        return Ok(());
    }

    match (&args.domain, args.price) {
        (Some(domain), Some(price)) => {
            let text =
                listing::generate_listing_with(&config.options, domain, price, &args.description);
            println!("{}", text);

            // 同時存檔
            storage
                .write_file(&config.output, text.as_bytes())
                .unwrap_or_else(|e| fail(e));
            println!("\n✓ Listing saved to {}", config.output);
            Ok(())
        }
        _ => {
            Args::command().print_help()?;
            eprintln!(
                "\nError: Please provide either --domain and --price, --from-csv, or --create-template"
            );
            std::process::exit(1);
        }
    }
}
