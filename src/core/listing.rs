//! Marketplace listing text.
//!
//! A listing is a fixed prose template filled in with the domain, the asking
//! price and a handful of feature bullets derived from the domain name.

use crate::domain::model::{BatchRow, ListingRequest};
use crate::utils::error::{FlipError, Result};
use chrono::{Local, NaiveDateTime};
use std::path::Path;

pub const BANNER_WIDTH: usize = 70;
pub const DEFAULT_MARKUP_MULTIPLIER: f64 = 20.0;
pub const DEFAULT_TLD: &str = "com";
pub const SHORT_NAME_MAX_LEN: usize = 8;

pub const DEFAULT_PREMIUM_KEYWORDS: [&str; 9] = [
    "quick", "fast", "smart", "easy", "pro", "tech", "digital", "cloud", "app",
];
pub const DEFAULT_POPULAR_TLDS: [&str; 4] = ["com", "io", "net", "co"];

const FALLBACK_DESCRIPTION: &str = "
Premium domain name available for immediate purchase!

{domain} is a brandable domain name perfect for:
• Technology startups
• Digital services
• SaaS applications
• Online marketplaces
• Mobile apps
• Business ventures

This domain has strong commercial potential and can help establish
a professional online presence for your business.
";

/// 影響特色判斷與批次定價的可調參數
#[derive(Debug, Clone, PartialEq)]
pub struct ListingOptions {
    pub premium_keywords: Vec<String>,
    pub popular_tlds: Vec<String>,
    pub markup_multiplier: f64,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            premium_keywords: DEFAULT_PREMIUM_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            popular_tlds: DEFAULT_POPULAR_TLDS.iter().map(|s| s.to_string()).collect(),
            markup_multiplier: DEFAULT_MARKUP_MULTIPLIER,
        }
    }
}

/// 以最後一個 `.` 切出名稱與副檔名；沒有 `.` 時副檔名視為 `com`
pub fn split_domain(domain: &str) -> (&str, &str) {
    match domain.rsplit_once('.') {
        Some((name, tld)) => (name, tld),
        None => (domain, DEFAULT_TLD),
    }
}

pub fn derive_features(domain: &str, options: &ListingOptions) -> Vec<String> {
    let (name, tld) = split_domain(domain);
    let mut features = Vec::new();

    if name.chars().count() <= SHORT_NAME_MAX_LEN {
        features.push("✓ Short and memorable domain name".to_string());
    }

    if !name.contains('-') {
        features.push("✓ No hyphens - easy to remember and type".to_string());
    }

    let lowered = name.to_lowercase();
    if options
        .premium_keywords
        .iter()
        .any(|keyword| lowered.contains(keyword.as_str()))
    {
        features.push("✓ Contains premium keywords".to_string());
    }

    if options.popular_tlds.iter().any(|popular| popular == tld) {
        features.push(format!("✓ Popular .{} extension", tld));
    }

    features.push("✓ Instant transfer available".to_string());
    features.push("✓ Clear ownership, ready to use".to_string());

    features
}

/// 產生單一域名的上架文案。`description` 為空時使用通用說明。
pub fn generate_listing(domain: &str, price: f64, description: &str) -> String {
    generate_listing_with(&ListingOptions::default(), domain, price, description)
}

pub fn generate_listing_with(
    options: &ListingOptions,
    domain: &str,
    price: f64,
    description: &str,
) -> String {
    let (_, tld) = split_domain(domain);
    let features = derive_features(domain, options);
    let banner = "=".repeat(BANNER_WIDTH);

    let description = if description.is_empty() {
        FALLBACK_DESCRIPTION.replace("{domain}", domain)
    } else {
        description.to_string()
    };

    format!(
        "
{banner}
DOMAIN LISTING: {upper}
{banner}

💰 ASKING PRICE: ${price:.2}

📝 DESCRIPTION:
{description}

✨ KEY FEATURES:
{features}

📊 DOMAIN DETAILS:
• Domain Name: {domain}
• Extension: .{tld}
• Age: Recently registered / Available
• Registrar: Transferrable from major registrars
• Transfer: Fast and secure transfer process

💡 IDEAL FOR:
• Startups looking for a memorable brand name
• Entrepreneurs building their online presence
• Companies seeking a domain upgrade
• Developers launching new projects
• Marketing agencies needing client domains

🔒 TRANSFER PROCESS:
1. Purchase completed securely through Flippa
2. Domain unlocked and auth code provided
3. Transfer initiated to your registrar
4. Ownership transferred within 5-7 days

💵 PRICING:
• Listed Price: ${price:.2}
• Open to reasonable offers
• Fast sale preferred

📞 CONTACT:
• Ready to answer questions
• Flexible on transfer timeline
• Professional and responsive seller

⚡ ACT FAST - Premium domains like this don't last long!

{banner}
",
        upper = domain.to_uppercase(),
        features = features.join("\n"),
    )
}

pub fn generate_request(options: &ListingOptions, request: &ListingRequest) -> String {
    generate_listing_with(
        options,
        &request.domain,
        request.price,
        request.description.as_deref().unwrap_or(""),
    )
}

/// 批次模式：每列價格乘上加價倍數後產生文案，全部串成一份文件
pub fn generate_bulk_listings(options: &ListingOptions, rows: Vec<BatchRow>) -> String {
    render_bulk_listings(options, rows, Local::now().naive_local())
}

pub fn render_bulk_listings(
    options: &ListingOptions,
    rows: Vec<BatchRow>,
    generated_at: NaiveDateTime,
) -> String {
    let mut output = String::new();
    output.push_str("FLIPPA DOMAIN LISTINGS\n");
    output.push_str(&format!(
        "Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    output.push_str(&format!("Total Domains: {}\n", rows.len()));
    output.push_str(&"=".repeat(BANNER_WIDTH));
    output.push_str("\n\n");

    for row in rows {
        let request = row.into_request(options.markup_multiplier);
        tracing::debug!("Generating listing for {} at ${:.2}", request.domain, request.price);
        output.push_str(&generate_request(options, &request));
        output.push_str("\n\n\n");
    }

    output
}

pub fn parse_batch_csv(data: &[u8]) -> Result<Vec<BatchRow>> {
    let mut reader = csv::Reader::from_reader(data);
    let mut rows = Vec::new();

    for (index, row) in reader.deserialize::<BatchRow>().enumerate() {
        let row = row.map_err(|e| FlipError::InvalidInput {
            // 第 1 行是表頭
            message: format!("row {}: {}", index + 2, e),
        })?;
        rows.push(row);
    }

    Ok(rows)
}

pub fn load_batch_rows<P: AsRef<Path>>(path: P) -> Result<Vec<BatchRow>> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => FlipError::MissingInputFile {
            path: path.display().to_string(),
        },
        _ => FlipError::IoError(e),
    })?;

    let rows = parse_batch_csv(&data)?;
    tracing::info!("✓ Loaded {} domains from {}", rows.len(), path.display());
    Ok(rows)
}

/// 批次輸入用的範本 CSV
pub fn template_csv() -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["domain", "price", "description"])?;
    writer.write_record(["example-domain.com", "2.99", "Great for tech startups"])?;
    writer.write_record(["quick-app.io", "8.99", "Perfect for mobile applications"])?;
    writer.write_record(["smart-hub.net", "1.99", ""])?;
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|e| FlipError::IoError(std::io::Error::other(e.to_string())))
}
