//! Sample domain data.
//!
//! Nothing here talks to a marketplace: records are synthesized from three
//! small lookup tables and the page offset, so the same arguments always give
//! the same domains and prices.

use crate::domain::model::{round_cents, SampleDomainRecord};
use chrono::{Local, NaiveDateTime};

pub const RECORDS_PER_PAGE: usize = 10;

const SAMPLE_TLDS: [&str; 7] = [".com", ".net", ".io", ".co", ".app", ".dev", ".tech"];
const SAMPLE_PREFIXES: [&str; 8] = [
    "quick", "smart", "fast", "easy", "pro", "mega", "super", "ultra",
];
const SAMPLE_SUFFIXES: [&str; 8] = [
    "hub", "zone", "space", "base", "spot", "point", "link", "cloud",
];

pub const SAMPLE_REGISTRAR: &str = "Namecheap";
pub const SAMPLE_STATUS: &str = "available";
pub const SAMPLE_EXPIRY: &str = "N/A";

/// 只保存價格上限這一項設定
#[derive(Debug, Clone, Copy)]
pub struct DomainScraper {
    max_price: f64,
}

impl DomainScraper {
    pub fn new(max_price: f64) -> Self {
        Self { max_price }
    }

    pub fn max_price(&self) -> f64 {
        self.max_price
    }

    pub fn accepts(&self, record: &SampleDomainRecord) -> bool {
        record.price <= self.max_price
    }

    /// 單頁搜尋：產生該頁的 10 筆資料並丟掉超過上限的
    pub fn search_domains(&self, keyword: &str, page: usize) -> Vec<SampleDomainRecord> {
        tracing::info!("Searching sample marketplace (page {})...", page);

        let domains: Vec<SampleDomainRecord> = generate_sample_domains(keyword, page)
            .into_iter()
            .filter(|d| self.accepts(d))
            .collect();

        tracing::info!("Found {} domains under ${}", domains.len(), self.max_price);
        domains
    }

    /// 依頁序串接第 1..=pages 頁的結果
    pub fn get_expired_domains(&self, pages: usize, keyword: &str) -> Vec<SampleDomainRecord> {
        let mut all_domains = Vec::new();

        for page in 1..=pages {
            all_domains.extend(self.search_domains(keyword, page));
            tracing::info!("Processed page {}/{}", page, pages);
        }

        all_domains
    }
}

pub fn generate_sample_domains(keyword: &str, page: usize) -> Vec<SampleDomainRecord> {
    generate_sample_domains_at(keyword, page, Local::now().naive_local())
}

/// 同 [`generate_sample_domains`]，但時間戳由呼叫端指定
pub fn generate_sample_domains_at(
    keyword: &str,
    page: usize,
    searched_at: NaiveDateTime,
) -> Vec<SampleDomainRecord> {
    let base_index = page.saturating_sub(1).saturating_mul(RECORDS_PER_PAGE);

    (0..RECORDS_PER_PAGE)
        .map(|i| {
            let index = base_index.saturating_add(i);
            let prefix = SAMPLE_PREFIXES[index % SAMPLE_PREFIXES.len()];
            let suffix = SAMPLE_SUFFIXES[index % SAMPLE_SUFFIXES.len()];
            let tld = SAMPLE_TLDS[index % SAMPLE_TLDS.len()];

            let domain = if keyword.is_empty() {
                format!("{}{}{}", prefix, suffix, tld)
            } else {
                format!("{}{}{}", keyword, suffix, tld)
            };

            SampleDomainRecord {
                domain,
                price: sample_price(i, base_index),
                registrar: SAMPLE_REGISTRAR.to_string(),
                status: SAMPLE_STATUS.to_string(),
                expiry_date: SAMPLE_EXPIRY.to_string(),
                searched_at,
            }
        })
        .collect()
}

/// `1.0 + 0.5·i + 0.3·(offset mod 3)`，取到小數兩位
pub fn sample_price(i: usize, base_index: usize) -> f64 {
    round_cents(1.0 + i as f64 * 0.5 + (base_index % 3) as f64 * 0.3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_time() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_first_page_domains() {
        let records = generate_sample_domains_at("", 1, fixed_time());
        assert_eq!(records.len(), RECORDS_PER_PAGE);
        assert_eq!(records[0].domain, "quickhub.com");
        assert_eq!(records[1].domain, "smartzone.net");
        assert_eq!(records[7].domain, "ultracloud.com");
        assert_eq!(records[8].domain, "quickhub.net");
        assert_eq!(records[0].price, 1.0);
        assert_eq!(records[9].price, 5.5);
        assert!(records.iter().all(|r| r.registrar == "Namecheap"
            && r.status == "available"
            && r.expiry_date == "N/A"
            && r.searched_at == fixed_time()));
    }

    #[test]
    fn test_page_offset_shifts_names_and_prices() {
        let records = generate_sample_domains_at("", 2, fixed_time());
        // offset 10: prefix/suffix index 2, tld index 3
        assert_eq!(records[0].domain, "fastspace.co");
        // 10 mod 3 = 1
        assert_eq!(records[0].price, 1.3);
        assert_eq!(records[3].price, 2.8);
    }

    #[test]
    fn test_keyword_replaces_prefix() {
        let records = generate_sample_domains_at("crypto", 1, fixed_time());
        assert_eq!(records[0].domain, "cryptohub.com");
        assert_eq!(records[2].domain, "cryptospace.io");
    }

    #[test]
    fn test_price_ceiling_two_dollars() {
        let scraper = DomainScraper::new(2.0);
        let records = scraper.search_domains("", 1);
        assert_eq!(records.len(), 3);
        assert_eq!(
            records.iter().map(|r| r.price).collect::<Vec<_>>(),
            vec![1.0, 1.5, 2.0]
        );
    }

    #[test]
    fn test_zero_ceiling_is_empty() {
        let scraper = DomainScraper::new(0.0);
        assert!(scraper.get_expired_domains(5, "").is_empty());
    }

    #[test]
    fn test_unbounded_ceiling_keeps_everything() {
        let scraper = DomainScraper::new(f64::INFINITY);
        for pages in [1, 3, 7] {
            assert_eq!(
                scraper.get_expired_domains(pages, "").len(),
                pages * RECORDS_PER_PAGE
            );
        }
    }

    #[test]
    fn test_every_record_respects_ceiling() {
        for ceiling in [0.5, 1.0, 2.3, 3.75, 5.0, 6.1] {
            let scraper = DomainScraper::new(ceiling);
            let records = scraper.get_expired_domains(4, "");
            assert!(records.iter().all(|r| r.price <= ceiling));
        }
    }

    #[test]
    fn test_pages_are_concatenated_in_order() {
        let scraper = DomainScraper::new(f64::INFINITY);
        let records = scraper.get_expired_domains(2, "");
        let first_page = generate_sample_domains_at("", 1, fixed_time());
        let second_page = generate_sample_domains_at("", 2, fixed_time());
        let expected: Vec<&str> = first_page
            .iter()
            .chain(second_page.iter())
            .map(|r| r.domain.as_str())
            .collect();
        let actual: Vec<&str> = records.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let records = generate_sample_domains_at("", usize::MAX, fixed_time());
        assert_eq!(records.len(), RECORDS_PER_PAGE);
        assert!(records.iter().all(|r| r.price > 0.0));
    }
}
