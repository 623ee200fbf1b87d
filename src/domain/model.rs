use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 庫存中的一個域名（尚未售出）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub domain: String,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: f64,
    pub registrar: String,
    pub expiry_date: Option<NaiveDate>,
    pub target_price: f64,
    pub min_price: f64,
    pub listed_on: String,
    pub listing_url: String,
    pub status: String,
    pub notes: String,
}

/// 已售出的域名。淨利、ROI、持有天數都是推導值，不單獨儲存。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub domain: String,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: f64,
    pub sale_date: Option<NaiveDate>,
    pub sale_price: f64,
    pub marketplace: String,
    pub marketplace_fee: f64,
    pub notes: String,
}

impl SaleRecord {
    pub fn net_profit(&self) -> f64 {
        self.sale_price - self.purchase_price - self.marketplace_fee
    }

    /// Percent return on the purchase price; zero when nothing was paid.
    pub fn roi_percent(&self) -> f64 {
        if self.purchase_price > 0.0 {
            self.net_profit() / self.purchase_price * 100.0
        } else {
            0.0
        }
    }

    pub fn days_held(&self) -> Option<i64> {
        match (self.purchase_date, self.sale_date) {
            (Some(bought), Some(sold)) => Some((sold - bought).num_days()),
            _ => None,
        }
    }
}

/// 產生一則上架文案所需的輸入
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    pub domain: String,
    pub price: f64,
    pub description: Option<String>,
}

/// 批次 CSV 的一列：`domain,price,description`，price 為購入價
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    pub domain: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl BatchRow {
    pub const DEFAULT_PURCHASE_PRICE: f64 = 2.0;

    /// 以購入價乘上加價倍數得到要價（四捨五入到分）
    pub fn into_request(self, markup_multiplier: f64) -> ListingRequest {
        let purchase_price = self.price.unwrap_or(Self::DEFAULT_PURCHASE_PRICE);
        ListingRequest {
            domain: self.domain,
            price: round_cents(purchase_price * markup_multiplier),
            description: self.description.filter(|d| !d.is_empty()),
        }
    }
}

/// 合成出來的範例域名資料，欄位順序即 CSV 表頭順序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDomainRecord {
    pub domain: String,
    pub price: f64,
    pub registrar: String,
    pub status: String,
    pub expiry_date: String,
    pub searched_at: NaiveDateTime,
}

impl SampleDomainRecord {
    pub const CSV_HEADER: [&'static str; 6] = [
        "domain",
        "price",
        "registrar",
        "status",
        "expiry_date",
        "searched_at",
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeResult {
    pub records: Vec<SampleDomainRecord>,
    pub discarded: usize,
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(purchase: f64, sale: f64, fee: f64) -> SaleRecord {
        SaleRecord {
            domain: "sold-example.com".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2025, 1, 10),
            purchase_price: purchase,
            sale_date: NaiveDate::from_ymd_opt(2025, 2, 15),
            sale_price: sale,
            marketplace: "Flippa".to_string(),
            marketplace_fee: fee,
            notes: String::new(),
        }
    }

    #[test]
    fn test_net_profit_and_roi() {
        let record = sale(2.99, 55.0, 5.5);
        assert!((record.net_profit() - 46.51).abs() < 1e-9);
        assert!((record.roi_percent() - 46.51 / 2.99 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_roi_is_zero_without_purchase_price() {
        let record = sale(0.0, 40.0, 4.0);
        assert_eq!(record.net_profit(), 36.0);
        assert_eq!(record.roi_percent(), 0.0);
    }

    #[test]
    fn test_roi_for_many_prices() {
        for (p, s, f) in [(1.0, 10.0, 1.0), (8.99, 120.0, 12.0), (50.0, 20.0, 0.0)] {
            let record = sale(p, s, f);
            let expected = 100.0 * (s - p - f) / p;
            assert!((record.roi_percent() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_days_held() {
        assert_eq!(sale(2.99, 55.0, 5.5).days_held(), Some(36));

        let mut missing_sale_date = sale(2.99, 55.0, 5.5);
        missing_sale_date.sale_date = None;
        assert_eq!(missing_sale_date.days_held(), None);
    }

    #[test]
    fn test_batch_row_markup() {
        let row = BatchRow {
            domain: "quick-app.io".to_string(),
            price: Some(8.99),
            description: Some(String::new()),
        };
        let request = row.into_request(20.0);
        assert_eq!(request.price, 179.8);
        assert_eq!(request.description, None);

        // 只有空字串才改用通用說明，空白字元照原樣保留
        let spaces = BatchRow {
            domain: "quick-app.io".to_string(),
            price: Some(8.99),
            description: Some("  ".to_string()),
        };
        assert_eq!(spaces.into_request(20.0).description.as_deref(), Some("  "));

        let default_price = BatchRow {
            domain: "smart-hub.net".to_string(),
            price: None,
            description: None,
        };
        assert_eq!(default_price.into_request(20.0).price, 40.0);
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(1.0 + 0.5 * 3.0 + 0.3 * 1.0), 2.8);
        assert_eq!(round_cents(2.994), 2.99);
    }
}
