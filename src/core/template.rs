//! Domain pricing workbook.
//!
//! Three sheets: `Domain Inventory` and `Sold Domains` hold a styled header,
//! a few sample rows and (for sold domains) pre-filled profit/ROI/days-held
//! formulas; `Summary` aggregates both with cross-sheet formulas. The same
//! aggregates are computed in plain arithmetic by [`PortfolioSummary`] and
//! stored as the formulas' cached results.

use crate::domain::model::{InventoryRecord, SaleRecord};
use crate::utils::error::Result;
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{
    Color, ExcelDateTime, Format, FormatAlign, FormatBorder, Formula, Workbook, Worksheet,
};

pub const INVENTORY_SHEET: &str = "Domain Inventory";
pub const SOLD_SHEET: &str = "Sold Domains";
pub const SUMMARY_SHEET: &str = "Summary";

pub const DEFAULT_FORMULA_ROWS: u32 = 10;
pub const DEFAULT_OUTPUT: &str = "domain_pricing_template.xlsx";

pub const INVENTORY_HEADERS: [&str; 11] = [
    "Domain Name",
    "Purchase Date",
    "Purchase Price ($)",
    "Registrar",
    "Expiry Date",
    "Target Sale Price ($)",
    "Min Acceptable Price ($)",
    "Listed On",
    "Listing URL",
    "Status",
    "Notes",
];

pub const SOLD_HEADERS: [&str; 11] = [
    "Domain Name",
    "Purchase Date",
    "Purchase Price ($)",
    "Sale Date",
    "Sale Price ($)",
    "Marketplace",
    "Marketplace Fee ($)",
    "Net Profit ($)",
    "ROI (%)",
    "Days Held",
    "Notes",
];

const INVENTORY_WIDTHS: [f64; 11] = [25.0, 12.0, 15.0, 12.0, 12.0, 18.0, 20.0, 15.0, 30.0, 12.0, 30.0];
const SOLD_WIDTHS: [f64; 11] = [25.0, 12.0, 15.0, 12.0, 15.0, 15.0, 18.0, 15.0, 12.0, 12.0, 30.0];

const INVENTORY_HEADER_FILL: u32 = 0x366092;
const SOLD_HEADER_FILL: u32 = 0x2E7D32;
const SUMMARY_SECTION_FILL: u32 = 0xFFA726;

const CURRENCY_FORMAT: &str = "$#,##0.00";
const PERCENT_FORMAT: &str = "0.00\"%\"";
const DATE_FORMAT: &str = "yyyy-mm-dd";

pub const INSTRUCTIONS: [&str; 5] = [
    "1. Add purchased domains to the 'Domain Inventory' sheet",
    "2. When a domain is sold, move it to the 'Sold Domains' sheet",
    "3. Formulas will automatically calculate profits and ROI",
    "4. This summary updates automatically based on your data",
    "5. Target prices help you set realistic sale expectations",
];

/// Summary 工作表上各公式的純算術版本
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub total_domains_owned: usize,
    pub total_investment: f64,
    pub target_portfolio_value: f64,
    pub total_domains_sold: usize,
    pub total_revenue: f64,
    pub total_costs: f64,
    pub average_roi: Option<f64>,
    pub average_days_to_sale: Option<f64>,
}

impl PortfolioSummary {
    pub fn from_records(inventory: &[InventoryRecord], sold: &[SaleRecord]) -> Self {
        let days: Vec<i64> = sold.iter().filter_map(SaleRecord::days_held).collect();

        Self {
            total_domains_owned: inventory.len(),
            total_investment: inventory.iter().map(|r| r.purchase_price).sum(),
            target_portfolio_value: inventory.iter().map(|r| r.target_price).sum(),
            total_domains_sold: sold.len(),
            total_revenue: sold.iter().map(|r| r.sale_price).sum(),
            total_costs: sold
                .iter()
                .map(|r| r.purchase_price + r.marketplace_fee)
                .sum(),
            average_roi: average(sold.iter().map(SaleRecord::roi_percent)),
            average_days_to_sale: average(days.iter().map(|d| *d as f64)),
        }
    }

    pub fn potential_profit(&self) -> f64 {
        self.target_portfolio_value - self.total_investment
    }

    pub fn net_profit(&self) -> f64 {
        self.total_revenue - self.total_costs
    }
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

pub fn sample_inventory() -> Vec<InventoryRecord> {
    let row = |domain: &str,
               day: u32,
               purchase: f64,
               target: f64,
               min: f64,
               listed_on: &str,
               url: &str,
               status: &str,
               notes: &str| InventoryRecord {
        domain: domain.to_string(),
        purchase_date: NaiveDate::from_ymd_opt(2025, 1, day),
        purchase_price: purchase,
        registrar: "Namecheap".to_string(),
        expiry_date: NaiveDate::from_ymd_opt(2026, 1, day),
        target_price: target,
        min_price: min,
        listed_on: listed_on.to_string(),
        listing_url: url.to_string(),
        status: status.to_string(),
        notes: notes.to_string(),
    };

    vec![
        row("example-domain.com", 15, 2.99, 50.0, 25.0, "Flippa", "https://flippa.com/...", "Listed", "Tech related"),
        row("quick-startup.io", 16, 8.99, 100.0, 60.0, "Brandpa", "https://brandpa.com/...", "Listed", "Business name"),
        row("smart-hub.net", 17, 1.99, 40.0, 20.0, "", "", "Available", "Short and catchy"),
    ]
}

pub fn sample_sales() -> Vec<SaleRecord> {
    vec![
        SaleRecord {
            domain: "sold-example.com".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2025, 1, 10),
            purchase_price: 2.99,
            sale_date: NaiveDate::from_ymd_opt(2025, 2, 15),
            sale_price: 55.0,
            marketplace: "Flippa".to_string(),
            marketplace_fee: 5.5,
            notes: String::new(),
        },
        SaleRecord {
            domain: "quick-brand.io".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2025, 1, 5),
            purchase_price: 8.99,
            sale_date: NaiveDate::from_ymd_opt(2025, 2, 20),
            sale_price: 120.0,
            marketplace: "Brandpa".to_string(),
            marketplace_fee: 12.0,
            notes: String::new(),
        },
    ]
}

struct CellFormats {
    text: Format,
    currency: Format,
    date: Format,
}

impl CellFormats {
    fn bordered() -> Self {
        let base = Format::new().set_border(FormatBorder::Thin);
        Self {
            text: base.clone(),
            currency: base.clone().set_num_format(CURRENCY_FORMAT),
            date: base.set_num_format(DATE_FORMAT),
        }
    }
}

fn header_format(fill: u32) -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_font_size(11.0)
        .set_background_color(Color::RGB(fill))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
}

/// 建立工作簿；`formula_rows` 為 Sold Domains 預先填入公式的資料列數
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    formula_rows: u32,
    inventory: Vec<InventoryRecord>,
    sold: Vec<SaleRecord>,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self {
            formula_rows: DEFAULT_FORMULA_ROWS,
            inventory: sample_inventory(),
            sold: sample_sales(),
        }
    }

    pub fn with_formula_rows(mut self, formula_rows: u32) -> Self {
        self.formula_rows = formula_rows;
        self
    }

    /// 公式列數至少要蓋住範例資料列
    pub fn formula_rows(&self) -> u32 {
        self.formula_rows.max(self.sold.len() as u32)
    }

    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_records(&self.inventory, &self.sold)
    }

    pub fn build(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();

        setup_inventory_sheet(workbook.add_worksheet(), &self.inventory)?;
        setup_sold_sheet(workbook.add_worksheet(), &self.sold, self.formula_rows())?;
        setup_summary_sheet(workbook.add_worksheet(), &self.summary())?;

        Ok(workbook)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut workbook = self.build()?;
        Ok(workbook.save_to_buffer()?)
    }
}

fn excel_date(date: NaiveDate) -> Result<ExcelDateTime> {
    Ok(ExcelDateTime::from_ymd(
        date.year() as u16,
        date.month() as u8,
        date.day() as u8,
    )?)
}

fn write_text(sheet: &mut Worksheet, row: u32, col: u16, value: &str, format: &Format) -> Result<()> {
    if value.is_empty() {
        sheet.write_blank(row, col, format)?;
    } else {
        sheet.write_string_with_format(row, col, value, format)?;
    }
    Ok(())
}

fn write_date(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    date: Option<NaiveDate>,
    formats: &CellFormats,
) -> Result<()> {
    match date {
        Some(date) => {
            sheet.write_datetime_with_format(row, col, &excel_date(date)?, &formats.date)?;
        }
        None => {
            sheet.write_blank(row, col, &formats.date)?;
        }
    }
    Ok(())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], widths: &[f64], fill: u32) -> Result<()> {
    let format = header_format(fill);
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

fn setup_inventory_sheet(sheet: &mut Worksheet, records: &[InventoryRecord]) -> Result<()> {
    sheet.set_name(INVENTORY_SHEET)?;
    write_headers(sheet, &INVENTORY_HEADERS, &INVENTORY_WIDTHS, INVENTORY_HEADER_FILL)?;

    let formats = CellFormats::bordered();
    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        write_text(sheet, row, 0, &record.domain, &formats.text)?;
        write_date(sheet, row, 1, record.purchase_date, &formats)?;
        sheet.write_number_with_format(row, 2, record.purchase_price, &formats.currency)?;
        write_text(sheet, row, 3, &record.registrar, &formats.text)?;
        write_date(sheet, row, 4, record.expiry_date, &formats)?;
        sheet.write_number_with_format(row, 5, record.target_price, &formats.currency)?;
        sheet.write_number_with_format(row, 6, record.min_price, &formats.currency)?;
        write_text(sheet, row, 7, &record.listed_on, &formats.text)?;
        write_text(sheet, row, 8, &record.listing_url, &formats.text)?;
        write_text(sheet, row, 9, &record.status, &formats.text)?;
        write_text(sheet, row, 10, &record.notes, &formats.text)?;
    }

    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

pub fn net_profit_formula(row: u32) -> String {
    format!("=E{row}-C{row}-G{row}")
}

pub fn roi_formula(row: u32) -> String {
    format!("=IF(C{row}>0,((E{row}-C{row}-G{row})/C{row})*100,0)")
}

pub fn days_held_formula(row: u32) -> String {
    format!("=IF(AND(D{row}<>\"\",B{row}<>\"\"),D{row}-B{row},\"\")")
}

/// 淨利、ROI、持有天數三欄的格式；範例列要加框線
fn sold_formula_formats(bordered: bool) -> [Format; 3] {
    let formats = [
        Format::new().set_num_format(CURRENCY_FORMAT),
        Format::new().set_num_format(PERCENT_FORMAT),
        Format::new().set_num_format("0"),
    ];
    if bordered {
        formats.map(|f| f.set_border(FormatBorder::Thin))
    } else {
        formats
    }
}

fn setup_sold_sheet(sheet: &mut Worksheet, records: &[SaleRecord], formula_rows: u32) -> Result<()> {
    sheet.set_name(SOLD_SHEET)?;
    write_headers(sheet, &SOLD_HEADERS, &SOLD_WIDTHS, SOLD_HEADER_FILL)?;

    let plain = sold_formula_formats(false);
    let bordered = sold_formula_formats(true);

    // 公式列：試算表第 2 列起，Excel 列號從 1 開始
    for index in 0..formula_rows {
        let row = index + 1;
        let excel_row = row + 1;
        let sample = records.get(index as usize);
        let [currency, percent, whole] = if sample.is_some() { &bordered } else { &plain };

        let mut net_profit = Formula::new(net_profit_formula(excel_row));
        let mut roi = Formula::new(roi_formula(excel_row));
        let mut days_held = Formula::new(days_held_formula(excel_row));
        if let Some(record) = sample {
            net_profit = net_profit.set_result(record.net_profit().to_string());
            roi = roi.set_result(record.roi_percent().to_string());
            days_held = days_held.set_result(
                record
                    .days_held()
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            );
        }

        sheet.write_formula_with_format(row, 7, net_profit, currency)?;
        sheet.write_formula_with_format(row, 8, roi, percent)?;
        sheet.write_formula_with_format(row, 9, days_held, whole)?;
    }

    let formats = CellFormats::bordered();
    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        write_text(sheet, row, 0, &record.domain, &formats.text)?;
        write_date(sheet, row, 1, record.purchase_date, &formats)?;
        sheet.write_number_with_format(row, 2, record.purchase_price, &formats.currency)?;
        write_date(sheet, row, 3, record.sale_date, &formats)?;
        sheet.write_number_with_format(row, 4, record.sale_price, &formats.currency)?;
        write_text(sheet, row, 5, &record.marketplace, &formats.text)?;
        sheet.write_number_with_format(row, 6, record.marketplace_fee, &formats.currency)?;
        write_text(sheet, row, 10, &record.notes, &formats.text)?;
    }

    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// Summary 工作表上的一列：標籤、公式、快取結果、數字格式
struct Metric<'a> {
    label: &'a str,
    formula: String,
    result: Option<f64>,
    format: Option<&'a Format>,
}

fn write_metrics(sheet: &mut Worksheet, start_row: u32, metrics: &[Metric<'_>]) -> Result<u32> {
    let mut row = start_row;
    for metric in metrics {
        sheet.write_string(row, 0, metric.label)?;

        let mut formula = Formula::new(&metric.formula);
        if let Some(result) = metric.result {
            formula = formula.set_result(result.to_string());
        }
        match metric.format {
            Some(format) => sheet.write_formula_with_format(row, 1, formula, format)?,
            None => sheet.write_formula(row, 1, formula)?,
        };
        row += 1;
    }
    Ok(row)
}

fn setup_summary_sheet(sheet: &mut Worksheet, summary: &PortfolioSummary) -> Result<()> {
    sheet.set_name(SUMMARY_SHEET)?;

    let title = Format::new().set_bold().set_font_size(14.0);
    let section = Format::new()
        .set_bold()
        .set_font_size(11.0)
        .set_background_color(Color::RGB(SUMMARY_SECTION_FILL));
    let currency = Format::new().set_num_format(CURRENCY_FORMAT);
    let percent = Format::new().set_num_format(PERCENT_FORMAT);
    let whole = Format::new().set_num_format("0");

    sheet.write_string_with_format(0, 0, "Domain Flipping Portfolio Summary", &title)?;

    // 列號固定：B5 = 總投入、B6 = 目標價值、B11 = 營收、B12 = 成本
    sheet.write_string_with_format(2, 0, "Current Inventory", &section)?;
    let inventory_metrics = [
        Metric {
            label: "Total Domains Owned",
            formula: format!("=COUNTA('{INVENTORY_SHEET}'!A:A)-1"),
            result: Some(summary.total_domains_owned as f64),
            format: None,
        },
        Metric {
            label: "Total Investment",
            formula: format!("=SUM('{INVENTORY_SHEET}'!C:C)"),
            result: Some(summary.total_investment),
            format: Some(&currency),
        },
        Metric {
            label: "Target Portfolio Value",
            formula: format!("=SUM('{INVENTORY_SHEET}'!F:F)"),
            result: Some(summary.target_portfolio_value),
            format: Some(&currency),
        },
        Metric {
            label: "Potential Profit",
            formula: "=B6-B5".to_string(),
            result: Some(summary.potential_profit()),
            format: Some(&currency),
        },
    ];
    let row = write_metrics(sheet, 3, &inventory_metrics)?;

    sheet.write_string_with_format(row + 1, 0, "Sales Performance", &section)?;
    let sales_metrics = [
        Metric {
            label: "Total Domains Sold",
            formula: format!("=COUNTA('{SOLD_SHEET}'!A:A)-1"),
            result: Some(summary.total_domains_sold as f64),
            format: None,
        },
        Metric {
            label: "Total Revenue",
            formula: format!("=SUM('{SOLD_SHEET}'!E:E)"),
            result: Some(summary.total_revenue),
            format: Some(&currency),
        },
        Metric {
            label: "Total Costs",
            formula: format!("=SUM('{SOLD_SHEET}'!C:C)+SUM('{SOLD_SHEET}'!G:G)"),
            result: Some(summary.total_costs),
            format: Some(&currency),
        },
        Metric {
            label: "Net Profit",
            formula: "=B11-B12".to_string(),
            result: Some(summary.net_profit()),
            format: Some(&currency),
        },
        Metric {
            label: "Average ROI",
            // 只平均有域名的列，空白公式列的 0 不列入
            formula: format!("=AVERAGEIFS('{SOLD_SHEET}'!I:I,'{SOLD_SHEET}'!A:A,\"<>\")"),
            result: summary.average_roi,
            format: Some(&percent),
        },
        Metric {
            label: "Average Days to Sale",
            formula: format!("=AVERAGE('{SOLD_SHEET}'!J:J)"),
            result: summary.average_days_to_sale,
            format: Some(&whole),
        },
    ];
    let row = write_metrics(sheet, row + 2, &sales_metrics)?;

    sheet.set_column_width(0, 25.0)?;
    sheet.set_column_width(1, 20.0)?;

    let mut row = row + 2;
    sheet.write_string_with_format(row, 0, "Instructions:", &Format::new().set_bold())?;
    row += 1;
    for instruction in INSTRUCTIONS {
        sheet.write_string(row, 0, instruction)?;
        row += 1;
    }

    Ok(())
}
