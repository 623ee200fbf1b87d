use crate::domain::model::{OutputFormat, SampleDomainRecord, ScrapeResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn max_price(&self) -> f64;
    fn pages(&self) -> usize;
    fn keyword(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<SampleDomainRecord>>;
    fn transform(&self, data: Vec<SampleDomainRecord>) -> Result<ScrapeResult>;
    /// 回傳寫出的檔案路徑；沒有資料可寫時為 `None`
    fn load(&self, result: &ScrapeResult) -> Result<Option<String>>;
}
