use crate::domain::model::OutputFormat;
use crate::utils::error::{FlipError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 三個工具共用的設定檔，每個工具只讀自己的區段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub scraper: Option<ScraperSection>,
    pub listing: Option<ListingSection>,
    pub template: Option<TemplateSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScraperSection {
    pub max_price: Option<f64>,
    pub pages: Option<usize>,
    pub keyword: Option<String>,
    pub format: Option<OutputFormat>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingSection {
    pub markup_multiplier: Option<f64>,
    pub premium_keywords: Option<Vec<String>>,
    pub popular_tlds: Option<Vec<String>>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateSection {
    pub output: Option<String>,
    pub formula_rows: Option<u32>,
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FlipError::MissingInputFile {
                path: path.display().to_string(),
            },
            _ => FlipError::IoError(e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FlipError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FLIP_OUTPUT_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FlipError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_all_sections() {
        let toml_content = r#"
[scraper]
max_price = 3.5
pages = 2
keyword = "crypto"
format = "json"
output = "cheap.json"

[listing]
markup_multiplier = 15.0
premium_keywords = ["flip", "shop"]
popular_tlds = ["com", "xyz"]
output = "listings.txt"

[template]
output = "tracker.xlsx"
formula_rows = 25
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();

        let scraper = config.scraper.unwrap();
        assert_eq!(scraper.max_price, Some(3.5));
        assert_eq!(scraper.pages, Some(2));
        assert_eq!(scraper.format, Some(OutputFormat::Json));

        let listing = config.listing.unwrap();
        assert_eq!(listing.markup_multiplier, Some(15.0));
        assert_eq!(listing.popular_tlds.unwrap(), vec!["com", "xyz"]);

        assert_eq!(config.template.unwrap().formula_rows, Some(25));
    }

    #[test]
    fn test_missing_sections_are_none() {
        let config = FileConfig::from_toml_str("[template]\noutput = \"a.xlsx\"\n").unwrap();
        assert!(config.scraper.is_none());
        assert!(config.listing.is_none());
        assert_eq!(config.template.unwrap().formula_rows, None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FLIP_KIT_TEST_OUTPUT", "from-env.csv");

        let config =
            FileConfig::from_toml_str("[scraper]\noutput = \"${FLIP_KIT_TEST_OUTPUT}\"\n").unwrap();
        assert_eq!(config.scraper.unwrap().output.as_deref(), Some("from-env.csv"));

        std::env::remove_var("FLIP_KIT_TEST_OUTPUT");
    }

    #[test]
    fn test_unset_env_var_is_kept() {
        let config =
            FileConfig::from_toml_str("[scraper]\nkeyword = \"${FLIP_KIT_SURELY_UNSET}\"\n")
                .unwrap();
        assert_eq!(
            config.scraper.unwrap().keyword.as_deref(),
            Some("${FLIP_KIT_SURELY_UNSET}")
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = FileConfig::from_toml_str("[scraper\npages = ").unwrap_err();
        assert!(matches!(err, FlipError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(FileConfig::from_toml_str("[scraper]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[scraper]\npages = 4\n")
            .unwrap();

        let config = FileConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.scraper.unwrap().pages, Some(4));
    }

    #[test]
    fn test_missing_config_file() {
        let err = FileConfig::from_file("/no/such/flip-kit.toml").unwrap_err();
        assert!(matches!(err, FlipError::MissingInputFile { .. }));
    }
}
