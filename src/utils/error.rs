use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlipError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Input file '{path}' not found")]
    MissingInputFile { path: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FlipError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FlipError::ConfigError { .. }
            | FlipError::ConfigValidationError { .. }
            | FlipError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FlipError::MissingInputFile { .. } | FlipError::InvalidInput { .. } => {
                ErrorCategory::Input
            }
            FlipError::IoError(_) | FlipError::XlsxError(_) => ErrorCategory::Output,
            FlipError::CsvError(_) | FlipError::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// 依錯誤類型給出修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FlipError::MissingInputFile { .. } => {
                "Check the input path, or run with --create-template to get a starter CSV"
            }
            FlipError::InvalidInput { .. } | FlipError::CsvError(_) => {
                "Make sure the CSV has a 'domain,price,description' header and numeric prices"
            }
            FlipError::ConfigError { .. } | FlipError::ConfigValidationError { .. } => {
                "Check the TOML config file syntax and section names"
            }
            FlipError::InvalidConfigValueError { .. } => {
                "Fix the reported value on the command line or in the config file"
            }
            FlipError::IoError(_) | FlipError::XlsxError(_) => {
                "Check that the output directory exists and is writable"
            }
            FlipError::SerializationError(_) => "Re-run with --verbose to see the failing record",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FlipError::MissingInputFile { path } => format!("Error: File '{}' not found", path),
            FlipError::InvalidInput { message } => format!("Error reading input: {}", message),
            FlipError::IoError(e) => format!("Could not write output: {}", e),
            FlipError::XlsxError(e) => format!("Could not save workbook: {}", e),
            other => other.to_string(),
        }
    }

    /// 對應到程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// 記錄錯誤、印出提示，回傳該用的退出碼
    pub fn report(&self) -> i32 {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            self,
            self.category(),
            self.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", self.recovery_suggestion());
        eprintln!("❌ {}", self.user_friendly_message());
        self.exit_code()
    }
}

pub type Result<T> = std::result::Result<T, FlipError>;
