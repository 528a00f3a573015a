use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing column '{0}' (expected: employee, vendor, department, category, date, amount)")]
    MissingColumn(String),

    #[error("Invalid amount {value:?} on line {line}")]
    InvalidAmount { line: u64, value: String },

    #[error("No usable rows in {0}")]
    EmptyDataset(String),

    #[error("No transactions for department: {0}")]
    UnknownDepartment(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SpendError>;
