use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Error reading statement: {0}")]
    CsvError(#[from] csv::Error),

    #[error("No 'Closed Transactions' section found")]
    MissingSection,

    #[error("No trades found for account {0}. Please import a statement.")]
    NoTrades(String),

    #[error("Incorrect password")]
    AccessDenied,

    #[error("Password hashing failed: {0}")]
    HashError(String),

    #[error("Serialization error: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<rusqlite::Error> for JournalError {
    fn from(err: rusqlite::Error) -> Self {
        JournalError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::ParseError(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for JournalError {
    fn from(err: argon2::password_hash::Error) -> Self {
        JournalError::HashError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;
