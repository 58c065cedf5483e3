use salesdesk::SalesError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetsError>;

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Token exchange failed: {0}")]
    Token(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected Sheets API response: {0}")]
    Response(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SheetsError> for SalesError {
    fn from(e: SheetsError) -> Self {
        match e {
            SheetsError::Config(msg) | SheetsError::Credentials(msg) => {
                SalesError::BackendUnavailable(msg)
            }
            other => SalesError::BackendCall(other.to_string()),
        }
    }
}
