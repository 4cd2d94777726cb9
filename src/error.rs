use std::fmt;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ManagerError>;

/// Service error code the account API returns when a contact is not configured.
pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

/// Fault reported by one of the remote AWS services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// Name of the remote operation, e.g. `GetAlternateContact`.
    pub operation: &'static str,
    /// Service error code when the service returned one.
    pub code: Option<String>,
    /// Human readable rendering of the full error chain.
    pub message: String,
}

impl RemoteError {
    pub fn new(operation: &'static str, code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            operation,
            code,
            message: message.into(),
        }
    }

    /// True when the service reported that the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.code.as_deref() == Some(RESOURCE_NOT_FOUND)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} failed ({code}): {}", self.operation, self.message),
            None => write!(f, "{} failed: {}", self.operation, self.message),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Error type covering the failure cases of a contacts management session.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// A remote AWS service returned a fault.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The account identifier is not a 12 digit AWS account ID.
    #[error("AWS account ID {0} is not a valid AWS Account ID")]
    InvalidAccountId(String),

    /// The account identifier is well formed but not part of the organization.
    #[error("AWS account ID {0} does not belong to your Organization")]
    AccountNotInOrganization(String),

    /// The selector resolved to no account at all.
    #[error("no AWS account was selected")]
    EmptyAccountSelection,

    /// Raised when required form fields were left blank.
    #[error("required fields left empty: {}", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),

    /// Uploading a listing to S3 failed.
    #[error("could not export to s3://{bucket}/{key}: {source}")]
    Export {
        bucket: String,
        key: String,
        #[source]
        source: RemoteError,
    },

    /// A request could not be assembled before being sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Terminal interaction failed.
    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when the async runtime driving the SDK cannot be built.
    #[error("failed to start runtime: {0}")]
    Runtime(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ManagerError {
    /// Validation failures abort the whole session rather than a single operation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ManagerError::InvalidAccountId(_)
                | ManagerError::AccountNotInOrganization(_)
                | ManagerError::EmptyAccountSelection
        )
    }
}
